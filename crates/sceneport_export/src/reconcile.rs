//! Destination path reconciliation
//!
//! Maps every resolved record onto one or more paths below an export root.
//! Include files are placed so that the `#include` tokens of the shaders
//! using them still point at them after the copy.

use crate::plan::{ExportPlan, PlannedExport};
use crate::settings::{ExportSettings, ExportStrategy, HLSL_FOLDER};
use log::{debug, trace, warn};
use sceneport_tracer::paths::{AssetPath, clean_token, normalize_lexically};
use sceneport_tracer::{AssetKind, AssetRecord, IncludeIndex, Project};
use std::path::{Path, PathBuf};

/// Replace characters that are not allowed in a folder name
pub fn sanitize_folder_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn join_slashed(root: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

pub struct PathReconciler<'a> {
    settings: &'a ExportSettings,
    includes: &'a IncludeIndex,
    project: &'a Project,
}

impl<'a> PathReconciler<'a> {
    pub fn new(settings: &'a ExportSettings, includes: &'a IncludeIndex, project: &'a Project) -> Self {
        Self {
            settings,
            includes,
            project,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        self.settings
    }

    /// Primary destination of `record` below `root`
    pub fn destination_for(&self, record: &AssetRecord, root: &Path) -> PathBuf {
        let destination = if record.kind == AssetKind::Hlsl && self.settings.preserve_hlsl_structure {
            self.placed_include(record, root, &mut Vec::new())
        } else {
            self.layout_destination(record, root)
        };
        trace!("{} -> {}", record.path, destination.display());
        destination
    }

    /// Every destination of `record`. With multi-location copies on, an
    /// include file gets one extra destination per consuming file, and one
    /// next to every copy of a consumer that is itself an include file.
    pub fn destinations_for(&self, record: &AssetRecord, root: &Path) -> Vec<PathBuf> {
        self.destinations_guarded(record, root, &mut Vec::new())
    }

    fn destinations_guarded(
        &self,
        record: &AssetRecord,
        root: &Path,
        visiting: &mut Vec<String>,
    ) -> Vec<PathBuf> {
        let mut destinations = vec![self.destination_for(record, root)];
        if record.kind != AssetKind::Hlsl
            || !self.settings.multi_location_copies
            || visiting.contains(&record.path)
        {
            return destinations;
        }

        visiting.push(record.path.clone());
        for consumer in self.includes.consumers_of(&record.path) {
            let mut extras = vec![self.hlsl_destination_for(record, root, consumer)];
            if AssetPath::new(consumer).is_include_file() {
                if let Some(token) = self.relative_token(consumer, &record.path) {
                    let consumer_record = Self::consumer_record(consumer);
                    for copy in self.destinations_guarded(&consumer_record, root, visiting) {
                        if let Some(candidate) = Self::beside(&copy, &token, root) {
                            extras.push(candidate);
                        }
                    }
                }
            }
            for extra in extras {
                if !destinations.contains(&extra) {
                    debug!(
                        "extra location for {} (used by {consumer}): {}",
                        record.path,
                        extra.display()
                    );
                    destinations.push(extra);
                }
            }
        }
        visiting.pop();
        destinations
    }

    /// Destination chosen by the layout strategy alone
    pub fn layout_destination(&self, record: &AssetRecord, root: &Path) -> PathBuf {
        let name = record.file_name();
        match self.settings.strategy {
            ExportStrategy::Flat => root.join(name),
            ExportStrategy::MirrorTree => {
                if record.asset_path().is_under_asset_root() {
                    join_slashed(root, &record.path)
                } else {
                    root.join(name)
                }
            }
            ExportStrategy::ByTypeName => {
                let folder = sanitize_folder_name(&record.type_name);
                if folder.is_empty() {
                    root.join(name)
                } else {
                    root.join(folder).join(name)
                }
            }
            ExportStrategy::ByCategory => match self.settings.categories.folder_for(record.kind) {
                Some(folder) => join_slashed(root, folder).join(name),
                None => root.join(name),
            },
        }
    }

    /// Primary destination of a file that includes others. Shaders follow
    /// the layout; include files are placed like any other include.
    pub fn consumer_destination(&self, consumer: &str, root: &Path) -> PathBuf {
        self.consumer_destination_guarded(consumer, root, &mut Vec::new())
    }

    fn consumer_record(consumer: &str) -> AssetRecord {
        let type_name = if AssetPath::new(consumer).is_include_file() {
            "ShaderInclude"
        } else {
            AssetKind::Shader.label()
        };
        AssetRecord::new(None, consumer, type_name, 0)
    }

    fn consumer_destination_guarded(
        &self,
        consumer: &str,
        root: &Path,
        visiting: &mut Vec<String>,
    ) -> PathBuf {
        let record = Self::consumer_record(consumer);
        if record.kind == AssetKind::Hlsl && self.settings.preserve_hlsl_structure {
            self.placed_include(&record, root, visiting)
        } else {
            self.layout_destination(&record, root)
        }
    }

    /// Consumer an include file is placed against: the first shader using it,
    /// else the first include file using it
    fn anchor_consumer(&self, include: &str) -> Option<&str> {
        let consumers = self.includes.consumers_of(include);
        consumers
            .iter()
            .find(|consumer| !AssetPath::new(consumer).is_include_file())
            .or_else(|| consumers.first())
            .map(String::as_str)
    }

    fn placed_include(&self, record: &AssetRecord, root: &Path, visiting: &mut Vec<String>) -> PathBuf {
        if visiting.contains(&record.path) {
            debug!("include cycle through {}, using the default folder", record.path);
            return Self::default_hlsl_destination(record, root);
        }
        visiting.push(record.path.clone());
        let destination = match self.anchor_consumer(&record.path) {
            Some(consumer) => self.include_destination_via(record, root, consumer, visiting),
            None if self.project.is_file(&record.path) => join_slashed(root, &record.path),
            None => Self::default_hlsl_destination(record, root),
        };
        visiting.pop();
        destination
    }

    fn default_hlsl_destination(record: &AssetRecord, root: &Path) -> PathBuf {
        join_slashed(root, HLSL_FOLDER).join(record.file_name())
    }

    /// Cleaned token `consumer` uses for `include`, unless rooted at `Assets/`
    fn relative_token(&self, consumer: &str, include: &str) -> Option<String> {
        let edge = self.includes.edge_between(consumer, include)?;
        let token = clean_token(&edge.include_token);
        (!token.starts_with("Assets/")).then_some(token)
    }

    /// `token` resolved next to `copy`, while that stays below `root`
    fn beside(copy: &Path, token: &str, root: &Path) -> Option<PathBuf> {
        let candidate = normalize_lexically(&join_slashed(copy.parent()?, token));
        candidate
            .starts_with(normalize_lexically(root))
            .then_some(candidate)
    }

    /// Destination of an include file as seen from one consuming file.
    ///
    /// Tried in order: a token rooted at `Assets/`; the token relative to the
    /// consumer's export directory while that stays below `root`; the token's
    /// leading `../` walked against the consumer's source directory while that
    /// stays under `Assets/`; the include file's own location under
    /// `Assets/`; finally the default include folder.
    pub fn hlsl_destination_for(&self, record: &AssetRecord, root: &Path, shader: &str) -> PathBuf {
        self.include_destination_via(record, root, shader, &mut vec![record.path.clone()])
    }

    fn include_destination_via(
        &self,
        record: &AssetRecord,
        root: &Path,
        shader: &str,
        visiting: &mut Vec<String>,
    ) -> PathBuf {
        let Some(edge) = self.includes.edge_between(shader, &record.path) else {
            return Self::default_hlsl_destination(record, root);
        };
        let token = clean_token(&edge.include_token);

        if token.starts_with("Assets/") {
            return join_slashed(root, &token);
        }

        let shader_destination = self.consumer_destination_guarded(shader, root, visiting);
        match Self::beside(&shader_destination, &token, root) {
            Some(candidate) => return candidate,
            None => warn!(
                "include {token} from {shader} leaves the export root ({}), keeping source layout",
                shader_destination.display()
            ),
        }

        let mut dir = AssetPath::new(shader).parent();
        let mut rest = token.as_str();
        while let Some(stripped) = rest.strip_prefix("../") {
            dir = dir.parent();
            rest = stripped;
        }
        let walked = dir.join(rest);
        if walked.as_str().starts_with("Assets/") {
            return join_slashed(root, walked.as_str());
        }

        if record.asset_path().parent().is_under_asset_root() {
            return join_slashed(root, &record.path);
        }

        Self::default_hlsl_destination(record, root)
    }

    /// Plan the copy of every record below `root`
    pub fn plan<'r, I>(&self, records: I, root: &Path) -> ExportPlan
    where
        I: IntoIterator<Item = &'r AssetRecord>,
    {
        let entries = records
            .into_iter()
            .map(|record| PlannedExport {
                source: self.project.absolute(&record.path),
                destinations: self.destinations_for(record, root),
                record: record.clone(),
            })
            .collect();
        ExportPlan::new(root, entries)
    }
}
