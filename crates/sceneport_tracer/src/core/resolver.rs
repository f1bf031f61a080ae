//! Dependency resolver
//!
//! One pass: walk the scene, expand every collected object through the
//! registered expanders until nothing new turns up, then turn the collected
//! set into deduplicated records.

use crate::AssetExpander;
use crate::context::{CollectedSet, ResolutionContext};
use crate::core::options::ResolverOptions;
use crate::core::resolution::Resolution;
use crate::expander::ExpandContext;
use crate::filter::ExclusionFilter;
use crate::host::{AssetDatabase, ObjectId, SceneGraph};
use crate::includes::{IncludeExtractor, IncludeScanner};
use crate::paths::AssetPath;
use crate::progress::{NoProgress, Progress, ProgressControl, ProgressSink};
use crate::project::Project;
use crate::record::{AssetRecord, AssetRef};
use log::{debug, info, trace, warn};
use sceneport_error::{ResolverErrorKind, Result, SceneportError};
use std::collections::HashSet;

/// Type name given to include files the host does not model
const INCLUDE_TYPE_NAME: &str = "ShaderInclude";

/// Path prefix of assets built into the editor
const BUILTIN_PREFIX: &str = "Library/";

pub struct DependencyResolver<'h> {
    scene: &'h dyn SceneGraph,
    database: &'h dyn AssetDatabase,
    project: Project,
    expanders: Vec<Box<dyn AssetExpander>>,
    scanner: IncludeScanner,
    options: ResolverOptions,
}

impl<'h> DependencyResolver<'h> {
    pub fn new(
        scene: &'h dyn SceneGraph,
        database: &'h dyn AssetDatabase,
        project: Project,
    ) -> Result<Self> {
        Ok(Self {
            scene,
            database,
            project,
            expanders: Vec::new(),
            scanner: IncludeScanner::new()?,
            options: ResolverOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn register_expander(&mut self, expander: Box<dyn AssetExpander>) {
        self.expanders.push(expander);
    }

    /// Register all built-in expanders
    pub fn with_default_expanders(mut self) -> Self {
        crate::expanders::register_all_expanders(&mut self);
        debug!("Registered expanders: {}", self.expander_names().join(", "));
        self
    }

    pub fn expander_names(&self) -> Vec<&'static str> {
        self.expanders.iter().map(|e| e.expander_name()).collect()
    }

    /// Resolve from the scene's own root objects
    pub fn resolve_scene(&self) -> Result<Resolution> {
        self.resolve(&self.scene.root_objects())
    }

    pub fn resolve(&self, roots: &[ObjectId]) -> Result<Resolution> {
        self.resolve_with_progress(roots, &mut NoProgress)
    }

    /// Resolve from `roots`, reporting each expanded object to `progress`
    pub fn resolve_with_progress(
        &self,
        roots: &[ObjectId],
        progress: &mut dyn ProgressSink,
    ) -> Result<Resolution> {
        if roots.is_empty() {
            return Err(SceneportError::resolver_empty_scene());
        }

        let exclusion = ExclusionFilter::render_pipeline(self.options.exclude_render_pipeline);
        let includes = IncludeExtractor::new(&self.project, &exclusion, &self.scanner)
            .with_database(self.database)
            .with_guard(self.options.include_guard)
            .with_max_depth(self.options.max_include_depth);
        let cx = ExpandContext {
            database: self.database,
            exclusion: &exclusion,
            includes: &includes,
            options: &self.options,
        };

        let mut state = ResolutionContext::new();
        let walker = crate::walker::SceneWalker::new(self.scene);
        walker.walk(roots, &mut state.collected);
        walker.collect_terrains(&mut state.collected);
        info!("Scene walk collected {} object(s)", state.collected.len());

        if self.options.include_sub_assets {
            self.expand_collected(&cx, &mut state, progress)?;
        }

        let (collected, include_index) = state.finish();
        let records = self.build_records(&collected, &exclusion);
        info!(
            "Resolved {} asset(s), {} include edge(s)",
            records.len(),
            include_index.edge_count()
        );
        Ok(Resolution::new(records, include_index))
    }

    /// Expand collected objects in discovery order, including those
    /// discovered along the way
    fn expand_collected(
        &self,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let mut index = 0;
        while let Some(item) = state.collected.get(index).cloned() {
            index += 1;
            let AssetRef::Object(object) = item else {
                continue;
            };
            let Some(path) = self.database.asset_path(object) else {
                continue;
            };
            let path = AssetPath::new(path).into_string();
            if path.is_empty() || cx.exclusion.is_excluded(&path) {
                continue;
            }

            let step = Progress {
                current: index,
                total: state.collected.len(),
                label: &path,
            };
            if progress.on_progress(&step) == ProgressControl::Cancel {
                return Err(SceneportError::resolver(
                    "resolution cancelled",
                    ResolverErrorKind::Cancelled,
                )
                .with_asset_path(path));
            }

            let type_name = self.database.type_name(object).unwrap_or_default();
            for expander in &self.expanders {
                if !expander.can_handle(&type_name) {
                    continue;
                }
                match expander.expand(object, &path, cx, state) {
                    Ok(result) => {
                        let added = state.collected.extend(result.dependencies);
                        if added > 0 || result.include_edges > 0 {
                            trace!(
                                "{} on {path}: +{added} asset(s), +{} include edge(s)",
                                expander.expander_name(),
                                result.include_edges
                            );
                        }
                    }
                    Err(e) => warn!(
                        "{} failed on {path}: {}",
                        expander.expander_name(),
                        e.user_message()
                    ),
                }
            }
        }
        debug!("Expanded {index} collected item(s)");
        Ok(())
    }

    /// Turn collected items into records; the first occurrence of a path wins
    fn build_records(&self, collected: &CollectedSet, exclusion: &ExclusionFilter) -> Vec<AssetRecord> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for item in collected.iter() {
            let (handle, path, type_name) = match item {
                AssetRef::Object(object) => match self.database.asset_path(*object) {
                    Some(path) => (
                        Some(*object),
                        path,
                        self.database.type_name(*object).unwrap_or_default(),
                    ),
                    None => continue,
                },
                AssetRef::File(path) => (None, path.clone(), INCLUDE_TYPE_NAME.to_string()),
            };
            let path = AssetPath::new(path).into_string();
            if path.is_empty() {
                continue;
            }
            if !self.options.include_builtin_assets && path.starts_with(BUILTIN_PREFIX) {
                trace!("Skipping built-in asset {path}");
                continue;
            }
            if exclusion.is_excluded(&path) {
                trace!("Skipping excluded asset {path}");
                continue;
            }
            if !seen.insert(path.clone()) {
                continue;
            }
            let size = self.project.file_len(&path).unwrap_or(0);
            records.push(AssetRecord::new(handle, path, type_name, size));
        }
        records
    }
}
