//! Copying a planned export to disk
//!
//! Every destination gets the source file and, when present, its `.meta`
//! sidecar. Failures are logged and collected; the batch keeps going and
//! copies already made stay in place.

use crate::plan::{ExportPlan, PlannedExport};
use log::{debug, error, info, warn};
use sceneport_error::{ExportErrorKind, Result, SceneportError};
use sceneport_tracer::{NoProgress, Progress, ProgressControl, ProgressSink};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Path of the sidecar that accompanies `path`
pub fn meta_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".meta");
    PathBuf::from(name)
}

/// Outcome of one export run
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportReport {
    /// Records with at least one successful copy
    pub exported: usize,
    /// Successful copies across all destinations
    pub copied: usize,
    /// `.meta` sidecars copied alongside
    pub sidecars: usize,
    /// Records whose source file was absent
    pub missing: Vec<String>,
    pub failures: Vec<SceneportError>,
    /// True when a progress sink stopped the run early
    pub cancelled: bool,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.failures.is_empty() && !self.cancelled
    }
}

pub struct ExportExecutor<'s> {
    progress: Option<&'s mut dyn ProgressSink>,
}

impl Default for ExportExecutor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> ExportExecutor<'s> {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn with_progress(mut self, sink: &'s mut dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Copy every entry of `plan`. An empty plan is an error; per-file
    /// problems are reported in the returned [`ExportReport`].
    pub fn execute(&mut self, plan: &ExportPlan) -> Result<ExportReport> {
        if plan.is_empty() {
            return Err(SceneportError::export_nothing_to_export());
        }

        let mut fallback = NoProgress;
        let sink: &mut dyn ProgressSink = match self.progress.as_mut() {
            Some(sink) => &mut **sink,
            None => &mut fallback,
        };

        info!(
            "exporting {} asset(s) to {}",
            plan.len(),
            plan.root().display()
        );
        let mut report = ExportReport::default();
        let total = plan.len();
        for (index, entry) in plan.entries.iter().enumerate() {
            let step = Progress {
                current: index + 1,
                total,
                label: &entry.record.path,
            };
            if sink.on_progress(&step) == ProgressControl::Cancel {
                warn!("export cancelled after {index} of {total} asset(s)");
                report.cancelled = true;
                break;
            }
            Self::export_entry(entry, &mut report);
        }

        info!(
            "exported {} asset(s), {} file(s) copied, {} missing, {} failed",
            report.exported,
            report.copied,
            report.missing.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn export_entry(entry: &PlannedExport, report: &mut ExportReport) {
        if !entry.source.is_file() {
            warn!("source file missing: {}", entry.source.display());
            report.missing.push(entry.record.path.clone());
            return;
        }

        let source_meta = meta_path(&entry.source);
        let has_sidecar = source_meta.is_file();
        let mut any_copied = false;
        for destination in &entry.destinations {
            if let Err(e) = Self::copy_file(&entry.source, destination) {
                error!("{}", e.user_message());
                report.failures.push(e);
                continue;
            }
            debug!("{} -> {}", entry.record.path, destination.display());
            any_copied = true;
            report.copied += 1;

            if !has_sidecar {
                continue;
            }
            match Self::copy_file(&source_meta, &meta_path(destination)) {
                Ok(()) => report.sidecars += 1,
                Err(e) => {
                    error!("sidecar of {}: {}", entry.record.path, e.user_message());
                    report.failures.push(e);
                }
            }
        }
        if any_copied {
            report.exported += 1;
        }
    }

    /// Copy `source` to `destination`, creating parent folders. Refuses to
    /// copy a file onto itself.
    fn copy_file(source: &Path, destination: &Path) -> Result<()> {
        if is_same_file(source, destination) {
            return Err(SceneportError::export_destination_is_source(
                source,
                destination,
            ));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SceneportError::export_with_paths(
                    format!("cannot create {}: {e}", parent.display()),
                    ExportErrorKind::DirectoryCreationFailed,
                    source,
                    destination,
                )
            })?;
        }

        fs::copy(source, destination).map_err(|e| {
            SceneportError::export_copy_failed(
                format!("{} -> {}: {e}", source.display(), destination.display()),
                source,
                destination,
            )
        })?;
        Ok(())
    }
}

/// True when both paths exist and name the same file
fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => false,
    }
}
