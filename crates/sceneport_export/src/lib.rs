//! # sceneport_export
//!
//! Lays out resolved scene assets below an export folder and copies them,
//! together with their `.meta` sidecars.
//!
//! [`PathReconciler`] turns records into an [`ExportPlan`] according to
//! [`ExportSettings`]; [`ExportExecutor`] performs the copies and reports
//! per-file results.
//!
//! ## Example
//!
// Example usage (not a real test):
// use sceneport_export::{ExportExecutor, ExportSettings, PathReconciler};
//
// let settings = ExportSettings::default();
// let reconciler = PathReconciler::new(&settings, &resolution.includes, &project);
// let plan = reconciler.plan(&resolution.records, Path::new("Export"));
// let report = ExportExecutor::new().execute(&plan)?;
// println!("{} files copied", report.copied);
pub mod diagnostics;
pub mod executor;
pub mod plan;
pub mod reconcile;
pub mod settings;

pub use diagnostics::{IncludeLayout, analyze_export_layout, broken_includes};
pub use executor::{ExportExecutor, ExportReport, meta_path};
pub use plan::{ExportPlan, PlannedExport};
pub use reconcile::{PathReconciler, sanitize_folder_name};
pub use settings::{CategoryFolders, CategorySetting, ExportSettings, ExportStrategy, HLSL_FOLDER};

pub use sceneport_error::Result;
