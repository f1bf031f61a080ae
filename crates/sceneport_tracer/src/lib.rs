//! # sceneport_tracer
//!
//! Transitive asset dependency resolution for Unity scenes.
//!
//! Starting from a scene's root objects, the resolver collects every asset
//! the scene references: prefab sources, component references, terrain
//! assets, the host's dependency index, template scripts, and the full
//! `#include` graph of every shader it meets.
//!
//! The host is reached only through the [`SceneGraph`] and [`AssetDatabase`]
//! traits; [`MemoryHost`] implements both in memory.
//!
//! ## Example
//!
// Example usage (not a real test):
// use sceneport_tracer::{DependencyResolver, MemoryHost, Project};
//
// let host: MemoryHost = load_scene()?;
// let resolver = DependencyResolver::new(&host, &host, Project::new("MyGame"))?
//     .with_default_expanders();
// let resolution = resolver.resolve_scene()?;
// for record in &resolution.records {
//     println!("{} {}", record.kind, record.path);
// }
pub mod context;
pub mod core;
pub mod diagnostics;
pub mod expand_result;
pub mod expander;
pub mod expanders;
pub mod filter;
pub mod host;
pub mod includes;
pub mod paths;
pub mod progress;
pub mod project;
pub mod record;
pub mod walker;

pub use context::{CollectedSet, ResolutionContext};
pub use crate::core::{DependencyResolver, KindSummary, Resolution, ResolverOptions};
pub use expand_result::ExpandResult;
pub use expander::{AssetExpander, ExpandContext};
pub use expanders::*;
pub use filter::{ExclusionFilter, RecordFilter};
pub use host::memory::{MemoryHost, MemoryObject};
pub use host::{AssetDatabase, FieldRef, ObjectId, SceneGraph, TerrainInfo};
pub use includes::{IncludeEdge, IncludeGuard, IncludeIndex};
pub use paths::AssetPath;
pub use progress::{LogProgress, NoProgress, Progress, ProgressControl, ProgressSink};
pub use project::Project;
pub use record::{AssetKind, AssetRecord, AssetRef};
pub use walker::SceneWalker;

#[cfg(feature = "serde")]
pub use host::manifest::SceneManifest;

pub use sceneport_error::Result;
