//! Per-pass resolution state
//!
//! A `ResolutionContext` is created empty for every pass and consumed when
//! the pass finishes. Nothing in it outlives the pass.

use crate::host::AssetDatabase;
use crate::includes::{IncludeIndex, VisitedSet};
use crate::paths::AssetPath;
use crate::project::Project;
use crate::record::AssetRef;
use std::collections::{HashMap, HashSet};

/// Insertion-ordered set of collected assets
#[derive(Debug, Clone, Default)]
pub struct CollectedSet {
    items: Vec<AssetRef>,
    seen: HashSet<AssetRef>,
}

impl CollectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item; false when it was already present
    pub fn insert<R: Into<AssetRef>>(&mut self, item: R) -> bool {
        let item = item.into();
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn contains(&self, item: &AssetRef) -> bool {
        self.seen.contains(item)
    }

    pub fn get(&self, index: usize) -> Option<&AssetRef> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        self.items.iter()
    }

    pub fn extend<I: IntoIterator<Item = AssetRef>>(&mut self, items: I) -> usize {
        items.into_iter().filter(|item| self.insert(item.clone())).count()
    }
}

#[derive(Debug, Default)]
pub struct ResolutionContext {
    pub collected: CollectedSet,
    pub visited: VisitedSet,
    pub includes: IncludeIndex,
    scanned_files: HashSet<String>,
    expanded_paths: HashSet<String>,
    listings: HashMap<String, Vec<String>>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a file discovered on disk, as the host's object when the
    /// host knows the path
    pub fn collect_file(&mut self, path: &str, database: Option<&dyn AssetDatabase>) -> bool {
        let item = match database.and_then(|db| db.load_asset(path)) {
            Some(id) => AssetRef::Object(id),
            None => AssetRef::File(AssetPath::new(path).into_string()),
        };
        self.collected.insert(item)
    }

    /// Mark a file as scanned for includes; false when it already was
    pub fn mark_scanned(&mut self, path: &str) -> bool {
        self.scanned_files.insert(path.to_string())
    }

    /// Mark an asset path as dependency-expanded; false when it already was
    pub fn mark_expanded(&mut self, path: &str) -> bool {
        self.expanded_paths.insert(path.to_string())
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded_paths.contains(path)
    }

    /// Shader sources under `dir`, listed once per pass
    pub fn shader_sources_under(&mut self, project: &Project, dir: &str) -> &[String] {
        self.listings
            .entry(dir.to_string())
            .or_insert_with(|| project.shader_sources_under(dir))
    }

    /// Split into the collected assets and the include index
    pub fn finish(self) -> (CollectedSet, IncludeIndex) {
        (self.collected, self.includes)
    }
}
