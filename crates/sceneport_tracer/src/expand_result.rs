use crate::record::AssetRef;

#[derive(Debug, Clone, Default)]
pub struct ExpandResult {
    pub dependencies: Vec<AssetRef>,
    /// Include edges recorded while expanding
    pub include_edges: usize,
}

impl ExpandResult {
    /// Create a new ExpandResult with only dependencies
    pub fn new(dependencies: Vec<AssetRef>) -> Self {
        Self {
            dependencies,
            include_edges: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new ExpandResult carrying include edge counts
    pub fn with_include_edges(include_edges: usize) -> Self {
        Self {
            dependencies: Vec::new(),
            include_edges,
        }
    }

    pub fn add_dependency<R: Into<AssetRef>>(&mut self, dependency: R) {
        self.dependencies.push(dependency.into());
    }
}
