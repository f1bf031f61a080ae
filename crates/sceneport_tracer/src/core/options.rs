use crate::includes::IncludeGuard;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options to control what a resolution pass collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ResolverOptions {
    /// Expand collected assets through the host dependency index
    pub include_sub_assets: bool,
    /// Keep records whose path lies under `Library/`
    pub include_builtin_assets: bool,
    /// Follow `#include` directives of shaders and material shaders
    pub extract_shader_includes: bool,
    /// Drop render-pipeline package content
    pub exclude_render_pipeline: bool,
    pub include_guard: IncludeGuard,
    /// Cut include recursion below this depth; `None` means unbounded
    pub max_include_depth: Option<usize>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            include_sub_assets: true,
            include_builtin_assets: false,
            extract_shader_includes: true,
            exclude_render_pipeline: true,
            include_guard: IncludeGuard::TokenAndSource,
            max_include_depth: None,
        }
    }
}

impl ResolverOptions {
    pub fn with_sub_assets(mut self, enabled: bool) -> Self {
        self.include_sub_assets = enabled;
        self
    }

    pub fn with_builtin_assets(mut self, enabled: bool) -> Self {
        self.include_builtin_assets = enabled;
        self
    }

    pub fn with_shader_includes(mut self, enabled: bool) -> Self {
        self.extract_shader_includes = enabled;
        self
    }

    pub fn with_render_pipeline_exclusion(mut self, enabled: bool) -> Self {
        self.exclude_render_pipeline = enabled;
        self
    }

    pub fn with_include_guard(mut self, guard: IncludeGuard) -> Self {
        self.include_guard = guard;
        self
    }

    pub fn with_max_include_depth(mut self, depth: Option<usize>) -> Self {
        self.max_include_depth = depth;
        self
    }
}
