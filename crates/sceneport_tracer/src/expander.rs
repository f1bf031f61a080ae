//! Asset expander trait
//!
//! After the scene walk, every collected object with an asset path is handed
//! to each registered expander that accepts its runtime type. Expanders
//! report further dependencies through [`ExpandResult`] and may record
//! include edges in the pass state.

use crate::ExpandResult;
use crate::context::ResolutionContext;
use crate::core::options::ResolverOptions;
use crate::filter::ExclusionFilter;
use crate::host::{AssetDatabase, ObjectId};
use crate::includes::IncludeExtractor;
use sceneport_error::Result;

/// Shared, read-only inputs of an expansion pass
pub struct ExpandContext<'a> {
    pub database: &'a dyn AssetDatabase,
    pub exclusion: &'a ExclusionFilter,
    pub includes: &'a IncludeExtractor<'a>,
    pub options: &'a ResolverOptions,
}

pub trait AssetExpander {
    /// Expand one collected object stored at `path`
    fn expand(
        &self,
        object: ObjectId,
        path: &str,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
    ) -> Result<ExpandResult>;

    /// Check if this expander applies to objects of the given runtime type
    fn can_handle(&self, type_name: &str) -> bool;

    /// Get a human-readable name for this expander
    fn expander_name(&self) -> &'static str;
}
