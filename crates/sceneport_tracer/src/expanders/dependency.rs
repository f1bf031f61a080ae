use crate::ExpandResult;
use crate::context::ResolutionContext;
use crate::expander::{AssetExpander, ExpandContext};
use crate::host::ObjectId;
use crate::paths::AssetPath;
use log::trace;
use sceneport_error::Result;

/// Pulls in the host's transitive file dependencies of an asset.
/// Template dependencies are expanded in turn.
pub struct DependencyIndexExpander;

impl DependencyIndexExpander {
    fn expand_path(
        &self,
        path: &str,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
        result: &mut ExpandResult,
    ) {
        if !state.mark_expanded(path) {
            return;
        }
        for dependency in cx.database.dependencies(path) {
            let dependency = AssetPath::new(&dependency);
            if dependency.as_str() == path || cx.exclusion.is_excluded(dependency.as_str()) {
                continue;
            }
            if let Some(object) = cx.database.load_asset(dependency.as_str()) {
                result.add_dependency(object);
            }
            if dependency.has_extension(&["prefab"]) {
                trace!("{path}: descending into template {dependency}");
                self.expand_path(dependency.as_str(), cx, state, result);
            }
        }
    }
}

impl AssetExpander for DependencyIndexExpander {
    fn expand(
        &self,
        _object: ObjectId,
        path: &str,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
    ) -> Result<ExpandResult> {
        let mut result = ExpandResult::empty();
        self.expand_path(path, cx, state, &mut result);
        Ok(result)
    }

    fn can_handle(&self, _type_name: &str) -> bool {
        true
    }

    fn expander_name(&self) -> &'static str {
        "DependencyIndexExpander"
    }
}
