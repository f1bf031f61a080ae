use crate::ExpandResult;
use crate::context::ResolutionContext;
use crate::expander::{AssetExpander, ExpandContext};
use crate::host::ObjectId;
use sceneport_error::Result;

/// Adds the script behind every behaviour nested in a template asset
pub struct TemplateScriptExpander;

impl AssetExpander for TemplateScriptExpander {
    fn expand(
        &self,
        _object: ObjectId,
        path: &str,
        cx: &ExpandContext<'_>,
        _state: &mut ResolutionContext,
    ) -> Result<ExpandResult> {
        let Some(main) = cx.database.load_asset(path) else {
            return Ok(ExpandResult::empty());
        };
        if cx.database.type_name(main).as_deref() != Some("GameObject") {
            return Ok(ExpandResult::empty());
        }
        let scripts = cx
            .database
            .behaviour_scripts(main)
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(ExpandResult::new(scripts))
    }

    // The main asset decides, not the collected sub-object
    fn can_handle(&self, _type_name: &str) -> bool {
        true
    }

    fn expander_name(&self) -> &'static str {
        "TemplateScriptExpander"
    }
}
