use crate::ExpandResult;
use crate::context::ResolutionContext;
use crate::expander::{AssetExpander, ExpandContext};
use crate::host::ObjectId;
use sceneport_error::Result;

/// Follows the include graph of shader and compute-shader sources
pub struct ShaderIncludeExpander;

impl AssetExpander for ShaderIncludeExpander {
    fn expand(
        &self,
        _object: ObjectId,
        path: &str,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
    ) -> Result<ExpandResult> {
        if !cx.options.extract_shader_includes {
            return Ok(ExpandResult::empty());
        }
        let edges = cx.includes.extract(path, state);
        Ok(ExpandResult::with_include_edges(edges))
    }

    fn can_handle(&self, type_name: &str) -> bool {
        matches!(type_name, "Shader" | "ComputeShader")
    }

    fn expander_name(&self) -> &'static str {
        "ShaderIncludeExpander"
    }
}

/// Follows the include graph of the shader assigned to a material
pub struct MaterialShaderExpander;

impl AssetExpander for MaterialShaderExpander {
    fn expand(
        &self,
        object: ObjectId,
        _path: &str,
        cx: &ExpandContext<'_>,
        state: &mut ResolutionContext,
    ) -> Result<ExpandResult> {
        if !cx.options.extract_shader_includes {
            return Ok(ExpandResult::empty());
        }
        let shader_path = cx
            .database
            .material_shader(object)
            .and_then(|shader| cx.database.asset_path(shader));
        match shader_path {
            Some(shader_path) => {
                let edges = cx.includes.extract(&shader_path, state);
                Ok(ExpandResult::with_include_edges(edges))
            }
            None => Ok(ExpandResult::empty()),
        }
    }

    fn can_handle(&self, type_name: &str) -> bool {
        type_name == "Material"
    }

    fn expander_name(&self) -> &'static str {
        "MaterialShaderExpander"
    }
}
