//! Built-in asset expanders

pub mod dependency;
pub mod shader;
pub mod template;

pub use dependency::DependencyIndexExpander;
pub use shader::{MaterialShaderExpander, ShaderIncludeExpander};
pub use template::TemplateScriptExpander;

use crate::core::resolver::DependencyResolver;

/// Register every built-in expander on a resolver
pub fn register_all_expanders(resolver: &mut DependencyResolver<'_>) {
    register_dependency_expanders(resolver);
    register_shader_expanders(resolver);
}

/// Host dependency index and template scripts
pub fn register_dependency_expanders(resolver: &mut DependencyResolver<'_>) {
    resolver.register_expander(Box::new(DependencyIndexExpander));
    resolver.register_expander(Box::new(TemplateScriptExpander));
}

/// Shader include graphs, directly and through materials
pub fn register_shader_expanders(resolver: &mut DependencyResolver<'_>) {
    resolver.register_expander(Box::new(ShaderIncludeExpander));
    resolver.register_expander(Box::new(MaterialShaderExpander));
}
