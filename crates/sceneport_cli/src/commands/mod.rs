pub mod config;
#[cfg(feature = "export")]
pub mod export;
pub mod includes;
pub mod resolve_include;
pub mod scan;

pub use config::{cmd_config_init, cmd_config_show};
#[cfg(feature = "export")]
pub use export::{ExportArgs, cmd_export};
pub use includes::cmd_includes;
pub use resolve_include::cmd_resolve_include;
pub use scan::cmd_scan;

use crate::util::CommandContext;
use log::info;
use sceneport_error::Result;
use sceneport_tracer::{DependencyResolver, LogProgress, Resolution, ResolverOptions, SceneGraph};
use std::path::Path;

/// Load `scene` and run one resolution pass against the context's project
pub fn resolve_scene(scene: &Path, options: ResolverOptions, ctx: &CommandContext) -> Result<Resolution> {
    let host = ctx.load_scene(scene)?;
    info!(
        "Resolving {} ({} objects) against {}",
        scene.display(),
        host.len(),
        ctx.project.root().display()
    );
    let resolver = DependencyResolver::new(&host, &host, ctx.project.clone())?
        .with_options(options)
        .with_default_expanders();
    resolver.resolve_with_progress(&host.root_objects(), &mut LogProgress)
}
