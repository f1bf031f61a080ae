use crate::config::ExtractorConfig;
use crate::output_utils::OutputUtils;
use crate::util::CommandContext;
use sceneport_error::{ConfigErrorKind, Result, SceneportError};
use std::path::Path;

/// Write a config file holding the default settings
pub fn cmd_config_init(path: &Path, force: bool, ctx: &CommandContext) -> Result<()> {
    if path.exists() && !force {
        return Err(SceneportError::config_with_path(
            "config file already exists (use --force to overwrite)",
            ConfigErrorKind::WriteFailed,
            path,
        ));
    }
    ExtractorConfig::default().save(path)?;
    ctx.output
        .print_info_fmt(format_args!("Wrote default config to {}", path.display()));
    Ok(())
}

/// Print the effective config as JSON
pub fn cmd_config_show(ctx: &CommandContext) -> Result<()> {
    OutputUtils::try_print_json(ctx.config, ctx, "config");
    Ok(())
}
