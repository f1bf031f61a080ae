use crate::OutputFormat;
use crate::output_utils::{CommandSummary, OutputUtils, TreeFormatter};
use crate::util::{CommandContext, colorize_path};
use log::{info, warn};
use sceneport_error::{ResolverErrorKind, Result, SceneportError};
use sceneport_tracer::ResolverOptions;
use sceneport_tracer::diagnostics::resolve_shader_includes;
use text_trees::StringTreeNode;

/// Resolve the include graph of one shader, without a scene
pub fn cmd_resolve_include(
    shader: &str,
    format: OutputFormat,
    ascii: bool,
    options: ResolverOptions,
    ctx: &CommandContext,
) -> Result<()> {
    if !ctx.project.is_file(shader) {
        return Err(SceneportError::resolver(
            format!("shader not found in project: {shader}"),
            ResolverErrorKind::InvalidPath,
        )
        .with_asset_path(shader));
    }

    let report = resolve_shader_includes(ctx.project, shader, &options)?;
    info!("{} include file(s) reached from {shader}", report.files.len());
    if report.files.is_empty() {
        warn!("No includes resolved for {shader}");
    }

    match format {
        OutputFormat::Json => {
            OutputUtils::try_print_json(&report, ctx, "include report");
            return Ok(());
        }
        OutputFormat::Flat => {
            for file in &report.files {
                ctx.output.print_result(&colorize_path(file));
            }
        }
        OutputFormat::Tree => {
            let children: Vec<StringTreeNode> = report
                .includes
                .edges()
                .map(|edge| {
                    StringTreeNode::new(format!(
                        "{} -> {} (#include \"{}\")",
                        edge.source_path, edge.resolved_path, edge.include_token
                    ))
                })
                .collect();
            let tree = StringTreeNode::with_child_nodes(report.shader.clone(), children.into_iter());
            TreeFormatter::new(ascii).print_tree(&tree, ctx);
        }
    }

    CommandSummary::new("Summary")
        .add_item("Shader", report.shader.clone())
        .add_count("Include files", report.files.len())
        .add_count("Include edges", report.includes.edge_count())
        .print(ctx);
    Ok(())
}
