use crate::OutputFormat;
use crate::output_utils::{CommandSummary, OutputUtils, TreeFormatter};
use crate::util::{CommandContext, colorize_path, colorize_warning};
use log::info;
use sceneport_error::Result;
use sceneport_tracer::diagnostics::find_include_mismatches;
use sceneport_tracer::{IncludeIndex, ResolverOptions};
use std::collections::BTreeSet;
use std::path::PathBuf;
use text_trees::StringTreeNode;

pub fn cmd_includes(
    scene: PathBuf,
    format: OutputFormat,
    ascii: bool,
    options: ResolverOptions,
    show_mismatches: bool,
    ctx: &CommandContext,
) -> Result<()> {
    let resolution = super::resolve_scene(&scene, options, ctx)?;
    let index = &resolution.includes;
    info!("Scene has {} include edge(s)", index.edge_count());

    let mismatches = if show_mismatches {
        find_include_mismatches(index)
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "includes": index,
                "mismatches": mismatches,
            });
            OutputUtils::try_print_json(&json, ctx, "include graph");
            return Ok(());
        }
        _ if index.is_empty() => {
            ctx.output.print_info("  No shader includes found");
            return Ok(());
        }
        OutputFormat::Flat => print_flat(index, ctx),
        OutputFormat::Tree => {
            for root in include_roots(index) {
                let tree = build_include_tree(index, root, &mut Vec::new());
                TreeFormatter::new(ascii).print_tree(&tree, ctx);
            }
        }
    }

    if show_mismatches {
        if mismatches.is_empty() {
            ctx.output
                .print_info("All includes resolve where their including file expects them");
        } else {
            ctx.output.print_info("Includes found away from the expected location:");
            for mismatch in &mismatches {
                ctx.output.print_result_fmt(format_args!(
                    "  {} #include \"{}\": expected {}, found {}",
                    mismatch.edge.source_path,
                    mismatch.edge.include_token,
                    colorize_warning(&mismatch.expected_path),
                    colorize_path(mismatch.actual_path())
                ));
            }
            ctx.output.print_info(
                "Exporting with --multi-location places a copy next to every consumer",
            );
        }
    }

    CommandSummary::new("Summary")
        .add_count("Include edges", index.edge_count())
        .add_count("Including files", index.sources().count())
        .add_count("Included files", index.included_files().count())
        .add_count("Mismatches", mismatches.len())
        .print(ctx);
    Ok(())
}

fn print_flat(index: &IncludeIndex, ctx: &CommandContext) {
    for edge in index.edges() {
        ctx.output.print_result_fmt(format_args!(
            "{} -> {}  (#include \"{}\")",
            edge.source_path,
            colorize_path(&edge.resolved_path),
            edge.include_token
        ));
    }
    ctx.output.print_info("");
    ctx.output.print_info("Usage:");
    for included in index.included_files() {
        let users = index.consumers_of(included);
        ctx.output.print_result_fmt(format_args!(
            "  {} used by {} file(s): {}",
            colorize_path(included),
            users.len(),
            users.join(", ")
        ));
    }
}

/// Including files that nothing includes; every source when all are in cycles
fn include_roots(index: &IncludeIndex) -> Vec<&str> {
    let included: BTreeSet<&str> = index.included_files().collect();
    let roots: Vec<&str> = index.sources().filter(|s| !included.contains(s)).collect();
    if roots.is_empty() {
        index.sources().collect()
    } else {
        roots
    }
}

fn build_include_tree<'a>(
    index: &'a IncludeIndex,
    source: &'a str,
    stack: &mut Vec<&'a str>,
) -> StringTreeNode {
    if stack.contains(&source) {
        return StringTreeNode::new(format!("{source} (cycle)"));
    }
    stack.push(source);
    let children: Vec<StringTreeNode> = index
        .edges_from(source)
        .iter()
        .map(|edge| build_include_tree(index, &edge.resolved_path, stack))
        .collect();
    stack.pop();
    if children.is_empty() {
        StringTreeNode::new(source.to_string())
    } else {
        StringTreeNode::with_child_nodes(source.to_string(), children.into_iter())
    }
}
