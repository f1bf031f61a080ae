use crate::OutputFormat;
use crate::output_utils::{CommandSummary, OutputUtils, TreeFormatter};
use crate::util::{CommandContext, colorize_kind, format_file_size, highlight_matches};
use log::info;
use sceneport_error::Result;
use sceneport_tracer::{
    AssetKind, AssetRecord, ExclusionFilter, IncludeIndex, KindSummary, RecordFilter, Resolution,
    ResolverOptions,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use text_trees::StringTreeNode;

pub fn cmd_scan(
    scene: PathBuf,
    format: OutputFormat,
    ascii: bool,
    options: ResolverOptions,
    filter: RecordFilter,
    ctx: &CommandContext,
) -> Result<()> {
    let resolution = super::resolve_scene(&scene, options, ctx)?;
    let exclusion = ExclusionFilter::render_pipeline(options.exclude_render_pipeline);
    let records = resolution.filtered(&filter, &exclusion);
    info!(
        "{} of {} record(s) pass the filter",
        records.len(),
        resolution.len()
    );

    let shown = Resolution::new(
        records.iter().map(|r| (*r).clone()).collect(),
        IncludeIndex::new(),
    );
    let summary = shown.summary_by_kind();
    let search = filter.search.as_deref();

    match format {
        OutputFormat::Flat => {
            if records.is_empty() {
                ctx.output.print_info("  No assets found");
            }
            for record in &records {
                ctx.output.print_result_fmt(format_args!(
                    "{:<20} {:>10}  {}",
                    colorize_kind(record.kind),
                    format_file_size(record.size_bytes),
                    highlight_matches(&record.path, search)
                ));
            }
        }
        OutputFormat::Tree => {
            let title = format!(
                "{} ({} assets, {})",
                scene.display(),
                records.len(),
                format_file_size(shown.total_bytes())
            );
            let tree = build_kind_tree(title, &records, &summary, search);
            TreeFormatter::new(ascii).print_tree(&tree, ctx);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "scene": scene,
                "records": records,
                "summary": summary,
                "total_bytes": shown.total_bytes(),
            });
            OutputUtils::try_print_json(&json, ctx, "scan result");
            return Ok(());
        }
    }

    CommandSummary::new("Summary")
        .add_count("Assets", records.len())
        .add_item("Total size", format_file_size(shown.total_bytes()))
        .add_count("Include edges", resolution.includes.edge_count())
        .print(ctx);
    Ok(())
}

/// Records grouped under one node per category
fn build_kind_tree(
    title: String,
    records: &[&AssetRecord],
    summary: &BTreeMap<AssetKind, KindSummary>,
    search: Option<&str>,
) -> StringTreeNode {
    let kind_nodes: Vec<StringTreeNode> = summary
        .iter()
        .map(|(kind, totals)| {
            let label = format!(
                "{} ({}, {})",
                colorize_kind(*kind),
                totals.count,
                format_file_size(totals.total_bytes)
            );
            let leaves: Vec<StringTreeNode> = records
                .iter()
                .filter(|r| r.kind == *kind)
                .map(|r| StringTreeNode::new(highlight_matches(&r.path, search)))
                .collect();
            StringTreeNode::with_child_nodes(label, leaves.into_iter())
        })
        .collect();
    StringTreeNode::with_child_nodes(title, kind_nodes.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tree_groups_records() {
        let records = vec![
            AssetRecord::new(None, "Assets/T/A.png", "Texture2D", 10),
            AssetRecord::new(None, "Assets/S/Lib.hlsl", "ShaderInclude", 5),
            AssetRecord::new(None, "Assets/T/B.png", "Texture2D", 10),
        ];
        let refs: Vec<&AssetRecord> = records.iter().collect();
        let summary = Resolution::new(records.clone(), IncludeIndex::new()).summary_by_kind();
        let tree = build_kind_tree("scene".to_string(), &refs, &summary, None);
        let text = TreeFormatter::new(true).format_tree(&tree).unwrap();
        assert!(text.contains("(2, 20 B)"));
        assert!(text.contains("(1, 5 B)"));
        assert!(text.contains("Assets/T/B.png"));
    }
}
