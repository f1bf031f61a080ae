use crate::output_utils::CommandSummary;
use crate::util::{CommandContext, colorize_path, colorize_warning, format_file_size};
use log::{info, warn};
use sceneport_error::{CliErrorKind, Result, SceneportError};
use sceneport_export::{
    ExportExecutor, ExportPlan, ExportSettings, ExportStrategy, PathReconciler,
    analyze_export_layout, broken_includes,
};
use sceneport_tracer::{ExclusionFilter, LogProgress, RecordFilter, ResolverOptions};
use std::path::PathBuf;

/// Export switches; unset values keep the configured export settings
#[derive(Debug, Clone, Default)]
pub struct ExportArgs {
    pub out: Option<PathBuf>,
    pub strategy: Option<ExportStrategy>,
    pub multi_location: bool,
    pub flat_hlsl: bool,
    pub dry_run: bool,
    pub check_layout: bool,
}

impl ExportArgs {
    pub fn apply(&self, mut settings: ExportSettings) -> ExportSettings {
        if let Some(strategy) = self.strategy {
            settings = settings.with_strategy(strategy);
        }
        if self.multi_location {
            settings = settings.with_multi_location_copies(true);
        }
        if self.flat_hlsl {
            settings = settings.with_hlsl_structure(false);
        }
        if let Some(out) = &self.out {
            settings = settings.with_export_root(out);
        }
        settings
    }
}

pub fn cmd_export(
    scene: PathBuf,
    options: ResolverOptions,
    filter: RecordFilter,
    args: ExportArgs,
    ctx: &CommandContext,
) -> Result<()> {
    let settings = args.apply(ctx.config.export.clone());
    let Some(root) = settings.export_root.clone() else {
        return Err(SceneportError::cli(
            "no export folder: pass --out or set export.export_root in the config",
            CliErrorKind::MissingArgument,
        )
        .with_command("export"));
    };

    let resolution = super::resolve_scene(&scene, options, ctx)?;
    let exclusion = ExclusionFilter::render_pipeline(options.exclude_render_pipeline);
    let records = resolution.filtered(&filter, &exclusion);
    if records.is_empty() {
        return Err(SceneportError::export_nothing_to_export());
    }

    let reconciler = PathReconciler::new(&settings, &resolution.includes, ctx.project);
    let plan = reconciler.plan(records.iter().copied(), &root);
    info!(
        "Planned {} copies of {} asset(s) using {} layout",
        plan.copy_count(),
        plan.len(),
        settings.strategy.name()
    );

    if args.check_layout {
        let layouts = analyze_export_layout(&reconciler, &resolution.includes, &root);
        let broken = broken_includes(&layouts);
        for layout in &broken {
            let relative = layout
                .relative
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "?".to_string());
            ctx.output.print_result_fmt(format_args!(
                "{} #include \"{}\" would reach {} but the copy is at {}",
                layout.edge.source_path,
                layout.edge.include_token,
                colorize_warning(&layout.expected.display().to_string()),
                relative
            ));
        }
        if broken.is_empty() {
            ctx.output.print_info("Every include keeps working after export");
        } else {
            warn!("{} include(s) would break with this layout", broken.len());
        }
    }

    if args.dry_run {
        print_plan(&plan, ctx);
        CommandSummary::new("Dry run")
            .add_item("Export root", root.display().to_string())
            .add_count("Assets", plan.len())
            .add_count("Copies", plan.copy_count())
            .add_item(
                "Total size",
                format_file_size(plan.entries.iter().map(|e| e.record.size_bytes).sum()),
            )
            .print(ctx);
        return Ok(());
    }

    let mut progress = LogProgress;
    let report = ExportExecutor::new()
        .with_progress(&mut progress)
        .execute(&plan)?;

    for path in &report.missing {
        ctx.output
            .print_error(&format!("missing source: {}", colorize_warning(path)));
    }
    for failure in &report.failures {
        ctx.output.print_error(&failure.user_message());
    }

    CommandSummary::new("Export")
        .add_item("Export root", root.display().to_string())
        .add_count("Assets exported", report.exported)
        .add_count("Files copied", report.copied)
        .add_count("Sidecars copied", report.sidecars)
        .add_count("Missing", report.missing.len())
        .add_count("Failed", report.failures.len())
        .print(ctx);

    if report.exported == 0 {
        return Err(SceneportError::cli(
            "no asset was exported, see the log for details",
            CliErrorKind::ExecutionFailed,
        )
        .with_command("export"));
    }
    Ok(())
}

fn print_plan(plan: &ExportPlan, ctx: &CommandContext) {
    for entry in &plan.entries {
        for destination in &entry.destinations {
            ctx.output.print_result_fmt(format_args!(
                "{} -> {}",
                entry.record.path,
                colorize_path(&plan.relative_destination(destination).display().to_string())
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_settings() {
        let args = ExportArgs {
            out: Some(PathBuf::from("Export")),
            strategy: Some(ExportStrategy::MirrorTree),
            multi_location: true,
            flat_hlsl: true,
            ..ExportArgs::default()
        };
        let settings = args.apply(ExportSettings::default());
        assert_eq!(settings.strategy, ExportStrategy::MirrorTree);
        assert!(settings.multi_location_copies);
        assert!(!settings.preserve_hlsl_structure);
        assert_eq!(settings.export_root, Some(PathBuf::from("Export")));
    }

    #[test]
    fn test_unset_args_keep_settings() {
        let configured = ExportSettings::default()
            .with_strategy(ExportStrategy::Flat)
            .with_export_root("Saved");
        assert_eq!(ExportArgs::default().apply(configured.clone()), configured);
    }
}
