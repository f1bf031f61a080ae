use clap::Args;
use sceneport_error::{Result, SceneportError};
use sceneport_tracer::{AssetKind, IncludeGuard, RecordFilter, ResolverOptions};
use std::path::PathBuf;

/// Scene manifest input argument
#[derive(Debug, Clone, Args)]
pub struct SceneArgs {
    /// Scene manifest (JSON) describing objects, references and dependencies
    #[arg(index = 1)]
    pub scene: PathBuf,
}

/// Output formatting arguments shared across commands
#[derive(Debug, Clone, Args)]
pub struct OutputFormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = crate::OutputFormat::Flat)]
    pub format: crate::OutputFormat,

    /// Use ASCII characters instead of Unicode box characters for tree output
    #[arg(
        long,
        help = "Use ASCII characters instead of Unicode box characters for tree output"
    )]
    pub ascii: bool,
}

/// Resolution switches; unset flags keep the configured values
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Only collect direct references, skip dependency expansion
    #[arg(long)]
    pub no_sub_assets: bool,

    /// Keep assets stored under Library/
    #[arg(long)]
    pub builtin_assets: bool,

    /// Do not follow shader #include directives
    #[arg(long)]
    pub no_shader_includes: bool,

    /// Keep Universal Render Pipeline package content
    #[arg(long)]
    pub keep_render_pipeline: bool,

    /// Visit each include file once instead of once per (token, source) pair
    #[arg(long)]
    pub once_per_file: bool,

    /// Stop following includes below this depth
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_include_depth: Option<u64>,
}

impl ResolveArgs {
    pub fn apply(&self, mut options: ResolverOptions) -> ResolverOptions {
        if self.no_sub_assets {
            options = options.with_sub_assets(false);
        }
        if self.builtin_assets {
            options = options.with_builtin_assets(true);
        }
        if self.no_shader_includes {
            options = options.with_shader_includes(false);
        }
        if self.keep_render_pipeline {
            options = options.with_render_pipeline_exclusion(false);
        }
        if self.once_per_file {
            options = options.with_include_guard(IncludeGuard::ResolvedFile);
        }
        if let Some(depth) = self.max_include_depth {
            options = options.with_max_include_depth(Some(depth as usize));
        }
        options
    }
}

/// Record filtering arguments
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Case-insensitive text the asset path must contain
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these categories (comma-separated, e.g. "Texture2D,HLSL")
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Hide these categories (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,
}

pub fn parse_kind(label: &str) -> Result<AssetKind> {
    AssetKind::from_label(label.trim()).ok_or_else(|| {
        SceneportError::cli_invalid_arguments(format!("unknown asset category '{label}'"))
    })
}

impl FilterArgs {
    pub fn apply(&self, mut filter: RecordFilter) -> Result<RecordFilter> {
        if let Some(search) = &self.search {
            filter = filter.with_search(search.clone());
        }
        if !self.only.is_empty() {
            let kinds = self
                .only
                .iter()
                .map(|label| parse_kind(label))
                .collect::<Result<Vec<_>>>()?;
            filter = filter.only_kinds(kinds);
        }
        for label in &self.hide {
            filter = filter.without_kind(parse_kind(label)?);
        }
        Ok(filter)
    }
}

/// Execution control arguments
#[derive(Debug, Clone, Args)]
pub struct ExecutionArgs {
    /// Show the plan without copying anything
    #[arg(long, help = "Show the plan without copying anything")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> ResolveArgs {
        ResolveArgs {
            no_sub_assets: false,
            builtin_assets: false,
            no_shader_includes: false,
            keep_render_pipeline: false,
            once_per_file: false,
            max_include_depth: None,
        }
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let configured = ResolverOptions::default().with_builtin_assets(true);
        assert_eq!(no_flags().apply(configured), configured);
    }

    #[test]
    fn test_flags_override() {
        let args = ResolveArgs {
            no_shader_includes: true,
            max_include_depth: Some(3),
            ..no_flags()
        };
        let options = args.apply(ResolverOptions::default());
        assert!(!options.extract_shader_includes);
        assert_eq!(options.max_include_depth, Some(3));
    }

    #[test]
    fn test_filter_kinds() {
        let args = FilterArgs {
            search: Some("water".to_string()),
            only: vec!["hlsl".to_string(), "Shader".to_string()],
            hide: Vec::new(),
        };
        let filter = args.apply(RecordFilter::default()).unwrap();
        assert!(filter.kind_enabled(AssetKind::Hlsl));
        assert!(filter.kind_enabled(AssetKind::Shader));
        assert!(!filter.kind_enabled(AssetKind::Texture2D));
        assert_eq!(filter.search.as_deref(), Some("water"));

        let bad = FilterArgs {
            search: None,
            only: Vec::new(),
            hide: vec!["Nope".to_string()],
        };
        assert!(bad.apply(RecordFilter::default()).unwrap_err().is_cli());
    }
}
