mod cli_args;
mod commands;
mod config;
mod output_utils;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use config::ExtractorConfig;
use log::debug;
use sceneport_error::{CliErrorKind, SceneportError};
use sceneport_tracer::Project;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sceneport", version, about = "Resolve and export the assets a Unity scene depends on")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Unity project root (the folder holding Assets/)
    #[arg(short = 'p', long, global = true, default_value = ".")]
    project: PathBuf,

    /// Config file (defaults to sceneport.json in the project root when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode: suppress explanatory output, show only raw results
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Clone, ValueEnum, Debug)]
enum OutputFormat {
    /// Simple flat list
    Flat,
    /// Hierarchical tree structure
    Tree,
    /// JSON output
    Json,
}

#[cfg(feature = "export")]
#[derive(Clone, Copy, ValueEnum, Debug)]
enum StrategyArg {
    /// Every file directly in the export folder
    Flat,
    /// Keep the Assets/ folder tree
    MirrorTree,
    /// One folder per runtime type name
    ByTypeName,
    /// One folder per asset category
    ByCategory,
}

#[cfg(feature = "export")]
impl From<StrategyArg> for sceneport_export::ExportStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Flat => Self::Flat,
            StrategyArg::MirrorTree => Self::MirrorTree,
            StrategyArg::ByTypeName => Self::ByTypeName,
            StrategyArg::ByCategory => Self::ByCategory,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scene and list every asset it depends on
    Scan {
        #[command(flatten)]
        scene: cli_args::SceneArgs,
        #[command(flatten)]
        format_args: cli_args::OutputFormatArgs,
        #[command(flatten)]
        resolve: cli_args::ResolveArgs,
        #[command(flatten)]
        filter: cli_args::FilterArgs,
    },
    /// Show the shader include graph of a scene
    Includes {
        #[command(flatten)]
        scene: cli_args::SceneArgs,
        #[command(flatten)]
        format_args: cli_args::OutputFormatArgs,
        #[command(flatten)]
        resolve: cli_args::ResolveArgs,
        /// Report includes that were found away from the expected location
        #[arg(long)]
        mismatches: bool,
    },
    /// Copy a scene's assets and their .meta files into an export folder
    #[cfg(feature = "export")]
    Export {
        #[command(flatten)]
        scene: cli_args::SceneArgs,
        /// Export folder (overrides the configured export root)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Folder layout
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Copy include files next to every shader that uses them
        #[arg(long)]
        multi_location: bool,
        /// Lay out include files like any other asset
        #[arg(long)]
        flat_hlsl: bool,
        /// Report includes the chosen layout would break
        #[arg(long)]
        check_layout: bool,
        #[command(flatten)]
        execution: cli_args::ExecutionArgs,
        #[command(flatten)]
        resolve: cli_args::ResolveArgs,
        #[command(flatten)]
        filter: cli_args::FilterArgs,
    },
    /// Resolve the include graph of a single shader file
    ResolveInclude {
        /// Project-relative shader path (e.g. Assets/Shaders/Water.shader)
        #[arg(index = 1)]
        shader: String,
        #[command(flatten)]
        format_args: cli_args::OutputFormatArgs,
        #[command(flatten)]
        resolve: cli_args::ResolveArgs,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}

fn main() {
    if let Err(e) = run_main() {
        if e.is_nothing_to_do() {
            println!("{}", e.user_message());
            return;
        }
        use log::error;
        error!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,  // Default: only warnings and errors
        1 => log::LevelFilter::Info,  // -v: info level
        2 => log::LevelFilter::Debug, // -vv: debug level
        _ => log::LevelFilter::Trace, // -vvv+: trace level (everything)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .format(|buf, record| {
            use std::io::Write;
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31mERROR\x1b[0m", // Red
                log::Level::Warn => "\x1b[33mWARN\x1b[0m",   // Yellow
                log::Level::Info => "\x1b[32mINFO\x1b[0m",   // Green
                log::Level::Debug => "\x1b[36mDEBUG\x1b[0m", // Cyan
                log::Level::Trace => "\x1b[35mTRACE\x1b[0m", // Magenta
            };

            writeln!(buf, "[{}] {}", level_style, record.args())
        })
        .init();
}

fn run_main() -> std::result::Result<(), SceneportError> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.project.is_dir() {
        return Err(invalid_arguments_error(format!(
            "project folder does not exist: {}",
            cli.project.display()
        )));
    }
    let project = Project::new(&cli.project);
    let output = util::OutputHandler::new(cli.quiet);
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config::default_config_path(project.root()));

    // Writing a fresh config must not depend on the old one parsing
    if let Commands::Config {
        action: ConfigCommand::Init { force },
    } = &cli.command
    {
        let defaults = ExtractorConfig::default();
        let ctx = util::CommandContext::new(&project, &defaults, &output);
        return commands::cmd_config_init(&config_path, *force, &ctx);
    }

    let config = ExtractorConfig::locate(cli.config.as_deref(), project.root())?;
    debug!("Effective config: {config:?}");
    let ctx = util::CommandContext::new(&project, &config, &output);

    // Propagate the result; main() maps error to exit code and user message
    match cli.command {
        Commands::Scan {
            scene,
            format_args,
            resolve,
            filter,
        } => commands::cmd_scan(
            scene.scene,
            format_args.format,
            format_args.ascii,
            resolve.apply(config.resolver),
            filter.apply(config.filter.clone())?,
            &ctx,
        ),
        Commands::Includes {
            scene,
            format_args,
            resolve,
            mismatches,
        } => commands::cmd_includes(
            scene.scene,
            format_args.format,
            format_args.ascii,
            resolve.apply(config.resolver),
            mismatches,
            &ctx,
        ),
        #[cfg(feature = "export")]
        Commands::Export {
            scene,
            out,
            strategy,
            multi_location,
            flat_hlsl,
            check_layout,
            execution,
            resolve,
            filter,
        } => {
            let args = commands::ExportArgs {
                out,
                strategy: strategy.map(Into::into),
                multi_location,
                flat_hlsl,
                dry_run: execution.dry_run,
                check_layout,
            };
            commands::cmd_export(
                scene.scene,
                resolve.apply(config.resolver),
                filter.apply(config.filter.clone())?,
                args,
                &ctx,
            )
        }
        Commands::ResolveInclude {
            shader,
            format_args,
            resolve,
        } => commands::cmd_resolve_include(
            &shader,
            format_args.format,
            format_args.ascii,
            resolve.apply(config.resolver),
            &ctx,
        ),
        Commands::Config { action } => match action {
            ConfigCommand::Show => commands::cmd_config_show(&ctx),
            ConfigCommand::Init { .. } => Ok(()),
        },
    }
}

/// Create an invalid arguments error
pub fn invalid_arguments_error<M: Into<String>>(message: M) -> SceneportError {
    SceneportError::cli(message.into(), CliErrorKind::InvalidArguments)
}
