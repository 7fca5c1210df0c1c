//! volviz CLI - Correlated Series Studies and Figures
//!
//! # Commands
//!
//! - `volviz generate` - Write a correlated return and level series as CSV
//! - `volviz fit` - Regress level changes and print the fit
//! - `volviz surface` - Validate a volatility grid and emit the 3-D surface
//! - `volviz render` - Emit every study figure
//! - `volviz check` - Validate and print the effective configuration

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use volviz_cli::commands;
use volviz_cli::{Result, VolvizConfig};

/// Correlated series study CLI
#[derive(Parser)]
#[command(name = "volviz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "volviz.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a correlated series pair and write it as CSV
    Generate {
        /// Random seed (defaults to the configured seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of daily samples
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fit the second series' level changes on the first's
    Fit {
        /// Random seed (defaults to the configured seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate a volatility surface grid and emit its figure
    Surface {
        /// Grid CSV (built-in demo grid when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (defaults to the configured directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Run the full study and emit every figure
    Render {
        /// Random seed (defaults to the configured seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory (defaults to the configured directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(config: &VolvizConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn resolve_dir<'a>(arg: Option<&'a Path>, config: &'a VolvizConfig) -> &'a Path {
    arg.unwrap_or(config.output_dir.as_path())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = VolvizConfig::load_or_default(&cli.config)?.with_env_override();
    if let Commands::Generate {
        samples: Some(samples),
        ..
    } = cli.command
    {
        config.study.series.samples = samples;
    }

    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(path = %cli.config.display(), "Configuration loaded");

    if let Commands::Check = cli.command {
        return commands::check::run(&config);
    }
    config.validate()?;

    match cli.command {
        Commands::Generate { seed, output, .. } => {
            commands::generate::run(&config, seed.unwrap_or(config.seed), output.as_deref())
        }
        Commands::Fit { seed, format } => {
            commands::fit::run(&config, seed.unwrap_or(config.seed), &format)
        }
        Commands::Surface { input, output_dir } => commands::surface::run(
            &config,
            input.as_deref(),
            resolve_dir(output_dir.as_deref(), &config),
        ),
        Commands::Render { seed, output_dir } => commands::render::run(
            &config,
            seed.unwrap_or(config.seed),
            resolve_dir(output_dir.as_deref(), &config),
        ),
        Commands::Check => commands::check::run(&config),
    }
}
