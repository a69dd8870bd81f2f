//! vconf - interactive vehicle configurator.

mod art;
mod render;
mod shell;

use std::io::IsTerminal;
use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vconf_core::Catalog;
use vconf_service::{Configurator, ConfiguratorConfig};
use vconf_storage::FileStorage;
use crate::render::Palette;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "vconf")]
#[command(about = "Interactive vehicle configurator", long_about = None)]
struct Cli {
    /// Directory for saved configurations
    #[arg(long, default_value = "configs")]
    configs_dir: PathBuf,

    /// Directory for generated reports
    #[arg(long, default_value = "reports")]
    reports_dir: PathBuf,

    /// Highest discount percentage accepted
    #[arg(long, default_value = "30")]
    max_discount: f64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Build the log filter from `RUST_LOG` (default `warn`). `--verbose` adds a
/// `debug` directive on top of whatever the environment selected.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

fn init_logging(verbose: bool) {
    // Logs share the terminal with the menu, so keep them quiet and on stderr
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !(0.0..=100.0).contains(&cli.max_discount) {
        anyhow::bail!("--max-discount must be between 0 and 100, got {}", cli.max_discount);
    }

    let storage = FileStorage::new(&cli.configs_dir, &cli.reports_dir);
    info!(
        configs = %storage.configs_dir().display(),
        reports = %storage.reports_dir().display(),
        "Starting session"
    );
    let configurator = Configurator::new(Catalog::standard(), storage)
        .with_config(ConfiguratorConfig { max_discount: cli.max_discount });

    let palette = if cli.no_color {
        Palette::plain()
    } else {
        Palette::new(std::io::stdout().is_terminal())
    };

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(configurator, input, std::io::stdout(), palette);
    shell.run().await
}
