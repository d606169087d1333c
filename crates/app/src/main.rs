mod config;
mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use services::{AppServices, Clock};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigFile, Overrides};
use crate::shell::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "topic-of-the-day",
    version,
    about = "Curated daily learning topics with notes and progress tracking"
)]
struct Cli {
    /// TOML config file.
    #[arg(long, env = "TOPICS_CONFIG")]
    config: Option<PathBuf>,

    /// Category to include; repeat the flag or pass a comma-separated list.
    #[arg(long = "category", env = "TOPICS_CATEGORIES", value_delimiter = ',')]
    categories: Vec<String>,

    /// Topics per selected category (1-5).
    #[arg(long, env = "TOPICS_PER_CATEGORY")]
    per_category: Option<u32>,

    /// Keep today's pick stable for the whole day.
    #[arg(long, env = "TOPICS_STABLE")]
    stable: Option<bool>,

    /// Shuffle on every render instead of keeping the day's pick.
    #[arg(long)]
    no_stable: bool,

    /// TOML catalog file replacing the built-in topics.
    #[arg(long, env = "TOPICS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            categories: self.categories.clone(),
            per_category: self.per_category,
            stable: if self.no_stable {
                Some(false)
            } else {
                self.stable
            },
            catalog: self.catalog.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = AppConfig::resolve(file, cli.overrides()).context("invalid configuration")?;
    info!(
        categories = config.settings.categories().len(),
        per_category = config.settings.per_category(),
        stable = config.settings.stable(),
        topics = config.catalog.topic_count(),
        "starting session"
    );

    // Progress lives exactly as long as this value.
    let mut app = AppServices::in_memory(Clock::default_clock(), config.catalog);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Shell::new(&mut app, config.settings)
        .run(stdin.lock(), &mut stdout.lock())
        .context("terminal I/O failed")?;

    info!(summary = ?app.progress().summary(), "session ended");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
