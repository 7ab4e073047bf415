use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use cadenza_fetch::config::LoggingConfig;
use cadenza_fetch::{Config, HttpLibrary};

mod commands;
mod render;
mod report;
mod shell;

/// Menu input history, kept next to the cached payloads.
const HISTORY_FILE: &str = "shell_history.txt";

#[derive(Debug, Parser)]
#[command(name = "cadenza", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for the artist registry and cached payloads
    /// (default: ~/.local/share/cadenza/resources)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Start the interactive menu (the default)
    ///
    /// Lists added artists, plots release histories, summarizes Wikipedia
    /// pages, analyzes lyrics, and compares artists with each other or with
    /// this week's charts. Adding an artist needs network access and pauses
    /// for the catalog's rate limit.
    Shell,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with commented defaults
    Init,
    /// Print an example config file
    Example,
}

fn log_level(level: &str) -> twyg::LogLevel {
    match level.to_ascii_lowercase().as_str() {
        "trace" => twyg::LogLevel::Trace,
        "debug" => twyg::LogLevel::Debug,
        "info" => twyg::LogLevel::Info,
        "error" => twyg::LogLevel::Error,
        _ => twyg::LogLevel::Warn,
    }
}

fn setup_logging(logging: &LoggingConfig) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(logging.coloured)
        .level(log_level(&logging.level))
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {e}"))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.cache_dir {
        Some(dir) => Config::load_with_cache_dir(dir)?,
        None => Config::load()?,
    };
    setup_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let library = HttpLibrary::from_config(&config)?;
            let mut terminal = shell::Terminal::new(Some(config.cache_dir.join(HISTORY_FILE)))?;
            let mut shell = shell::Shell::open(&library, &mut terminal, io::stdout())?;
            shell.run().await?;
            drop(shell);
            terminal.save_history();
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Init => commands::config::init_config()?,
            ConfigAction::Example => commands::config::show_example()?,
        },
    }

    Ok(())
}
