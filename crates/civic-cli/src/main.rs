//! civic - Query the municipal issue dashboard from the shell
//!
//! Reads the same seed data as the TUI. Nothing is written back.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "civic")]
#[command(about = "Municipal issue dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to $CIVIC_CONFIG, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List issues matching the search and filters
    Issues {
        /// Case-insensitive text found in type, location or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status filter (all, new, progress, resolved)
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter (all, urgent, medium, low)
        #[arg(short, long, default_value = "all")]
        priority: String,
    },

    /// List generated reports
    Reports,

    /// Show overview statistics
    Overview,

    /// List issue categories
    Categories,

    /// Print the badge style tag for a value
    Style {
        /// Badge kind (status, priority, report)
        kind: String,

        /// Value to look up
        value: String,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Print a commented default config file
    Init,
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Issues {
            search,
            status,
            priority,
        } => commands::issues(config, &search, &status, &priority, cli.json),
        Commands::Reports => commands::reports(config, cli.json),
        Commands::Overview => commands::overview(config, cli.json),
        Commands::Categories => commands::categories(config, cli.json),
        Commands::Style { kind, value } => commands::style(&kind, &value, cli.json),
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => commands::config_show(config, cli.json),
            Some(ConfigCommands::Path) => commands::config_path(config),
            Some(ConfigCommands::Init) => commands::config_init(),
        },
    }
}
