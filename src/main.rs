mod cli;
mod config;
mod display;
mod error;
mod fetchers;
mod filter;
mod models;
mod normalize;
mod pipeline;
mod writers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crypto-news")]
#[command(
    about = "Aggregate crypto news from microblogs, forums, feeds and repositories",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources and write the data file and listing (default)
    Run {
        /// Path to config file (defaults to crypto-news.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reference date YYYY-MM-DD (defaults to today in the configured timezone)
        #[arg(long)]
        date: Option<String>,

        /// Keep every fetched record instead of only today's
        #[arg(long)]
        all: bool,

        /// Only fetch specific platforms (microblog, forum, feed, repository)
        #[arg(long)]
        only: Option<String>,

        /// Dry run - print to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show commands
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },
}

#[derive(Subcommand)]
enum ShowCommands {
    /// Display the most recent output
    Latest {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize crypto-news.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() {
    // only the working directory, never its parents
    dotenvy::from_path(".env").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crypto_news=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::run::run(None, None, false, None, false),
        Some(Commands::Run {
            config,
            date,
            all,
            only,
            dry_run,
        }) => cli::run::run(config, date, all, only, dry_run),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path } => cli::config::init(path),
        },
        Some(Commands::Show { command }) => match command {
            ShowCommands::Latest { config } => cli::show::latest(config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
