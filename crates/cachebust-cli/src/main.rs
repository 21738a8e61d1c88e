//! cachebust - create and serve cache-busted static files
//!
//! Subcommands:
//! - `cachebust create` - Hash every configured file and print the pairs
//! - `cachebust pairs` - Print the original -> busted mapping as JSON
//! - `cachebust clean <file>` - Remove stale busted copies of a file
//! - `cachebust embedded <dir>` - List what an embedded archive would hold
//! - `cachebust config` - Show the merged configuration
//! - `cachebust serve` - Create, then serve the static root over HTTP

use std::path::PathBuf;

use anyhow::Result;
use cachebust::StorageMode;
use clap::{Parser, Subcommand};

mod commands;
mod serve;

#[derive(Parser)]
#[command(name = "cachebust")]
#[command(about = "Content-hashed, cache-busted copies of static web assets")]
#[command(version)]
struct Cli {
    /// Config file (replaces ./cachebust.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Length of the hash prefix
    #[arg(long, global = true)]
    hash_length: Option<usize>,

    /// Where busted copies are kept: disk, memory or embedded
    #[arg(long, global = true)]
    storage: Option<StorageMode>,

    /// Development mode: skip busting entirely
    #[arg(long, global = true)]
    disabled: bool,

    /// Log the creation report
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash every configured file and create its busted copy
    Create {
        /// Print the pairs as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the original -> busted filename mapping as JSON
    Pairs,

    /// Remove stale busted copies next to a file
    Clean {
        /// Original file whose stale copies should go
        file: PathBuf,

        /// Hash length the copies were made with (defaults to the config)
        #[arg(short = 'n', long = "length")]
        length: Option<usize>,
    },

    /// Load a directory as an embedded archive and list its files
    Embedded {
        /// Directory to load
        dir: PathBuf,

        /// Archive prefix for the loaded files
        #[arg(short, long, default_value = "website")]
        prefix: String,
    },

    /// Show the merged configuration and where it came from
    Config,

    /// Create busted copies, then serve the static root
    Serve {
        /// HTTP port to bind
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let overrides = commands::Overrides {
        hash_length: cli.hash_length,
        storage: cli.storage,
        disabled: cli.disabled,
        debug: cli.debug,
    };
    let (config, sources) = commands::load_config(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Create { json } => {
            commands::create(&config, json)?;
        }
        Commands::Pairs => {
            commands::create(&config, true)?;
        }
        Commands::Clean { file, length } => {
            commands::clean(&file, length.unwrap_or(config.hash_length))?;
        }
        Commands::Embedded { dir, prefix } => {
            commands::embedded(&dir, &prefix)?;
        }
        Commands::Config => {
            commands::show_config(&config, &sources)?;
        }
        Commands::Serve { port } => {
            serve::run(config, port).await?;
        }
    }

    Ok(())
}
