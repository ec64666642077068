//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod init;
mod records;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "dbrsettings")]
#[command(about = "Console for the dbrsettings ingestion configuration table")]
#[command(version)]
pub struct Cli {
    /// Data directory or database file (directory uses dbrsettings.db inside)
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths against the current directory instead of the config file
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the web console
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default from config, else 127.0.0.1:3040)
        bind: Option<String>,
    },

    /// List configuration records
    Ls {
        /// Only records with this System
        #[arg(long)]
        system: Option<String>,
        /// Only records with this Domain
        #[arg(long)]
        domain: Option<String>,
        /// Only records with this SourceType
        #[arg(long)]
        source_type: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one record with its JSON fields pretty-printed
    Show {
        /// Record Id
        id: i64,
    },

    /// Delete a record
    Rm {
        /// Record Id
        id: i64,
        /// Confirm the deletion
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        data: cli.data,
    };
    let (settings, config) = load_settings_with_options(options).await;
    match &config.source_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Ls {
            system,
            domain,
            source_type,
            json,
        } => {
            records::cmd_ls(
                &settings,
                system.as_deref(),
                domain.as_deref(),
                source_type.as_deref(),
                json,
            )
            .await
        }
        Commands::Show { id } => records::cmd_show(&settings, id).await,
        Commands::Rm { id, yes } => records::cmd_rm(&settings, id, yes).await,
    }
}
