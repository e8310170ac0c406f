//! inscribe — event inscription client.
//!
//! Terminal front end for submitting, watching, confirming, and cancelling
//! event inscriptions held in a timed confirmation window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inscribe_core::config::InscribeConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// inscribe — event inscription client
#[derive(Parser, Debug)]
#[command(name = "inscribe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "inscribe.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a new inscription and hold it pending confirmation
    Submit {
        /// Participant full name
        #[arg(long)]
        name: String,

        /// Participant birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,

        /// Participant gender
        #[arg(long)]
        gender: String,

        /// Responsible person's full name
        #[arg(long)]
        responsible_name: String,

        /// Responsible person's email
        #[arg(long)]
        responsible_email: String,
    },

    /// Show pending inscriptions and their remaining time
    Status {
        /// Cache key (URL-encoded accepted); all pending when omitted
        cache_key: Option<String>,
    },

    /// Run the live countdown until the window lapses
    Watch {
        /// Cache key of the pending inscription
        cache_key: String,
    },

    /// Confirm a pending inscription
    Confirm {
        /// Cache key of the pending inscription
        cache_key: String,
    },

    /// Cancel a pending inscription
    Cancel {
        /// Cache key of the pending inscription
        cache_key: String,
    },

    /// Expire every pending inscription whose window has lapsed
    Sweep,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config =
        InscribeConfig::load_or_default(&cli.config).context("failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(dispatch(cli.command, config))
}

async fn dispatch(command: Commands, config: InscribeConfig) -> Result<()> {
    let app = commands::App::from_config(&config)?;
    match command {
        Commands::Submit {
            name,
            birth_date,
            gender,
            responsible_name,
            responsible_email,
        } => {
            commands::submit::run(
                &app,
                name,
                birth_date,
                gender,
                responsible_name,
                responsible_email,
            )
            .await
        },
        Commands::Status { cache_key } => commands::status::run(&app, cache_key.as_deref()),
        Commands::Watch { cache_key } => commands::watch::run(&app, &cache_key).await,
        Commands::Confirm { cache_key } => commands::confirm::run(&app, &cache_key).await,
        Commands::Cancel { cache_key } => commands::cancel::run(&app, &cache_key).await,
        Commands::Sweep => commands::sweep::run(&app).await,
    }
}
