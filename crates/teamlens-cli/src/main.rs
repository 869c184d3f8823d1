mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "teamlens",
    about = "Team personality directory — serve the API, inspect the roster, probe the model",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Profile store location
        #[arg(long, env = "TEAMLENS_DB")]
        db: Option<PathBuf>,

        /// Config file (default: teamlens.yaml)
        #[arg(long, default_value = "teamlens.yaml")]
        config: PathBuf,
    },

    /// Show the built-in roster
    Roster,

    /// Show the merged directory (built-in roster + persisted overrides)
    Directory {
        /// Profile store location
        #[arg(long, env = "TEAMLENS_DB", default_value = "teamlens.redb")]
        db: PathBuf,
    },

    /// Probe model connectivity with a one-line prompt
    Check {
        /// Config file (default: teamlens.yaml)
        #[arg(long, default_value = "teamlens.yaml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve { port, db, config } => cmd::serve::run(&config, port, db),
        Commands::Roster => cmd::roster::run(cli.json),
        Commands::Directory { db } => cmd::directory::run(&db, cli.json),
        Commands::Check { config } => cmd::check::run(&config),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
