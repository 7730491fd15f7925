//! `vidbridge` CLI - serve the add-on or run the extractors by hand

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vidbridge")]
#[command(about = "Catalog and stream bridge for a video listing site")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/vidbridge/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Target site base URL (overrides config and TARGET_URL)
    #[arg(long, global = true)]
    target_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the add-on HTTP server
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print one catalog page as JSON
    Catalog {
        /// Number of items to skip
        #[arg(short, long, default_value = "0")]
        skip: u32,

        /// Search query
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Resolve streams for an item id and print them as JSON
    Streams {
        /// Item id (as listed by `catalog`)
        id: String,
    },

    /// Encode an item page URL into an id
    Encode {
        /// Absolute item page URL
        url: String,
    },

    /// Decode an id back into its item page URL
    Decode {
        /// Item id
        id: String,
    },

    /// Show generated browser fingerprints
    Fingerprint {
        /// Number of profiles to generate
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let options = cmd::GlobalOptions {
        config: cli.config,
        target_url: cli.target_url,
    };

    match cli.command {
        Commands::Serve { port, bind } => {
            cmd::serve::cmd_serve(&options, port, bind).await?;
        }
        Commands::Catalog { skip, search } => {
            cmd::catalog::cmd_catalog(&options, skip, search.as_deref()).await?;
        }
        Commands::Streams { id } => {
            cmd::streams::cmd_streams(&options, &id).await?;
        }
        Commands::Encode { url } => {
            cmd::id::cmd_encode(&url)?;
        }
        Commands::Decode { id } => {
            cmd::id::cmd_decode(&id)?;
        }
        Commands::Fingerprint { count } => {
            cmd::fingerprint::cmd_fingerprint(count);
        }
    }

    Ok(())
}
