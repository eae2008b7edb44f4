#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::sync::Arc;
use teamvault_config::Config;
use teamvault_core::{Dex, Library};
use teamvault_roster::{PasteClient, RosterService};
use teamvault_store::StoreManager;
use teamvault_telegram::TeamBot;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod probe;

#[derive(Parser)]
#[command(name = "teamvault")]
#[command(about = "Shared competitive-team library bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot
    Serve {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,

        /// Port for the liveness probe; disabled when absent
        #[arg(short, long)]
        probe_port: Option<u16>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { token, probe_port } => serve(token, probe_port).await?,
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Version => {
            println!("teamvault {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn serve(token: Option<String>, probe_port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load()?;
    info!("Loaded config from ~/teamvault/config.json");

    let token = match token {
        Some(t) => t,
        None if !config.telegram.token.is_empty() => config.telegram.token.clone(),
        None => anyhow::bail!("Bot token not configured. Set \"telegram.token\" in config"),
    };

    let species = teamvault_config::load_species(&config.species_path()?)?;
    let dex = Arc::new(Dex::new(species));
    info!("Dictionary ready: {} species", dex.len());

    let store = Arc::new(StoreManager::new(config.database_path()?).await?);
    let fetcher = Arc::new(PasteClient::new(config.fetch.clone())?);
    let rosters = Arc::new(RosterService::new(fetcher, store.clone(), dex));
    let library = Arc::new(Library::new(store, rosters.clone()));

    if let Some(port) = probe_port {
        tokio::spawn(probe::serve(port));
    }

    let bot = TeamBot::new(token, library, rosters, config)?;

    info!("Bot is running. Press Ctrl+C to stop.");
    bot.run().await?;

    Ok(())
}
