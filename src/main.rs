//! venuecache CLI - local caching client for hosted venue reference data

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::{BuildingCommands, CacheCommands, Cli, CommandContext, Commands, FloorCommands, RoomCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Init { url, api_key } => cli::init::run(&url, &api_key, cli.config.as_deref()),
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Version => {
            println!("venuecache version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Building(cmd) => match cmd {
            BuildingCommands::List => {
                let ctx = CommandContext::new(cli.config.as_deref(), cli.no_cache)?;
                cli::listing::buildings(&ctx, cli.format).await
            }
        },
        Commands::Floor(cmd) => match cmd {
            FloorCommands::List { building } => {
                let ctx = CommandContext::new(cli.config.as_deref(), cli.no_cache)?;
                cli::listing::floors(&ctx, building.as_deref(), cli.format).await
            }
        },
        Commands::Room(cmd) => match cmd {
            RoomCommands::List { floor } => {
                let ctx = CommandContext::new(cli.config.as_deref(), cli.no_cache)?;
                cli::listing::rooms(&ctx, floor.as_deref(), cli.format).await
            }
        },
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(cli.format),
            CacheCommands::Clear => cli::cache::clear(cli.format),
            CacheCommands::Invalidate { key } => cli::cache::invalidate(&key, cli.format),
            CacheCommands::Path => cli::cache::path(),
        },
    }
}
