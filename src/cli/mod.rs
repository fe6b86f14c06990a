//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod cache;
pub mod context;
pub mod init;
pub mod listing;
pub mod status;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// venuecache - local caching client for hosted venue reference data
#[derive(Parser, Debug)]
#[command(name = "venuecache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "VENUECACHE_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "VENUECACHE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VENUECACHE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from the API
    #[arg(long, global = true, env = "VENUECACHE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize venuecache configuration
    Init {
        /// Base URL of the hosted venue data API
        #[arg(long)]
        url: String,

        /// API key for the hosted venue data API
        #[arg(long = "api-key")]
        api_key: String,
    },

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// List buildings
    #[command(subcommand)]
    Building(BuildingCommands),

    /// List floors
    #[command(subcommand)]
    Floor(FloorCommands),

    /// List rooms
    #[command(subcommand)]
    Room(RoomCommands),

    /// Manage the local response cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Building subcommands
#[derive(Subcommand, Debug)]
pub enum BuildingCommands {
    /// List all buildings
    List,
}

/// Floor subcommands
#[derive(Subcommand, Debug)]
pub enum FloorCommands {
    /// List floors, optionally scoped to one building
    List {
        /// Only floors of this building ID
        #[arg(long)]
        building: Option<String>,
    },
}

/// Room subcommands
#[derive(Subcommand, Debug)]
pub enum RoomCommands {
    /// List rooms, optionally scoped to one floor
    List {
        /// Only rooms of this floor ID
        #[arg(long)]
        floor: Option<String>,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Remove one cached entry by key
    Invalidate {
        /// Cache key, e.g. "rooms" or "rooms:floor:f-7"
        key: String,
    },
    /// Print cache directory path
    Path,
}
