use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "movieverse",
    version,
    about = "Discover movies from a MovieVerse recommendation backend"
)]
pub struct Cli {
    /// Base URL of the movie backend [env: MOVIEVERSE_API_URL]
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// TOML config file (defaults to ~/.config/movieverse/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// HTTP timeout such as "10s" [env: MOVIEVERSE_HTTP_TIMEOUT]
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Print normalized records as JSON instead of cards
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List popular movies
    Popular,
    /// Show details for one movie id
    Show {
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// Recommend movies similar to a title
    Search {
        #[arg(value_name = "TITLE", required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Pick a random movie
    Random,
    /// Interactive browser: search, open cards, close the overlay
    Browse,
}
