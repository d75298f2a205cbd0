use clap::{ArgAction, Args, Parser, Subcommand};
use countrydb_core::config::{ENV_FEED_URL, ENV_TIMEOUT_SECS};
use countrydb_core::SortKey;
use std::path::PathBuf;

/// CLI arguments for countrydb
#[derive(Debug, Parser)]
#[command(
    name = "countrydb",
    version,
    about = "Browse, filter and sort the countries of the world from the terminal"
)]
pub struct CliArgs {
    /// Read countries from a JSON (or .json.gz) snapshot instead of the API
    #[arg(short = 'i', long = "input", global = true, env = "COUNTRYDB_INPUT")]
    pub input: Option<PathBuf>,

    /// Base URL of the REST Countries API
    #[arg(long = "base-url", global = true, env = ENV_FEED_URL)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout: Option<u64>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded countries
    Stats,

    /// List countries, filtered and sorted
    Countries(ListArgs),

    /// List all regions
    Regions,

    /// List the subregions of a region
    Subregions {
        /// Region name, exactly as listed by `regions` (e.g. Europe)
        region: String,
    },

    /// List all spoken languages
    Languages,

    /// Show one country and its neighbours
    Country {
        /// Common name (e.g. Germany) or alpha-3 code (e.g. DEU)
        key: String,

        /// Look the country and its borders up one by one instead of
        /// loading the whole feed
        #[arg(long)]
        remote: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the common name
    #[arg(short = 's', long = "search", default_value = "")]
    pub search: String,

    #[arg(short = 'r', long = "region")]
    pub region: Option<String>,

    /// Requires --region
    #[arg(long = "subregion", requires = "region")]
    pub subregion: Option<String>,

    /// Language name, case-insensitive (e.g. french)
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    /// none, area-asc, area-desc, population-asc or population-desc
    #[arg(long = "sort", default_value = "none")]
    pub sort: SortKey,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
