//! countrydb: the country directory on the command line
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ countrydb stats
//!
//! - List countries, filtered and sorted
//!   $ countrydb countries --region Europe --language french --sort population-desc
//!   $ countrydb countries --search land --json
//!
//! - List filter options
//!   $ countrydb regions
//!   $ countrydb subregions Europe
//!   $ countrydb languages
//!
//! - Show a country with its bordering countries (name or alpha-3 code)
//!   $ countrydb country Germany
//!   $ countrydb country fra --remote
//!
//! Data source
//! -----------
//!
//! By default the REST Countries API is queried once per run. Use
//! `--input <path>` to read a JSON snapshot instead, and `--base-url` /
//! `--timeout` (or `COUNTRYDB_FEED_URL` / `COUNTRYDB_TIMEOUT_SECS`) to point
//! at a mirror. `RUST_LOG` overrides the `-v` log level.
mod args;

use crate::args::{CliArgs, Commands, ListArgs};
use anyhow::{bail, Context};
use clap::Parser;
use countrydb_core::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let feed = open_feed(&args)?;

    match args.command {
        Commands::Stats => {
            let view = load(feed.as_ref())?;
            let stats = view.db().stats();
            println!("Country statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Regions: {}", stats.regions);
            println!("  Subregions: {}", stats.subregions);
            println!("  Languages: {}", stats.languages);
        }

        Commands::Countries(list) => {
            let mut view = load(feed.as_ref())?;
            apply_list_args(&mut view, &list)?;
            let results = view.results();

            if list.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No countries match.");
            } else {
                for c in &results {
                    println!(
                        "{:<32} {}  {:<10} {:>14} {:>14.0}",
                        c.common_name(),
                        c.alpha3_code(),
                        c.region(),
                        c.population(),
                        c.area()
                    );
                }
            }
        }

        Commands::Regions => {
            for region in load(feed.as_ref())?.regions() {
                println!("{region}");
            }
        }

        Commands::Subregions { region } => {
            let mut view = load(feed.as_ref())?;
            view.set_region(Some(region.clone()));
            let subregions = view.subregions();
            if subregions.is_empty() {
                println!("No subregions for: {region}");
            }
            for subregion in subregions {
                println!("{subregion}");
            }
        }

        Commands::Languages => {
            for language in load(feed.as_ref())?.languages() {
                println!("{language}");
            }
        }

        Commands::Country { key, remote, json } => {
            let mut detail = DetailView::new();
            let view;
            let source = if remote {
                BorderSource::Remote(feed.as_ref())
            } else {
                view = load(feed.as_ref())?;
                BorderSource::Resident(view.db())
            };

            let state = detail.open(&key, source);
            if json {
                println!("{}", serde_json::to_string_pretty(state)?);
                return Ok(());
            }

            match state {
                DetailState::Ready { country, borders } => print_detail(country, borders),
                DetailState::NotFound { key } => bail!("No country found for: {key}"),
                DetailState::Failed { message } => bail!("{message}"),
                DetailState::Idle | DetailState::Loading { .. } => {}
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,countrydb={level},countrydb_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn feed_config(args: &CliArgs) -> FeedConfig {
    let mut config = FeedConfig::from_env();
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

fn open_feed(args: &CliArgs) -> anyhow::Result<Box<dyn CountryFeed>> {
    if let Some(path) = &args.input {
        return Ok(Box::new(FileFeed::new(path)));
    }

    #[cfg(feature = "http")]
    {
        let config = feed_config(args);
        tracing::debug!(base_url = %config.base_url, "using HTTP feed");
        let feed = HttpFeed::new(config).context("cannot create HTTP client")?;
        Ok(Box::new(feed))
    }

    #[cfg(not(feature = "http"))]
    {
        let _ = feed_config(args);
        bail!("built without the 'http' feature; pass --input <file>")
    }
}

/// Load the whole feed; a failed load ends the run with its message.
fn load(feed: &dyn CountryFeed) -> anyhow::Result<DirectoryView> {
    let view = DirectoryView::load(feed);
    if let LoadState::Failed(message) = view.load_state() {
        bail!("{message}");
    }
    Ok(view)
}

fn apply_list_args(view: &mut DirectoryView, list: &ListArgs) -> anyhow::Result<()> {
    view.set_search_text(list.search.as_str());
    view.set_region(list.region.clone());
    view.set_subregion(list.subregion.clone()).with_context(|| {
        format!(
            "known subregions of {}: {}",
            list.region.as_deref().unwrap_or("-"),
            view.subregions().join(", ")
        )
    })?;
    view.set_language(list.language.clone());
    view.set_sort_key(list.sort);
    Ok(())
}

fn print_detail(country: &CountryRecord, borders: &BorderResolution) {
    println!("Country: {}", country.common_name());
    println!("Official name: {}", country.official_name());
    println!("Code: {}", country.alpha3_code());
    println!("Region: {}", country.region());
    println!("Subregion: {}", country.subregion().unwrap_or("-"));
    println!("Capital: {}", country.capital().unwrap_or("-"));
    println!("Population: {}", country.population());
    println!("Area: {} km²", country.area());
    println!("Languages: {}", country.languages().collect::<Vec<_>>().join(", "));
    println!("Flag: {}", country.flag_image_url());

    if borders.is_empty() {
        println!("Borders: none");
    } else {
        println!("Borders:");
        for neighbour in &borders.countries {
            println!("- {} ({})", neighbour.common_name(), neighbour.alpha3_code());
        }
    }
    if borders.is_partial() {
        eprintln!("Unresolved border codes: {}", borders.unresolved.join(", "));
    }
}
