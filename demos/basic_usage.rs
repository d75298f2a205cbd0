//! Basic usage example for countrydb
//!
//! This example demonstrates how to:
//! - Load the country feed (here: the bundled snapshot)
//! - Look countries up by name or alpha-3 code
//! - Derive the filter options
//! - Resolve bordering countries

use countrydb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== countrydb Basic Usage Example ===\n");

    println!("Loading country feed...");
    let db = load_all(&FileFeed::sample())?;
    println!("✓ {} countries loaded\n", db.len());

    // Example 1: First few countries, in feed order
    println!("--- Example 1: List countries ---");
    for (i, country) in db.countries().iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, country.common_name(), country.alpha3_code());
    }
    println!("... and {} more\n", db.len().saturating_sub(5));

    // Example 2: Lookup by common name or code
    println!("--- Example 2: Find a country ---");
    for key in ["Germany", "jpn"] {
        if let Some(country) = db.find(key) {
            println!(
                "{key:>8} -> {} ({}), capital {}, population {}",
                country.official_name(),
                country.alpha3_code(),
                country.capital().unwrap_or("-"),
                country.population()
            );
        }
    }
    println!();

    // Example 3: Filter options
    println!("--- Example 3: Filter options ---");
    println!("Regions: {}", regions_of(db.countries()).join(", "));
    println!(
        "Subregions of Europe: {}",
        subregions_of(db.countries(), Some("Europe")).join(", ")
    );
    println!("Languages: {}\n", languages_of(db.countries()).len());

    // Example 4: Borders
    println!("--- Example 4: Bordering countries ---");
    let france = db.get("France")?;
    let borders: Vec<_> = resolve_borders(france, db.countries())
        .iter()
        .map(|c| c.common_name())
        .collect();
    println!("France borders (known to this feed): {}", borders.join(", "));

    let stats = db.stats();
    println!(
        "\n✓ {} countries, {} regions, {} subregions, {} languages",
        stats.countries, stats.regions, stats.subregions, stats.languages
    );
    Ok(())
}
