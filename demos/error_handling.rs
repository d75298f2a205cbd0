//! Error handling example for countrydb
//!
//! This example demonstrates how failures surface as view states rather
//! than as aborted runs.

use countrydb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== countrydb Error Handling Example ===\n");

    // Example 1: An unreachable feed
    println!("--- Example 1: Loading from a missing snapshot ---");
    let mut view = DirectoryView::load(&FileFeed::new("no/such/countries.json"));
    match view.load_state() {
        LoadState::Loaded => println!("✓ loaded"),
        LoadState::Failed(message) => {
            println!("✗ {message}");
            println!("  regions: {:?}, results: {}", view.regions(), view.results().len());
        }
    }

    println!("  retrying with the bundled snapshot...");
    view.reload(&FileFeed::sample());
    println!("  ✓ {} countries\n", view.results().len());

    // Example 2: Unknown names and codes
    println!("--- Example 2: Looking up unknown countries ---");
    let db = view.db().clone();
    for key in ["Atlantis", "XXX", "", "deu"] {
        match db.get(key) {
            Ok(country) => println!("  Found: {} ({})", country.common_name(), country.alpha3_code()),
            Err(e) if e.is_not_found() => println!("  Not found: {key:?}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 3: Not found vs. no borders vs. partial borders
    println!("--- Example 3: Detail states ---");
    let mut detail = DetailView::new();
    for key in ["Atlantis", "Iceland", "Spain"] {
        match detail.open(key, BorderSource::Resident(&db)) {
            DetailState::NotFound { key } => println!("  {key}: not found"),
            DetailState::Ready { country, borders } if borders.is_empty() => {
                println!("  {}: no bordering countries", country.common_name())
            }
            DetailState::Ready { country, borders } => println!(
                "  {}: {} (unresolved: {})",
                country.common_name(),
                borders.names().collect::<Vec<_>>().join(", "),
                borders.unresolved.join(", ")
            ),
            other => println!("  {key}: {other:?}"),
        }
    }
    println!();

    // Example 4: Rejected selections
    println!("--- Example 4: Invalid selections ---");
    let mut query = QueryState::new();
    if let Err(e) = query.set_subregion(Some("Western Europe".into()), db.countries()) {
        println!("  without a region: {e}");
    }
    if let Err(e) = "biggest-first".parse::<SortKey>() {
        println!("  unknown sort key: {e}");
    }

    Ok(())
}
