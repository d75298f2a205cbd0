//! Advanced filtering example for countrydb
//!
//! This example demonstrates the query state, conjunctive filters and the
//! sort keys.

use countrydb_core::prelude::*;

fn print(records: &[&CountryRecord]) {
    for country in records {
        println!(
            "- {:<14} {:>12} people {:>12.0} km²",
            country.common_name(),
            country.population(),
            country.area()
        );
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== countrydb Advanced Filtering Example ===\n");

    let db = load_all(&FileFeed::sample())?;
    let mut query = QueryState::new();

    // Example 1: Region and language together
    println!("--- Example 1: French-speaking countries in Europe ---");
    query.set_region(Some("Europe".into()));
    query.set_language(Some("french".into()));
    print(&apply(db.countries(), query.selection()));

    // Example 2: Subregion, largest first
    println!("--- Example 2: Southern Europe by area (desc) ---");
    query.set_language(None);
    query.set_subregion(Some("Southern Europe".into()), db.countries())?;
    query.set_sort_key(SortKey::AreaDesc);
    print(&apply(db.countries(), query.selection()));

    // Example 3: Changing the region drops the subregion
    println!("--- Example 3: Switching to Africa ---");
    query.set_region(Some("Africa".into()));
    println!("subregion after region change: {:?}", query.selection().subregion);
    match query.set_subregion(Some("Southern Europe".into()), db.countries()) {
        Ok(()) => println!("unexpected: subregion accepted"),
        Err(e) => println!("rejected: {e}"),
    }
    query.set_sort_key(SortKey::PopulationDesc);
    print(&apply(db.countries(), query.selection()));

    // Example 4: Name search, case ignored
    println!("--- Example 4: Search 'LAND' across all regions ---");
    query.reset();
    query.set_search_text("LAND");
    print(&apply(db.countries(), query.selection()));

    // Example 5: Sort keys as the UI lists them
    println!("--- Example 5: Sort keys ---");
    for key in SortKey::ALL {
        let parsed: SortKey = key.label().parse()?;
        println!("{:<18} -> {}", key.label(), parsed);
    }

    Ok(())
}
