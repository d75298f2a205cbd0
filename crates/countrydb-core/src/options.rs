// crates/countrydb-core/src/options.rs
//! Selectable filter options, derived from the loaded records.
//!
//! All functions are pure and return lexicographically sorted, deduplicated
//! lists so the same input always yields the same option order.
use crate::model::CountryRecord;
use std::collections::BTreeSet;

/// Every distinct, non-empty region.
pub fn regions_of(records: &[CountryRecord]) -> Vec<String> {
    records
        .iter()
        .map(CountryRecord::region)
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Distinct subregions of records whose region equals `region`.
///
/// Returns an empty list when no region is selected.
pub fn subregions_of(records: &[CountryRecord], region: Option<&str>) -> Vec<String> {
    let Some(region) = region else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|c| c.region() == region)
        .filter_map(CountryRecord::subregion)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// The union of every record's languages.
pub fn languages_of(records: &[CountryRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(CountryRecord::languages)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
