// crates/countrydb-core/src/filter.rs
//! The filter/sort engine behind the visible country list.
use crate::model::CountryRecord;
use crate::query::{QuerySelection, SortKey};

/// Filter `records` by every active predicate of `selection`, then sort.
///
/// Filtering is conjunctive:
/// - `search_text` is a case-insensitive substring of the common name;
///   only empty text does not filter, so `" "` keeps names with a space
///   and `"cote"` does not find `"Côte d'Ivoire"`
/// - `region` and `subregion` must be equal
/// - `language` must equal one of the record's languages, ignoring case
///
/// The sort is stable: records that compare equal keep their feed order.
/// An empty result is a normal outcome.
///
/// # Examples
///
/// ```rust
/// use countrydb_core::{apply, CountryDb, QuerySelection, SortKey};
///
/// let db = CountryDb::from_json_str(r#"[
///     {"name": "Peru", "cca3": "PER", "region": "Americas", "area": 1285216},
///     {"name": "Chile", "cca3": "CHL", "region": "Americas", "area": 756102}
/// ]"#)?;
///
/// let selection = QuerySelection { sort_key: SortKey::AreaAsc, ..Default::default() };
/// let names: Vec<_> = apply(db.countries(), &selection)
///     .into_iter()
///     .map(|c| c.common_name())
///     .collect();
/// assert_eq!(names, ["Chile", "Peru"]);
/// # Ok::<(), countrydb_core::CountryDbError>(())
/// ```
pub fn apply<'a>(records: &'a [CountryRecord], selection: &QuerySelection) -> Vec<&'a CountryRecord> {
    let mut out: Vec<&CountryRecord> = records.iter().filter(|c| selection.matches(c)).collect();
    sort_records(&mut out, selection.sort_key);
    out
}

/// Stable in-place sort by `key`; `SortKey::None` leaves the order alone.
pub fn sort_records(records: &mut [&CountryRecord], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    // `sort_by` is a stable merge sort.
    records.sort_by(|a, b| key.compare(a, b));
}
