// crates/countrydb-core/src/query.rs
//! The active filter/sort choices and the mutators that keep them consistent.
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use crate::options::subregions_of;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep feed order.
    #[default]
    None,
    AreaAsc,
    AreaDesc,
    PopulationAsc,
    PopulationDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::AreaAsc,
        SortKey::AreaDesc,
        SortKey::PopulationAsc,
        SortKey::PopulationDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::AreaAsc => "area-asc",
            SortKey::AreaDesc => "area-desc",
            SortKey::PopulationAsc => "population-asc",
            SortKey::PopulationDesc => "population-desc",
        }
    }

    /// Human-readable label as shown in a "Sort By" dropdown.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::None => "None",
            SortKey::AreaAsc => "Area (Asc)",
            SortKey::AreaDesc => "Area (Desc)",
            SortKey::PopulationAsc => "Population (Asc)",
            SortKey::PopulationDesc => "Population (Desc)",
        }
    }

    /// Compare two records under this key. `None` treats all records as equal.
    pub fn compare(self, a: &CountryRecord, b: &CountryRecord) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::AreaAsc => a.area.total_cmp(&b.area),
            SortKey::AreaDesc => b.area.total_cmp(&a.area),
            SortKey::PopulationAsc => a.population.cmp(&b.population),
            SortKey::PopulationDesc => b.population.cmp(&a.population),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CountryDbError;

    /// Accepts the kebab-case names (`population-desc`), their snake/camel
    /// variants and the dropdown labels (`Population (Desc)`). An empty
    /// string means no sorting.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "" | "none" => Ok(SortKey::None),
            "areaasc" => Ok(SortKey::AreaAsc),
            "areadesc" => Ok(SortKey::AreaDesc),
            "populationasc" => Ok(SortKey::PopulationAsc),
            "populationdesc" => Ok(SortKey::PopulationDesc),
            _ => Err(CountryDbError::InvalidSelection {
                field: "sort",
                value: s.to_owned(),
            }),
        }
    }
}

/// The complete set of active filter and sort choices.
///
/// Every field is optional when deserializing, so a UI can send only what it
/// has set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySelection {
    /// Empty means no text filter.
    pub search_text: String,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub language: Option<String>,
    pub sort_key: SortKey,
}

impl QuerySelection {
    /// True if `record` passes every active predicate.
    pub fn matches(&self, record: &CountryRecord) -> bool {
        record.name_contains(&self.search_text)
            && self.region.as_deref().map_or(true, |r| record.region() == r)
            && self
                .subregion
                .as_deref()
                .map_or(true, |s| record.subregion() == Some(s))
            && self.language.as_deref().map_or(true, |l| record.speaks(l))
    }

    /// True if no predicate is active and no sort is requested.
    pub fn is_default(&self) -> bool {
        *self == QuerySelection::default()
    }
}

/// Holds the [`QuerySelection`] and enforces the region → subregion
/// dependency: a subregion is only ever set for the region it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    selection: QuerySelection,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &QuerySelection {
        &self.selection
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.selection.search_text = text.into();
    }

    /// Changes the region and clears the subregion in the same step.
    pub fn set_region(&mut self, region: Option<String>) {
        self.selection.region = region.filter(|r| !r.trim().is_empty());
        self.selection.subregion = None;
    }

    /// Sets (or clears, with `None`) the subregion.
    ///
    /// A subregion must belong to the current region within `records`;
    /// otherwise the state is left untouched and
    /// [`CountryDbError::InvalidSelection`] is returned.
    pub fn set_subregion(
        &mut self,
        subregion: Option<String>,
        records: &[CountryRecord],
    ) -> Result<()> {
        let Some(subregion) = subregion.filter(|s| !s.trim().is_empty()) else {
            self.selection.subregion = None;
            return Ok(());
        };

        let valid = subregions_of(records, self.selection.region.as_deref());
        if !valid.contains(&subregion) {
            return Err(CountryDbError::InvalidSelection {
                field: "subregion",
                value: subregion,
            });
        }

        self.selection.subregion = Some(subregion);
        Ok(())
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.selection.language = language.filter(|l| !l.trim().is_empty());
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.selection.sort_key = key;
    }

    /// Back to defaults: no filters, feed order.
    pub fn reset(&mut self) {
        self.selection = QuerySelection::default();
    }
}

impl From<QueryState> for QuerySelection {
    fn from(state: QueryState) -> Self {
        state.selection
    }
}
