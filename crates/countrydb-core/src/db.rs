// crates/countrydb-core/src/db.rs
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use crate::normalize::normalize_all;
use crate::options::{languages_of, regions_of};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Simple aggregate statistics for a loaded record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub regions: usize,
    pub subregions: usize,
    pub languages: usize,
}

/// The normalized record set held for one session.
///
/// Read-only after construction; records keep the feed's order and
/// `alpha3_code` is unique.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CountryDb {
    countries: Vec<CountryRecord>,
}

impl CountryDb {
    /// Build from already normalized records. Later duplicates of an
    /// alpha-3 code are dropped.
    pub fn from_records(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        let mut seen = HashSet::new();
        let countries = records
            .into_iter()
            .filter(|c| seen.insert(c.alpha3_code.clone()))
            .collect();
        Self { countries }
    }

    /// Parse a feed payload (a JSON array of raw country objects).
    ///
    /// Individual malformed records are skipped; only a payload that is not
    /// a JSON array fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_values(values))
    }

    pub fn from_values(values: Vec<serde_json::Value>) -> Self {
        Self {
            countries: normalize_all(values),
        }
    }

    /// All countries in feed order.
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Find a country by its common name. Case-sensitive, exact.
    pub fn find_by_name(&self, name: &str) -> Option<&CountryRecord> {
        self.countries.iter().find(|c| c.common_name == name)
    }

    /// Find a country by alpha-3 code, case-insensitive (e.g. "DEU", "deu").
    pub fn find_by_code(&self, code: &str) -> Option<&CountryRecord> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.countries.iter().find(|c| c.has_code(code))
    }

    /// Find a country by common name first, then by alpha-3 code.
    ///
    /// Examples:
    /// - "Germany" → matches the common name
    /// - "DEU" / "deu" → matches the code
    pub fn find(&self, key: &str) -> Option<&CountryRecord> {
        self.find_by_name(key).or_else(|| self.find_by_code(key))
    }

    /// Like [`CountryDb::find`], but a miss is [`CountryDbError::RecordNotFound`].
    pub fn get(&self, key: &str) -> Result<&CountryRecord> {
        self.find(key)
            .ok_or_else(|| CountryDbError::RecordNotFound(key.to_owned()))
    }

    pub fn stats(&self) -> DbStats {
        let subregions = self
            .countries
            .iter()
            .filter_map(|c| c.subregion().map(|s| (c.region(), s)))
            .collect::<HashSet<_>>()
            .len();

        DbStats {
            countries: self.countries.len(),
            regions: regions_of(&self.countries).len(),
            subregions,
            languages: languages_of(&self.countries).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> CountryDb {
        CountryDb::from_json_str(
            r#"[
              {"name": {"common": "Germany", "official": "Federal Republic of Germany"},
               "cca3": "DEU", "region": "Europe", "subregion": "Western Europe",
               "languages": {"deu": "German"}},
              {"name": {"common": "Niger"}, "cca3": "NER", "region": "Africa",
               "subregion": "Western Africa", "languages": {"fra": "French"}},
              {"name": {"common": "Nigeria"}, "cca3": "NGA", "region": "Africa",
               "subregion": "Western Africa", "languages": {"eng": "English"}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn find_by_name_is_exact() {
        let db = db();
        assert_eq!(db.find_by_name("Niger").unwrap().alpha3_code(), "NER");
        assert!(db.find_by_name("niger").is_none());
        assert!(db.find_by_name("Nige").is_none());
    }

    #[test]
    fn find_by_code_ignores_case() {
        let db = db();
        assert_eq!(db.find_by_code("nga").unwrap().common_name(), "Nigeria");
        assert_eq!(db.find_by_code(" DEU ").unwrap().common_name(), "Germany");
        assert!(db.find_by_code("").is_none());
        assert!(db.find_by_code("XXX").is_none());
    }

    #[test]
    fn find_tries_name_then_code() {
        let db = db();
        assert_eq!(db.find("Germany").unwrap().alpha3_code(), "DEU");
        assert_eq!(db.find("deu").unwrap().common_name(), "Germany");
        assert!(db.get("Atlantis").unwrap_err().is_not_found());
    }

    #[test]
    fn stats_count_distinct_values() {
        let stats = db().stats();
        assert_eq!(
            stats,
            DbStats {
                countries: 3,
                regions: 2,
                subregions: 2,
                languages: 3,
            }
        );
    }

    #[test]
    fn non_array_payload_fails() {
        assert!(CountryDb::from_json_str(r#"{"status": 404}"#).is_err());
        assert!(CountryDb::from_json_str("[]").unwrap().is_empty());
    }
}
