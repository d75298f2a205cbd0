// crates/countrydb-core/src/model.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A country entry after normalization.
///
/// Built by [`crate::normalize::normalize`]; the feed's shape variance never
/// reaches this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub common_name: String,
    pub official_name: String,
    /// ISO 3166-1 alpha-3 code; identity key within one loaded set.
    pub alpha3_code: String,
    /// Empty when the feed has no region.
    pub region: String,
    pub subregion: Option<String>,
    /// Language names, deduplicated and never empty strings.
    pub languages: BTreeSet<String>,
    pub population: u64,
    /// km², never negative.
    pub area: f64,
    pub flag_image_url: String,
    pub capital: Option<String>,
    /// Alpha-3 codes of adjacent countries, in feed order.
    pub border_codes: Vec<String>,
}

impl CountryRecord {
    /// Common display name (e.g. "Germany"). Always non-empty.
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Official name (e.g. "Federal Republic of Germany").
    pub fn official_name(&self) -> &str {
        &self.official_name
    }

    /// ISO 3166-1 alpha-3 code (e.g. "DEU").
    pub fn alpha3_code(&self) -> &str {
        &self.alpha3_code
    }

    /// Region/continent label (e.g. "Europe") or empty string if unknown.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn subregion(&self) -> Option<&str> {
        self.subregion.as_deref()
    }

    /// Capital city name, if provided by the feed.
    pub fn capital(&self) -> Option<&str> {
        self.capital.as_deref()
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn flag_image_url(&self) -> &str {
        &self.flag_image_url
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }

    /// True if any language matches `language` ignoring case.
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l.is_named(language))
    }

    pub fn border_codes(&self) -> &[String] {
        &self.border_codes
    }

    pub fn has_borders(&self) -> bool {
        !self.border_codes.is_empty()
    }

    /// True if `code` is this record's alpha-3 code, ignoring ASCII case.
    pub fn has_code(&self, code: &str) -> bool {
        self.alpha3_code.eq_ignore_ascii_case(code.trim())
    }
}

impl NameMatch for CountryRecord {
    #[inline]
    fn name_str(&self) -> &str {
        self.common_name()
    }
}
