// crates/countrydb-core/src/raw.rs
//! Raw feed shapes, as they come from JSON.
//!
//! NOTE: These types mirror the external REST Countries feed (v3.1, with
//! tolerance for the older v2 field names) and are not part of the stable
//! API. Use [`crate::normalize`] to turn them into [`crate::CountryRecord`]s.
use serde::Deserialize;
use std::collections::BTreeMap;

/// `name` is `{ "common": .., "official": .. }` in v3 and a plain string in v2.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawName {
    Plain(String),
    Structured {
        #[serde(default)]
        common: Option<String>,
        #[serde(default)]
        official: Option<String>,
    },
}

/// The `languages` field in its observed shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLanguages {
    /// `"French"`
    Single(String),
    /// `[{"iso639_1": "fr", "name": "French"}]`
    List(Vec<RawLanguageEntry>),
    /// `{"fra": "French"}`
    Map(BTreeMap<String, Option<String>>),
    /// Anything else decodes to an empty language set.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLanguageEntry {
    Plain(String),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        iso639_1: Option<String>,
        #[serde(default)]
        iso639_2: Option<String>,
    },
}

/// `capital` is a list in v3 and a string in v2.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCapital {
    Single(String),
    List(Vec<String>),
}

/// `flags` is `{ "svg": .., "png": .. }` in v3 and a list of URLs in v2.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFlags {
    Urls {
        #[serde(default)]
        svg: Option<String>,
        #[serde(default)]
        png: Option<String>,
    },
    List(Vec<String>),
}

/// Raw country structure from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<RawName>,
    #[serde(default, alias = "alpha3Code")]
    pub cca3: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Option<RawCapital>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub languages: Option<RawLanguages>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
    /// v2 flag URL; in v3 this holds an emoji and is ignored.
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

pub type CountriesRaw = Vec<RawCountry>;
