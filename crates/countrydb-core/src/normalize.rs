// crates/countrydb-core/src/normalize.rs
//! **Raw -> canonical** conversion.
//!
//! The feed is inconsistent across versions: `languages` may be a mapping, a
//! list of objects or a single string, and `capital`, `subregion`,
//! `population` or `area` may be missing. Everything here funnels those
//! shapes into one [`CountryRecord`].
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use crate::raw::{RawCapital, RawCountry, RawFlags, RawLanguageEntry, RawLanguages, RawName};
use crate::text::non_empty;
use std::collections::{BTreeSet, HashSet};

/// Normalize one raw record.
///
/// Fails with [`CountryDbError::MalformedRecord`] when the record has no
/// usable common name or alpha-3 code.
pub fn normalize(raw: RawCountry) -> Result<CountryRecord> {
    let (common_name, official_name) = match raw.name {
        Some(RawName::Plain(name)) => (non_empty(&name), None),
        Some(RawName::Structured { common, official }) => (
            common.as_deref().and_then(non_empty),
            official.as_deref().and_then(non_empty),
        ),
        None => (None, None),
    };

    let alpha3_code = raw.cca3.as_deref().and_then(non_empty);

    let (common_name, alpha3_code) = match (common_name, alpha3_code) {
        (Some(name), Some(code)) => (name, code.to_ascii_uppercase()),
        (None, code) => {
            return Err(CountryDbError::MalformedRecord(format!(
                "record {} has no name",
                code.as_deref().unwrap_or("<unknown>")
            )))
        }
        (Some(name), None) => {
            return Err(CountryDbError::MalformedRecord(format!(
                "record {name:?} has no cca3 code"
            )))
        }
    };

    Ok(CountryRecord {
        official_name: official_name.unwrap_or_else(|| common_name.clone()),
        common_name,
        alpha3_code,
        region: raw.region.as_deref().and_then(non_empty).unwrap_or_default(),
        subregion: raw.subregion.as_deref().and_then(non_empty),
        languages: raw.languages.map(languages_from_raw).unwrap_or_default(),
        population: raw.population.map(non_negative_count).unwrap_or(0),
        area: raw.area.map(non_negative_area).unwrap_or(0.0),
        flag_image_url: flag_url(raw.flags, raw.flag),
        capital: raw.capital.and_then(first_capital),
        border_codes: raw
            .borders
            .unwrap_or_default()
            .iter()
            .filter_map(|code| non_empty(code))
            .map(|code| code.to_ascii_uppercase())
            .collect(),
    })
}

/// Normalize a whole feed payload, one JSON value per record.
///
/// Records that fail to decode or lack identity fields are dropped; a
/// repeated alpha-3 code keeps the first record. Feed order is preserved.
pub fn normalize_all(values: Vec<serde_json::Value>) -> Vec<CountryRecord> {
    let total = values.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut out = Vec::with_capacity(total);

    for (index, value) in values.into_iter().enumerate() {
        let record = serde_json::from_value::<RawCountry>(value)
            .map_err(CountryDbError::from)
            .and_then(normalize);

        match record {
            Ok(record) => {
                if seen.insert(record.alpha3_code.clone()) {
                    out.push(record);
                } else {
                    tracing::warn!(
                        code = %record.alpha3_code,
                        "duplicate alpha-3 code in feed, keeping first record"
                    );
                }
            }
            Err(e) => tracing::debug!(index, error = %e, "dropping feed record"),
        }
    }

    tracing::debug!(kept = out.len(), total, "normalized feed");
    out
}

/// The tagged-variant decode for `languages`: inspect the shape, apply the
/// matching rule, always produce the canonical name set.
pub fn languages_from_raw(raw: RawLanguages) -> BTreeSet<String> {
    match raw {
        RawLanguages::Single(name) => non_empty(&name).into_iter().collect(),
        RawLanguages::Map(map) => map
            .values()
            .flatten()
            .filter_map(|name| non_empty(name))
            .collect(),
        RawLanguages::List(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                RawLanguageEntry::Plain(name) => non_empty(name),
                RawLanguageEntry::Object { name, .. } => name.as_deref().and_then(non_empty),
            })
            .collect(),
        RawLanguages::Other(value) => {
            if !value.is_null() {
                tracing::debug!(%value, "unrecognized languages shape");
            }
            BTreeSet::new()
        }
    }
}

fn first_capital(raw: RawCapital) -> Option<String> {
    match raw {
        RawCapital::Single(name) => non_empty(&name),
        RawCapital::List(names) => names.iter().find_map(|name| non_empty(name)),
    }
}

fn flag_url(flags: Option<RawFlags>, flag: Option<String>) -> String {
    let from_flags = match flags {
        Some(RawFlags::Urls { svg, png }) => svg
            .as_deref()
            .and_then(non_empty)
            .or_else(|| png.as_deref().and_then(non_empty)),
        Some(RawFlags::List(urls)) => urls.iter().find_map(|url| non_empty(url)),
        None => None,
    };

    from_flags
        .or_else(|| {
            flag.as_deref()
                .and_then(non_empty)
                .filter(|url| url.starts_with("http"))
        })
        .unwrap_or_default()
}

fn non_negative_count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

fn non_negative_area(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawCountry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn languages_from_mapping() {
        let c = normalize(raw(json!({
            "name": {"common": "Switzerland", "official": "Swiss Confederation"},
            "cca3": "CHE",
            "region": "Europe",
            "languages": {"fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh"}
        })))
        .unwrap();
        let langs: Vec<_> = c.languages().collect();
        assert_eq!(langs, ["French", "Italian", "Romansh", "Swiss German"]);
    }

    #[test]
    fn languages_from_list_of_objects() {
        let c = normalize(raw(json!({
            "name": "Belgium",
            "alpha3Code": "BEL",
            "region": "Europe",
            "languages": [
                {"iso639_1": "nl", "name": "Dutch"},
                {"iso639_1": "fr", "name": "French"},
                {"iso639_1": "fr", "name": "French"},
                {"iso639_1": "xx"},
                {"iso639_1": "de", "name": "  "}
            ]
        })))
        .unwrap();
        let langs: Vec<_> = c.languages().collect();
        assert_eq!(langs, ["Dutch", "French"]);
    }

    #[test]
    fn languages_from_single_string() {
        let c = normalize(raw(json!({
            "name": {"common": "Japan"},
            "cca3": "JPN",
            "languages": "Japanese"
        })))
        .unwrap();
        assert_eq!(c.languages.len(), 1);
        assert!(c.speaks("japanese"));
    }

    #[test]
    fn unknown_or_missing_languages_are_empty() {
        let missing = normalize(raw(json!({"name": "Nowhere", "cca3": "NWH"}))).unwrap();
        assert!(missing.languages.is_empty());

        let odd = normalize(raw(json!({"name": "Odd", "cca3": "ODD", "languages": 42}))).unwrap();
        assert!(odd.languages.is_empty());

        let blank = normalize(raw(json!({"name": "Blank", "cca3": "BLK", "languages": ""}))).unwrap();
        assert!(blank.languages.is_empty());
    }

    #[test]
    fn missing_identity_is_malformed() {
        let no_code = normalize(raw(json!({"name": {"common": "Atlantis"}})));
        assert!(matches!(no_code, Err(CountryDbError::MalformedRecord(_))));

        let no_name = normalize(raw(json!({"cca3": "ATL"})));
        assert!(matches!(no_name, Err(CountryDbError::MalformedRecord(_))));

        let empty_common = normalize(raw(json!({"name": {"common": ""}, "cca3": "ATL"})));
        assert!(empty_common.is_err());
    }

    #[test]
    fn optional_fields_default_without_synthesis() {
        let c = normalize(raw(json!({
            "name": {"common": "Antarctica"},
            "cca3": "ata",
            "region": "Antarctic"
        })))
        .unwrap();
        assert_eq!(c.alpha3_code(), "ATA");
        assert_eq!(c.official_name(), "Antarctica");
        assert_eq!(c.subregion(), None);
        assert_eq!(c.capital(), None);
        assert_eq!(c.population(), 0);
        assert_eq!(c.area(), 0.0);
        assert!(c.border_codes().is_empty());
        assert_eq!(c.flag_image_url(), "");
    }

    #[test]
    fn missing_region_is_kept_as_empty() {
        let c = normalize(raw(json!({"name": "Floating", "cca3": "FLT"}))).unwrap();
        assert_eq!(c.region(), "");
    }

    #[test]
    fn capital_and_flags_shapes() {
        let v3 = normalize(raw(json!({
            "name": {"common": "South Africa"},
            "cca3": "ZAF",
            "capital": ["Pretoria", "Bloemfontein", "Cape Town"],
            "flags": {"png": "https://flagcdn.com/w320/za.png", "svg": "https://flagcdn.com/za.svg"},
            "flag": "🇿🇦"
        })))
        .unwrap();
        assert_eq!(v3.capital(), Some("Pretoria"));
        assert_eq!(v3.flag_image_url(), "https://flagcdn.com/za.svg");

        let v2 = normalize(raw(json!({
            "name": "Peru",
            "alpha3Code": "PER",
            "capital": "Lima",
            "flag": "https://flagcdn.com/pe.svg"
        })))
        .unwrap();
        assert_eq!(v2.capital(), Some("Lima"));
        assert_eq!(v2.flag_image_url(), "https://flagcdn.com/pe.svg");

        let png_only = normalize(raw(json!({
            "name": "Chile",
            "cca3": "CHL",
            "flags": {"png": "https://flagcdn.com/w320/cl.png"}
        })))
        .unwrap();
        assert_eq!(png_only.flag_image_url(), "https://flagcdn.com/w320/cl.png");
    }

    #[test]
    fn negative_area_is_clamped() {
        let c = normalize(raw(json!({"name": "X", "cca3": "XXX", "area": -1.0, "population": -5})))
            .unwrap();
        assert_eq!(c.area(), 0.0);
        assert_eq!(c.population(), 0);
    }

    #[test]
    fn normalize_all_drops_bad_and_duplicate_records() {
        let records = normalize_all(vec![
            json!({"name": {"common": "France"}, "cca3": "FRA", "region": "Europe"}),
            json!({"name": {"common": "Nameless"}}),
            json!("not an object"),
            json!({"name": {"common": "France again"}, "cca3": "fra", "region": "Europe"}),
            json!({"name": {"common": "Germany"}, "cca3": "DEU", "region": "Europe"}),
        ]);
        let names: Vec<_> = records.iter().map(|c| c.common_name()).collect();
        assert_eq!(names, ["France", "Germany"]);
    }
}
