#![cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

use countrydb_wasm::{
    filter_countries, get_borders, get_country_count, get_regions, load_countries, CountryQuery,
};

const FEED: &str = r#"[
  {"name": {"common": "France"}, "cca3": "FRA", "region": "Europe",
   "subregion": "Western Europe", "population": 67000000, "area": 551695,
   "languages": {"fra": "French"}, "borders": ["DEU", "ESP"]},
  {"name": {"common": "Germany"}, "cca3": "DEU", "region": "Europe",
   "subregion": "Western Europe", "population": 83000000, "area": 357022,
   "languages": {"deu": "German"}, "borders": ["FRA"]}
]"#;

fn names(value: wasm_bindgen::JsValue) -> Vec<String> {
    let records: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(value).unwrap();
    records
        .iter()
        .map(|r| r["commonName"].as_str().unwrap().to_owned())
        .collect()
}

#[wasm_bindgen_test]
fn loads_and_lists_regions() {
    assert_eq!(load_countries(FEED).unwrap(), 2);
    assert_eq!(get_country_count(), 2);

    let regions: Vec<String> = serde_wasm_bindgen::from_value(get_regions().unwrap()).unwrap();
    assert_eq!(regions, ["Europe"]);
}

#[wasm_bindgen_test]
fn query_sorts_and_clears_subregion() {
    load_countries(FEED).unwrap();

    let mut query = CountryQuery::new();
    query.set_region(Some("Europe".into()));
    query.set_subregion(Some("Western Europe".into())).unwrap();
    assert!(query.set_subregion(Some("Eastern Asia".into())).is_err());
    query.set_sort_key("populationDesc").unwrap();
    assert_eq!(names(query.results().unwrap()), ["Germany", "France"]);

    let everything = filter_countries(wasm_bindgen::JsValue::UNDEFINED).unwrap();
    assert_eq!(names(everything), ["France", "Germany"]);
}

#[wasm_bindgen_test]
fn borders_drop_unknown_codes() {
    load_countries(FEED).unwrap();

    let resolution: serde_json::Value =
        serde_wasm_bindgen::from_value(get_borders("FRA").unwrap()).unwrap();
    assert_eq!(resolution["countries"][0]["commonName"], "Germany");
    assert_eq!(resolution["unresolved"][0], "ESP");

    assert!(get_borders("Atlantis").is_err());
    assert!(load_countries("{\"status\": 404}").is_err());
    assert_eq!(get_country_count(), 0);
}
