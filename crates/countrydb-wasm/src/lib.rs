//! countrydb-wasm: WebAssembly bindings for countrydb-core
//!
//! The browser fetches the REST Countries feed itself and hands the JSON to
//! [`load_countries`]. Everything after that (filter options, the filtered
//! and sorted list, border resolution) runs in Rust.
//!
//! What it provides
//! ----------------
//! - Loading: `load_countries(json)`, `get_country_count()`, `get_stats()`
//! - Filter options: `get_regions()`, `get_subregions(region)`,
//!   `get_languages()`, `get_sort_keys()`
//! - Filtering: `filter_countries(selection)` with a plain selection object,
//!   or the stateful `CountryQuery` which clears the subregion whenever the
//!   region changes
//! - Detail: `find_country(key)`, `get_borders(key)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_countries, CountryQuery } from 'countrydb-wasm';
//!
//! async function main() {
//!   await init();
//!   const res = await fetch('https://restcountries.com/v3.1/all?fields=name,cca3,region,subregion,capital,population,area,languages,flags,borders');
//!   load_countries(await res.text());
//!
//!   const query = new CountryQuery();
//!   query.set_region('Europe');
//!   query.set_sort_key('population-desc');
//!   console.log(query.results());
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - A failed load clears the record set: options and results are empty
//!   until `load_countries` succeeds.
//! - Selection objects use camelCase keys (`searchText`, `sortKey`, ...);
//!   missing keys mean "not set".
use std::result::Result;
use std::sync::{Arc, RwLock};
use wasm_bindgen::prelude::*;

use countrydb_core::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};

// The loaded record set; replaced on every `load_countries`.
static DB: RwLock<Option<Arc<CountryDb>>> = RwLock::new(None);

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("Initializing countrydb WASM module...");
}

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn db() -> Arc<CountryDb> {
    let guard = DB.read().unwrap_or_else(|e| e.into_inner());
    guard.clone().unwrap_or_default()
}

fn store(db: Option<CountryDb>) {
    let mut guard = DB.write().unwrap_or_else(|e| e.into_inner());
    *guard = db.map(Arc::new);
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(JsValue::from)
}

/* --------------------------------------------------------------------------
   Loading
-------------------------------------------------------------------------- */

/// Parse a bulk feed payload (a JSON array of countries) and make it the
/// current record set. Returns the number of countries kept.
#[wasm_bindgen]
pub fn load_countries(json: &str) -> Result<usize, JsValue> {
    match CountryDb::from_json_str(json) {
        Ok(db) => {
            let count = db.len();
            log(&format!("✓ Loaded {count} countries"));
            store(Some(db));
            Ok(count)
        }
        Err(e) => {
            log(&format!("✗ Country feed unusable: {e}"));
            store(None);
            Err(js_err(e))
        }
    }
}

#[wasm_bindgen]
pub fn get_country_count() -> usize {
    db().len()
}

#[wasm_bindgen]
pub fn get_stats() -> Result<JsValue, JsValue> {
    to_js(&db().stats())
}

/* --------------------------------------------------------------------------
   Filter Options
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn get_regions() -> Result<JsValue, JsValue> {
    to_js(&regions_of(db().countries()))
}

#[wasm_bindgen]
pub fn get_subregions(region: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&subregions_of(db().countries(), region.as_deref()))
}

#[wasm_bindgen]
pub fn get_languages() -> Result<JsValue, JsValue> {
    to_js(&languages_of(db().countries()))
}

#[derive(Serialize)]
struct SortOption {
    value: &'static str,
    label: &'static str,
}

/// `[{value: "none", label: "None"}, {value: "area-asc", ...}, ...]`
#[wasm_bindgen]
pub fn get_sort_keys() -> Result<JsValue, JsValue> {
    let array = js_sys::Array::new();
    for key in SortKey::ALL {
        array.push(&to_js(&SortOption {
            value: key.as_str(),
            label: key.label(),
        })?);
    }
    Ok(array.into())
}

/* --------------------------------------------------------------------------
   Filtering
-------------------------------------------------------------------------- */

/// Filter and sort with a selection object such as
/// `{region: "Europe", language: "French", sortKey: "area-desc"}`.
#[wasm_bindgen]
pub fn filter_countries(selection: JsValue) -> Result<JsValue, JsValue> {
    let selection: QuerySelection = if selection.is_undefined() || selection.is_null() {
        QuerySelection::default()
    } else {
        from_value(selection)?
    };
    to_js(&apply(db().countries(), &selection))
}

/// Query state held on the JS side. Setting a region always clears the
/// subregion; a subregion outside the current region is rejected.
#[wasm_bindgen]
#[derive(Default)]
pub struct CountryQuery {
    state: QueryState,
}

#[wasm_bindgen]
impl CountryQuery {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CountryQuery {
        CountryQuery::default()
    }

    pub fn set_search_text(&mut self, text: String) {
        self.state.set_search_text(text);
    }

    pub fn set_region(&mut self, region: Option<String>) {
        self.state.set_region(region);
    }

    pub fn set_subregion(&mut self, subregion: Option<String>) -> Result<(), JsValue> {
        self.state
            .set_subregion(subregion, db().countries())
            .map_err(js_err)
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.state.set_language(language);
    }

    /// Accepts `population-desc`, `populationDesc` or `Population (Desc)`.
    pub fn set_sort_key(&mut self, key: &str) -> Result<(), JsValue> {
        let key = key.parse::<SortKey>().map_err(js_err)?;
        self.state.set_sort_key(key);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn selection(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.selection())
    }

    /// Subregion options for the current region.
    pub fn subregions(&self) -> Result<JsValue, JsValue> {
        let region = self.state.selection().region.as_deref();
        to_js(&subregions_of(db().countries(), region))
    }

    pub fn results(&self) -> Result<JsValue, JsValue> {
        to_js(&apply(db().countries(), self.state.selection()))
    }
}

/* --------------------------------------------------------------------------
   Detail
-------------------------------------------------------------------------- */

/// A country by common name or alpha-3 code; `undefined` if unknown.
#[wasm_bindgen]
pub fn find_country(key: &str) -> Result<JsValue, JsValue> {
    match db().find(key.trim()) {
        Some(country) => to_js(country),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// `{countries: [...], unresolved: ["ESP", ...]}` for the country `key`.
/// Fails if `key` is unknown, so "not found" stays distinct from "no
/// borders".
#[wasm_bindgen]
pub fn get_borders(key: &str) -> Result<JsValue, JsValue> {
    let db = db();
    let country = db.get(key.trim()).map_err(js_err)?;
    let resolution = BorderResolver::resident(&db)
        .resolve(country, &CancellationToken::new())
        .unwrap_or_default();
    to_js(&resolution)
}
