// crates/countrydb-core/src/feed/mod.rs

//! # Record Feed
//!
//! The external source of country data. A feed can list every country and
//! look up single countries by code or name; [`load_all`] turns the bulk
//! listing into the session's [`CountryDb`].
//!
//! Two sources ship with the crate:
//! - [`HttpFeed`] (feature `http`): the REST Countries API
//! - [`FileFeed`]: a JSON (or, with `compact`, `.json.gz`) snapshot on disk

use crate::db::CountryDb;
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use crate::normalize::{normalize, normalize_all};
use crate::raw::RawCountry;

pub mod common_io;
mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileFeed;
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpFeed, HttpResponse, ReqwestClient};

/// A source of raw country records.
///
/// Implementations must be shareable across threads: border lookups fan
/// out over a thread pool.
pub trait CountryFeed: Send + Sync {
    /// Human-readable location of the feed, used in logs and errors.
    fn source(&self) -> String;

    /// Every country, normalized. Malformed records are already dropped.
    fn fetch_all(&self) -> Result<Vec<CountryRecord>>;

    /// One country by alpha-3 code.
    fn fetch_by_code(&self, code: &str) -> Result<CountryRecord>;

    /// One country by its full common name.
    fn fetch_by_name(&self, name: &str) -> Result<CountryRecord>;
}

/// Fetch the whole feed once and build the session's record set.
///
/// Fails with [`CountryDbError::FeedUnavailable`] when the feed cannot be
/// read; individual bad records never fail the load.
pub fn load_all(feed: &dyn CountryFeed) -> Result<CountryDb> {
    let source = feed.source();
    tracing::debug!(%source, "loading country feed");

    let db = CountryDb::from_records(feed.fetch_all()?);

    tracing::info!(%source, countries = db.len(), "country feed loaded");
    Ok(db)
}

/// Decode a bulk payload: a JSON array of raw records.
pub(crate) fn decode_all(source: &str, bytes: &[u8]) -> Result<Vec<CountryRecord>> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|e| CountryDbError::feed(source, format!("expected a JSON array: {e}")))?;
    Ok(normalize_all(values))
}

/// Decode a single-country payload.
///
/// The API answers lookups with a one-element array, older versions with a
/// bare object; both are accepted. An empty array or an undecodable record
/// counts as "not found" for `key`.
pub(crate) fn decode_one(source: &str, key: &str, bytes: &[u8]) -> Result<CountryRecord> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| CountryDbError::feed(source, format!("invalid JSON: {e}")))?;

    let first = match value {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other @ serde_json::Value::Object(_) => Some(other),
        _ => None,
    };

    first
        .and_then(|v| serde_json::from_value::<RawCountry>(v).ok())
        .and_then(|raw| match normalize(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(%key, error = %e, "lookup returned a malformed record");
                None
            }
        })
        .ok_or_else(|| CountryDbError::RecordNotFound(key.to_owned()))
}
