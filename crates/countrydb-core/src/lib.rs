// crates/countrydb-core/src/lib.rs
//! # countrydb-core
//!
//! The logic behind a country directory: it turns a loosely structured feed
//! of country records into a canonical set, derives the selectable filter
//! options, filters and sorts the visible list and resolves the bordering
//! countries of a selected record.
//!
//! ```rust
//! use countrydb_core::prelude::*;
//!
//! let db = CountryDb::from_json_str(
//!     r#"[{"name": {"common": "France"}, "cca3": "FRA", "region": "Europe",
//!          "population": 67000000, "area": 551695, "borders": ["DEU"]},
//!         {"name": {"common": "Germany"}, "cca3": "DEU", "region": "Europe",
//!          "population": 83000000, "area": 357022, "borders": ["FRA"]}]"#,
//! )?;
//!
//! let mut query = QueryState::default();
//! query.set_sort_key(SortKey::PopulationDesc);
//!
//! let names: Vec<_> = apply(db.countries(), query.selection())
//!     .iter()
//!     .map(|c| c.common_name())
//!     .collect();
//! assert_eq!(names, ["Germany", "France"]);
//! # Ok::<(), countrydb_core::CountryDbError>(())
//! ```

pub mod borders;
pub mod config;
pub mod db;
pub mod error;
pub mod feed; // The public loader
pub mod filter;
pub mod model;
pub mod normalize;
pub mod options;
pub mod prelude;
pub mod query;
pub mod text;
pub mod traits;
pub mod view;
// Shared Raw Input (feed shapes before normalization)
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::borders::{resolve_borders, BorderResolution, BorderResolver, BorderSource};
pub use crate::config::FeedConfig;
pub use crate::db::{CountryDb, DbStats};
pub use crate::error::{CountryDbError, Result};
pub use crate::feed::{load_all, CountryFeed};
pub use crate::filter::apply;
pub use crate::model::CountryRecord;
pub use crate::options::{languages_of, regions_of, subregions_of};
pub use crate::query::{QuerySelection, QueryState, SortKey};
