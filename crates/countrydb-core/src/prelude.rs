// crates/countrydb-core/src/prelude.rs
pub use crate::borders::{resolve_borders, BorderResolution, BorderResolver, BorderSource};
pub use crate::config::FeedConfig;
pub use crate::db::{CountryDb, DbStats};
pub use crate::error::{CountryDbError, Result};
pub use crate::feed::{load_all, CountryFeed, FileFeed};
#[cfg(feature = "http")]
pub use crate::feed::HttpFeed;
pub use crate::filter::apply;
pub use crate::model::CountryRecord;
pub use crate::options::{languages_of, regions_of, subregions_of};
pub use crate::query::{QuerySelection, QueryState, SortKey};
pub use crate::traits::NameMatch;
pub use crate::view::{fetch_detail, DetailState, DetailView, DirectoryView, LoadState, Ticket};
pub use tokio_util::sync::CancellationToken;
