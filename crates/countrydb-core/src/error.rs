// crates/countrydb-core/src/error.rs
use thiserror::Error;

/// Errors produced by the country directory core.
///
/// None of these are fatal to the process; each maps onto a terminal state
/// of the affected view (see [`crate::view`]).
#[derive(Debug, Error)]
pub enum CountryDbError {
    /// The feed could not be reached, answered with a non-success status or
    /// returned a body that is not a list of countries.
    #[error("country feed unavailable at {url}: {reason}")]
    FeedUnavailable { url: String, reason: String },

    /// A country name or code has no match.
    #[error("country not found: {0}")]
    RecordNotFound(String),

    /// A raw record lacks an identity field (`name` or `cca3`).
    #[error("malformed country record: {0}")]
    MalformedRecord(String),

    /// A query mutation would break the region/subregion dependency.
    #[error("invalid {field} selection: {value}")]
    InvalidSelection { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CountryDbError {
    pub(crate) fn feed(url: impl Into<String>, reason: impl ToString) -> Self {
        CountryDbError::FeedUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that should render as a "not found" state rather
    /// than as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CountryDbError::RecordNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CountryDbError>;
