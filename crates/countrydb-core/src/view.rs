// crates/countrydb-core/src/view.rs
//! # Views
//!
//! Presentation-independent state for the two screens of the directory:
//!
//! - [`DirectoryView`]: the list with its filter controls
//! - [`DetailView`]: one country and its neighbours
//!
//! A front-end renders these states; it never re-derives options or
//! re-implements filtering itself.
use crate::borders::{BorderResolution, BorderResolver, BorderSource};
use crate::db::CountryDb;
use crate::error::Result;
use crate::feed::{load_all, CountryFeed};
use crate::filter::apply;
use crate::model::CountryRecord;
use crate::options::{languages_of, regions_of, subregions_of};
use crate::query::{QuerySelection, QueryState, SortKey};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of the session's one bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum LoadState {
    Loaded,
    /// The feed was unavailable; the message is user-facing.
    Failed(String),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// The list view: loaded records, the active query and everything derived
/// from them.
///
/// After a failed load the record set is empty, so options and results are
/// empty too until [`DirectoryView::reload`] succeeds.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    db: Arc<CountryDb>,
    load_state: LoadState,
    query: QueryState,
}

impl DirectoryView {
    /// Load the whole feed once.
    pub fn load(feed: &dyn CountryFeed) -> Self {
        let mut view = Self::from_db(CountryDb::default());
        view.reload(feed);
        view
    }

    /// Wrap an already loaded record set.
    pub fn from_db(db: impl Into<Arc<CountryDb>>) -> Self {
        Self {
            db: db.into(),
            load_state: LoadState::Loaded,
            query: QueryState::default(),
        }
    }

    /// Fetch the feed again, replacing the record set. The query is kept;
    /// a subregion that no longer exists is cleared.
    pub fn reload(&mut self, feed: &dyn CountryFeed) {
        match load_all(feed) {
            Ok(db) => {
                self.db = Arc::new(db);
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!(source = %feed.source(), error = %e, "country feed load failed");
                self.db = Arc::new(CountryDb::default());
                self.load_state = LoadState::Failed(e.to_string());
            }
        }

        let subregion = self.query.selection().subregion.clone();
        if self.query.set_subregion(subregion, self.db.countries()).is_err() {
            self.query.set_subregion(None, &[]).ok();
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The shared record set, e.g. for a [`DetailView`].
    pub fn db(&self) -> &Arc<CountryDb> {
        &self.db
    }

    pub fn selection(&self) -> &QuerySelection {
        self.query.selection()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.set_search_text(text);
    }

    pub fn set_region(&mut self, region: Option<String>) {
        self.query.set_region(region);
    }

    pub fn set_subregion(&mut self, subregion: Option<String>) -> Result<()> {
        self.query.set_subregion(subregion, self.db.countries())
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.query.set_language(language);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.query.set_sort_key(key);
    }

    pub fn reset(&mut self) {
        self.query.reset();
    }

    pub fn regions(&self) -> Vec<String> {
        regions_of(self.db.countries())
    }

    /// Subregions of the selected region; empty while no region is set.
    pub fn subregions(&self) -> Vec<String> {
        subregions_of(self.db.countries(), self.query.selection().region.as_deref())
    }

    pub fn languages(&self) -> Vec<String> {
        languages_of(self.db.countries())
    }

    /// The visible list: filtered, then sorted.
    pub fn results(&self) -> Vec<&CountryRecord> {
        apply(self.db.countries(), self.query.selection())
    }
}

/// What the detail screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DetailState {
    /// No country selected.
    #[default]
    Idle,
    Loading { key: String },
    Ready {
        country: CountryRecord,
        borders: BorderResolution,
    },
    /// The name or code does not exist. Distinct from a country with no
    /// borders, which is `Ready` with empty `borders`.
    NotFound { key: String },
    Failed { message: String },
}

/// Handle for one navigation. Completions carrying an outdated ticket are
/// discarded.
#[derive(Debug, Clone)]
pub struct Ticket {
    key: String,
    generation: u64,
    cancel: CancellationToken,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fires when the view navigates elsewhere.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// State machine for the detail screen.
///
/// Each [`navigate`](DetailView::navigate) hands out a [`Ticket`] and
/// cancels the previous one. The caller resolves the detail (on any thread)
/// with [`fetch_detail`] and reports back through
/// [`complete`](DetailView::complete), which ignores stale tickets.
#[derive(Debug, Default)]
pub struct DetailView {
    state: DetailState,
    generation: u64,
    cancel: CancellationToken,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Start showing `key` (a common name or alpha-3 code).
    pub fn navigate(&mut self, key: &str) -> Ticket {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation += 1;
        self.state = DetailState::Loading {
            key: key.to_owned(),
        };

        Ticket {
            key: key.to_owned(),
            generation: self.generation,
            cancel: self.cancel.clone(),
        }
    }

    /// Leave the detail screen; any in-flight resolution is cancelled.
    pub fn leave(&mut self) {
        self.cancel.cancel();
        self.generation += 1;
        self.state = DetailState::Idle;
    }

    /// Apply the outcome of `ticket`'s resolution.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale or the
    /// resolution was cancelled.
    pub fn complete(&mut self, ticket: &Ticket, outcome: Option<DetailState>) -> bool {
        if ticket.generation != self.generation || ticket.cancel.is_cancelled() {
            tracing::debug!(key = %ticket.key, "discarding stale detail result");
            return false;
        }
        let Some(state) = outcome else {
            return false;
        };
        self.state = state;
        true
    }

    /// Navigate to `key` and resolve it on the calling thread.
    pub fn open(&mut self, key: &str, source: BorderSource<'_>) -> &DetailState {
        let ticket = self.navigate(key);
        let outcome = fetch_detail(ticket.key(), source, ticket.token());
        self.complete(&ticket, outcome);
        &self.state
    }
}

/// Look up `key` and resolve its borders from `source`.
///
/// The resident set is searched by name, then code. Remotely, a full-name
/// lookup is tried first and an alpha-3 lookup second. Returns `None` if
/// `cancel` fired.
pub fn fetch_detail(
    key: &str,
    source: BorderSource<'_>,
    cancel: &CancellationToken,
) -> Option<DetailState> {
    let key = key.trim();
    let country = match source {
        BorderSource::Resident(db) => db.get(key).cloned(),
        BorderSource::Remote(feed) => feed.fetch_by_name(key).or_else(|e| {
            if e.is_not_found() && key.len() == 3 {
                feed.fetch_by_code(key)
            } else {
                Err(e)
            }
        }),
    };

    if cancel.is_cancelled() {
        return None;
    }

    let country = match country {
        Ok(country) => country,
        Err(e) if e.is_not_found() => {
            return Some(DetailState::NotFound {
                key: key.to_owned(),
            })
        }
        Err(e) => {
            tracing::error!(%key, error = %e, "country lookup failed");
            return Some(DetailState::Failed {
                message: e.to_string(),
            });
        }
    };

    let borders = BorderResolver::new(source).resolve(&country, cancel)?;
    Some(DetailState::Ready { country, borders })
}
