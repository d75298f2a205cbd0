// crates/countrydb-core/src/borders.rs
//! # Border Resolver
//!
//! Turns a country's `border_codes` into the neighbouring records.
//!
//! The resident record set is the primary source: codes are matched against
//! it directly and no request is made. When no set is resident (a detail
//! page reached directly), each code is looked up on the feed; lookups run
//! concurrently and the result keeps the order of `border_codes`.
//!
//! Codes that cannot be resolved are dropped from `countries` and listed
//! in [`BorderResolution::unresolved`].
use crate::db::CountryDb;
use crate::feed::CountryFeed;
use crate::model::CountryRecord;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Resolve `selected`'s border codes against the resident record set.
///
/// Order follows `selected.border_codes`; unknown codes are dropped.
pub fn resolve_borders<'a>(
    selected: &CountryRecord,
    all: &'a [CountryRecord],
) -> Vec<&'a CountryRecord> {
    if !selected.has_borders() {
        return Vec::new();
    }

    let by_code: HashMap<&str, &CountryRecord> =
        all.iter().map(|c| (c.alpha3_code(), c)).collect();

    selected
        .border_codes()
        .iter()
        .filter_map(|code| by_code.get(code.as_str()).copied())
        .collect()
}

/// Where border records come from.
#[derive(Clone, Copy)]
pub enum BorderSource<'a> {
    /// A loaded record set; resolution is a pure lookup.
    Resident(&'a CountryDb),
    /// One feed lookup per border code.
    Remote(&'a dyn CountryFeed),
}

/// Outcome of resolving one country's borders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderResolution {
    /// Resolved neighbours, in `border_codes` order.
    pub countries: Vec<CountryRecord>,
    /// Codes that could not be resolved, in `border_codes` order.
    pub unresolved: Vec<String>,
}

impl BorderResolution {
    /// Some border codes could not be resolved.
    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// No bordering countries to show.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(CountryRecord::common_name)
    }
}

/// Resolves borders from a [`BorderSource`].
pub struct BorderResolver<'a> {
    source: BorderSource<'a>,
}

impl<'a> BorderResolver<'a> {
    pub fn new(source: BorderSource<'a>) -> Self {
        Self { source }
    }

    pub fn resident(db: &'a CountryDb) -> Self {
        Self::new(BorderSource::Resident(db))
    }

    pub fn remote(feed: &'a dyn CountryFeed) -> Self {
        Self::new(BorderSource::Remote(feed))
    }

    /// Resolve the borders of `selected`.
    ///
    /// Returns `None` if `cancel` fired before the result was ready; the
    /// caller has moved on and nothing should be shown.
    pub fn resolve(
        &self,
        selected: &CountryRecord,
        cancel: &CancellationToken,
    ) -> Option<BorderResolution> {
        if cancel.is_cancelled() {
            return None;
        }

        let resolution = match self.source {
            BorderSource::Resident(db) => Self::from_resident(selected, db),
            BorderSource::Remote(feed) => Self::from_remote(selected, feed, cancel),
        };

        if cancel.is_cancelled() {
            tracing::debug!(country = %selected.alpha3_code(), "border resolution cancelled");
            return None;
        }

        if resolution.is_partial() {
            tracing::debug!(
                country = %selected.alpha3_code(),
                resolved = resolution.countries.len(),
                unresolved = ?resolution.unresolved,
                "partial border resolution"
            );
        }
        Some(resolution)
    }

    fn from_resident(selected: &CountryRecord, db: &CountryDb) -> BorderResolution {
        let mut resolution = BorderResolution::default();
        for code in selected.border_codes() {
            match db.find_by_code(code) {
                Some(country) => resolution.countries.push(country.clone()),
                None => resolution.unresolved.push(code.clone()),
            }
        }
        resolution
    }

    fn from_remote(
        selected: &CountryRecord,
        feed: &dyn CountryFeed,
        cancel: &CancellationToken,
    ) -> BorderResolution {
        // `collect` on an indexed parallel iterator keeps input order.
        let lookups: Vec<(&String, Option<CountryRecord>)> = selected
            .border_codes()
            .par_iter()
            .map(|code| {
                if cancel.is_cancelled() {
                    return (code, None);
                }
                match feed.fetch_by_code(code) {
                    Ok(country) => (code, Some(country)),
                    Err(e) => {
                        tracing::warn!(code = %code, error = %e, "border lookup failed");
                        (code, None)
                    }
                }
            })
            .collect();

        let mut resolution = BorderResolution::default();
        for (code, country) in lookups {
            match country {
                Some(country) => resolution.countries.push(country),
                None => resolution.unresolved.push(code.clone()),
            }
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CountryDbError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn db() -> CountryDb {
        CountryDb::from_json_str(
            r#"[
              {"name": {"common": "France"}, "cca3": "FRA", "region": "Europe",
               "borders": ["DEU", "ESP"]},
              {"name": {"common": "Germany"}, "cca3": "DEU", "region": "Europe",
               "borders": ["FRA"]},
              {"name": {"common": "Iceland"}, "cca3": "ISL", "region": "Europe"}
            ]"#,
        )
        .unwrap()
    }

    /// Feed answering code lookups from a fixed set; counts requests.
    struct StubFeed {
        db: CountryDb,
        calls: AtomicUsize,
        fail_with: Option<&'static str>,
        cancel_on_fetch: Option<CancellationToken>,
    }

    impl StubFeed {
        fn new(db: CountryDb) -> Self {
            Self {
                db,
                calls: AtomicUsize::new(0),
                fail_with: None,
                cancel_on_fetch: None,
            }
        }
    }

    impl CountryFeed for StubFeed {
        fn source(&self) -> String {
            "stub".into()
        }

        fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
            Ok(self.db.countries().to_vec())
        }

        fn fetch_by_code(&self, code: &str) -> Result<CountryRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(cancel) = &self.cancel_on_fetch {
                cancel.cancel();
            }
            if let Some(code) = self.fail_with.filter(|c| *c == code) {
                return Err(CountryDbError::feed("stub", format!("{code}: HTTP 500")));
            }
            self.db.get(code).cloned()
        }

        fn fetch_by_name(&self, name: &str) -> Result<CountryRecord> {
            self.db.get(name).cloned()
        }
    }

    /// Records the level of every event emitted while installed.
    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: tracing::Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    impl Levels {
        fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
            let subscriber = tracing_subscriber::registry().with(self.clone());
            tracing::subscriber::with_default(subscriber, f)
        }

        fn count(&self, level: Level) -> usize {
            self.0.lock().unwrap().iter().filter(|l| **l == level).count()
        }
    }

    fn single_thread_pool() -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap()
    }

    fn switzerland() -> CountryRecord {
        CountryDb::from_json_str(
            r#"[{"name": "Switzerland", "cca3": "CHE",
                 "borders": ["FRA", "XXX", "DEU", "ISL"]}]"#,
        )
        .unwrap()
        .countries()[0]
            .clone()
    }

    #[test]
    fn resident_drops_unknown_codes() {
        let db = db();
        let france = db.get("France").unwrap();
        let names: Vec<_> = resolve_borders(france, db.countries())
            .iter()
            .map(|c| c.common_name())
            .collect();
        assert_eq!(names, ["Germany"]);
    }

    #[test]
    fn no_borders_is_empty() {
        let db = db();
        let iceland = db.get("ISL").unwrap();
        assert!(resolve_borders(iceland, db.countries()).is_empty());

        let resolution = BorderResolver::resident(&db)
            .resolve(iceland, &CancellationToken::new())
            .unwrap();
        assert!(resolution.is_empty());
        assert!(!resolution.is_partial());
    }

    #[test]
    fn resident_resolver_reports_unresolved() {
        let db = db();
        let resolution = BorderResolver::resident(&db)
            .resolve(db.get("FRA").unwrap(), &CancellationToken::new())
            .unwrap();
        assert_eq!(resolution.names().collect::<Vec<_>>(), ["Germany"]);
        assert_eq!(resolution.unresolved, ["ESP"]);
        assert!(resolution.is_partial());
    }

    #[test]
    fn remote_preserves_order_and_drops_failures() {
        let selected = switzerland();

        let mut feed = StubFeed::new(db());
        feed.fail_with = Some("ISL");

        let resolution = BorderResolver::remote(&feed)
            .resolve(&selected, &CancellationToken::new())
            .unwrap();

        assert_eq!(
            resolution.names().collect::<Vec<_>>(),
            ["France", "Germany"]
        );
        assert_eq!(resolution.unresolved, ["XXX", "ISL"]);
        assert_eq!(feed.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn cancelled_token_yields_nothing() {
        let db = db();
        let feed = StubFeed::new(db.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let france = db.get("FRA").unwrap();
        assert!(BorderResolver::remote(&feed).resolve(france, &cancel).is_none());
        assert!(BorderResolver::resident(&db).resolve(france, &cancel).is_none());
        assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancelling_mid_resolution_stops_lookups() {
        let cancel = CancellationToken::new();
        let mut feed = StubFeed::new(db());
        feed.cancel_on_fetch = Some(cancel.clone());
        let selected = switzerland();

        // One worker runs the lookups in order, so only the first reaches the feed.
        let resolution = single_thread_pool()
            .install(|| BorderResolver::remote(&feed).resolve(&selected, &cancel));

        assert!(resolution.is_none());
        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn partial_resident_resolution_is_not_a_warning() {
        let db = db();
        let levels = Levels::default();
        let resolution = levels.capture(|| {
            BorderResolver::resident(&db)
                .resolve(db.get("FRA").unwrap(), &CancellationToken::new())
                .unwrap()
        });

        assert!(resolution.is_partial());
        assert_eq!(levels.count(Level::WARN), 0);
        assert!(levels.count(Level::DEBUG) >= 1);
    }

    #[test]
    fn failed_remote_lookup_is_a_warning() {
        let mut feed = StubFeed::new(db());
        feed.fail_with = Some("ISL");
        let selected = switzerland();
        let levels = Levels::default();

        // The subscriber is thread-local, so install it on the pool's worker.
        let resolution = single_thread_pool().install(|| {
            levels.capture(|| {
                BorderResolver::remote(&feed)
                    .resolve(&selected, &CancellationToken::new())
                    .unwrap()
            })
        });

        // XXX is unknown to the feed and ISL errors: one warning each.
        assert_eq!(resolution.unresolved, ["XXX", "ISL"]);
        assert_eq!(levels.count(Level::WARN), 2);
    }
}
