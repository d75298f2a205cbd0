// crates/countrydb-core/src/traits.rs
use crate::text::{contains_ignore_case, equals_ignore_case};

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`], and get:
/// - [`NameMatch::is_named`]: case-insensitive equality
/// - [`NameMatch::name_contains`]: case-insensitive substring match
///
/// Accents are significant: `"Réunion"` is not named `"reunion"`.
///
/// # Examples
/// ```rust
/// use countrydb_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Réunion").is_named("RÉUNION"));
/// assert!(!Place("Réunion").is_named("reunion"));
/// assert!(Place("Curaçao").name_contains("CURAÇ"));
/// assert!(Place("Curaçao").name_contains(""));
/// ```
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_ignore_case(self.name_str(), q)
    }

    /// Only the empty query matches everything.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        contains_ignore_case(self.name_str(), q)
    }
}

impl NameMatch for str {
    #[inline]
    fn name_str(&self) -> &str {
        self
    }
}

impl NameMatch for String {
    #[inline]
    fn name_str(&self) -> &str {
        self
    }
}
