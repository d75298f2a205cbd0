// crates/countrydb-core/src/text.rs

/// Compares two strings for equality ignoring case.
///
/// Only Unicode lowercasing is applied; accented letters stay distinct from
/// their unaccented forms.
///
/// ```rust
/// use countrydb_core::text::equals_ignore_case;
///
/// assert!(equals_ignore_case("Français", "FRANÇAIS"));
/// assert!(!equals_ignore_case("Français", "francais"));
/// ```
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test.
///
/// Only the empty needle matches everything; whitespace is matched literally.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trims `s` and returns it as an owned string, or `None` if nothing is left.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}
