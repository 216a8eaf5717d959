//! Case folding used by the search predicate.

/// Fold `text` for case-insensitive comparison.
///
/// Only lowercasing is applied: no trimming, no Unicode normalization, so a
/// search term matches exactly the raw substring the user typed.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Whether `haystack` contains `folded_needle` once folded.
/// The needle must already have gone through [`fold_case`].
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    if folded_needle.is_empty() {
        return true;
    }
    fold_case(haystack).contains(folded_needle)
}
