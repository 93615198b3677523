use crate::store::Metadata;
use std::iter;

/// Reports whether `search_term` fuzzily matches `item`.
///
/// With `show_all` the term is matched against `"{context} {cluster} {file}"`,
/// otherwise against the context alone. No field carries more weight than
/// another, so a single combined target is enough.
pub fn fuzzy_filter_konf(search_term: &str, item: &Metadata, show_all: bool) -> bool {
    if !show_all {
        return fuzzy_match(search_term, &item.context);
    }
    let combined = item
        .context
        .chars()
        .chain(iter::once(' '))
        .chain(item.cluster.chars())
        .chain(iter::once(' '))
        .chain(item.file.chars());
    is_subsequence(search_term, combined)
}

/// Case-insensitive subsequence test: every char of `source` must appear in
/// `target` in the same order, gaps allowed.
pub fn fuzzy_match(source: &str, target: &str) -> bool {
    is_subsequence(source, target.chars())
}

fn is_subsequence(source: &str, target: impl Iterator<Item = char>) -> bool {
    let mut haystack = target.flat_map(char::to_lowercase);
    source
        .chars()
        .flat_map(char::to_lowercase)
        .all(|needle| haystack.any(|c| c == needle))
}
