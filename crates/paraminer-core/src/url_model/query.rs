//! Query-string placeholderization.

use url::Url;

/// Distinct query keys of `url`, in first-seen order.
///
/// The empty key of `?=1` counts as a key; empty pairs (`&&`) do not.
pub fn query_keys(url: &Url) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for (key, _) in url.query_pairs() {
        if !keys.iter().any(|k| *k == key) {
            keys.push(key.into_owned());
        }
    }
    keys
}

/// Rewrites the query so every key appears once with `placeholder` as value.
///
/// Returns `false` (leaving `url` untouched) when the URL has no query keys.
pub fn placeholderize_query(url: &mut Url, placeholder: &str) -> bool {
    let keys = query_keys(url);
    if keys.is_empty() {
        return false;
    }
    url.query_pairs_mut()
        .clear()
        .extend_pairs(keys.iter().map(|k| (k.as_str(), placeholder)));
    true
}
