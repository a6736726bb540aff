//! URL modeling: normalization of archived URLs into parameter templates,
//! and filename derivation for per-domain result files.

mod extension;
mod normalize;
mod query;
mod sanitize;

pub use extension::{path_extension, ExtensionDenylist, DEFAULT_EXTENSIONS};
pub use normalize::{
    normalize, parse_absolute, split_raw, NormalizedUrlSet, Normalizer, DEFAULT_PLACEHOLDER,
};
pub use query::{placeholderize_query, query_keys};
pub use sanitize::sanitize_filename_for_linux;

/// Result file name used when a domain sanitizes to nothing usable.
const DEFAULT_FILENAME: &str = "domain.txt";

/// Derives the result file name for `domain`: the sanitized domain plus `.txt`.
///
/// # Examples
///
/// - `result_filename("example.com")` → `"example.com.txt"`
/// - `result_filename("example.com/blog")` → `"example.com_blog.txt"`
pub fn result_filename(domain: &str) -> String {
    let sanitized = sanitize_filename_for_linux(domain);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{}.txt", sanitized)
    }
}
