//! Archive index queries and domain input handling.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Wayback Machine base URL serving the CDX index.
pub const DEFAULT_ARCHIVE_URL: &str = "https://web.archive.org";

/// CDX query for every original URL captured under `domain`, one per line,
/// collapsed on the URL key. `archive_url` is a base URL; a bare host is
/// taken as `https://<host>`.
pub fn index_query_url(archive_url: &str, domain: &str) -> String {
    let base = archive_url.trim().trim_end_matches('/');
    let scheme = if base.contains("://") { "" } else { "https://" };
    format!(
        "{}{}/cdx/search/cdx?url={}/*&output=txt&collapse=urlkey&fl=original&page=/",
        scheme, base, domain
    )
}

/// Cleans one domain argument: trims, lowercases and removes `http://` /
/// `https://`. Returns `None` for blank input.
pub fn clean_domain(input: &str) -> Option<String> {
    let domain = input
        .trim()
        .to_lowercase()
        .replace("https://", "")
        .replace("http://", "");
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

/// Cleans a domain list (one per line): blank lines and exact duplicates
/// (after cleaning) are removed; first occurrences keep their order.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .filter_map(clean_domain)
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

/// Reads and cleans a domain list file.
pub fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read domain list {}", path.display()))?;
    Ok(parse_domain_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_for_domain() {
        assert_eq!(
            index_query_url(DEFAULT_ARCHIVE_URL, "example.com"),
            "https://web.archive.org/cdx/search/cdx?url=example.com/*&output=txt&collapse=urlkey&fl=original&page=/"
        );
    }

    #[test]
    fn query_url_tolerates_bare_host_and_trailing_slash() {
        assert_eq!(
            index_query_url("https://archive.example/", "a.com"),
            index_query_url("archive.example", "a.com")
        );
    }

    #[test]
    fn query_url_keeps_explicit_scheme() {
        assert!(index_query_url("http://127.0.0.1:8080", "a.com")
            .starts_with("http://127.0.0.1:8080/cdx/search/cdx?url=a.com/*"));
    }

    #[test]
    fn clean_domain_strips_scheme_and_case() {
        assert_eq!(clean_domain("  HTTPS://Example.COM ").as_deref(), Some("example.com"));
        assert_eq!(clean_domain("http://a.com").as_deref(), Some("a.com"));
        assert_eq!(clean_domain("   "), None);
        assert_eq!(clean_domain("https://"), None);
    }

    #[test]
    fn domain_list_drops_blanks_and_duplicates() {
        let text = "a.com\n\nhttps://b.com\nA.com\n  \nhttp://a.com\nc.com\n";
        assert_eq!(parse_domain_list(text), vec!["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn read_domain_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "x.org\r\ny.org\r\nx.org\r\n").unwrap();
        assert_eq!(read_domain_list(&path).unwrap(), vec!["x.org", "y.org"]);
    }

    #[test]
    fn read_domain_list_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_domain_list(&dir.path().join("missing.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("read domain list"));
    }
}
