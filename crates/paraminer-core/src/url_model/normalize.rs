//! Per-URL normalization pipeline and set deduplication.

use std::collections::BTreeSet;

use url::{Position, Url};

use super::extension::ExtensionDenylist;
use super::query::placeholderize_query;

/// Placeholder used when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "FUZZ";

/// Deduplicated output of normalization. Ordered so result files are stable.
pub type NormalizedUrlSet = BTreeSet<String>;

/// Splits a fetched index body into whitespace-delimited URL tokens.
pub fn split_raw(body: &str) -> Vec<&str> {
    body.split_whitespace().collect()
}

/// Parses an absolute URL with a host. Relative or malformed tokens yield `None`.
///
/// Parsing drops the default port of the scheme, so `http://example.com:80/a`
/// comes back as `http://example.com/a`, while `http://example.com:8080/a`
/// and `http://example.com:443/a` keep theirs.
pub fn parse_absolute(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return None;
    }
    Some(url)
}

/// Serializes `url`, putting back a default port that parsing elided for a
/// scheme other than http/https (`ws://a.com:80/` keeps its `:80`).
fn serialize(url: &Url, raw: &str) -> String {
    if matches!(url.scheme(), "http" | "https") || url.port().is_some() {
        return url.as_str().to_string();
    }
    match (url.port_or_known_default(), explicit_port(raw)) {
        (Some(default), Some(port)) if port == default => format!(
            "{}:{}{}",
            &url[..Position::AfterHost],
            port,
            &url[Position::AfterPort..]
        ),
        _ => url.as_str().to_string(),
    }
}

/// Port written in the authority of `raw`, if any.
fn explicit_port(raw: &str) -> Option<u16> {
    let (_, rest) = raw.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#', '\\']).next()?;
    let host_port = authority.rsplit('@').next()?;
    let after_host = match host_port.rfind(']') {
        Some(i) => &host_port[i + 1..],
        None => host_port,
    };
    let (_, port) = after_host.rsplit_once(':')?;
    port.parse().ok()
}

/// Normalizer configuration: denylist plus placeholder.
#[derive(Debug, Clone)]
pub struct Normalizer {
    denylist: ExtensionDenylist,
    placeholder: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ExtensionDenylist::default(), DEFAULT_PLACEHOLDER)
    }
}

impl Normalizer {
    pub fn new(denylist: ExtensionDenylist, placeholder: impl Into<String>) -> Self {
        Self {
            denylist,
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn denylist(&self) -> &ExtensionDenylist {
        &self.denylist
    }

    /// Normalizes one token. `None` means the token is dropped: unparseable,
    /// denied extension, or no query parameters.
    pub fn normalize_one(&self, raw: &str) -> Option<String> {
        let mut url = parse_absolute(raw)?;
        if self.denylist.denies_path(url.path()) {
            return None;
        }
        if !placeholderize_query(&mut url, &self.placeholder) {
            return None;
        }
        Some(serialize(&url, raw))
    }

    /// Normalizes every token and collapses exact duplicates.
    pub fn normalize<I, S>(&self, raw: I) -> NormalizedUrlSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|token| self.normalize_one(token.as_ref()))
            .collect()
    }
}

/// Normalizes `raw` tokens with the given denylist and placeholder.
pub fn normalize<I, S>(raw: I, denylist: &ExtensionDenylist, placeholder: &str) -> NormalizedUrlSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Normalizer::new(denylist.clone(), placeholder).normalize(raw)
}
