//! # Link Helpers
//!
//! Record keys are page addresses with the fragment and query removed. The
//! helpers here operate on strings so that stored keys stay byte-identical to
//! what the page reported; only hostname extraction parses the URL.

use crate::NovelHiderError;
use crate::primitives::NOVEL_INDEX_SUFFIX;

/// Strip everything from the first `#`, then from the first `?`.
#[must_use]
pub fn normalize_page_url(raw: &str) -> &str {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    without_fragment.split('?').next().unwrap_or(without_fragment)
}

/// Derive the novel's page key from a breadcrumb link to its table of contents.
///
/// `https://host/book/42/index.html` becomes `https://host/book/42.html`.
/// A link without the index suffix still gets `.html` appended.
#[must_use]
pub fn novel_url_from_index(href: &str) -> String {
    let base = href.split(NOVEL_INDEX_SUFFIX).next().unwrap_or(href);
    format!("{base}.html")
}

/// Site identifier for a hostname: lowercase, without a `www.` prefix.
#[must_use]
pub fn site_key(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Root domain (last two labels) of a hostname, if it has at least two.
#[must_use]
pub fn root_domain(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }
    Some(labels[labels.len() - 2..].join("."))
}

/// Hostname of an absolute page URL.
pub fn host_of(page_url: &str) -> Result<String, NovelHiderError> {
    let parsed = ::url::Url::parse(page_url)
        .map_err(|e| NovelHiderError::ConfigError(format!("invalid url '{}': {}", page_url, e)))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| NovelHiderError::ConfigError(format!("url has no host: {}", page_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_fragment_then_query() {
        assert_eq!(
            normalize_page_url("https://twkan.com/book/1.html?from=list#top"),
            "https://twkan.com/book/1.html"
        );
        assert_eq!(
            normalize_page_url("https://twkan.com/txt/1/2#a?b"),
            "https://twkan.com/txt/1/2"
        );
        assert_eq!(normalize_page_url("plain"), "plain");
    }

    #[test]
    fn index_link_maps_to_novel_page() {
        assert_eq!(
            novel_url_from_index("https://twkan.com/book/42/index.html"),
            "https://twkan.com/book/42.html"
        );
    }

    #[test]
    fn site_key_and_root_domain() {
        assert_eq!(site_key("www.TWKAN.com"), "twkan.com");
        assert_eq!(root_domain("m.twkan.com").as_deref(), Some("twkan.com"));
        assert_eq!(root_domain("localhost"), None);
    }

    #[test]
    fn host_of_parses_absolute_urls() {
        assert_eq!(host_of("https://www.twkan.com/book/1.html").expect("host"), "www.twkan.com");
        assert!(host_of("not a url").is_err());
    }
}
