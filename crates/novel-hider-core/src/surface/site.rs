//! Per-site selector configuration.
//!
//! A [`SiteRegistry`] maps a site identifier (hostname without `www.`) to the
//! CSS selectors the page adapters use to find each anchor. It is resolved
//! once at startup and passed to the adapters. The engine and store never see
//! it.
//!
//! Registries deserialize from a table keyed by site, e.g. in TOML:
//!
//! ```toml
//! [sites."twkan.com"]
//! novel_selector = 'li:has(a[href*="/book/"])'
//! # ...
//! ```

use crate::NovelHiderError;
use crate::links::{host_of, root_domain, site_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selectors for every anchor role the adapters look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    // List view
    pub novel_selector: String,
    pub novel_link_selector: String,
    pub novel_title_selector: String,
    /// Where list-view buttons are appended.
    pub list_button_container: String,

    // Novel page
    /// Where the main button bar is placed.
    pub single_novel_container: String,
    pub main_page_content: String,
    pub single_novel_title: String,

    // Chapter page
    pub chapter_page_content: String,
    /// Breadcrumb holding the link back to the novel.
    pub chapter_breadcrumb: String,
    /// Index of the novel link among the breadcrumb's anchors.
    #[serde(default = "default_breadcrumb_link_index")]
    pub breadcrumb_novel_link_index: usize,
    pub chapter_tools_container: String,
    pub chapter_title: String,
    /// Table-of-contents control; tracking buttons are inserted before it.
    pub chapter_toc: String,
}

fn default_breadcrumb_link_index() -> usize {
    2
}

impl SiteConfig {
    /// Selectors for twkan.com.
    #[must_use]
    pub fn twkan() -> Self {
        Self {
            novel_selector: r#"li:has(a[href*="/book/"])"#.to_string(),
            novel_link_selector: r#"a[href*="/book/"]"#.to_string(),
            novel_title_selector: "h3 a".to_string(),
            list_button_container: ".newright".to_string(),
            single_novel_container: ".addbtn".to_string(),
            main_page_content: ".bookbox".to_string(),
            single_novel_title: "div.booknav2 h1 a".to_string(),
            chapter_page_content: "#txtcontent0".to_string(),
            chapter_breadcrumb: ".bread".to_string(),
            breadcrumb_novel_link_index: default_breadcrumb_link_index(),
            chapter_tools_container: ".tools ul".to_string(),
            chapter_title: ".txtnav h1".to_string(),
            chapter_toc: "li:has(.icon-mulu)".to_string(),
        }
    }
}

/// Site configurations keyed by site identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRegistry {
    #[serde(default)]
    pub sites: BTreeMap<String, SiteConfig>,
}

impl SiteRegistry {
    /// Registry with the sites supported out of the box.
    #[must_use]
    pub fn builtin() -> Self {
        let mut sites = BTreeMap::new();
        sites.insert("twkan.com".to_string(), SiteConfig::twkan());
        Self { sites }
    }

    /// Add or replace the configuration for `site`.
    pub fn insert(&mut self, site: impl AsRef<str>, config: SiteConfig) {
        self.sites.insert(site_key(site.as_ref()), config);
    }

    /// Find the configuration for a hostname.
    ///
    /// Tries the hostname without `www.` first, then its root domain.
    #[must_use]
    pub fn resolve(&self, host: &str) -> Option<&SiteConfig> {
        let key = site_key(host);
        if let Some(config) = self.sites.get(&key) {
            return Some(config);
        }
        root_domain(&key).and_then(|root| self.sites.get(&root))
    }

    /// Find the configuration for an absolute page URL.
    pub fn resolve_url(&self, page_url: &str) -> Result<&SiteConfig, NovelHiderError> {
        let host = host_of(page_url)?;
        self.resolve(&host)
            .ok_or(NovelHiderError::SiteNotSupported(host))
    }
}
