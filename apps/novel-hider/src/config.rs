//! # Site Configuration Loading
//!
//! The console resolves site selectors from the built-in registry, optionally
//! extended by a TOML file passed with `--sites`:
//!
//! ```toml
//! [sites."example.org"]
//! novel_selector = ".book-item"
//! novel_link_selector = "a.book-link"
//! # ... every SiteConfig field
//! ```
//!
//! Entries from the file replace built-in entries with the same site key.

use novel_hider_core::{NovelHiderError, SiteRegistry};
use std::path::Path;

/// Maximum size of a site configuration file (1 MB).
const MAX_SITES_FILE_SIZE: u64 = 1024 * 1024;

/// Parse a site registry from TOML content.
pub fn parse_site_registry(content: &str) -> Result<SiteRegistry, NovelHiderError> {
    toml::from_str(content)
        .map_err(|e| NovelHiderError::ConfigError(format!("parse site registry: {e}")))
}

/// Built-in registry, extended with the sites in `path` when given.
pub fn load_site_registry(path: Option<&Path>) -> Result<SiteRegistry, NovelHiderError> {
    let mut registry = SiteRegistry::builtin();
    let Some(path) = path else {
        return Ok(registry);
    };

    let metadata = std::fs::metadata(path).map_err(|e| {
        NovelHiderError::IoError(format!("Cannot read {}: {}", path.display(), e))
    })?;
    if metadata.len() > MAX_SITES_FILE_SIZE {
        return Err(NovelHiderError::ConfigError(format!(
            "{} is {} bytes, maximum is {}",
            path.display(),
            metadata.len(),
            MAX_SITES_FILE_SIZE
        )));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| NovelHiderError::IoError(format!("Read {}: {}", path.display(), e)))?;

    let extra = parse_site_registry(&content)?;
    tracing::debug!(path = %path.display(), sites = extra.sites.len(), "loaded site registry");
    for (site, config) in extra.sites {
        registry.insert(site, config);
    }
    Ok(registry)
}
