//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use novel_hider_core::primitives::UNKNOWN_TITLE;
use novel_hider_core::surface::category_control_disabled;
use novel_hider_core::{
    Action, ActionContext, Category, FileArea, Filter, NovelHiderError, OptionsSurface, RedbArea,
    Repository, SiteRegistry, SortOrder, StorageArea, SystemClock, category_counts,
    current_status, hidden_set,
};
use std::path::PathBuf;

// =============================================================================
// STORE SELECTION
// =============================================================================

/// Where the record collection lives.
#[derive(Debug, Clone)]
pub struct StoreArgs {
    pub path: PathBuf,
    pub backend: String,
    pub slot: String,
}

/// Storage backend kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// JSON object file, one key per slot.
    File,
    /// redb database file.
    Redb,
}

impl std::str::FromStr for Backend {
    type Err = NovelHiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "redb" => Ok(Self::Redb),
            _ => Err(NovelHiderError::UnknownBackend(s.to_string())),
        }
    }
}

/// Open the repository described by the store arguments.
pub fn open_repository(
    store: &StoreArgs,
) -> Result<Repository<Box<dyn StorageArea>>, NovelHiderError> {
    let area: Box<dyn StorageArea> = match store.backend.parse::<Backend>()? {
        Backend::File => Box::new(FileArea::open(&store.path)),
        Backend::Redb => Box::new(RedbArea::open(&store.path)?),
    };
    tracing::debug!(
        path = %store.path.display(),
        backend = %store.backend,
        slot = %store.slot,
        "opened store"
    );
    Ok(Repository::with_slot(area, store.slot.clone()))
}

fn print_json(output: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(output).unwrap_or_default()
    );
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List tracked novels the way the options page shows them.
pub fn cmd_list(
    store: &StoreArgs,
    json_mode: bool,
    filter: &str,
    order: &str,
) -> Result<(), NovelHiderError> {
    let filter: Filter = filter.parse()?;
    let order: SortOrder = order.parse()?;
    let repo = open_repository(store)?;
    let view = OptionsSurface::with_state(filter, order).view(&repo.try_load()?);

    if json_mode {
        let output = serde_json::to_value(&view)
            .map_err(|e| NovelHiderError::SerializationError(e.to_string()))?;
        print_json(&output);
        return Ok(());
    }

    println!("Tracked Novels ({})", view.counts.total);
    println!("==================");
    if let Some(message) = &view.empty_message {
        println!("{}", message);
        return Ok(());
    }
    for row in &view.rows {
        let title = if row.title.is_empty() {
            UNKNOWN_TITLE
        } else {
            row.title.as_str()
        };
        println!("[{}] {}", row.category_label, title);
        println!("    {}", row.url);
        if let Some(link) = &row.continue_link {
            println!("    {} -> {}", link.text, link.url);
        }
    }

    Ok(())
}

// =============================================================================
// COUNTS COMMAND
// =============================================================================

/// Show total and per-category counts.
pub fn cmd_counts(store: &StoreArgs, json_mode: bool) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let counts = category_counts(&repo.try_load()?);

    if json_mode {
        let output = serde_json::json!({
            "store": store.path.to_string_lossy(),
            "backend": store.backend,
            "slot": store.slot,
            "counts": counts,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Novel Hider Status");
    println!("==================");
    println!("Store:   {:?}", store.path);
    println!("Backend: {}", store.backend);
    println!("Slot:    {}", store.slot);
    println!();
    println!("Total:     {}", counts.total);
    for category in Category::ALL {
        println!("{:<10} {}", format!("{}:", category.label()), counts.get(category));
    }

    Ok(())
}

// =============================================================================
// HIDDEN COMMAND
// =============================================================================

/// Print every URL a list page would hide.
pub fn cmd_hidden(store: &StoreArgs, json_mode: bool) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let hidden = hidden_set(&repo.try_load()?);

    if json_mode {
        print_json(&serde_json::json!(hidden));
        return Ok(());
    }

    for url in &hidden {
        println!("{}", url);
    }
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show a novel's status and which category controls would be disabled.
pub fn cmd_status(
    store: &StoreArgs,
    json_mode: bool,
    url: &str,
    chapter_url: Option<&str>,
) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let loaded = repo.try_load()?;
    let record = loaded.get(url);
    let status = current_status(&loaded, url);

    let controls: Vec<(Category, bool)> = Category::ALL
        .iter()
        .map(|&c| (c, category_control_disabled(record, c, chapter_url)))
        .collect();

    if json_mode {
        let output = serde_json::json!({
            "url": url,
            "status": status.to_string(),
            "record": record,
            "controls": controls
                .iter()
                .map(|(c, disabled)| serde_json::json!({ "category": c, "disabled": disabled }))
                .collect::<Vec<_>>(),
        });
        print_json(&output);
        return Ok(());
    }

    println!("URL:     {}", url);
    println!("Status:  {}", status);
    if let Some(record) = record {
        println!("Title:   {}", record.title);
        println!("Updated: {}", record.last_updated.as_millis());
        if let Some(chapter) = &record.chapter {
            println!("Chapter: {} ({})", chapter.title, chapter.url);
        }
    }
    println!();
    println!("Controls:");
    for (category, disabled) in &controls {
        let state = if *disabled { "disabled" } else { "enabled" };
        println!("  {:<10} {}", category.label(), state);
    }

    Ok(())
}

// =============================================================================
// MARK / UNMARK COMMANDS
// =============================================================================

/// Categorize a novel, optionally tracking a chapter.
pub fn cmd_mark(
    store: &StoreArgs,
    json_mode: bool,
    url: &str,
    title: &str,
    category: &str,
    chapter_url: Option<&str>,
    chapter_title: Option<&str>,
) -> Result<(), NovelHiderError> {
    let category: Category = category.parse()?;
    let context = match chapter_url {
        Some(chapter_url) => ActionContext::chapter(chapter_url, chapter_title.unwrap_or_default()),
        None => ActionContext::none(),
    };

    let repo = open_repository(store)?;
    let updated = repo.categorize(url, title, Action::from(category), &context, &SystemClock)?;
    let record = updated.get(url);

    if json_mode {
        let output = serde_json::json!({
            "success": record.is_some_and(|r| r.category == category),
            "record": record,
        });
        print_json(&output);
        return Ok(());
    }

    match record {
        Some(record) if record.category == category => {
            println!("Marked {} as {}", record.url, record.category.label());
            if let Some(chapter) = &record.chapter {
                println!("Tracking: {} ({})", chapter.title, chapter.url);
            }
        }
        _ => println!("No change for {}", url),
    }
    Ok(())
}

/// Remove a novel's category through the engine.
pub fn cmd_unmark(store: &StoreArgs, json_mode: bool, url: &str) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let loaded = repo.try_load()?;
    let existed = loaded.contains(url);
    repo.commit(loaded, url, "", Action::Unmark, &ActionContext::none(), &SystemClock)?;

    if json_mode {
        print_json(&serde_json::json!({ "url": url, "removed": existed }));
        return Ok(());
    }

    if existed {
        println!("Unmarked {}", url);
    } else {
        println!("Not tracked: {}", url);
    }
    Ok(())
}

// =============================================================================
// REMOVE / CLEAR COMMANDS
// =============================================================================

/// Delete one record by URL.
pub fn cmd_remove(store: &StoreArgs, json_mode: bool, url: &str) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let removed = repo.remove(url)?;

    if json_mode {
        print_json(&serde_json::json!({ "url": url, "removed": removed }));
        return Ok(());
    }

    if removed {
        println!("Removed {}", url);
    } else {
        println!("Not found: {}", url);
    }
    Ok(())
}

/// Delete every record. Requires `--yes`.
pub fn cmd_clear(store: &StoreArgs, json_mode: bool, yes: bool) -> Result<(), NovelHiderError> {
    let repo = open_repository(store)?;
    let count = repo.try_load()?.len();

    if !yes {
        return Err(NovelHiderError::ConfigError(format!(
            "refusing to clear {} records without --yes",
            count
        )));
    }

    repo.clear()?;

    if json_mode {
        print_json(&serde_json::json!({ "cleared": count }));
        return Ok(());
    }

    println!("Cleared {} records", count);
    Ok(())
}

// =============================================================================
// SITE COMMAND
// =============================================================================

/// Show the selector configuration a hostname resolves to.
pub fn cmd_site(
    registry: &SiteRegistry,
    json_mode: bool,
    hostname: &str,
) -> Result<(), NovelHiderError> {
    let config = registry
        .resolve(hostname)
        .ok_or_else(|| NovelHiderError::SiteNotSupported(hostname.to_string()))?;
    let output = serde_json::to_value(config)
        .map_err(|e| NovelHiderError::SerializationError(e.to_string()))?;

    if json_mode {
        print_json(&output);
        return Ok(());
    }

    println!("Site: {}", hostname);
    println!("==================");
    if let serde_json::Value::Object(fields) = output {
        for (key, value) in fields {
            match value {
                serde_json::Value::String(s) => println!("{:<28} {}", key, s),
                other => println!("{:<28} {}", key, other),
            }
        }
    }
    Ok(())
}
