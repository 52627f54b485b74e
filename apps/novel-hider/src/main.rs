//! # Novel Hider - operator console
//!
//! Inspect and edit the categorized novel collection outside the browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          apps/novel-hider (THE BINARY)       │
//! │                                              │
//! │   ┌─────────────┐      ┌────────────────┐    │
//! │   │    CLI      │      │  Site config   │    │
//! │   │   (clap)    │      │    (toml)      │    │
//! │   └──────┬──────┘      └───────┬────────┘    │
//! │          └──────────┬──────────┘             │
//! │                     ▼                        │
//! │           ┌───────────────────┐              │
//! │           │ novel-hider-core  │              │
//! │           │    (THE LOGIC)    │              │
//! │           └───────────────────┘              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! novel-hider list --filter reading --order desc
//! novel-hider mark https://twkan.com/book/1.html -t "Title" -c reading
//! novel-hider --backend redb --store novels.redb counts
//! ```

use clap::Parser;
use novel_hider::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing on stderr. NOVEL_HIDER_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("NOVEL_HIDER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "novel_hider=debug"
    } else {
        "novel_hider=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Novel Hider v{}
  Reading • Disliked • Hiatus • Completed
"#,
        env!("CARGO_PKG_VERSION")
    );
}
