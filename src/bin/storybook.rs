//! Storybook - catalog host for the command line
//!
//! Builds the catalog from compiled-in previews plus an optional JSON
//! manifest, then lists, searches, opens or renders pages.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin storybook -- list
//! cargo run --bin storybook -- --manifest previews.json search "button"
//! cargo run --bin storybook -- open 3
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use storybook_catalog::catalog::{CatalogFolder, HostedKind, Node};
use storybook_catalog::config::{default_config_path, load_config};
use storybook_catalog::error::{AdaptError, ErrorSeverity, StorybookError};
use storybook_catalog::manifest::{load_manifest, Manifest};
use storybook_catalog::preview::schema::{
    CATEGORY_WIDGET, CONTROLLER_PREVIEW_V3, DATA_SOURCE_V3, DECLARATIVE_SOURCE_V2,
    DISPLAY_NAME_FIELD, SOURCE_FIELD,
};
use storybook_catalog::preview::{registered_previews, Record};
use storybook_catalog::{logging, register_preview, DeclarationIdentifier, IdAllocator, Storybook, View};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "storybook", about = "Browse and search the preview catalog")]
struct Cli {
    /// Config file (default: ~/.storybook/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON manifest with extra previews and pages
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Override the directory holding history and preferences
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog tree with page ids
    List,

    /// Fuzzy search folder and page titles
    Search {
        /// Search query
        query: String,
    },

    /// Open a page: record it in history and print its view
    Open {
        /// Page id as shown by `list`
        id: u64,
    },

    /// Print a page's view without recording history
    Render {
        /// Page id as shown by `list`
        id: u64,
    },

    /// Show recently opened pages, most recent first
    History,

    /// Show the page that would open automatically on launch
    Launch,

    /// Show or change preferences
    Settings {
        /// Reopen the most recent page on launch
        #[arg(long)]
        auto_open_last_page: Option<bool>,
    },
}

// Built-in demo previews so an empty host still has something to browse

fn status_badge_preview() -> std::result::Result<Record, AdaptError> {
    Ok(Record::new("payload")
        .with_str(DISPLAY_NAME_FIELD, "Status Badge")
        .with_record(
            SOURCE_FIELD,
            Record::new(DECLARATIVE_SOURCE_V2).with_record(
                "structure",
                Record::new("structure").with_record(
                    "singlePreview",
                    Record::new("singlePreview").with_factory("makeBody", || {
                        View::hosted(HostedKind::Declarative, "StatusBadge")
                    }),
                ),
            ),
        ))
}

register_preview!(status_badge_preview);

fn settings_sheet_preview() -> std::result::Result<Record, AdaptError> {
    let make_body = Record::new("singlePreview").with_factory("makeBody", || {
        View::hosted(HostedKind::Controller, "SettingsSheet")
    });
    Ok(Record::new("payload")
        .with_str(DISPLAY_NAME_FIELD, "Settings Sheet")
        .with_record(
            SOURCE_FIELD,
            Record::new(DATA_SOURCE_V3).with_record(
                "preview",
                Record::new(CONTROLLER_PREVIEW_V3)
                    .with_record(
                        "contentCategory",
                        Record::new("category").with_str("rawValue", CATEGORY_WIDGET),
                    )
                    .with_record(
                        "structure",
                        Record::new("structure").with_record("singlePreview", make_body),
                    ),
            ),
        ))
}

register_preview!(settings_sheet_preview);

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print a failure for the user; catalog errors use their own severity and wording.
fn report(err: &anyhow::Error) {
    let Some(catalog_err) = err.chain().find_map(|e| e.downcast_ref::<StorybookError>()) else {
        error!(error = %format!("{err:#}"), "Command failed");
        eprintln!("error: {err:#}");
        return;
    };

    let message = catalog_err.user_message();
    match catalog_err.severity() {
        ErrorSeverity::Info => info!(error = %catalog_err, "Command failed"),
        ErrorSeverity::Warning => warn!(error = %catalog_err, "Command failed"),
        ErrorSeverity::Error => error!(error = %catalog_err, "Command failed"),
    }
    eprintln!("error: {message}");
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path);
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = Some(dir.to_string_lossy().into_owned());
    }

    let manifest = match &cli.manifest {
        Some(path) => load_manifest(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => Manifest::default(),
    };

    let allocator = IdAllocator::new();
    let manual = manifest.manual_nodes(&allocator);
    let mut previews = registered_previews();
    previews.extend(manifest.previews);

    let mut book = Storybook::open(&config, &allocator, &previews, manual);

    match cli.command {
        Command::List => print_folder(book.root(), 0),
        Command::Search { query } => {
            let started = Instant::now();
            let mut session = book.search_session();
            session.submit(&query);
            session.wait(SEARCH_TIMEOUT);
            let results = session.results();
            logging::log_search(&query, results.len(), started.elapsed().as_millis() as u64);

            if results.is_empty() {
                println!("No matches for '{query}'");
            }
            for node in results {
                print_node_line(node, 0);
            }
        }
        Command::Open { id } => {
            let view = book.open_page(DeclarationIdentifier::from_raw(id))?;
            print!("{view}");
        }
        Command::Render { id } => {
            let view = book.render(DeclarationIdentifier::from_raw(id))?;
            print!("{view}");
        }
        Command::History => {
            let pages = book.store().history_pages();
            if pages.is_empty() {
                println!("No history yet");
            }
            for page in pages {
                println!("#{:<4} {}  ({})", page.id(), page.title(), page.source_label());
            }
        }
        Command::Launch => match book.launch_page() {
            Some(page) => println!("#{} {}", page.id(), page.title()),
            None => println!("Nothing to open on launch"),
        },
        Command::Settings {
            auto_open_last_page,
        } => {
            if let Some(enabled) = auto_open_last_page {
                book.preferences()
                    .set_auto_open_last_page(enabled)
                    .context("Failed to save preference")?;
            }
            println!(
                "autoOpenLastPage = {}",
                book.preferences().auto_open_last_page()
            );
        }
    }

    Ok(())
}

fn print_folder(folder: &CatalogFolder, depth: usize) {
    println!("{}{}/", "  ".repeat(depth), folder.title());
    for child in folder.children() {
        match child {
            Node::Folder(inner) => print_folder(inner, depth + 1),
            page @ Node::Page(_) => print_node_line(page, depth + 1),
        }
    }
}

fn print_node_line(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Folder(folder) => println!("{indent}{}/", folder.title()),
        Node::Page(page) => println!(
            "{indent}#{:<4} {}  ({})",
            page.id(),
            page.title(),
            page.source_label()
        ),
    }
}
