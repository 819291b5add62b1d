//! Structured JSONL logging and human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.storybook/logs/storybook.jsonl) - structured for tooling
//! - **Compact to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use storybook_catalog::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "catalog_event", page_id = 3, "Opened page");
//! ```
//!
//! # JSONL Output Format
//!
//! Each line is a valid JSON object:
//! ```json
//! {"timestamp":"2025-03-02T10:30:45.123Z","level":"INFO","target":"storybook_catalog::store","fields":{"message":"Catalog store ready","page_count":12}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "storybook.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// If the log file cannot be opened, only the stderr layer is installed.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    };

    // Non-blocking writer so a slow disk never stalls a search or render
    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.storybook/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".storybook").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("storybook-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a catalog navigation event (open, launch) with structured fields
pub fn log_catalog_event(action: &str, page_id: u64, title: &str) {
    tracing::info!(
        event_type = "catalog_event",
        action = action,
        page_id = page_id,
        title = title,
        "Page {} {}", action, title
    );
}

/// Log a completed search with structured fields
pub fn log_search(query: &str, result_count: usize, duration_ms: u64) {
    tracing::info!(
        event_type = "search",
        query = query,
        result_count = result_count,
        duration_ms = duration_ms,
        "Search '{}' returned {} results", query, result_count
    );
}

/// Log a performance metric; warns when `duration_ms` exceeds `threshold_ms`
pub fn log_perf(operation: &str, duration_ms: u64, threshold_ms: u64) {
    let is_slow = duration_ms > threshold_ms;

    if is_slow {
        tracing::warn!(
            event_type = "performance",
            operation = operation,
            duration_ms = duration_ms,
            threshold_ms = threshold_ms,
            is_slow = true,
            "Slow operation: {} took {}ms (threshold: {}ms)", operation, duration_ms, threshold_ms
        );
    } else {
        tracing::debug!(
            event_type = "performance",
            operation = operation,
            duration_ms = duration_ms,
            threshold_ms = threshold_ms,
            is_slow = false,
            "Operation {} completed in {}ms", operation, duration_ms
        );
    }
}
