// Gazette - Terminal Reader for a Remote Content Site
//
// A client for a WordPress-style GraphQL content API: category catalog,
// cursor-paginated post listings, post detail views, and cookie-based
// session authentication.
//
// Architecture:
// - API client (reqwest): typed GraphQL queries/mutations to the site
// - Listing controller: pagination/category state machine with a fetch
//   generation guard against stale responses
// - TUI (ratatui): renders catalog, listing, detail, and auth forms
// - Fetch dispatch: background tokio tasks report back over an mpsc channel

mod api;
mod catalog;
mod cli;
mod config;
mod cookies;
mod demo;
mod error;
mod events;
mod fetch;
mod html;
mod listing;
mod logging;
mod session;
mod tui;

use anyhow::Result;
use api::ApiClient;
use config::{Config, LogRotation};
use cookies::CookieStore;
use fetch::FetchContext;
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing/logging with conditional output
    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stdout
    // File logging: optionally write to rotating log files (in addition to above)
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("gazette={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = if config
        .logging
        .file_enabled
    {
        if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
            eprintln!(
                "Warning: Could not create log directory {:?}: {}",
                config.logging.file_dir, e
            );
            // Fall back to non-file logging
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
            }
            None
        } else {
            // Create rolling file appender based on configured rotation
            let file_appender = match config.logging.file_rotation {
                LogRotation::Hourly => tracing_appender::rolling::hourly(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
                LogRotation::Daily => tracing_appender::rolling::daily(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
                LogRotation::Never => tracing_appender::rolling::never(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
            };

            // Wrap in non-blocking writer (writes happen in background thread)
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // File layer uses JSON format for structured log parsing
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
            }

            Some(guard)
        }
    } else {
        // No file logging - initialize without file layer
        if config.enable_tui {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }

        None
    };

    if config.demo_mode {
        tracing::info!("Running in DEMO MODE - serving fixture content");
    } else {
        tracing::info!(endpoint = %config.api_url, "content API endpoint");
    }

    // Create the app event channel
    // Bounded: if the buffer fills up, fetch tasks wait (backpressure)
    let (event_tx, event_rx) = mpsc::channel(100);

    // Shared clients for background fetch tasks
    let api = Arc::new(ApiClient::new(config.api_url.clone()));
    let cookie_store = Arc::new(CookieStore::new(config.cookie_domain.clone()));

    let fetch = FetchContext {
        api,
        cookies: cookie_store,
        tx: event_tx,
        demo_mode: config.demo_mode,
    };

    // Kick off the startup fetches: catalog load and session restore
    fetch.spawn_catalog_load();
    fetch.spawn_session_restore();

    // Run the TUI in the main task
    // This blocks until the user quits (presses 'q')
    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(event_rx, log_buffer, config, fetch).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        // In headless mode, just wait for Ctrl+C
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
