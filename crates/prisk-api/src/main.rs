//! # prisk-api — Binary Entry Point
//!
//! Loads the rule repository and starts the Axum HTTP server.
//!
//! | Variable                 | Default                        |
//! |--------------------------|--------------------------------|
//! | `PORT`                   | `8080`                         |
//! | `PRISK_RULES`            | `config/security_rules.json`   |
//! | `PRISK_RULES_WATCH_MS`   | unset (no file watching)       |
//! | `PRISK_LOG_JSON`         | unset (human-readable logs)    |
//! | `RUST_LOG`               | `info`                         |

use std::path::PathBuf;
use std::time::Duration;

use prisk_api::state::{AppConfig, AppState, DEFAULT_RULES_PATH};
use prisk_api::watch::RuleWatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let rules_path = std::env::var("PRISK_RULES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_RULES_PATH));
    let watch_debounce = std::env::var("PRISK_RULES_WATCH_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis);
    let config = AppConfig {
        port,
        rules_path,
        watch_debounce,
    };

    let state = AppState::open(config).map_err(|e| {
        tracing::error!("Rule repository failed to load: {e}");
        e
    })?;

    // Held for the life of the server; dropping it stops the watch.
    let _watcher = match state.config.watch_debounce {
        Some(debounce) => match RuleWatcher::start(state.store.clone(), debounce) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!("Rule file watching disabled: {e}");
                None
            }
        },
        None => None,
    };

    let app = prisk_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("prisk API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("PRISK_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
