//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. The only long-lived state is the rule
//! store; each request clones the current snapshot out of it and
//! classifies against that.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use prisk_rules::{RuleLoadError, RuleStore};

/// Default location of the rule repository.
pub const DEFAULT_RULES_PATH: &str = "config/security_rules.json";

/// Runtime configuration, read from the environment by the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind.
    pub port: u16,
    /// Rule repository file.
    pub rules_path: PathBuf,
    /// When set, the rule file is watched and reloaded on change, with
    /// events debounced over this window.
    pub watch_debounce: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            watch_debounce: None,
        }
    }
}

/// Shared handler state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<RuleStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Open the configured rule file.
    ///
    /// # Errors
    ///
    /// A missing or invalid rule file is fatal: the server must not start
    /// without rules.
    pub fn open(config: AppConfig) -> Result<Self, RuleLoadError> {
        let store = RuleStore::open(config.rules_path.clone())?;
        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    /// Wrap an existing store, e.g. one built from an in-memory document.
    pub fn with_store(store: RuleStore) -> Self {
        Self {
            store: Arc::new(store),
            config: AppConfig::default(),
        }
    }
}
