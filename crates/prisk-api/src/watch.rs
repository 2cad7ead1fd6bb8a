//! # Rule File Watching
//!
//! Optional filesystem watcher that reloads the rule store when its source
//! file changes. Events are debounced so an editor's burst of writes
//! produces one reload, and [`RuleStore::reload_if_changed`] drops events
//! that leave the file's digest unchanged.
//!
//! The parent directory is watched rather than the file itself: editors
//! that save by writing a temporary file and renaming it over the original
//! would otherwise detach the watch after the first save.
//!
//! A file that fails to load is logged and skipped; the active snapshot
//! stays in place until a valid file appears.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};
use thiserror::Error;

use prisk_rules::RuleStore;

/// Errors starting the watcher.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The store was built from an in-memory document.
    #[error("rule store has no source file to watch")]
    NoSource,

    /// The platform watcher could not be created or attached.
    #[error("failed to watch {path}: {source}")]
    Notify {
        path: PathBuf,
        source: notify::Error,
    },
}

/// Running watcher. Dropping it stops watching.
pub struct RuleWatcher {
    path: PathBuf,
    _debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
}

impl std::fmt::Debug for RuleWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleWatcher").field("path", &self.path).finish()
    }
}

impl RuleWatcher {
    /// Watch the store's source file, reloading at most once per
    /// `debounce` window.
    ///
    /// Reloads run on the debouncer's own thread, so the blocking file
    /// read never touches the async runtime.
    ///
    /// # Errors
    ///
    /// [`WatchError::NoSource`] for an in-memory store, and
    /// [`WatchError::Notify`] when the platform watcher cannot be set up.
    pub fn start(store: Arc<RuleStore>, debounce: Duration) -> Result<Self, WatchError> {
        let path = store.source().ok_or(WatchError::NoSource)?.to_path_buf();
        let file_name = path.file_name().map(OsString::from);
        let dir = watch_dir(&path);

        let notify_err = |source| WatchError::Notify {
            path: dir.clone(),
            source,
        };
        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    if events
                        .iter()
                        .any(|e| touches(&e.event, file_name.as_deref()))
                    {
                        reload(&store);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::error!(error = %error, "rule file watcher error");
                    }
                }
            }
        })
        .map_err(notify_err)?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(notify_err)?;

        tracing::info!(path = %path.display(), debounce_ms = debounce.as_millis() as u64, "watching rule file");
        Ok(Self {
            path,
            _debouncer: debouncer,
        })
    }

    /// The rule file being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == file_name)
}

fn reload(store: &RuleStore) {
    match store.reload_if_changed() {
        Ok(Some(snapshot)) => {
            tracing::info!(version = snapshot.version, digest = %snapshot.digest, "rule file change picked up");
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "rule file changed but did not load; keeping previous rules");
        }
    }
}
