//! # Rule Snapshot Store
//!
//! The rule set and threshold table are the only state that outlives a
//! single classification. They are published as an immutable
//! [`RuleSnapshot`] behind an `Arc`, and a reload builds a whole new
//! snapshot before swapping the pointer.
//!
//! ## Concurrency
//!
//! ```text
//! reader:  current() ── read lock ── Arc::clone ── unlock ── classify(&snapshot)
//! reload:  read file ── compile ─────────────── write lock ── swap Arc ── unlock
//! ```
//!
//! The write lock is held only for the pointer swap, never while reading
//! or compiling. A classification that started before a reload finishes
//! against the snapshot it cloned; it never sees a mix of old and new
//! rules. A failed reload leaves the current snapshot in place.
//!
//! `parking_lot::RwLock` is used because it does not poison: a panic in
//! one request cannot wedge the store for the rest of the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::RuleLoadError;
use crate::loader::{load_path, load_str, read_source, source_digest, LoadedRuleSet, SourceFormat};
use crate::ruleset::RuleSet;

/// An immutable, versioned rule set.
#[derive(Debug)]
pub struct RuleSnapshot {
    /// Monotonic per-store counter, starting at 1.
    pub version: u64,
    /// Hex SHA-256 of the source document.
    pub digest: String,
    /// When this snapshot was published.
    pub loaded_at: DateTime<Utc>,
    /// File the snapshot was loaded from, if any.
    pub source: Option<PathBuf>,
    /// The compiled rules.
    pub rules: RuleSet,
}

/// Holder of the live rule snapshot.
#[derive(Debug)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSnapshot>>,
    source: Option<PathBuf>,
}

impl RuleStore {
    /// Open a store backed by a rule file.
    ///
    /// # Errors
    ///
    /// Any load failure is returned; there is no store without rules.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RuleLoadError> {
        let path = path.into();
        let loaded = load_path(&path)?;
        Ok(Self::publish_first(loaded, Some(path)))
    }

    /// Build a store from an in-memory document. [`RuleStore::reload`] is
    /// unavailable on such a store; use [`RuleStore::replace`].
    pub fn from_text(text: &str, format: SourceFormat) -> Result<Self, RuleLoadError> {
        let loaded = load_str(text, format, None)?;
        Ok(Self::publish_first(loaded, None))
    }

    fn publish_first(loaded: LoadedRuleSet, source: Option<PathBuf>) -> Self {
        let snapshot = snapshot(1, loaded, source.clone());
        log_published(&snapshot, "rule set loaded");
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            source,
        }
    }

    /// The live snapshot. Cheap; hold the returned `Arc` for the whole
    /// classification.
    pub fn current(&self) -> Arc<RuleSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// File backing this store, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Publish an already-compiled rule set.
    pub fn replace(&self, loaded: LoadedRuleSet) -> Arc<RuleSnapshot> {
        self.swap(loaded)
    }

    /// Re-read the backing file and publish it unconditionally.
    ///
    /// # Errors
    ///
    /// On failure the previous snapshot stays active.
    pub fn reload(&self) -> Result<Arc<RuleSnapshot>, RuleLoadError> {
        let path = self.source.as_deref().ok_or(RuleLoadError::NoSource)?;
        let loaded = load_path(path).map_err(|e| reload_failed(path, e))?;
        Ok(self.swap(loaded))
    }

    /// Re-read the backing file and publish it only if its bytes changed.
    ///
    /// Returns `Ok(None)` when the digest matches the live snapshot.
    pub fn reload_if_changed(&self) -> Result<Option<Arc<RuleSnapshot>>, RuleLoadError> {
        let path = self.source.as_deref().ok_or(RuleLoadError::NoSource)?;
        let text = read_source(path)?;
        if source_digest(text.as_bytes()) == self.current().digest {
            return Ok(None);
        }
        let loaded = load_str(&text, SourceFormat::from_path(path), Some(path))
            .map_err(|e| reload_failed(path, e))?;
        Ok(Some(self.swap(loaded)))
    }

    fn swap(&self, loaded: LoadedRuleSet) -> Arc<RuleSnapshot> {
        let mut guard = self.current.write();
        let next = Arc::new(snapshot(guard.version + 1, loaded, self.source.clone()));
        *guard = Arc::clone(&next);
        drop(guard);
        log_published(&next, "rule set reloaded");
        next
    }
}

fn snapshot(version: u64, loaded: LoadedRuleSet, source: Option<PathBuf>) -> RuleSnapshot {
    RuleSnapshot {
        version,
        digest: loaded.digest,
        loaded_at: Utc::now(),
        source,
        rules: loaded.rules,
    }
}

fn reload_failed(path: &Path, error: RuleLoadError) -> RuleLoadError {
    tracing::error!(
        path = %path.display(),
        error = %error,
        "rule reload failed; keeping current rule set"
    );
    error
}

fn log_published(snapshot: &RuleSnapshot, message: &str) {
    tracing::info!(
        version = snapshot.version,
        digest = %snapshot.digest,
        rules = snapshot.rules.rules.len(),
        constraints = snapshot.rules.constraints.len(),
        label = snapshot.rules.version.as_deref().unwrap_or("-"),
        "{message}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: &str = r#"{"version": "v1", "precedence": ["mid", "basic"]}"#;
    const V2: &str = r#"{"version": "v2", "precedence": ["high", "mid", "basic"]}"#;

    fn write(path: &Path, text: &str) {
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn open_publishes_version_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        write(&path, V1);
        let store = RuleStore::open(&path).unwrap();
        let snap = store.current();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.rules.version.as_deref(), Some("v1"));
        assert_eq!(snap.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn open_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = RuleStore::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RuleLoadError::FileNotFound { .. }));
    }

    #[test]
    fn reload_swaps_whole_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        write(&path, V1);
        let store = RuleStore::open(&path).unwrap();
        let before = store.current();

        write(&path, V2);
        let after = store.reload().unwrap();

        assert_eq!(after.version, 2);
        assert_eq!(after.rules.version.as_deref(), Some("v2"));
        // A reader holding the old snapshot still sees it intact.
        assert_eq!(before.rules.version.as_deref(), Some("v1"));
        assert_eq!(before.rules.precedence.levels().len(), 2);
        assert_eq!(store.current().version, 2);
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        write(&path, V1);
        let store = RuleStore::open(&path).unwrap();

        write(&path, "{ not json");
        assert!(store.reload().is_err());
        write(&path, r#"{"precedence": ["high"]}"#);
        assert!(store.reload().is_err());

        let snap = store.current();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.rules.version.as_deref(), Some("v1"));
    }

    #[test]
    fn reload_if_changed_skips_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        write(&path, V1);
        let store = RuleStore::open(&path).unwrap();

        assert!(store.reload_if_changed().unwrap().is_none());
        assert_eq!(store.current().version, 1);

        write(&path, V2);
        let swapped = store.reload_if_changed().unwrap().unwrap();
        assert_eq!(swapped.version, 2);
    }

    #[test]
    fn in_memory_store_cannot_reload_from_disk() {
        let store = RuleStore::from_text(V1, SourceFormat::Json).unwrap();
        assert!(store.source().is_none());
        assert!(matches!(store.reload(), Err(RuleLoadError::NoSource)));

        let next = load_str(V2, SourceFormat::Json, None).unwrap();
        assert_eq!(store.replace(next).version, 2);
    }

    #[test]
    fn concurrent_readers_see_consistent_snapshots() {
        let store = Arc::new(RuleStore::from_text(V1, SourceFormat::Json).unwrap());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = store.current();
                        let label = snap.rules.version.as_deref();
                        let levels = snap.rules.precedence.levels().len();
                        match label {
                            Some("v1") => assert_eq!(levels, 2),
                            Some("v2") => assert_eq!(levels, 3),
                            other => panic!("unexpected label {other:?}"),
                        }
                    }
                })
            })
            .collect();
        for text in [V2, V1, V2] {
            store.replace(load_str(text, SourceFormat::Json, None).unwrap());
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.current().version, 4);
    }
}
