//! Durable "previously connected" marker.
//!
//! This is the only state that survives a restart: whether the last session
//! ended connected, so the next start can reconnect automatically.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};

/// Storage for the auto-reconnect marker.
pub trait ConnectionMarker: Send + Sync {
    fn is_set(&self) -> bool;
    fn set(&self) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

/// Marker kept in process memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryMarker {
    flag: Arc<AtomicBool>,
}

impl MemoryMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a marker that starts out set, as if a previous session existed.
    pub fn preset() -> Self {
        let marker = Self::default();
        marker.flag.store(true, Ordering::SeqCst);
        marker
    }
}

impl ConnectionMarker for MemoryMarker {
    fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn set(&self) -> StoreResult<()> {
        self.flag.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.flag.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Marker persisted as an empty file.
#[derive(Debug, Clone)]
pub struct FileMarker {
    path: PathBuf,
}

impl FileMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConnectionMarker for FileMarker {
    fn is_set(&self) -> bool {
        self.path.exists()
    }

    fn set(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Config(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.path, b"")
            .map_err(|e| StoreError::Config(format!("Cannot write {}: {e}", self.path.display())))
    }

    fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Config(format!(
                "Cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
