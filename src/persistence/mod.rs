//! High score persistence
//!
//! A single integer under a fixed key. Storage failures are never fatal:
//! reads degrade to 0 and failed writes only cost durability.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "flappy-high-score";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to read {key}")]
    Read { key: String },
    #[error("failed to write {key}")]
    Write { key: String },
    #[error("stored value {value:?} is not a score")]
    Parse { value: String },
}

/// Durable home of the best score
pub trait HighScoreStore {
    /// Stored score, `Ok(None)` if nothing was stored yet
    fn load(&self) -> Result<Option<u32>, StorageError>;
    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

/// Parse a stored score string
pub fn parse_score(value: &str) -> Result<u32, StorageError> {
    value.trim().parse().map_err(|_| StorageError::Parse {
        value: value.to_string(),
    })
}

/// Load the best score, treating every failure as 0
pub fn load_or_default(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(Some(score)) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("High score unavailable ({}), starting from 0", e);
            0
        }
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(crate) value: Option<String>,
    /// Simulate a broken backend
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the raw stored string
    pub fn with_raw(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            fail_writes: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        self.value.as_deref().map(parse_score).transpose()
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: HIGH_SCORE_KEY.to_string(),
            });
        }
        self.value = Some(score.to_string());
        Ok(())
    }
}
