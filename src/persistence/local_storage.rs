//! Browser LocalStorage backend

use web_sys::Storage;

use super::{HIGH_SCORE_KEY, HighScoreStore, StorageError, parse_score};

/// High score kept in `window.localStorage`
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Bind to the window's LocalStorage; a missing or blocked storage
    /// (private mode, sandboxed iframe) yields a store that always errors
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        let raw = self
            .storage()?
            .get_item(HIGH_SCORE_KEY)
            .map_err(|_| StorageError::Read {
                key: HIGH_SCORE_KEY.to_string(),
            })?;
        raw.as_deref().map(parse_score).transpose()
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.storage()?
            .set_item(HIGH_SCORE_KEY, &score.to_string())
            .map_err(|_| StorageError::Write {
                key: HIGH_SCORE_KEY.to_string(),
            })?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
