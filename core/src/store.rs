use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::*;

/// Key the saved game is stored under unless a store is given another one.
pub const DEFAULT_STORAGE_KEY: &str = "minesweeper";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Saved state is not valid JSON: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Saved state is inconsistent: {0}")]
    Corrupt(#[from] GameError),
}

/// Persistence port for saved games. The engine never touches one directly.
pub trait SnapshotStore {
    fn save(&mut self, state: &SavedState) -> core::result::Result<(), StoreError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> core::result::Result<Option<SavedState>, StoreError>;

    fn clear(&mut self) -> core::result::Result<(), StoreError>;
}

/// Keeps serialized games in memory, keyed like browser local storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw stored text, exactly as it would sit in the backing storage.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }

    pub fn set_raw(&mut self, value: impl Into<String>) {
        self.entries.insert(self.key.clone(), value.into());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, state: &SavedState) -> core::result::Result<(), StoreError> {
        let json = state.to_json()?;
        self.set_raw(json);
        Ok(())
    }

    fn load(&self) -> core::result::Result<Option<SavedState>, StoreError> {
        self.raw()
            .map(SavedState::from_json)
            .transpose()
            .map_err(StoreError::from)
    }

    fn clear(&mut self) -> core::result::Result<(), StoreError> {
        self.entries.remove(&self.key);
        Ok(())
    }
}

/// Stores the game as `<key>.json` inside a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, state: &SavedState) -> core::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, state.to_json()?)?;
        log::debug!("Saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> core::result::Result<Option<SavedState>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(SavedState::from_json(&json)?))
    }

    fn clear(&mut self) -> core::result::Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SavedState {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut session = GameSession::from_layout(layout);
        session.reveal((1, 1));
        session.snapshot()
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.key(), DEFAULT_STORAGE_KEY);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let state = sample_state();

        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), Some(state));
        assert!(store.raw().unwrap().starts_with(r#"{"boardData":"#));
    }

    #[test]
    fn memory_store_clear_forgets_state() {
        let mut store = MemoryStore::with_key("other");
        store.save(&sample_state()).unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_reports_garbage() {
        let mut store = MemoryStore::new();
        store.set_raw("{ definitely not a game");

        assert!(matches!(store.load(), Err(StoreError::Deserialization(_))));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let state = sample_state();

        assert!(store.load().unwrap().is_none());
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert!(store.path().ends_with("minesweeper.json"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_key(dir.path().join("saves"), "slot-1");

        store.save(&sample_state()).unwrap();

        assert!(dir.path().join("saves").join("slot-1.json").is_file());
        assert_eq!(store.load().unwrap(), Some(sample_state()));
    }
}
