//! Key-value document storage behind the stats store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::StatsError;

/// Storage key of the player statistics document.
pub const PLAYER_STATS_KEY: &str = "player_stats";

/// Storage key of the leaderboard document.
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// A synchronous key-value store of JSON documents.
///
/// A missing key is `Ok(None)`, not an error.
pub trait Storage {
    /// Read the document stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StatsError>;

    /// Replace the document stored under `key`.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StatsError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StatsError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StatsError> {
        (**self).write(key, contents)
    }
}

/// One `<key>.json` file per document in a directory.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Store documents under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StatsError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes `<key>.json.tmp` and renames it into place, so a crash never
    /// leaves a truncated document behind.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StatsError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory storage, for tests and for hosts that persist elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    docs: FxHashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document.
    #[must_use]
    pub fn with_document(mut self, key: &str, contents: &str) -> Self {
        self.docs.insert(key.to_string(), contents.to_string());
        self
    }

    /// Peek at a stored document.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.docs.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StatsError> {
        Ok(self.docs.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StatsError> {
        self.docs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
