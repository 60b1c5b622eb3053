// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::env::current_dir;
use std::fs;
use std::path::PathBuf;

use flashcard_buddy_core::error::Fallible;
use flashcard_buddy_core::error::fail;
use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::store::StoreConfig;

/// The file holding a collection directory's key-value entries.
pub const STORAGE_FILE: &str = "flashcard_buddy.json";

/// A key-value store kept in one JSON object on disk, laid out like the
/// browser's localStorage: every value is a string.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_entries(&self) -> Fallible<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Fallible<()> {
        let text = serde_json::to_string_pretty(entries)?;
        // Write to a sibling file first so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        // An unreadable file is replaced rather than blocking every write.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Replacing unreadable storage file {}: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// Open the card collection stored in `directory`, or in the current
/// working directory if none is given.
pub fn open_collection(
    directory: Option<String>,
    config: StoreConfig,
) -> Fallible<CardStore<FileStorage>> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    if !directory.is_dir() {
        return fail("path is not a directory.");
    }
    log::debug!("Opening collection in {}", directory.display());
    let storage = FileStorage::new(directory.join(STORAGE_FILE));
    Ok(CardStore::open(storage, config))
}

#[cfg(test)]
mod tests {
    use flashcard_buddy_core::storage::STORAGE_KEY;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() -> Fallible<()> {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path().join(STORAGE_FILE));
        assert_eq!(storage.get(STORAGE_KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_set_keeps_other_keys() -> Fallible<()> {
        let dir = tempdir()?;
        let mut storage = FileStorage::new(dir.path().join(STORAGE_FILE));
        storage.set("a", "1")?;
        storage.set("b", "2")?;
        storage.set("a", "3")?;
        assert_eq!(storage.get("a")?.as_deref(), Some("3"));
        assert_eq!(storage.get("b")?.as_deref(), Some("2"));
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_a_read_error() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, "garbage")?;
        let storage = FileStorage::new(path);
        assert!(storage.get(STORAGE_KEY).is_err());
        Ok(())
    }

    #[test]
    fn test_set_replaces_unreadable_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, "garbage")?;
        let mut storage = FileStorage::new(path);
        storage.set(STORAGE_KEY, "[]")?;
        assert_eq!(storage.get(STORAGE_KEY)?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_open_non_existent_directory() {
        let result = open_collection(Some("./derpherp".to_string()), StoreConfig::default());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_open_persists_between_sessions() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = Some(dir.path().display().to_string());
        let mut store = open_collection(directory.clone(), StoreConfig::default())?;
        let id = store.create("Was ist HTML?", "HyperText", &[]).unwrap();
        let store = open_collection(directory, StoreConfig::default())?;
        assert_eq!(store.len(), 1);
        assert_eq!(store.cards()[0].id(), &id);
        Ok(())
    }

    #[test]
    fn test_open_corrupt_collection_starts_empty() -> Fallible<()> {
        let dir = tempdir()?;
        let entries = BTreeMap::from([(STORAGE_KEY.to_string(), "[{".to_string())]);
        fs::write(
            dir.path().join(STORAGE_FILE),
            serde_json::to_string(&entries)?,
        )?;
        let mut store = open_collection(
            Some(dir.path().display().to_string()),
            StoreConfig::default(),
        )?;
        assert!(store.is_empty());
        assert_eq!(store.take_warnings().len(), 1);
        Ok(())
    }
}
