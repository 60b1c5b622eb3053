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

//! Persistence of the card collection in a string key-value store.
//!
//! The collection lives under a single key as a JSON array of
//! `{ id, front, back, tags }` objects. Both directions are best-effort:
//! failures come back as [`StorageWarning`]s and never as errors.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

/// The key the collection is stored under.
pub const STORAGE_KEY: &str = "flashcard_buddy_cards";

/// A string key-value store, e.g. the browser's `localStorage`.
pub trait Storage {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Fallible<()>;
}

/// A recoverable storage failure, reported to the user as a notice.
#[derive(Debug, PartialEq)]
pub enum StorageWarning {
    /// The stored collection could not be read or parsed.
    Load(ErrorReport),
    /// The collection could not be written.
    Save(ErrorReport),
    /// A stored card repeated an identifier and was dropped.
    DuplicateId(String),
}

impl Display for StorageWarning {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            StorageWarning::Load(e) => write!(f, "Failed to load cards: {e}"),
            StorageWarning::Save(e) => write!(f, "Failed to save cards: {e}"),
            StorageWarning::DuplicateId(id) => {
                write!(f, "Dropped a stored card with duplicate id '{id}'")
            }
        }
    }
}

/// Result of reading the collection back.
#[derive(Debug, Default)]
pub struct Loaded {
    pub cards: Vec<Card>,
    pub warnings: Vec<StorageWarning>,
}

/// Read the collection. A missing key yields an empty collection; an
/// unreadable or unparseable value yields an empty collection and a warning.
pub fn load_cards(storage: &impl Storage) -> Loaded {
    let text = match storage.get(STORAGE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            log::debug!("No cards found in storage.");
            return Loaded::default();
        }
        Err(e) => return failed_load(e),
    };
    let parsed: Vec<Card> = match serde_json::from_str(&text) {
        Ok(cards) => cards,
        Err(e) => return failed_load(e.into()),
    };
    let mut loaded = Loaded::default();
    let mut seen = HashSet::new();
    for mut card in parsed {
        if !seen.insert(card.id().clone()) {
            log::warn!("Dropping stored card with duplicate id {}", card.id());
            loaded
                .warnings
                .push(StorageWarning::DuplicateId(card.id().to_string()));
            continue;
        }
        card.sanitize();
        loaded.cards.push(card);
    }
    log::debug!("Loaded {} cards from storage.", loaded.cards.len());
    loaded
}

fn failed_load(e: ErrorReport) -> Loaded {
    log::warn!("Error loading cards from storage: {e}");
    Loaded {
        cards: Vec::new(),
        warnings: vec![StorageWarning::Load(e)],
    }
}

/// Write the collection, replacing whatever was stored before.
pub fn save_cards(storage: &mut impl Storage, cards: &[Card]) -> Result<(), StorageWarning> {
    let result = serde_json::to_string(cards)
        .map_err(ErrorReport::from)
        .and_then(|text| storage.set(STORAGE_KEY, &text));
    match result {
        Ok(()) => {
            log::debug!("{} cards saved to storage.", cards.len());
            Ok(())
        }
        Err(e) => {
            log::warn!("Error saving cards to storage: {e}");
            Err(StorageWarning::Save(e))
        }
    }
}

/// An in-process storage backend. Writes can be made to fail, which stands
/// in for a full browser quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    /// The number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        if self.fail_writes {
            return fail("storage quota exceeded");
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card_id::CardId;

    fn sample() -> Vec<Card> {
        vec![
            Card::new("Was ist HTML?", "HyperText Markup Language", &["web".into()]),
            Card::new("Was ist CSS?", "Cascading Style Sheets", &[]),
        ]
    }

    #[test]
    fn test_load_missing_key() {
        let loaded = load_cards(&MemoryStorage::new());
        assert!(loaded.cards.is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_load_corrupt_value() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "{not json");
        let loaded = load_cards(&storage);
        assert!(loaded.cards.is_empty());
        assert_eq!(loaded.warnings.len(), 1);
        assert!(matches!(loaded.warnings[0], StorageWarning::Load(_)));
    }

    #[test]
    fn test_roundtrip_resets_show_answer() -> Fallible<()> {
        let mut cards = sample();
        cards[0] = cards[0].toggled();
        let mut storage = MemoryStorage::new();
        save_cards(&mut storage, &cards).map_err(|w| ErrorReport::new(w.to_string()))?;
        let loaded = load_cards(&storage);
        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.cards.len(), 2);
        for (before, after) in cards.iter().zip(&loaded.cards) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.front(), after.front());
            assert_eq!(before.back(), after.back());
            assert_eq!(before.tags(), after.tags());
            assert!(!after.show_answer());
        }
        Ok(())
    }

    #[test]
    fn test_persisted_layout() -> Fallible<()> {
        let cards = sample();
        let mut storage = MemoryStorage::new();
        save_cards(&mut storage, &cards).map_err(|w| ErrorReport::new(w.to_string()))?;
        let text = storage.get(STORAGE_KEY)?.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["id"], cards[0].id().as_str());
        assert_eq!(first["front"], "Was ist HTML?");
        assert_eq!(first["tags"], serde_json::json!(["web"]));
        assert!(first.get("showAnswer").is_none());
        assert!(first.get("show_answer").is_none());
        Ok(())
    }

    #[test]
    fn test_load_drops_duplicate_ids_and_normalizes_tags() {
        let json = r#"[
            {"id":"a","front":"Q1","back":"A1","tags":["Web"," web",""]},
            {"id":"a","front":"Q2","back":"A2","tags":[]},
            {"id":"b","front":"Q3","back":"A3","tags":[]}
        ]"#;
        let loaded = load_cards(&MemoryStorage::with_entry(STORAGE_KEY, json));
        let ids: Vec<&CardId> = loaded.cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![&CardId::from("a"), &CardId::from("b")]);
        assert_eq!(loaded.cards[0].front(), "Q1");
        assert_eq!(loaded.cards[0].tags(), &["web"]);
        assert_eq!(
            loaded.warnings,
            vec![StorageWarning::DuplicateId("a".to_string())]
        );
    }

    #[test]
    fn test_save_failure_is_a_warning() {
        let mut storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let result = save_cards(&mut storage, &sample());
        assert!(matches!(result, Err(StorageWarning::Save(_))));
        assert_eq!(storage.writes(), 0);
    }
}
