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

//! The card collection store: the one owner of the card list.
//!
//! Every mutation goes through here and ends by writing the collection to
//! storage. Writes are held back until the stored collection has been read
//! once, so an empty pre-load list can never overwrite saved cards.

use crate::error::Rejection;
use crate::pending::PendingToggle;
use crate::pending::PendingToggles;
use crate::storage::Storage;
use crate::storage::StorageWarning;
use crate::storage::load_cards;
use crate::storage::save_cards;
use crate::types::card::Card;
use crate::types::card_id::CardId;

/// How long an answer toggle stays pending before it is committed.
pub const DEFAULT_TOGGLE_DELAY_MS: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub toggle_delay_ms: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            toggle_delay_ms: DEFAULT_TOGGLE_DELAY_MS,
        }
    }
}

pub struct CardStore<S: Storage> {
    storage: S,
    config: StoreConfig,
    cards: Vec<Card>,
    /// Whether the stored collection has been read. Saving is disabled
    /// until then.
    loaded: bool,
    pending: PendingToggles,
    warnings: Vec<StorageWarning>,
}

impl<S: Storage> CardStore<S> {
    /// Create an empty store that has not read its storage yet.
    pub fn new(storage: S, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            cards: Vec::new(),
            loaded: false,
            pending: PendingToggles::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a store and load the stored collection into it.
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let mut store = Self::new(storage, config);
        store.load();
        store
    }

    /// Replace the in-memory collection with the stored one and enable
    /// saving.
    pub fn load(&mut self) {
        let loaded = load_cards(&self.storage);
        self.cards = loaded.cards;
        self.warnings.extend(loaded.warnings);
        self.pending.clear();
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a card at the end of the collection.
    pub fn create(&mut self, front: &str, back: &str, tags: &[String]) -> Result<CardId, Rejection> {
        check_sides(front, back)?;
        let card = Card::new(front, back, tags);
        let id = card.id().clone();
        log::debug!("Created card {id}.");
        self.cards.push(card);
        self.persist();
        Ok(id)
    }

    /// Replace the contents of a card. Returns `Ok(false)` if there is no
    /// card with that id.
    pub fn update(
        &mut self,
        id: &CardId,
        front: &str,
        back: &str,
        tags: &[String],
    ) -> Result<bool, Rejection> {
        check_sides(front, back)?;
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        self.cards[idx] = self.cards[idx].edited(front, back, tags);
        self.persist();
        Ok(true)
    }

    /// Remove a card. Returns whether a card was removed.
    pub fn delete(&mut self, id: &CardId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.cards.remove(idx);
        self.pending.finish(id);
        self.persist();
        true
    }

    /// Remove every card. The caller is responsible for having the user
    /// confirm this first. Returns the number of cards removed.
    pub fn delete_all(&mut self) -> Result<usize, Rejection> {
        if self.cards.is_empty() {
            return Err(Rejection::NothingToDelete);
        }
        let count = self.cards.len();
        self.cards.clear();
        self.pending.clear();
        log::info!("Deleted all {count} cards.");
        self.persist();
        Ok(count)
    }

    /// Request that a card's answer be shown or hidden. The flip happens
    /// when the host calls [`CardStore::commit_toggle`] at or after the
    /// returned commit time. Returns `None` if the card does not exist or
    /// already has a toggle pending.
    pub fn toggle_answer(&mut self, id: &CardId, now_ms: u64) -> Option<PendingToggle> {
        self.position(id)?;
        let toggle = self.pending.begin(id, now_ms, self.config.toggle_delay_ms)?;
        log::debug!(
            "Toggle of card {id} scheduled for {}ms.",
            toggle.commit_at_ms
        );
        Some(toggle)
    }

    /// Commit a pending toggle. Returns whether a card was flipped. Does
    /// nothing if no toggle is pending for `id`, or if the card was deleted
    /// in the meantime.
    pub fn commit_toggle(&mut self, id: &CardId) -> bool {
        if !self.pending.finish(id) {
            return false;
        }
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.cards[idx] = self.cards[idx].toggled();
        log::debug!(
            "Card {id} answer is now {}.",
            if self.cards[idx].show_answer() {
                "shown"
            } else {
                "hidden"
            }
        );
        // Answer visibility is not part of the stored form, so there is
        // nothing to write.
        true
    }

    /// Whether the card is waiting for a toggle to commit.
    pub fn is_pending(&self, id: &CardId) -> bool {
        self.pending.is_pending(id)
    }

    /// Drain the storage warnings accumulated so far.
    pub fn take_warnings(&mut self) -> Vec<StorageWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    fn persist(&mut self) {
        if !self.loaded {
            log::debug!("Skipping save: stored cards have not been loaded yet.");
            return;
        }
        if let Err(warning) = save_cards(&mut self.storage, &self.cards) {
            self.warnings.push(warning);
        }
    }
}

fn check_sides(front: &str, back: &str) -> Result<(), Rejection> {
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(Rejection::EmptySide);
    }
    Ok(())
}
