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

//! Tracking of answer toggles that have been requested but not committed.
//!
//! Revealing or hiding an answer goes through a short, fixed delay. While a
//! toggle is pending the UI shows the card as busy and ignores further input
//! on it. Each card pends independently: committing one card's toggle never
//! clears another card's busy state.

use std::collections::HashMap;

use crate::types::card_id::CardId;

/// A toggle waiting for its scheduled commit. Times are milliseconds on
/// whatever clock the caller uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingToggle {
    pub id: CardId,
    pub requested_at_ms: u64,
    pub commit_at_ms: u64,
}

#[derive(Debug, Default)]
pub struct PendingToggles {
    pending: HashMap<CardId, PendingToggle>,
}

impl PendingToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a toggle for `id`. Returns `None` if that card already has a
    /// toggle in flight.
    pub fn begin(&mut self, id: &CardId, now_ms: u64, delay_ms: u32) -> Option<PendingToggle> {
        if self.pending.contains_key(id) {
            return None;
        }
        let toggle = PendingToggle {
            id: id.clone(),
            requested_at_ms: now_ms,
            commit_at_ms: now_ms.saturating_add(u64::from(delay_ms)),
        };
        self.pending.insert(id.clone(), toggle.clone());
        Some(toggle)
    }

    /// Remove the record for `id`, returning whether there was one.
    pub fn finish(&mut self, id: &CardId) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &CardId) -> bool {
        self.pending.contains_key(id)
    }

    /// Drop every record, e.g. after the collection was cleared.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
