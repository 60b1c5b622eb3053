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

pub mod cards;
pub mod list;
pub mod reveal;

use flashcard_buddy_core::error::Fallible;
use flashcard_buddy_core::error::fail;
use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::types::card::Card;
use flashcard_buddy_core::types::card_id::CardId;

/// Find the card a command-line id refers to: either a full id or an
/// unambiguous prefix of one.
pub fn resolve_id<S: Storage>(store: &CardStore<S>, input: &str) -> Fallible<Option<CardId>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let exact = CardId::from(input);
    if store.get(&exact).is_some() {
        return Ok(Some(exact));
    }
    let matches: Vec<&Card> = store
        .cards()
        .iter()
        .filter(|c| c.id().as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [card] => Ok(Some(card.id().clone())),
        _ => fail(format!(
            "id prefix '{input}' matches {} cards.",
            matches.len()
        )),
    }
}

#[cfg(test)]
pub(crate) mod helper {
    use flashcard_buddy_core::storage::MemoryStorage;
    use flashcard_buddy_core::store::CardStore;
    use flashcard_buddy_core::store::StoreConfig;

    pub fn memory_store(delay_ms: u32) -> CardStore<MemoryStorage> {
        CardStore::open(
            MemoryStorage::new(),
            StoreConfig {
                toggle_delay_ms: delay_ms,
            },
        )
    }
}
