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

use flashcard_buddy_core::error::Fallible;
use flashcard_buddy_core::error::fail;
use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::types::card_id::CardId;
use flashcard_buddy_core::types::tags::parse_tags;

use crate::cmd::resolve_id;

/// Add a card. `tags` is the comma-separated tag field.
pub fn add_card<S: Storage>(
    store: &mut CardStore<S>,
    front: &str,
    back: &str,
    tags: Option<&str>,
) -> Fallible<CardId> {
    let tags = tags.map(parse_tags).unwrap_or_default();
    Ok(store.create(front, back, &tags)?)
}

/// Edit a card. Fields that are not given keep their current value.
/// Returns false if no card matches `id`.
pub fn edit_card<S: Storage>(
    store: &mut CardStore<S>,
    id: &str,
    front: Option<&str>,
    back: Option<&str>,
    tags: Option<&str>,
) -> Fallible<bool> {
    let Some(id) = resolve_id(store, id)? else {
        return Ok(false);
    };
    let Some(card) = store.get(&id) else {
        return Ok(false);
    };
    let front = front.unwrap_or(card.front()).to_string();
    let back = back.unwrap_or(card.back()).to_string();
    let tags = match tags {
        Some(input) => parse_tags(input),
        None => card.tags().to_vec(),
    };
    Ok(store.update(&id, &front, &back, &tags)?)
}

/// Delete a card. Returns false if no card matches `id`.
pub fn delete_card<S: Storage>(store: &mut CardStore<S>, id: &str) -> Fallible<bool> {
    match resolve_id(store, id)? {
        Some(id) => Ok(store.delete(&id)),
        None => Ok(false),
    }
}

/// Delete every card. Refuses unless the user confirmed.
pub fn clear_cards<S: Storage>(store: &mut CardStore<S>, confirmed: bool) -> Fallible<usize> {
    if !store.is_empty() && !confirmed {
        return fail(format!(
            "refusing to delete all {} cards without --yes.",
            store.len()
        ));
    }
    Ok(store.delete_all()?)
}
