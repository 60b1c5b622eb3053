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

use std::time::Duration;

use tokio::time::sleep;

use flashcard_buddy_core::error::Fallible;
use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;

use crate::cmd::list::render_card;
use crate::cmd::resolve_id;
use crate::utils::now_ms;

/// Flip a card to show its answer, going through the pending state for the
/// configured delay, and render it. Returns `None` if no card matches `id`.
pub async fn reveal_card<S: Storage>(
    store: &mut CardStore<S>,
    id: &str,
) -> Fallible<Option<String>> {
    let Some(id) = resolve_id(store, id)? else {
        return Ok(None);
    };
    let Some(toggle) = store.toggle_answer(&id, now_ms()) else {
        return Ok(None);
    };
    let delay = toggle.commit_at_ms.saturating_sub(toggle.requested_at_ms);
    sleep(Duration::from_millis(delay)).await;
    store.commit_toggle(&toggle.id);
    let Some(card) = store.get(&toggle.id) else {
        return Ok(None);
    };
    let mut out = String::new();
    render_card(&mut out, card, card.show_answer());
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::cmd::helper::memory_store;

    #[tokio::test]
    async fn test_reveal_waits_for_the_delay() -> Fallible<()> {
        let mut store = memory_store(20);
        let id = store.create("Q", "The answer", &[]).unwrap();
        let started = Instant::now();
        let out = reveal_card(&mut store, id.as_str()).await?.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(out.ends_with("Q\n    The answer\n"));
        assert!(store.get(&id).unwrap().show_answer());
        assert!(!store.is_pending(&id));
        Ok(())
    }

    #[tokio::test]
    async fn test_reveal_unknown_card() -> Fallible<()> {
        let mut store = memory_store(0);
        store.create("Q", "A", &[]).unwrap();
        assert_eq!(reveal_card(&mut store, "missing").await?, None);
        assert!(!store.cards()[0].show_answer());
        Ok(())
    }
}
