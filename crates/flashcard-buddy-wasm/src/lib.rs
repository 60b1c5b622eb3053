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

//! WASM bindings for flashcard-buddy - runs the card collection in the browser.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use flashcard_buddy_core::error::Rejection;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::store::StoreConfig;
use flashcard_buddy_core::types::card::Card;
use flashcard_buddy_core::types::card_id::CardId;
use flashcard_buddy_core::types::tags::parse_tags;
use flashcard_buddy_core::view::Filter;
use flashcard_buddy_core::view::ListState;
use flashcard_buddy_core::view::MatchMode;
use flashcard_buddy_core::view::all_tags;
use flashcard_buddy_core::view::filtered_cards;
use flashcard_buddy_core::view::matching_tags;
use flashcard_buddy_core::view::summarize;
use flashcard_buddy_core::view::tag_counts;

mod console;
mod storage;
mod timer;

use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Debug);
    log::debug!("flashcard-buddy WASM initialized");
}

/// A card as the UI renders it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardView<'a> {
    id: &'a str,
    front: &'a str,
    back: &'a str,
    tags: &'a [String],
    show_answer: bool,
    is_loading: bool,
}

type SharedStore = Rc<RefCell<CardStore<LocalStorage>>>;

/// The application state managed from JavaScript.
#[wasm_bindgen]
pub struct FlashcardBuddyApp {
    /// Shared with the timers of pending toggles.
    store: SharedStore,
    filter: Filter,
}

#[wasm_bindgen]
impl FlashcardBuddyApp {
    /// Create the app and load the stored cards.
    #[wasm_bindgen(constructor)]
    pub fn new(toggle_delay_ms: Option<u32>) -> Self {
        let mut config = StoreConfig::default();
        if let Some(delay) = toggle_delay_ms {
            config.toggle_delay_ms = delay;
        }
        let store = CardStore::open(LocalStorage::new(), config);
        Self {
            store: Rc::new(RefCell::new(store)),
            filter: Filter::new(),
        }
    }

    /// Add a card. Returns its id, or rejects with a message for the user.
    #[wasm_bindgen]
    pub fn add_card(&self, front: &str, back: &str, tags: Vec<String>) -> Result<String, JsValue> {
        self.store
            .borrow_mut()
            .create(front, back, &tags)
            .map(|id| id.to_string())
            .map_err(rejection)
    }

    /// Edit a card. Returns false if there is no card with that id.
    #[wasm_bindgen]
    pub fn update_card(
        &self,
        id: &str,
        front: &str,
        back: &str,
        tags: Vec<String>,
    ) -> Result<bool, JsValue> {
        self.store
            .borrow_mut()
            .update(&CardId::from(id), front, back, &tags)
            .map_err(rejection)
    }

    #[wasm_bindgen]
    pub fn delete_card(&self, id: &str) -> bool {
        self.store.borrow_mut().delete(&CardId::from(id))
    }

    /// Delete every card. The page must have asked the user to confirm.
    #[wasm_bindgen]
    pub fn delete_all_cards(&self) -> Result<usize, JsValue> {
        self.store.borrow_mut().delete_all().map_err(rejection)
    }

    /// Start showing or hiding a card's answer. The card is busy until the
    /// flip commits, after which `on_commit` is called so the page can
    /// re-render. Returns false if the card does not exist or is already
    /// busy.
    #[wasm_bindgen]
    pub fn toggle_answer(&self, id: &str, on_commit: Option<js_sys::Function>) -> bool {
        let now = js_sys::Date::now() as u64;
        let Some(toggle) = self.store.borrow_mut().toggle_answer(&CardId::from(id), now) else {
            return false;
        };
        let delay = toggle.commit_at_ms.saturating_sub(toggle.requested_at_ms);
        let store = Rc::clone(&self.store);
        spawn_local(async move {
            if let Err(e) = timer::sleep(u32::try_from(delay).unwrap_or(u32::MAX)).await {
                log::warn!("Toggle timer for card {} failed: {e:?}", toggle.id);
            }
            store.borrow_mut().commit_toggle(&toggle.id);
            if let Some(callback) = on_commit {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("Toggle callback failed: {e:?}");
                }
            }
        });
        true
    }

    /// Whether the card is waiting for a toggle to commit.
    #[wasm_bindgen]
    pub fn is_loading(&self, id: &str) -> bool {
        self.store.borrow().is_pending(&CardId::from(id))
    }

    /// The filtered cards as a JSON array.
    #[wasm_bindgen]
    pub fn cards_json(&self) -> String {
        let store = self.store.borrow();
        let views: Vec<CardView> = filtered_cards(store.cards(), &self.filter)
            .into_iter()
            .map(|card| card_view(&store, card))
            .collect();
        serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string())
    }

    /// A single card as JSON, for the edit form.
    #[wasm_bindgen]
    pub fn card_json(&self, id: &str) -> Option<String> {
        let store = self.store.borrow();
        let card = store.get(&CardId::from(id))?;
        serde_json::to_string(&card_view(&store, card)).ok()
    }

    #[wasm_bindgen]
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(self.store.borrow().cards())
    }

    /// Card count per tag as a JSON object.
    #[wasm_bindgen]
    pub fn tag_counts_json(&self) -> String {
        let counts = tag_counts(self.store.borrow().cards());
        serde_json::to_string(&counts).unwrap_or_else(|_| "{}".to_string())
    }

    /// Tags for the filter dropdown, narrowed by its search box.
    #[wasm_bindgen]
    pub fn matching_tags(&self, query: &str) -> Vec<String> {
        let tags = self.all_tags();
        matching_tags(&tags, query).into_iter().cloned().collect()
    }

    #[wasm_bindgen]
    pub fn toggle_tag(&mut self, tag: &str) {
        self.filter.toggle_tag(tag);
    }

    #[wasm_bindgen]
    pub fn clear_tags(&mut self) {
        self.filter.clear_tags();
    }

    #[wasm_bindgen]
    pub fn selected_tags(&self) -> Vec<String> {
        self.filter.selected_tags().to_vec()
    }

    /// Require every selected tag instead of any.
    #[wasm_bindgen]
    pub fn set_match_all(&mut self, match_all: bool) {
        self.filter.set_mode(if match_all {
            MatchMode::All
        } else {
            MatchMode::Any
        });
    }

    #[wasm_bindgen]
    pub fn match_all(&self) -> bool {
        self.filter.mode() == MatchMode::All
    }

    #[wasm_bindgen]
    pub fn set_search(&mut self, search: &str) {
        self.filter.set_search(search);
    }

    #[wasm_bindgen]
    pub fn search(&self) -> String {
        self.filter.search().to_string()
    }

    #[wasm_bindgen]
    pub fn card_count(&self) -> usize {
        self.store.borrow().len()
    }

    #[wasm_bindgen]
    pub fn shown_count(&self) -> usize {
        summarize(self.store.borrow().cards(), &self.filter).shown
    }

    /// One of "no-cards", "no-matches" or "cards".
    #[wasm_bindgen]
    pub fn list_state(&self) -> String {
        let state = summarize(self.store.borrow().cards(), &self.filter).state;
        match state {
            ListState::NoCards => "no-cards",
            ListState::NoMatches => "no-matches",
            ListState::Cards => "cards",
        }
        .to_string()
    }

    /// Storage problems since the last call, as messages for the user.
    #[wasm_bindgen]
    pub fn take_warnings(&self) -> Vec<String> {
        self.store
            .borrow_mut()
            .take_warnings()
            .iter()
            .map(|w| w.to_string())
            .collect()
    }
}

/// Parse the comma-separated tag field of the card forms.
#[wasm_bindgen]
pub fn parse_tags_input(input: &str) -> Vec<String> {
    parse_tags(input)
}

fn card_view<'a>(store: &CardStore<LocalStorage>, card: &'a Card) -> CardView<'a> {
    CardView {
        id: card.id().as_str(),
        front: card.front(),
        back: card.back(),
        tags: card.tags(),
        show_answer: card.show_answer(),
        is_loading: store.is_pending(card.id()),
    }
}

fn rejection(r: Rejection) -> JsValue {
    JsValue::from_str(&r.to_string())
}
