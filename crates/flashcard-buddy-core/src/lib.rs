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

//! flashcard-buddy-core: Core library for the flashcard-buddy study tool.
//!
//! This library provides platform-independent types and logic for:
//! - Cards, card identifiers and tag normalization
//! - The card collection store and its persistence
//! - Tag and search views over the collection
//! - Tracking of pending answer toggles

pub mod error;
pub mod pending;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, Rejection, fail};
pub use pending::{PendingToggle, PendingToggles};
pub use storage::{MemoryStorage, STORAGE_KEY, Storage, StorageWarning, load_cards, save_cards};
pub use store::{CardStore, DEFAULT_TOGGLE_DELAY_MS, StoreConfig};
pub use types::card::Card;
pub use types::card_id::CardId;
pub use types::tags::{normalize_tags, parse_tags};
pub use view::{
    Filter, ListState, MatchMode, Summary, all_tags, filtered_cards, matching_tags, summarize,
    tag_counts,
};
