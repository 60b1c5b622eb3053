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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::tags::normalize_tags;

/// A single flashcard.
///
/// The serialized form is the persisted one: `{ id, front, back, tags }`.
/// Whether the answer is showing is UI state and is never written out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    front: String,
    back: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(skip)]
    show_answer: bool,
}

impl Card {
    /// Create a card with a fresh identifier. Validation of the two sides
    /// happens in the store, not here.
    pub fn new(front: impl Into<String>, back: impl Into<String>, tags: &[String]) -> Self {
        Self {
            id: CardId::generate(),
            front: front.into(),
            back: back.into(),
            tags: normalize_tags(tags),
            show_answer: false,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// A copy with new contents and the same identity.
    pub(crate) fn edited(&self, front: &str, back: &str, tags: &[String]) -> Self {
        Self {
            id: self.id.clone(),
            front: front.to_string(),
            back: back.to_string(),
            tags: normalize_tags(tags),
            show_answer: self.show_answer,
        }
    }

    /// A copy with the answer visibility flipped.
    pub(crate) fn toggled(&self) -> Self {
        Self {
            show_answer: !self.show_answer,
            ..self.clone()
        }
    }

    /// Re-normalize tags read back from storage.
    pub(crate) fn sanitize(&mut self) {
        self.tags = normalize_tags(&self.tags);
        self.show_answer = false;
    }
}
