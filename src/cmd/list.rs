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

use std::fmt::Write;

use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::types::card::Card;
use flashcard_buddy_core::view::Filter;
use flashcard_buddy_core::view::ListState;
use flashcard_buddy_core::view::MatchMode;
use flashcard_buddy_core::view::all_tags;
use flashcard_buddy_core::view::filtered_cards;
use flashcard_buddy_core::view::matching_tags;
use flashcard_buddy_core::view::summarize;
use flashcard_buddy_core::view::tag_counts;

use crate::utils::short_id;

pub struct ListOptions {
    pub tags: Vec<String>,
    pub match_all: bool,
    pub search: Option<String>,
    pub answers: bool,
}

impl ListOptions {
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        for tag in &self.tags {
            filter.select_tag(tag);
        }
        filter.set_mode(if self.match_all {
            MatchMode::All
        } else {
            MatchMode::Any
        });
        if let Some(search) = &self.search {
            filter.set_search(search.as_str());
        }
        filter
    }
}

/// Render the filtered card list followed by a count line.
pub fn render_list<S: Storage>(store: &CardStore<S>, options: &ListOptions) -> String {
    let filter = options.filter();
    let summary = summarize(store.cards(), &filter);
    let mut out = String::new();
    match summary.state {
        ListState::NoCards => {
            out.push_str("No cards yet. Add your first card!\n");
        }
        ListState::NoMatches => {
            out.push_str("No cards match the current filter.\n");
        }
        ListState::Cards => {
            for card in filtered_cards(store.cards(), &filter) {
                render_card(&mut out, card, options.answers);
            }
            let _ = writeln!(
                out,
                "\nShowing {} of {} cards.",
                summary.shown, summary.total
            );
        }
    }
    out
}

pub fn render_card(out: &mut String, card: &Card, answer: bool) {
    let _ = write!(out, "[{}] {}", short_id(card.id()), card.front());
    for tag in card.tags() {
        let _ = write!(out, " #{tag}");
    }
    out.push('\n');
    if answer {
        let _ = writeln!(out, "    {}", card.back());
    }
}

/// Render every tag with its card count, optionally narrowed by `query`.
pub fn render_tags<S: Storage>(store: &CardStore<S>, query: Option<&str>) -> String {
    let tags = all_tags(store.cards());
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }
    let counts = tag_counts(store.cards());
    let shown = matching_tags(&tags, query.unwrap_or(""));
    let mut out = String::new();
    if shown.is_empty() {
        out.push_str("No tags found.\n");
    }
    for tag in shown {
        let count = counts.get(tag).copied().unwrap_or(0);
        let _ = writeln!(out, "{tag} ({count})");
    }
    let _ = writeln!(
        out,
        "{} tag{} available.",
        tags.len(),
        if tags.len() == 1 { "" } else { "s" }
    );
    out
}
