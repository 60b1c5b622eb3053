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

//! Views derived from the collection: the tag index and the filtered list.
//!
//! Everything here is a pure function of the cards and the filter state and
//! is recomputed whenever either changes.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::types::card::Card;
use crate::types::tags::normalize_tag;

/// How the selected tags are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// A card must carry at least one selected tag.
    #[default]
    Any,
    /// A card must carry every selected tag.
    All,
}

/// Transient filter state. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    selected_tags: Vec<String>,
    mode: MatchMode,
    search: String,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Select the tag if it is not selected, deselect it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return;
        }
        match self.selected_tags.iter().position(|t| *t == tag) {
            Some(idx) => {
                self.selected_tags.remove(idx);
            }
            None => self.selected_tags.push(tag),
        }
    }

    /// Select the tag, leaving the selection unchanged if it already is.
    pub fn select_tag(&mut self, tag: &str) {
        let tag = normalize_tag(tag);
        if tag.is_empty() || self.selected_tags.contains(&tag) {
            return;
        }
        self.selected_tags.push(tag);
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    fn matches_tags(&self, card: &Card) -> bool {
        if self.selected_tags.is_empty() {
            return true;
        }
        match self.mode {
            MatchMode::Any => self.selected_tags.iter().any(|t| card.has_tag(t)),
            MatchMode::All => self.selected_tags.iter().all(|t| card.has_tag(t)),
        }
    }

    fn matches_search(card: &Card, needle: &str) -> bool {
        needle.is_empty()
            || card.front().to_lowercase().contains(needle)
            || card.back().to_lowercase().contains(needle)
    }
}

/// Every distinct tag, sorted ascending.
pub fn all_tags(cards: &[Card]) -> Vec<String> {
    let tags: BTreeSet<&str> = cards
        .iter()
        .flat_map(|c| c.tags().iter().map(|t| t.as_str()))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// The number of cards carrying each tag.
pub fn tag_counts(cards: &[Card]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        for tag in card.tags() {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// The cards passing the tag stage and then the search stage, in
/// collection order.
pub fn filtered_cards<'a>(cards: &'a [Card], filter: &Filter) -> Vec<&'a Card> {
    let needle = filter.search.trim().to_lowercase();
    cards
        .iter()
        .filter(|card| filter.matches_tags(card))
        .filter(|card| Filter::matches_search(card, &needle))
        .collect()
}

/// Narrow the tag list of the filter dropdown by a search string.
pub fn matching_tags<'a>(tags: &'a [String], query: &str) -> Vec<&'a String> {
    let query = query.to_lowercase();
    tags.iter()
        .filter(|t| t.to_lowercase().contains(&query))
        .collect()
}

/// Which placeholder, if any, the card list needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListState {
    /// The collection is empty.
    NoCards,
    /// There are cards, but the filter hides all of them.
    NoMatches,
    /// At least one card is shown.
    Cards,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub shown: usize,
    pub state: ListState,
}

pub fn summarize(cards: &[Card], filter: &Filter) -> Summary {
    let total = cards.len();
    let shown = filtered_cards(cards, filter).len();
    let state = if total == 0 {
        ListState::NoCards
    } else if shown == 0 {
        ListState::NoMatches
    } else {
        ListState::Cards
    };
    Summary {
        total,
        shown,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(front: &str, back: &str, tags: &[&str]) -> Card {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        Card::new(front, back, &tags)
    }

    fn fronts<'a>(cards: &[&'a Card]) -> Vec<&'a str> {
        cards.iter().map(|c| c.front()).collect()
    }

    fn filter(tags: &[&str], mode: MatchMode, search: &str) -> Filter {
        let mut filter = Filter::new();
        for tag in tags {
            filter.select_tag(tag);
        }
        filter.set_mode(mode);
        filter.set_search(search);
        filter
    }

    #[test]
    fn test_all_tags_sorted_and_distinct() {
        let cards = vec![
            card("1", "1", &["web", "html"]),
            card("2", "2", &["css", "web"]),
            card("3", "3", &[]),
        ];
        assert_eq!(all_tags(&cards), vec!["css", "html", "web"]);
        assert!(all_tags(&[]).is_empty());
    }

    #[test]
    fn test_tag_counts() {
        let cards = vec![
            card("1", "1", &["web", "html"]),
            card("2", "2", &["css", "web"]),
        ];
        let counts = tag_counts(&cards);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["web"], 2);
        assert_eq!(counts["html"], 1);
        assert_eq!(counts["css"], 1);
    }

    #[test]
    fn test_no_filter_passes_everything() {
        let cards = vec![card("A", "a", &["x"]), card("B", "b", &[])];
        let result = filtered_cards(&cards, &Filter::new());
        assert_eq!(fronts(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_any_mode() {
        let cards = vec![
            card("A", "a", &["x"]),
            card("B", "b", &["y"]),
            card("C", "c", &[]),
        ];
        let result = filtered_cards(&cards, &filter(&["x", "y"], MatchMode::Any, ""));
        assert_eq!(fronts(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_all_mode() {
        let cards = vec![card("A", "a", &["x", "y"]), card("B", "b", &["x"])];
        let result = filtered_cards(&cards, &filter(&["x", "y"], MatchMode::All, ""));
        assert_eq!(fronts(&result), vec!["A"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let cards = vec![
            card("Was ist HTML?", "HyperText Markup Language", &[]),
            card("Was ist CSS?", "Cascading Style Sheets", &[]),
        ];
        let result = filtered_cards(&cards, &filter(&[], MatchMode::Any, "html"));
        assert_eq!(fronts(&result), vec!["Was ist HTML?"]);
    }

    #[test]
    fn test_search_matches_back_and_trims() {
        let cards = vec![
            card("Was ist HTML?", "HyperText Markup Language", &[]),
            card("Was ist CSS?", "Cascading Style Sheets", &[]),
        ];
        let result = filtered_cards(&cards, &filter(&[], MatchMode::Any, "  STYLE  "));
        assert_eq!(fronts(&result), vec!["Was ist CSS?"]);
        let result = filtered_cards(&cards, &filter(&[], MatchMode::Any, "   "));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_tag_stage_then_search_stage() {
        let cards = vec![
            card("HTML basics", "a", &["web"]),
            card("HTML forms", "b", &["forms"]),
            card("CSS basics", "c", &["web"]),
        ];
        let result = filtered_cards(&cards, &filter(&["web"], MatchMode::Any, "basics"));
        assert_eq!(fronts(&result), vec!["HTML basics", "CSS basics"]);
        let result = filtered_cards(&cards, &filter(&["web"], MatchMode::Any, "html"));
        assert_eq!(fronts(&result), vec!["HTML basics"]);
    }

    #[test]
    fn test_toggle_tag() {
        let mut filter = Filter::new();
        filter.toggle_tag("Web");
        filter.toggle_tag("css");
        assert_eq!(filter.selected_tags(), &["web", "css"]);
        filter.toggle_tag("web");
        assert_eq!(filter.selected_tags(), &["css"]);
        filter.toggle_tag("  ");
        assert_eq!(filter.selected_tags(), &["css"]);
        filter.clear_tags();
        assert!(filter.selected_tags().is_empty());
    }

    #[test]
    fn test_select_tag_is_idempotent() {
        let mut filter = Filter::new();
        filter.select_tag("web");
        filter.select_tag(" Web ");
        filter.select_tag("css");
        filter.select_tag("");
        assert_eq!(filter.selected_tags(), &["web", "css"]);
    }

    #[test]
    fn test_matching_tags() {
        let tags: Vec<String> = vec!["css".into(), "html".into(), "web".into()];
        assert_eq!(matching_tags(&tags, "T"), vec!["html"]);
        assert_eq!(matching_tags(&tags, "").len(), 3);
        assert!(matching_tags(&tags, "zzz").is_empty());
    }

    #[test]
    fn test_summarize() {
        assert_eq!(
            summarize(&[], &Filter::new()),
            Summary {
                total: 0,
                shown: 0,
                state: ListState::NoCards
            }
        );
        let cards = vec![card("A", "a", &["x"]), card("B", "b", &["y"])];
        assert_eq!(
            summarize(&cards, &filter(&["x"], MatchMode::Any, "")),
            Summary {
                total: 2,
                shown: 1,
                state: ListState::Cards
            }
        );
        assert_eq!(
            summarize(&cards, &filter(&["z"], MatchMode::Any, "")).state,
            ListState::NoMatches
        );
    }
}
