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

//! Tag normalization.
//!
//! A normalized tag list is trimmed, lowercased, free of empty entries and
//! free of duplicates. The first occurrence of a tag fixes its position.

use std::collections::HashSet;

/// Normalize a list of raw tags.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.clone()) {
            normalized.push(tag);
        }
    }
    normalized
}

pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Parse the comma-separated tag field of the card forms, e.g.
/// `"HTML, Web, Anfänger"`.
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_tags(["  HTML ", "Web"]), vec!["html", "web"]);
    }

    #[test]
    fn test_normalize_drops_empty() {
        assert_eq!(normalize_tags(["", "   ", "css"]), vec!["css"]);
    }

    #[test]
    fn test_normalize_dedupes_keeping_first_occurrence() {
        assert_eq!(
            normalize_tags(["web", "HTML", "Web ", "html", "css"]),
            vec!["web", "html", "css"]
        );
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize_tags(["Anfänger", "ANFÄNGER"]), vec!["anfänger"]);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags("HTML, Web, Anfänger"),
            vec!["html", "web", "anfänger"]
        );
        assert_eq!(parse_tags(" , ,"), Vec::<String>::new());
        assert_eq!(parse_tags(""), Vec::<String>::new());
    }
}
