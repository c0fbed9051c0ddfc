//! Keyword index over the component catalog with ranked fuzzy queries.
//!
//! The corpus is small and in-memory, rebuilt once per session; queries
//! walk every entry and accumulate pairwise keyword scores.

pub mod config;
pub mod score;

pub use config::SearchConfig;

use serde::Deserialize;
use serde::Serialize;
use showroom_catalog::ComponentKey;
use std::collections::BTreeSet;
use std::time::Instant;

/// One indexed unit. Born at index build, immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: String,
    pub name: String,
    /// Lowercased keyword set: raw name, human-formatted name,
    /// category, hyphen tokens, purpose keywords.
    pub keywords: BTreeSet<String>,
    /// Static rank: category weight plus common-component boost.
    pub priority: i32,
}

impl CatalogEntry {
    pub fn key(&self) -> ComponentKey {
        ComponentKey::new(self.category.clone(), self.name.clone())
    }
}

/// Keyword index answering ranked fuzzy queries over the catalog.
pub struct SearchIndex {
    entries: Vec<CatalogEntry>,
}

impl SearchIndex {
    /// Build the index from the registered keys. Called once per
    /// session; entries live for the process lifetime.
    pub fn build(keys: &[ComponentKey], config: &SearchConfig) -> Self {
        let entries = keys
            .iter()
            .map(|key| {
                let name = key.name.to_lowercase();
                let mut keywords = BTreeSet::new();
                keywords.insert(name.clone());
                keywords.insert(showroom_catalog::descriptor::human_title(&name).to_lowercase());
                keywords.insert(key.category.to_lowercase());
                for token in name.split('-').filter(|t| !t.is_empty()) {
                    keywords.insert(token.to_string());
                }
                for (needle, extras) in &config.purpose_keywords {
                    if name.contains(needle.as_str()) {
                        keywords.extend(extras.iter().cloned());
                    }
                }
                let mut priority = config.category_weight(&key.category);
                if config.common_components.iter().any(|c| c == &name) {
                    priority += config.common_boost;
                }
                CatalogEntry {
                    category: key.category.clone(),
                    name: key.name.clone(),
                    keywords,
                    priority,
                }
            })
            .collect();
        Self { entries }
    }

    /// Every entry in original catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Ranked fuzzy query. An empty query returns the whole catalog
    /// unranked (used to reset a filtered view); an unmatched query
    /// returns an empty list, never an error.
    pub fn query(&self, text: &str) -> Vec<CatalogEntry> {
        let started = Instant::now();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.entries.clone();
        }
        let out: Vec<CatalogEntry> = self
            .rank(&trimmed.to_lowercase())
            .into_iter()
            .map(|(_, e)| e.clone())
            .collect();
        tracing::debug!(
            query = trimmed,
            hits = out.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search: query ranked"
        );
        out
    }

    /// Like [`SearchIndex::query`] but exposing each entry's score,
    /// for diagnostics and tests.
    pub fn query_scored(&self, text: &str) -> Vec<(i32, CatalogEntry)> {
        let full = text.trim().to_lowercase();
        if full.is_empty() {
            return self.entries.iter().map(|e| (0, e.clone())).collect();
        }
        self.rank(&full)
            .into_iter()
            .map(|(s, e)| (s, e.clone()))
            .collect()
    }

    fn rank(&self, full: &str) -> Vec<(i32, &CatalogEntry)> {
        let words: Vec<&str> = full.split_whitespace().collect();
        let mut ranked: Vec<(i32, &CatalogEntry)> = Vec::new();
        for entry in &self.entries {
            let mut matched = 0i32;
            for keyword in &entry.keywords {
                for word in &words {
                    matched += score::pair_score(keyword, word);
                }
            }
            // Whole-query bonuses are exclusive: an exact keyword hit
            // already implies the prefix case, so only the stronger
            // bonus applies.
            if entry.keywords.contains(full) {
                matched += 100;
            } else if entry.keywords.iter().any(|k| k.starts_with(full)) {
                matched += 50;
            }
            // An unmatched entry stays out even when its static
            // priority is positive.
            if matched > 0 {
                ranked.push((matched + entry.priority, entry));
            }
        }
        // Stable sort: ties keep original catalog order.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> SearchIndex {
        let keys = vec![
            ComponentKey::new("atoms", "button"),
            ComponentKey::new("atoms", "icon-button"),
            ComponentKey::new("molecules", "card"),
            ComponentKey::new("organisms", "data-table"),
        ];
        SearchIndex::build(&keys, &SearchConfig::default())
    }

    #[test]
    fn index_generates_purpose_and_token_keywords() {
        let index = sample_index();
        let icon_button = &index.entries()[1];
        assert!(icon_button.keywords.contains("icon"));
        assert!(icon_button.keywords.contains("button"));
        assert!(icon_button.keywords.contains("icon-button"));
        assert!(icon_button.keywords.contains("click"));
        assert!(icon_button.keywords.contains("atoms"));
    }

    #[test]
    fn common_component_gets_boost() {
        let index = sample_index();
        let button = &index.entries()[0];
        let icon_button = &index.entries()[1];
        assert_eq!(button.priority, 40); // atoms 30 + common 10
        assert_eq!(icon_button.priority, 30);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let index = sample_index();
        let all = index.query("");
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name, "button");
        assert_eq!(all[3].name, "data-table");
    }

    #[test]
    fn unmatched_query_is_empty_not_an_error() {
        let index = sample_index();
        assert!(index.query("zzzzqqqq").is_empty());
    }

    #[test]
    fn btn_ranks_button_above_unrelated_card() {
        let index = sample_index();
        let results = index.query("btn");
        assert!(!results.is_empty());
        // Both button flavors match the abbreviation; card does not
        // match at all and so never appears.
        assert!(results.iter().all(|e| e.name.contains("button")));
        assert!(!results.iter().any(|e| e.name == "card"));
    }

    #[test]
    fn whole_query_bonus_does_not_stack() {
        let index = sample_index();
        let scored = index.query_scored("button");
        let (score, _) = scored
            .iter()
            .find(|(_, e)| e.name == "button")
            .expect("button must match its own name");
        // Pairwise exact 100 + exact-query bonus 100 + priority 40;
        // the prefix bonus never stacks on top of the exact one.
        assert_eq!(*score, 240);
    }

    #[test]
    fn scores_are_non_increasing() {
        let index = sample_index();
        for query in ["button", "b", "data", "click", "tab"] {
            let scored = index.query_scored(query);
            for pair in scored.windows(2) {
                assert!(pair[0].0 >= pair[1].0, "query {query} not sorted");
            }
        }
    }

    #[test]
    fn exact_keyword_always_surfaces() {
        let index = sample_index();
        for entry in index.entries() {
            for keyword in &entry.keywords {
                let scored = index.query_scored(keyword);
                let hit = scored
                    .iter()
                    .find(|(_, e)| e.name == entry.name && e.category == entry.category);
                let (score, _) = hit.unwrap_or_else(|| panic!("{keyword} missed {}", entry.name));
                assert!(*score > 0);
            }
        }
    }

    #[test]
    fn single_char_query_still_searches() {
        let index = sample_index();
        let results = index.query("b");
        assert!(results.iter().any(|e| e.name == "button"));
    }
}
