use std::sync::Arc;

use tracing::{debug, info};

use crate::application::use_cases::IndexManager;
use crate::application::{BlobStore, PointerStore};
use crate::domain::{IndexEntry, LoadLevel, MenuDocument, MenuMatch};

/// Entries whose stored duration lies outside ±20% of the target are
/// excluded before any scoring or fetching happens.
pub const DURATION_WINDOW: f64 = 0.2;
/// Base score every entry inside the duration window receives.
pub const DURATION_BASE_SCORE: u32 = 3;
/// Extra points when the duration is within [`DURATION_TIGHT_TOLERANCE`]
/// minutes of the target.
pub const DURATION_TIGHT_BONUS: u32 = 2;
pub const DURATION_TIGHT_TOLERANCE: f64 = 5.0;
/// Extra point when the duration is within [`DURATION_NEAR_TOLERANCE`]
/// minutes of the target.
pub const DURATION_NEAR_BONUS: u32 = 1;
pub const DURATION_NEAR_TOLERANCE: f64 = 10.0;
/// Points per load level shared between the query and the entry.
pub const LEVEL_MATCH_SCORE: u32 = 2;
/// Points per query keyword found in the entry's title/notes/skills.
pub const KEYWORD_MATCH_SCORE: u32 = 1;
/// Points per recognized section kind (warm-up, main set, cool-down).
pub const STRUCTURE_MATCH_SCORE: u32 = 1;
/// Entries scoring below this are dropped from the results.
pub const MIN_SCORE: u32 = 3;
/// Result list cap.
pub const MAX_RESULTS: usize = 5;

/// Section-name markers, lower-cased. They cover the generator's Japanese
/// section names alongside the common English spellings.
pub const WARM_UP_MARKERS: &[&str] = &["w-up", "warm", "アップ"];
pub const MAIN_SET_MARKERS: &[&str] = &["main", "メイン"];
pub const COOL_DOWN_MARKERS: &[&str] = &["down", "cool", "ダウン"];

/// Tokens carrying one of these suffixes are duration mentions ("30分",
/// "45min"), not keywords.
const DURATION_SUFFIXES: &[&str] = &["分", "min"];

/// A free-text query split into recognized load levels and keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub levels: Vec<LoadLevel>,
    pub keywords: Vec<String>,
}

/// Splits a query on whitespace. Tokens that exactly match a load-level
/// symbol become `levels`; every other token longer than one character
/// becomes a lower-cased keyword, except duration-suffixed tokens. Both
/// lists are deduplicated, order preserved.
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();

    for token in query.split_whitespace() {
        if let Some(level) = LoadLevel::parse(token) {
            if !parsed.levels.contains(&level) {
                parsed.levels.push(level);
            }
            continue;
        }

        if token.chars().count() <= 1 {
            continue;
        }

        let keyword = token.to_lowercase();
        if DURATION_SUFFIXES.iter().any(|s| keyword.ends_with(s)) {
            continue;
        }
        if !parsed.keywords.contains(&keyword) {
            parsed.keywords.push(keyword);
        }
    }

    parsed
}

/// Scores indexed menus against a free-text query and a target duration.
pub struct SimilaritySearchEngine {
    blob_store: Arc<dyn BlobStore>,
    index: IndexManager,
}

impl SimilaritySearchEngine {
    pub fn new(blob_store: Arc<dyn BlobStore>, pointer_store: Arc<dyn PointerStore>) -> Self {
        Self {
            index: IndexManager::new(blob_store.clone(), pointer_store),
            blob_store,
        }
    }

    /// Returns up to [`MAX_RESULTS`] menus scored against `query`, best
    /// first (ties keep index order). A failure on one entry skips that
    /// entry only; overall failures degrade to an empty list.
    pub async fn search(&self, query: &str, target_duration: f64) -> Vec<MenuMatch> {
        let index = self.index.load().await;
        if index.is_empty() {
            return Vec::new();
        }

        let parsed = parse_query(query);
        debug!(
            "Searching {} menus: levels {:?}, keywords {:?}, target {} min",
            index.len(),
            parsed.levels,
            parsed.keywords,
            target_duration
        );

        let mut matches = Vec::new();
        for entry in &index.menus {
            if let Some(hit) = self.score_entry(entry, &parsed, target_duration).await {
                matches.push(hit);
            }
        }

        matches.sort_by(|a, b| b.score().cmp(&a.score()));
        matches.truncate(MAX_RESULTS);

        info!("Search matched {} of {} menus", matches.len(), index.len());
        matches
    }

    /// Scores one entry, fetching its document for the structure bonus.
    /// `None` means the entry fell outside the duration window, its
    /// document could not be fetched, or it scored below [`MIN_SCORE`].
    async fn score_entry(
        &self,
        entry: &IndexEntry,
        query: &ParsedQuery,
        target_duration: f64,
    ) -> Option<MenuMatch> {
        let duration = entry.metadata.duration_minutes();
        if duration < target_duration * (1.0 - DURATION_WINDOW)
            || duration > target_duration * (1.0 + DURATION_WINDOW)
        {
            return None;
        }

        let mut score = DURATION_BASE_SCORE;
        let diff = (target_duration - duration).abs();
        if diff <= DURATION_TIGHT_TOLERANCE {
            score += DURATION_TIGHT_BONUS;
        } else if diff <= DURATION_NEAR_TOLERANCE {
            score += DURATION_NEAR_BONUS;
        }

        let entry_levels = entry.metadata.load_level_set();
        let shared = query
            .levels
            .iter()
            .filter(|level| entry_levels.contains(level))
            .count();
        score += LEVEL_MATCH_SCORE * shared as u32;

        let haystack = entry.metadata.search_text();
        let hits = query
            .keywords
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count();
        score += KEYWORD_MATCH_SCORE * hits as u32;

        // The structure bonus needs the full document; entries whose blob
        // cannot be fetched are dropped regardless of their score so far.
        let document = self.fetch_document(entry).await?;
        for markers in [WARM_UP_MARKERS, MAIN_SET_MARKERS, COOL_DOWN_MARKERS] {
            if document.has_section_matching(markers) {
                score += STRUCTURE_MATCH_SCORE;
            }
        }

        if score < MIN_SCORE {
            return None;
        }
        Some(MenuMatch::new(document, score))
    }

    async fn fetch_document(&self, entry: &IndexEntry) -> Option<MenuDocument> {
        let value = match self.blob_store.read(&entry.menu_data_url).await {
            Ok(value) => value,
            Err(e) => {
                debug!("Skipping menu {}: {}", entry.id, e);
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(document) => Some(document),
            Err(e) => {
                debug!(
                    "Skipping menu {}: document at {} did not parse: {}",
                    entry.id, entry.menu_data_url, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tokens_are_recognized_and_deduplicated() {
        let parsed = parse_query("A b A interval");
        assert_eq!(parsed.levels, vec![LoadLevel::A, LoadLevel::B]);
        assert_eq!(parsed.keywords, vec!["interval".to_string()]);
    }

    #[test]
    fn one_character_tokens_are_dropped() {
        let parsed = parse_query("x sprint y");
        assert!(parsed.levels.is_empty());
        assert_eq!(parsed.keywords, vec!["sprint".to_string()]);
    }

    #[test]
    fn duration_suffixed_tokens_are_dropped() {
        let parsed = parse_query("A 30分 45min kick");
        assert_eq!(parsed.levels, vec![LoadLevel::A]);
        assert_eq!(parsed.keywords, vec!["kick".to_string()]);
    }

    #[test]
    fn keywords_are_lower_cased() {
        let parsed = parse_query("Sprint ENDURANCE");
        assert_eq!(
            parsed.keywords,
            vec!["sprint".to_string(), "endurance".to_string()]
        );
    }

    #[test]
    fn multibyte_tokens_count_characters_not_bytes() {
        // Three characters, nine bytes; must pass the length filter as a
        // multi-character keyword.
        let parsed = parse_query("キック");
        assert_eq!(parsed.keywords, vec!["キック".to_string()]);
    }

    #[test]
    fn empty_query_parses_to_nothing() {
        assert_eq!(parse_query("   "), ParsedQuery::default());
    }
}
