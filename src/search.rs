//! # Search Engine Module
//!
//! ## Purpose
//! Scores and ranks records against a free-text query using per-field
//! weighted similarity, and produces typed autocomplete suggestions.
//!
//! ## Input/Output Specification
//! - **Input**: Record collection, query text, search configuration
//! - **Output**: Matches with normalized relevance scores in [0, 1],
//!   deduplicated suggestions with occurrence counts
//! - **Ranking**: Score descending; ties keep input order
//!
//! ## Key Features
//! - Weighted per-field scoring (title weighs heaviest)
//! - Configurable relevance floor to drop marginal matches
//! - Suggestion ordering: exact text first, then suggestion kind, then count

use crate::config::{FieldWeights, SearchConfig};
use crate::similarity::field_score;
use crate::CatalogRecord;
use serde::Serialize;
use std::collections::HashMap;

/// A record paired with its normalized relevance score
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch<'a> {
    pub record: &'a CatalogRecord,
    /// Relevance in [0, 1]
    pub score: f64,
}

/// Autocomplete suggestion kinds, in display priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    /// Direct record-title match
    Record,
    /// Customer or owner name
    Customer,
    /// "city, country" location
    Location,
    /// Tag value
    Tag,
}

impl SuggestionKind {
    fn priority(self) -> u8 {
        match self {
            Self::Record => 0,
            Self::Customer => 1,
            Self::Location => 2,
            Self::Tag => 3,
        }
    }
}

/// One typed autocomplete suggestion
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    /// How many records carry this value
    pub count: usize,
}

/// Rank records against a query, best first.
///
/// Ties keep input order; records scoring below the configured relevance
/// floor are dropped.
pub fn rank<'a>(
    records: &[&'a CatalogRecord],
    query: &str,
    config: &SearchConfig,
) -> Vec<SearchMatch<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SearchMatch<'a>> = records
        .iter()
        .map(|&record| SearchMatch {
            record,
            score: score_record(record, query, &config.weights),
        })
        .filter(|m| m.score >= config.min_score)
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    tracing::debug!(
        query,
        candidates = records.len(),
        matches = matches.len(),
        "Ranked search completed"
    );

    matches
}

/// Weighted sum of per-field scores, normalized by the total weight so the
/// result stays in [0, 1].
fn score_record(record: &CatalogRecord, query: &str, weights: &FieldWeights) -> f64 {
    let mut score = 0.0;
    score += weights.title * field_score(&record.title, query);
    score += weights.summary * field_score(&record.summary, query);
    score += weights.customer * field_score(&record.customer, query);
    score += weights.description * field_score(&record.description, query);
    score += weights.tags * best_of(&record.tags, query);
    score += weights.features * best_of(&record.features, query);
    score += weights.solutions * best_of(&record.solutions, query);

    score / weights.total()
}

/// Best match across a list-valued field, 0 when the list is empty.
fn best_of(values: &[String], query: &str) -> f64 {
    values
        .iter()
        .map(|v| field_score(v, query))
        .fold(0.0, f64::max)
}

/// Typed autocomplete suggestions for a partial query.
///
/// Queries shorter than two characters are too ambiguous to suggest from
/// and yield an empty list.
pub fn suggest(records: &[&CatalogRecord], query: &str, limit: usize) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return Vec::new();
    }

    let mut suggestions: Vec<Suggestion> = Vec::new();
    let mut index: HashMap<(u8, String), usize> = HashMap::new();

    for record in records {
        if record.title.to_lowercase().contains(&needle) {
            bump(
                &mut suggestions,
                &mut index,
                SuggestionKind::Record,
                &record.title,
            );
        }
        if !record.customer.is_empty() && record.customer.to_lowercase().contains(&needle) {
            bump(
                &mut suggestions,
                &mut index,
                SuggestionKind::Customer,
                &record.customer,
            );
        }

        let place = format!("{}, {}", record.location.city, record.location.country);
        if place.to_lowercase().contains(&needle) {
            bump(&mut suggestions, &mut index, SuggestionKind::Location, &place);
        }

        for tag in &record.tags {
            if tag.to_lowercase().contains(&needle) {
                bump(&mut suggestions, &mut index, SuggestionKind::Tag, tag);
            }
        }
    }

    // Exact text first, then kind priority, then occurrence count
    suggestions.sort_by(|a, b| {
        let a_exact = a.text.to_lowercase() == needle;
        let b_exact = b.text.to_lowercase() == needle;
        b_exact
            .cmp(&a_exact)
            .then_with(|| a.kind.priority().cmp(&b.kind.priority()))
            .then_with(|| b.count.cmp(&a.count))
    });
    suggestions.truncate(limit);
    suggestions
}

/// Increment an existing suggestion or append a new one, deduplicating by
/// kind and caseless text.
fn bump(
    suggestions: &mut Vec<Suggestion>,
    index: &mut HashMap<(u8, String), usize>,
    kind: SuggestionKind,
    text: &str,
) {
    let key = (kind.priority(), text.to_lowercase());
    match index.get(&key) {
        Some(&pos) => suggestions[pos].count += 1,
        None => {
            index.insert(key, suggestions.len());
            suggestions.push(Suggestion {
                text: text.to_string(),
                kind,
                count: 1,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, sample_catalog};

    fn open_config() -> SearchConfig {
        SearchConfig {
            min_score: 0.0,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_title_match_outranks_tag_match() {
        // "Beijing Mall Atrium" matches in the title, "beijing-mall" only in
        // another record's tags
        let mut tagged = record("cs-009", "Riverside Screen");
        tagged.tags = vec!["beijing-mall".to_string()];
        let mut records = sample_catalog();
        records.push(tagged);
        let refs: Vec<&_> = records.iter().collect();

        let matches = rank(&refs, "Beijing", &open_config());
        assert!(matches.len() >= 2);
        assert_eq!(matches[0].record.id, "cs-002");
    }

    #[test]
    fn test_exact_title_outranks_fuzzy_secondary() {
        let mut exact = record("1", "Stadium Perimeter");
        exact.summary = "Boards".to_string();
        let mut fuzzy = record("2", "Harbor Tower");
        fuzzy.summary = "stadum perimeter install".to_string();
        let records = vec![&exact, &fuzzy];

        let matches = rank(&records, "Stadium Perimeter", &open_config());
        assert_eq!(matches[0].record.id, "1");
        if matches.len() > 1 {
            assert!(matches[0].score >= matches[1].score);
        }
    }

    #[test]
    fn test_scores_stay_normalized() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();

        for m in rank(&refs, "billboard", &open_config()) {
            assert!((0.0..=1.0).contains(&m.score), "score {}", m.score);
        }
    }

    #[test]
    fn test_relevance_floor_drops_marginal_matches() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();

        let strict = SearchConfig {
            min_score: 0.99,
            ..SearchConfig::default()
        };
        assert!(rank(&refs, "billboard", &strict).is_empty());
    }

    #[test]
    fn test_tied_scores_keep_input_order() {
        let a = record("a", "Plain Screen");
        let b = record("b", "Plain Screen");
        let records = vec![&a, &b];

        let matches = rank(&records, "Plain Screen", &open_config());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record.id, "a");
        assert_eq!(matches[1].record.id, "b");
    }

    #[test]
    fn test_empty_query_yields_no_matches() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();
        assert!(rank(&refs, "   ", &open_config()).is_empty());
    }

    #[test]
    fn test_suggest_too_short_query() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();
        assert!(suggest(&refs, "b", 10).is_empty());
        assert!(suggest(&refs, "", 10).is_empty());
    }

    #[test]
    fn test_suggest_kind_priority() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();

        // "beijing" hits the record title, the location, and a tag
        let suggestions = suggest(&refs, "beijing", 10);
        assert!(suggestions.len() >= 3);
        assert_eq!(suggestions[0].kind, SuggestionKind::Record);
        let loc_pos = suggestions
            .iter()
            .position(|s| s.kind == SuggestionKind::Location)
            .unwrap();
        let tag_pos = suggestions
            .iter()
            .position(|s| s.kind == SuggestionKind::Tag)
            .unwrap();
        assert!(loc_pos < tag_pos);
    }

    #[test]
    fn test_suggest_counts_duplicates() {
        let mut a = record("a", "North Plaza");
        a.customer = "Apex Media Group".to_string();
        let mut b = record("b", "South Plaza");
        b.customer = "Apex Media Group".to_string();
        let records = vec![&a, &b];

        let suggestions = suggest(&records, "apex", 10);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Customer);
        assert_eq!(suggestions[0].count, 2);
    }

    #[test]
    fn test_suggest_exact_match_first() {
        let mut a = record("a", "Plaza Central");
        a.tags = vec!["plaza".to_string()];
        let b = record("b", "Plaza North Extension");
        let records = vec![&b, &a];

        // The exact tag "plaza" outranks the longer title matches despite
        // the lower kind priority
        let suggestions = suggest(&records, "plaza", 10);
        assert_eq!(suggestions[0].text, "plaza");
        assert_eq!(suggestions[0].kind, SuggestionKind::Tag);
    }

    #[test]
    fn test_suggest_respects_limit() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();
        assert!(suggest(&refs, "beijing", 1).len() <= 1);
    }
}
