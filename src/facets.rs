//! # Facet Statistics Module
//!
//! ## Purpose
//! Computes aggregate counts and value ranges over a collection to drive
//! filter-UI facets. Performs no filtering itself; callers hand it the set
//! they want characterized (typically all matching, pre-pagination records).
//!
//! ## Input/Output Specification
//! - **Input**: Record collection
//! - **Output**: Value→count pairs per enumerable dimension, numeric ranges
//! - **Degenerate case**: An empty collection yields zeroed/empty stats

use crate::CatalogRecord;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One facet value with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Inclusive numeric range observed across a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

/// Observed investment bounds plus the currencies seen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentRange {
    pub min: f64,
    pub max: f64,
    pub currencies: BTreeSet<String>,
}

/// Observed project-year bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Aggregate statistics over a record collection
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    /// Total records characterized
    pub total: usize,
    /// Count per category tag
    pub categories: BTreeMap<String, usize>,
    /// Count per industry tag
    pub industries: BTreeMap<String, usize>,
    /// Count per country
    pub countries: BTreeMap<String, usize>,
    /// Tags by descending count, ties in first-appearance order
    pub tags: Vec<FacetCount>,
    /// Features by descending count, ties in first-appearance order
    pub features: Vec<FacetCount>,
    /// Min/max project-start year
    pub year_range: Option<YearRange>,
    /// Min/max investment with observed currencies
    pub investment_range: Option<InvestmentRange>,
    /// Min/max display area in square meters
    pub area_range: Option<NumericRange>,
}

/// Single-pass aggregation over the collection.
pub fn compute_stats(records: &[&CatalogRecord]) -> CatalogStats {
    let mut stats = CatalogStats {
        total: records.len(),
        ..CatalogStats::default()
    };

    let mut tag_counts = OrderedCounter::new();
    let mut feature_counts = OrderedCounter::new();

    for record in records {
        *stats
            .categories
            .entry(record.category.as_str().to_string())
            .or_insert(0) += 1;
        *stats
            .industries
            .entry(record.industry.as_str().to_string())
            .or_insert(0) += 1;
        *stats
            .countries
            .entry(record.location.country.clone())
            .or_insert(0) += 1;

        for tag in &record.tags {
            tag_counts.add(tag);
        }
        for feature in &record.features {
            feature_counts.add(feature);
        }

        if let Some(start) = record.project_start {
            let year = start.year();
            stats.year_range = Some(match stats.year_range.take() {
                None => YearRange {
                    min: year,
                    max: year,
                },
                Some(r) => YearRange {
                    min: r.min.min(year),
                    max: r.max.max(year),
                },
            });
        }

        if let Some(investment) = &record.scale.investment {
            stats.investment_range = Some(match stats.investment_range.take() {
                None => InvestmentRange {
                    min: investment.amount,
                    max: investment.amount,
                    currencies: BTreeSet::from([investment.currency.clone()]),
                },
                Some(mut r) => {
                    r.min = r.min.min(investment.amount);
                    r.max = r.max.max(investment.amount);
                    r.currencies.insert(investment.currency.clone());
                    r
                }
            });
        }

        if let Some(area) = record.scale.area_sqm {
            stats.area_range = Some(match stats.area_range.take() {
                None => NumericRange {
                    min: area,
                    max: area,
                },
                Some(r) => NumericRange {
                    min: r.min.min(area),
                    max: r.max.max(area),
                },
            });
        }
    }

    stats.tags = tag_counts.into_sorted();
    stats.features = feature_counts.into_sorted();
    stats
}

/// Key→count accumulator that remembers first-appearance order, so that
/// equal counts materialize in a deterministic order.
struct OrderedCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl OrderedCounter {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Materialize by descending count; stable sort keeps insertion order
    /// for ties.
    fn into_sorted(self) -> Vec<FacetCount> {
        let counts = self.counts;
        let mut out: Vec<FacetCount> = self
            .order
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                FacetCount { value, count }
            })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{day, record, sample_catalog};
    use crate::Investment;

    #[test]
    fn test_empty_collection_yields_zeroed_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.categories.is_empty());
        assert!(stats.tags.is_empty());
        assert!(stats.year_range.is_none());
        assert!(stats.investment_range.is_none());
        assert!(stats.area_range.is_none());
    }

    #[test]
    fn test_dimension_counts() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();
        let stats = compute_stats(&refs);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories.get("outdoor-advertising"), Some(&1));
        assert_eq!(stats.categories.get("indoor-fixed"), Some(&1));
        assert_eq!(stats.countries.get("United States"), Some(&1));
        assert_eq!(stats.countries.get("China"), Some(&1));
        assert_eq!(stats.countries.get("Germany"), Some(&1));
    }

    #[test]
    fn test_tags_sorted_by_descending_count() {
        let records = sample_catalog();
        let refs: Vec<&_> = records.iter().collect();
        let stats = compute_stats(&refs);

        // "outdoor" appears twice, everything else once
        assert_eq!(stats.tags[0].value, "outdoor");
        assert_eq!(stats.tags[0].count, 2);
        // Ties keep first-appearance order
        assert_eq!(stats.tags[1].value, "billboard");
    }

    #[test]
    fn test_numeric_ranges() {
        let mut records = sample_catalog();
        records[1].scale.investment = Some(Investment {
            amount: 300_000.0,
            currency: "CNY".to_string(),
        });
        records[0].project_start = Some(day(10));
        records[2].project_start = Some(crate::fixtures::day(20));

        let refs: Vec<&_> = records.iter().collect();
        let stats = compute_stats(&refs);

        let investment = stats.investment_range.unwrap();
        assert_eq!(investment.min, 300_000.0);
        assert_eq!(investment.max, 1_200_000.0);
        assert!(investment.currencies.contains("USD"));
        assert!(investment.currencies.contains("CNY"));

        let area = stats.area_range.unwrap();
        assert_eq!(area.min, 120.0);
        assert_eq!(area.max, 400.0);

        let years = stats.year_range.unwrap();
        assert_eq!(years.min, 2024);
        assert_eq!(years.max, 2024);
    }

    #[test]
    fn test_stats_do_not_filter() {
        let mut draft = record("d-1", "Draft Entry");
        draft.status = crate::RecordStatus::Draft;
        let records = vec![draft];
        let refs: Vec<&_> = records.iter().collect();

        // Every record is characterized regardless of status
        let stats = compute_stats(&refs);
        assert_eq!(stats.total, 1);
    }
}
