//! # Filter Engine Module
//!
//! ## Purpose
//! Applies a structured predicate set to a record collection. Populated
//! criteria narrow the set with logical AND; multi-valued criteria match
//! with OR inside the criterion.
//!
//! ## Input/Output Specification
//! - **Input**: Record collection, sparse `FilterCriteria` (unset = don't care)
//! - **Output**: New vector of matching records in original order
//! - **Validation**: Inverted date ranges are rejected before any matching

use crate::errors::{CatalogError, Result};
use crate::{Category, CatalogRecord, Industry, RecordStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which record timestamp a date-range criterion tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateField {
    Created,
    Updated,
    Published,
    ProjectStart,
    ProjectEnd,
}

impl DateField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Published => "published",
            Self::ProjectStart => "project-start",
            Self::ProjectEnd => "project-end",
        }
    }

    /// The selected timestamp on a record, when present.
    pub fn value_of(self, record: &CatalogRecord) -> Option<DateTime<Utc>> {
        match self {
            Self::Created => Some(record.created_at),
            Self::Updated => Some(record.updated_at),
            Self::Published => record.published_at,
            Self::ProjectStart => record.project_start,
            Self::ProjectEnd => record.project_end,
        }
    }
}

impl std::str::FromStr for DateField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "published" => Ok(Self::Published),
            "project-start" => Ok(Self::ProjectStart),
            "project-end" => Ok(Self::ProjectEnd),
            other => Err(CatalogError::ValidationFailed {
                field: "date_field".to_string(),
                reason: format!("Unknown date field: {}", other),
            }),
        }
    }
}

/// Inclusive date-range criterion over a named timestamp field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub field: DateField,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Sparse filter criteria. Every field is optional; absent fields impose no
/// constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Category is any of the requested values
    pub categories: Option<Vec<Category>>,
    /// Industry is any of the requested values
    pub industries: Option<Vec<Industry>>,
    /// Status is any of the requested values
    pub statuses: Option<Vec<RecordStatus>>,
    /// Country is any of the requested values (caseless comparison)
    pub countries: Option<Vec<String>>,
    /// Record has at least one of the requested tags
    pub tags: Option<Vec<String>>,
    /// Record has at least one of the requested features
    pub features: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_showcase: Option<bool>,
    /// Record carries a project video
    pub has_video: Option<bool>,
    /// Record carries at least one testimonial
    pub has_testimonial: Option<bool>,
    /// Mean testimonial rating is at least this value
    pub min_rating: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_units: Option<u32>,
    pub max_units: Option<u32>,
    pub min_investment: Option<f64>,
    pub max_investment: Option<f64>,
    /// Inclusive range over a named timestamp field
    pub date_range: Option<DateRange>,
    /// Coarse free-text pre-filter: caseless OR-substring match across the
    /// descriptive fields. Ranked search is a separate operation.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Reject criteria the engine cannot evaluate meaningfully.
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = &self.date_range {
            if let (Some(from), Some(to)) = (range.from, range.to) {
                if from > to {
                    return Err(CatalogError::ValidationFailed {
                        field: "date_range".to_string(),
                        reason: format!(
                            "Range start {} is after range end {}",
                            from.to_rfc3339(),
                            to.to_rfc3339()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// True when no criterion is populated.
    pub fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.industries.is_none()
            && self.statuses.is_none()
            && self.countries.is_none()
            && self.tags.is_none()
            && self.features.is_none()
            && self.is_featured.is_none()
            && self.is_showcase.is_none()
            && self.has_video.is_none()
            && self.has_testimonial.is_none()
            && self.min_rating.is_none()
            && self.min_area.is_none()
            && self.max_area.is_none()
            && self.min_units.is_none()
            && self.max_units.is_none()
            && self.min_investment.is_none()
            && self.max_investment.is_none()
            && self.date_range.is_none()
            && self.search.is_none()
    }
}

/// Apply the criteria to a collection, preserving input order.
pub fn apply<'a>(
    records: &'a [CatalogRecord],
    criteria: &FilterCriteria,
) -> Result<Vec<&'a CatalogRecord>> {
    criteria.validate()?;
    Ok(records.iter().filter(|r| matches(r, criteria)).collect())
}

/// Evaluate all populated criteria against one record.
pub(crate) fn matches(record: &CatalogRecord, criteria: &FilterCriteria) -> bool {
    if let Some(categories) = &criteria.categories {
        if !categories.contains(&record.category) {
            return false;
        }
    }
    if let Some(industries) = &criteria.industries {
        if !industries.contains(&record.industry) {
            return false;
        }
    }
    if let Some(statuses) = &criteria.statuses {
        if !statuses.contains(&record.status) {
            return false;
        }
    }
    if let Some(countries) = &criteria.countries {
        if !countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&record.location.country))
        {
            return false;
        }
    }
    if let Some(tags) = &criteria.tags {
        if !any_string_match(&record.tags, tags) {
            return false;
        }
    }
    if let Some(features) = &criteria.features {
        if !any_string_match(&record.features, features) {
            return false;
        }
    }

    if let Some(featured) = criteria.is_featured {
        if record.is_featured != featured {
            return false;
        }
    }
    if let Some(showcase) = criteria.is_showcase {
        if record.is_showcase != showcase {
            return false;
        }
    }
    if let Some(has_video) = criteria.has_video {
        if record.has_video() != has_video {
            return false;
        }
    }
    if let Some(has_testimonial) = criteria.has_testimonial {
        if record.has_testimonial() != has_testimonial {
            return false;
        }
    }
    if let Some(min_rating) = criteria.min_rating {
        if record.average_rating() < min_rating {
            return false;
        }
    }

    if !range_matches(
        record.scale.area_sqm,
        criteria.min_area,
        criteria.max_area,
    ) {
        return false;
    }
    if !range_matches(
        record.scale.unit_count.map(f64::from),
        criteria.min_units.map(f64::from),
        criteria.max_units.map(f64::from),
    ) {
        return false;
    }
    if !range_matches(
        record.scale.investment.as_ref().map(|i| i.amount),
        criteria.min_investment,
        criteria.max_investment,
    ) {
        return false;
    }

    if let Some(range) = &criteria.date_range {
        let Some(value) = range.field.value_of(record) else {
            return false;
        };
        if range.from.is_some_and(|from| value < from) {
            return false;
        }
        if range.to.is_some_and(|to| value > to) {
            return false;
        }
    }

    if let Some(query) = &criteria.search {
        if !text_matches(record, query) {
            return false;
        }
    }

    true
}

/// Any-match over record strings, caseless.
fn any_string_match(record_values: &[String], requested: &[String]) -> bool {
    requested
        .iter()
        .any(|req| record_values.iter().any(|v| v.eq_ignore_ascii_case(req)))
}

/// Inclusive range check. A record with no value fails any populated bound.
fn range_matches(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    if min.is_some_and(|m| value < m) {
        return false;
    }
    if max.is_some_and(|m| value > m) {
        return false;
    }
    true
}

/// Caseless OR-substring match across the descriptive fields.
fn text_matches(record: &CatalogRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let haystacks = [
        &record.title,
        &record.summary,
        &record.description,
        &record.customer,
    ];
    if haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
        return true;
    }

    record
        .tags
        .iter()
        .chain(record.features.iter())
        .chain(record.solutions.iter())
        .any(|v| v.to_lowercase().contains(&needle))
}
