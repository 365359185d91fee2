//! # Sort Engine Module
//!
//! ## Purpose
//! Orders a record collection by a named sort key with defined direction and
//! tie-break semantics.
//!
//! ## Input/Output Specification
//! - **Input**: Record collection, sort key
//! - **Output**: New ordered vector; the input is never mutated
//! - **Stability**: Records comparing equal under the key keep their relative
//!   input order, except where a key defines an explicit secondary key

use crate::errors::{CatalogError, Result};
use crate::CatalogRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Named sort key combining a field and a direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    CreatedAsc,
    #[default]
    CreatedDesc,
    UpdatedDesc,
    ViewsDesc,
    InvestmentAsc,
    InvestmentDesc,
    AreaDesc,
    /// Featured records first, then newest first
    Featured,
    /// Showcase records first, then newest first
    Showcase,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::CreatedAsc => "created-asc",
            Self::CreatedDesc => "created-desc",
            Self::UpdatedDesc => "updated-desc",
            Self::ViewsDesc => "views-desc",
            Self::InvestmentAsc => "investment-asc",
            Self::InvestmentDesc => "investment-desc",
            Self::AreaDesc => "area-desc",
            Self::Featured => "featured",
            Self::Showcase => "showcase",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title-asc" => Ok(Self::TitleAsc),
            "title-desc" => Ok(Self::TitleDesc),
            "created-asc" => Ok(Self::CreatedAsc),
            "created-desc" => Ok(Self::CreatedDesc),
            "updated-desc" => Ok(Self::UpdatedDesc),
            "views-desc" => Ok(Self::ViewsDesc),
            "investment-asc" => Ok(Self::InvestmentAsc),
            "investment-desc" => Ok(Self::InvestmentDesc),
            "area-desc" => Ok(Self::AreaDesc),
            "featured" => Ok(Self::Featured),
            "showcase" => Ok(Self::Showcase),
            other => Err(CatalogError::ValidationFailed {
                field: "sort".to_string(),
                reason: format!("Unknown sort key: {}", other),
            }),
        }
    }
}

/// Copy-then-sort: returns a new ordering without touching the input.
pub fn sort<'a>(records: &[&'a CatalogRecord], key: SortKey) -> Vec<&'a CatalogRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| compare(a, b, key));
    out
}

fn compare(a: &CatalogRecord, b: &CatalogRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::TitleAsc => caseless(&a.title, &b.title),
        SortKey::TitleDesc => caseless(&b.title, &a.title),
        SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortKey::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        SortKey::ViewsDesc => b.view_count.cmp(&a.view_count),
        SortKey::InvestmentAsc => float(investment(a), investment(b)),
        SortKey::InvestmentDesc => float(investment(b), investment(a)),
        SortKey::AreaDesc => float(area(b), area(a)),
        SortKey::Featured => flag_then_newest(a.is_featured, b.is_featured, a, b),
        SortKey::Showcase => flag_then_newest(a.is_showcase, b.is_showcase, a, b),
    }
}

/// Caseless lexicographic comparison, so "alpha" sorts before "Beta".
fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn float(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Flag descending (true before false), then creation-descending.
fn flag_then_newest(
    a_flag: bool,
    b_flag: bool,
    a: &CatalogRecord,
    b: &CatalogRecord,
) -> Ordering {
    b_flag
        .cmp(&a_flag)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Missing investment compares as 0.
fn investment(record: &CatalogRecord) -> f64 {
    record
        .scale
        .investment
        .as_ref()
        .map_or(0.0, |i| i.amount)
}

/// Missing area compares as 0.
fn area(record: &CatalogRecord) -> f64 {
    record.scale.area_sqm.unwrap_or(0.0)
}
