//! # Query Pipeline Module
//!
//! ## Purpose
//! Composes the discovery operations in their fixed order: structural
//! filtering, then ranked search or sorting, then pagination. This is the
//! entry point external collaborators call.
//!
//! ## Input/Output Specification
//! - **Input**: Record collection, `QueryRequest`, engine configuration
//! - **Output**: `QueryResult` page with metadata and echoed query state
//! - **Ordering**: Structural filters always apply first; a ranked search
//!   only reorders the already-eligible set and never re-admits excluded
//!   records
//!
//! Facet statistics and map clusters are computed by callers over the
//! `matching` set, since they characterize all matching records rather than
//! the current page.

use crate::config::EngineConfig;
use crate::errors::{CatalogError, Result};
use crate::filter::{self, FilterCriteria};
use crate::paginate::{self, PageMeta};
use crate::search;
use crate::sort::{self, SortKey};
use crate::CatalogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discovery query: criteria, optional free text, ordering, page window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filters: FilterCriteria,
    /// Free-text query; when present the result is relevance-ordered
    pub search: Option<String>,
    /// Sort key for non-search queries; defaults to newest first
    pub sort: Option<SortKey>,
    /// 1-based page number, defaults to 1
    pub page: Option<usize>,
    /// Page size, defaults to the configured limit
    pub limit: Option<usize>,
}

/// The page slice plus metadata and echoed query state
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    pub items: Vec<&'a CatalogRecord>,
    pub meta: PageMeta,
    /// Relevance scores parallel to `items`, present when a search ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    /// Echo of the applied criteria for client-side state reconciliation
    pub filters: FilterCriteria,
    /// Echo of the applied sort key; absent when relevance ordering ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

/// Execute the full pipeline: filter, then search or sort, then paginate.
pub fn execute<'a>(
    records: &'a [CatalogRecord],
    request: &QueryRequest,
    config: &EngineConfig,
) -> Result<QueryResult<'a>> {
    let (ordered, scores, applied_sort) = filter_and_order(records, request, config)?;

    let page = request.page.unwrap_or(1);
    let mut limit = request.limit.unwrap_or(config.pagination.default_limit);
    if limit > config.pagination.max_limit {
        tracing::debug!(
            requested = limit,
            cap = config.pagination.max_limit,
            "Capping page size"
        );
        limit = config.pagination.max_limit;
    }

    let result = match scores {
        Some(scores) => {
            let scored: Vec<(&CatalogRecord, f64)> =
                ordered.into_iter().zip(scores).collect();
            let page = paginate::paginate(&scored, page, limit)?;
            let (items, scores): (Vec<_>, Vec<_>) = page.items.into_iter().unzip();
            QueryResult {
                items,
                meta: page.meta,
                scores: Some(scores),
                filters: request.filters.clone(),
                sort: None,
            }
        }
        None => {
            let page = paginate::paginate(&ordered, page, limit)?;
            QueryResult {
                items: page.items,
                meta: page.meta,
                scores: None,
                filters: request.filters.clone(),
                sort: applied_sort,
            }
        }
    };

    tracing::debug!(
        total = result.meta.total,
        page = result.meta.page,
        returned = result.items.len(),
        "Query executed"
    );

    Ok(result)
}

/// The full ordered matching set, before pagination. Facet statistics and
/// map clustering run over this set.
pub fn matching<'a>(
    records: &'a [CatalogRecord],
    request: &QueryRequest,
    config: &EngineConfig,
) -> Result<Vec<&'a CatalogRecord>> {
    let (ordered, _, _) = filter_and_order(records, request, config)?;
    Ok(ordered)
}

type Ordered<'a> = (Vec<&'a CatalogRecord>, Option<Vec<f64>>, Option<SortKey>);

fn filter_and_order<'a>(
    records: &'a [CatalogRecord],
    request: &QueryRequest,
    config: &EngineConfig,
) -> Result<Ordered<'a>> {
    let search_query = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    // Structural criteria first; the coarse free-text criterion is withheld
    // when a ranked search will order the results instead
    let mut criteria = request.filters.clone();
    if search_query.is_some() {
        criteria.search = None;
    }
    let filtered = filter::apply(records, &criteria)?;

    match search_query {
        Some(query) => {
            let matches = search::rank(&filtered, query, &config.search);
            let mut items = Vec::with_capacity(matches.len());
            let mut scores = Vec::with_capacity(matches.len());
            for m in matches {
                items.push(m.record);
                scores.push(m.score);
            }
            Ok((items, Some(scores), None))
        }
        None => {
            let key = request.sort.unwrap_or_default();
            Ok((sort::sort(&filtered, key), None, Some(key)))
        }
    }
}

/// Success envelope for the API boundary
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub meta: ResponseMeta,
}

/// Envelope metadata
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: ResponseMeta {
                timestamp: Utc::now(),
                request_id: None,
            },
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.meta.request_id = Some(request_id.into());
        self
    }
}

/// Error envelope for the API boundary
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: ApiErrorBody,
}

/// Structured error payload
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&CatalogError> for ApiError {
    fn from(err: &CatalogError) -> Self {
        let details = match err {
            CatalogError::ValidationFailed { field, .. } => Some(format!("field: {}", field)),
            _ => None,
        };
        Self {
            success: false,
            error: ApiErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
                details,
            },
        }
    }
}
