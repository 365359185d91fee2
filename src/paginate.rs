//! # Paginator Module
//!
//! ## Purpose
//! Slices a collection into a page with metadata. Out-of-range pages are a
//! valid terminal state that yields an empty slice, not an error.
//!
//! ## Input/Output Specification
//! - **Input**: Any sliceable collection, 1-based page number, page size
//! - **Output**: `Page` with the item slice and navigation metadata
//! - **Validation**: `page` or `limit` below 1 is rejected

use crate::errors::{CatalogError, Result};
use serde::Serialize;

/// One page of results plus navigation metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// 1-based page number as requested
    pub page: usize,
    /// Page size as requested
    pub limit: usize,
    /// Total records across all pages
    pub total: usize,
    /// Ceil(total / limit); 0 for an empty collection
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice `items` into the requested page.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Result<Page<T>> {
    if page < 1 {
        return Err(CatalogError::ValidationFailed {
            field: "page".to_string(),
            reason: "Page numbers start at 1".to_string(),
        });
    }
    if limit < 1 {
        return Err(CatalogError::ValidationFailed {
            field: "limit".to_string(),
            reason: "Page size must be at least 1".to_string(),
        });
    }

    let total = items.len();
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let page_items = if start >= total {
        Vec::new()
    } else {
        items[start..(start + limit).min(total)].to_vec()
    };

    Ok(Page {
        items: page_items,
        meta: PageMeta {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let items: Vec<u32> = (0..10).collect();
        let page = paginate(&items, 2, 4).unwrap();

        assert_eq!(page.items, vec![4, 5, 6, 7]);
        assert_eq!(page.meta.total, 10);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next);
        assert!(page.meta.has_prev);
    }

    #[test]
    fn test_last_page_is_short() {
        let items: Vec<u32> = (0..10).collect();
        let page = paginate(&items, 3, 4).unwrap();

        assert_eq!(page.items, vec![8, 9]);
        assert!(!page.meta.has_next);
        assert!(page.meta.has_prev);
    }

    #[test]
    fn test_page_beyond_end_is_empty_not_error() {
        let items: Vec<u32> = (0..10).collect();
        let page = paginate(&items, 9, 4).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 3);
        assert!(!page.meta.has_next);
        assert!(page.meta.has_prev);
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.total_pages, 0);
        assert!(!page.meta.has_next);
        assert!(!page.meta.has_prev);
    }

    #[test]
    fn test_zero_page_and_limit_rejected() {
        let items: Vec<u32> = (0..3).collect();
        assert!(paginate(&items, 0, 4).is_err());
        assert!(paginate(&items, 1, 0).is_err());
    }

    #[test]
    fn test_pages_concatenate_to_whole() {
        let items: Vec<u32> = (0..23).collect();
        let limit = 5;
        let total_pages = paginate(&items, 1, limit).unwrap().meta.total_pages;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(paginate(&items, page, limit).unwrap().items);
        }
        assert_eq!(seen, items);
    }
}
