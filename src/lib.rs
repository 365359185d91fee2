//! # Catalog Discovery Engine
//!
//! ## Overview
//! This library implements the discovery layer of a project-showcase catalog:
//! it turns an in-memory collection of catalog records plus caller-supplied
//! criteria into a filtered, ranked, paginated, and optionally geo-clustered
//! result set.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `geo`: Great-circle distance, bounding boxes, radius queries
//! - `similarity`: Edit-distance based fuzzy string scoring
//! - `filter`: Structured predicate evaluation over record collections
//! - `sort`: Stable multi-key ordering
//! - `paginate`: Page slicing with metadata
//! - `facets`: Aggregate counts and ranges for filter UIs
//! - `search`: Weighted relevance ranking and autocomplete suggestions
//! - `cluster`: Density grouping of nearby records for map display
//! - `pipeline`: The filter → search/sort → paginate orchestrator
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Catalog records (already loaded by a data layer), filter
//!   criteria, free-text queries, sort keys, pagination parameters
//! - **Output**: Page slices with metadata, scored matches, facet counts,
//!   cluster groups
//! - **Guarantees**: Input records are never mutated; every operation returns
//!   freshly allocated output and is safe to call concurrently over a shared
//!   collection
//!
//! ## Usage
//! ```rust,no_run
//! use catalog_discovery::{pipeline, EngineConfig, FilterCriteria, QueryRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = Vec::new(); // supplied by the content-management layer
//!     let config = EngineConfig::load()?;
//!     let request = QueryRequest {
//!         filters: FilterCriteria::default(),
//!         search: Some("times square".to_string()),
//!         ..QueryRequest::default()
//!     };
//!     let result = pipeline::execute(&records, &request, &config)?;
//!     println!("{} matches", result.meta.total);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod cluster;
pub mod config;
pub mod errors;
pub mod facets;
pub mod filter;
pub mod geo;
pub mod paginate;
pub mod pipeline;
pub mod search;
pub mod similarity;
pub mod sort;

// Re-exports for convenience
pub use config::EngineConfig;
pub use errors::{CatalogError, Result};
pub use filter::{DateField, DateRange, FilterCriteria};
pub use paginate::{Page, PageMeta};
pub use pipeline::{QueryRequest, QueryResult};
pub use search::{SearchMatch, Suggestion, SuggestionKind};
pub use sort::SortKey;

// Core types used throughout the system
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of display categories a record is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    OutdoorAdvertising,
    IndoorFixed,
    Rental,
    SportsVenue,
    Transportation,
    Broadcast,
    Retail,
}

impl Category {
    /// String tag used in query parameters and facet keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutdoorAdvertising => "outdoor-advertising",
            Self::IndoorFixed => "indoor-fixed",
            Self::Rental => "rental",
            Self::SportsVenue => "sports-venue",
            Self::Transportation => "transportation",
            Self::Broadcast => "broadcast",
            Self::Retail => "retail",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "outdoor-advertising" => Ok(Self::OutdoorAdvertising),
            "indoor-fixed" => Ok(Self::IndoorFixed),
            "rental" => Ok(Self::Rental),
            "sports-venue" => Ok(Self::SportsVenue),
            "transportation" => Ok(Self::Transportation),
            "broadcast" => Ok(Self::Broadcast),
            "retail" => Ok(Self::Retail),
            other => Err(CatalogError::ValidationFailed {
                field: "category".to_string(),
                reason: format!("Unknown category: {}", other),
            }),
        }
    }
}

/// Closed set of customer industries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Advertising,
    Sports,
    Retail,
    Hospitality,
    Transportation,
    Entertainment,
    Education,
    Corporate,
    Government,
}

impl Industry {
    /// String tag used in query parameters and facet keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Advertising => "advertising",
            Self::Sports => "sports",
            Self::Retail => "retail",
            Self::Hospitality => "hospitality",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Education => "education",
            Self::Corporate => "corporate",
            Self::Government => "government",
        }
    }
}

impl std::str::FromStr for Industry {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "advertising" => Ok(Self::Advertising),
            "sports" => Ok(Self::Sports),
            "retail" => Ok(Self::Retail),
            "hospitality" => Ok(Self::Hospitality),
            "transportation" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "education" => Ok(Self::Education),
            "corporate" => Ok(Self::Corporate),
            "government" => Ok(Self::Government),
            other => Err(CatalogError::ValidationFailed {
                field: "industry".to_string(),
                reason: format!("Unknown industry: {}", other),
            }),
        }
    }
}

/// Lifecycle status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Draft,
    Published,
    Archived,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(CatalogError::ValidationFailed {
                field: "status".to_string(),
                reason: format!("Unknown status: {}", other),
            }),
        }
    }
}

/// Geographic placement of an installation (WGS84).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
    /// City name
    pub city: String,
    /// Country name
    pub country: String,
    /// State or region, where applicable
    pub region: Option<String>,
}

/// Monetary investment with its currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub amount: f64,
    /// ISO 4217 code, e.g. "USD"
    pub currency: String,
}

/// Physical magnitude of an installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Display surface in square meters
    pub area_sqm: Option<f64>,
    /// Number of display units installed
    pub unit_count: Option<u32>,
    /// Total project investment
    pub investment: Option<Investment>,
}

/// Customer testimonial attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    /// Integer rating, 1 to 5
    pub rating: u8,
}

/// A single catalog entry: a case-study project or product showcase.
///
/// Identity (`id`, `slug`) never changes after creation. The engine treats
/// records as read-only for the duration of a query and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Unique record identifier
    pub id: String,
    /// Unique URL slug
    pub slug: String,
    /// Display category
    pub category: Category,
    /// Customer industry
    pub industry: Industry,
    /// Lifecycle status
    pub status: RecordStatus,
    /// Record title
    pub title: String,
    /// Short summary shown in list views
    pub summary: String,
    /// Long-form description
    pub description: String,
    /// Customer or owner name
    pub customer: String,
    /// Installation site
    pub location: Location,
    /// Physical and monetary magnitude
    #[serde(default)]
    pub scale: Scale,
    /// Tags, insertion order preserved for display
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered feature list
    #[serde(default)]
    pub features: Vec<String>,
    /// Free-form solution descriptions
    #[serde(default)]
    pub solutions: Vec<String>,
    /// Project video, if any
    pub video_url: Option<String>,
    /// Highlighted on the landing page
    #[serde(default)]
    pub is_featured: bool,
    /// Part of the curated showcase
    #[serde(default)]
    pub is_showcase: bool,
    /// Page view counter
    #[serde(default)]
    pub view_count: u64,
    /// Share counter
    #[serde(default)]
    pub share_count: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
    /// Publication timestamp, if published
    pub published_at: Option<DateTime<Utc>>,
    /// Project start date
    pub project_start: Option<DateTime<Utc>>,
    /// Project end date (end >= start, enforced by the data producer)
    pub project_end: Option<DateTime<Utc>>,
    /// Customer testimonials
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

impl CatalogRecord {
    /// Mean testimonial rating, 0.0 when the record has none.
    pub fn average_rating(&self) -> f64 {
        if self.testimonials.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.testimonials.iter().map(|t| u32::from(t.rating)).sum();
        f64::from(sum) / self.testimonials.len() as f64
    }

    /// Whether the record carries a project video.
    pub fn has_video(&self) -> bool {
        self.video_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Whether the record carries at least one testimonial.
    pub fn has_testimonial(&self) -> bool {
        !self.testimonials.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn record(id: &str, title: &str) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            category: Category::OutdoorAdvertising,
            industry: Industry::Advertising,
            status: RecordStatus::Published,
            title: title.to_string(),
            summary: String::new(),
            description: String::new(),
            customer: String::new(),
            location: Location {
                latitude: 0.0,
                longitude: 0.0,
                city: String::new(),
                country: String::new(),
                region: None,
            },
            scale: Scale::default(),
            tags: Vec::new(),
            features: Vec::new(),
            solutions: Vec::new(),
            video_url: None,
            is_featured: false,
            is_showcase: false,
            view_count: 0,
            share_count: 0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            published_at: None,
            project_start: None,
            project_end: None,
            testimonials: Vec::new(),
        }
    }

    pub fn record_at(id: &str, title: &str, lat: f64, lon: f64) -> CatalogRecord {
        let mut r = record(id, title);
        r.location.latitude = lat;
        r.location.longitude = lon;
        r
    }

    pub fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, n, 0, 0, 0).unwrap()
    }

    /// Small themed catalog used across module tests.
    pub fn sample_catalog() -> Vec<CatalogRecord> {
        let mut times_square = record_at("cs-001", "Times Square Billboard", 40.758, -73.9855);
        times_square.location.city = "New York".to_string();
        times_square.location.country = "United States".to_string();
        times_square.location.region = Some("NY".to_string());
        times_square.customer = "Apex Media Group".to_string();
        times_square.summary = "Curved LED billboard above Times Square".to_string();
        times_square.description =
            "A 400 square meter curved outdoor display for premium advertising".to_string();
        times_square.tags = vec!["billboard".to_string(), "outdoor".to_string()];
        times_square.features = vec!["curved-panel".to_string()];
        times_square.is_featured = true;
        times_square.view_count = 900;
        times_square.created_at = day(3);
        times_square.scale.area_sqm = Some(400.0);
        times_square.scale.investment = Some(Investment {
            amount: 1_200_000.0,
            currency: "USD".to_string(),
        });
        times_square.testimonials = vec![Testimonial {
            author: "J. Ortega".to_string(),
            quote: "Transformed our brand presence".to_string(),
            rating: 5,
        }];

        let mut beijing_mall = record_at("cs-002", "Beijing Mall Atrium", 39.9042, 116.4074);
        beijing_mall.category = Category::IndoorFixed;
        beijing_mall.industry = Industry::Retail;
        beijing_mall.location.city = "Beijing".to_string();
        beijing_mall.location.country = "China".to_string();
        beijing_mall.customer = "Golden Plaza Retail".to_string();
        beijing_mall.summary = "Atrium video wall for a shopping mall".to_string();
        beijing_mall.tags = vec!["beijing-mall".to_string(), "indoor".to_string()];
        beijing_mall.view_count = 450;
        beijing_mall.created_at = day(5);
        beijing_mall.scale.area_sqm = Some(120.0);

        let mut stadium = record_at("cs-003", "Munich Stadium Perimeter", 48.2188, 11.6247);
        stadium.category = Category::SportsVenue;
        stadium.industry = Industry::Sports;
        stadium.location.city = "Munich".to_string();
        stadium.location.country = "Germany".to_string();
        stadium.customer = "Bavaria Sports AG".to_string();
        stadium.summary = "Perimeter boards for a football stadium".to_string();
        stadium.tags = vec!["stadium".to_string(), "outdoor".to_string()];
        stadium.view_count = 720;
        stadium.created_at = day(7);
        stadium.is_showcase = true;

        vec![times_square, beijing_mall, stadium]
    }
}
