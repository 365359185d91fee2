//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the discovery engine, supporting TOML files
//! and environment variable overrides with validation and type-safe access.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Range checks with detailed error messages
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (highest priority)
//! 2. Configuration files
//! 3. Default values (lowest priority)
//!
//! ## Usage
//! ```rust,no_run
//! use catalog_discovery::config::EngineConfig;
//!
//! # fn main() -> catalog_discovery::Result<()> {
//! // Load from default locations
//! let config = EngineConfig::load()?;
//!
//! // Load from specific file
//! let config = EngineConfig::from_file("custom.toml")?;
//!
//! println!("Default page size: {}", config.pagination.default_limit);
//! # Ok(())
//! # }
//! ```

use crate::errors::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure containing all engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Relevance ranking behavior
    pub search: SearchConfig,
    /// Pagination defaults and caps
    pub pagination: PaginationConfig,
    /// Map clustering radius bounds
    pub cluster: ClusterConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Relevance ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Relevance floor, matches scoring below it are dropped
    pub min_score: f64,
    /// Per-field scoring weights
    pub weights: FieldWeights,
    /// Default number of autocomplete suggestions
    pub suggestion_limit: usize,
}

/// Per-field scoring weights used by the ranking pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub summary: f64,
    pub customer: f64,
    pub description: f64,
    pub tags: f64,
    pub features: f64,
    pub solutions: f64,
}

impl FieldWeights {
    /// Sum of all field weights, the normalization denominator for scores.
    pub fn total(&self) -> f64 {
        self.title
            + self.summary
            + self.customer
            + self.description
            + self.tags
            + self.features
            + self.solutions
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller does not specify one
    pub default_limit: usize,
    /// Upper bound on caller-supplied page sizes
    pub max_limit: usize,
}

/// Map clustering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Aggregation radius at zoom level 0, in kilometers
    pub base_radius_km: f64,
    /// Radius floor at high zoom levels, in kilometers
    pub min_radius_km: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl EngineConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("catalog-discovery.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: EngineConfig =
            toml::from_str(&content).map_err(|e| CatalogError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?;

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("CATALOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(min_score) = std::env::var("CATALOG_MIN_SCORE") {
            self.search.min_score = min_score.parse().map_err(|_| CatalogError::Config {
                message: "Invalid value in CATALOG_MIN_SCORE".to_string(),
            })?;
        }
        if let Ok(limit) = std::env::var("CATALOG_PAGE_LIMIT") {
            self.pagination.default_limit = limit.parse().map_err(|_| CatalogError::Config {
                message: "Invalid value in CATALOG_PAGE_LIMIT".to_string(),
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.min_score) {
            return Err(CatalogError::ValidationFailed {
                field: "search.min_score".to_string(),
                reason: "Relevance floor must be between 0 and 1".to_string(),
            });
        }

        if self.search.weights.total() <= 0.0 {
            return Err(CatalogError::ValidationFailed {
                field: "search.weights".to_string(),
                reason: "Field weights must sum to a positive value".to_string(),
            });
        }

        if self.pagination.default_limit == 0 {
            return Err(CatalogError::ValidationFailed {
                field: "pagination.default_limit".to_string(),
                reason: "Default page size must be at least 1".to_string(),
            });
        }

        if self.pagination.max_limit < self.pagination.default_limit {
            return Err(CatalogError::ValidationFailed {
                field: "pagination.max_limit".to_string(),
                reason: "Maximum page size cannot be below the default".to_string(),
            });
        }

        if self.cluster.min_radius_km <= 0.0
            || self.cluster.base_radius_km < self.cluster.min_radius_km
        {
            return Err(CatalogError::ValidationFailed {
                field: "cluster.base_radius_km".to_string(),
                reason: "Cluster radius bounds must be positive and ordered".to_string(),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CatalogError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            pagination: PaginationConfig::default(),
            cluster: ClusterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: 0.1,
            weights: FieldWeights::default(),
            suggestion_limit: 8,
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            summary: 2.0,
            customer: 2.0,
            description: 1.5,
            tags: 1.5,
            features: 1.5,
            solutions: 1.0,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 12,
            max_limit: 100,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            base_radius_km: 20.0,
            min_radius_km: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}
