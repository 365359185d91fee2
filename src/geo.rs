//! # Geographic Math Module
//!
//! ## Purpose
//! Great-circle distance, bounding-box computation, and radius queries over
//! record locations. Pure functions with no internal state.
//!
//! ## Input/Output Specification
//! - **Input**: Coordinates in degrees (WGS84), record collections
//! - **Output**: Distances in kilometers, bounding boxes, filtered subsets
//! - **Validation**: Caller-supplied coordinates outside [-90, 90] /
//!   [-180, 180] are rejected, never clamped

use crate::errors::{CatalogError, Result};
use crate::CatalogRecord;
use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimal axis-aligned box containing a set of locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    /// Box midpoint as (latitude, longitude)
    pub center: (f64, f64),
}

/// Check a coordinate pair against the valid degree ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CatalogError::ValidationFailed {
            field: "latitude".to_string(),
            reason: format!("Latitude must be within [-90, 90], got {}", latitude),
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CatalogError::ValidationFailed {
            field: "longitude".to_string(),
            reason: format!("Longitude must be within [-180, 180], got {}", longitude),
        });
    }
    Ok(())
}

/// Great-circle (haversine) distance between two points, in kilometers.
///
/// Inputs are degrees and are validated against the coordinate ranges.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    validate_coordinates(lat1, lon1)?;
    validate_coordinates(lat2, lon2)?;
    Ok(haversine_km(lat1, lon1, lat2, lon2))
}

/// Haversine distance for coordinates already known to be in range.
pub(crate) fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Minimal bounding box around all record locations.
///
/// An empty collection yields the degenerate full-earth box with center
/// (0, 0).
pub fn bounding_box(records: &[&CatalogRecord]) -> BoundingBox {
    if records.is_empty() {
        return BoundingBox {
            north: 90.0,
            south: -90.0,
            east: 180.0,
            west: -180.0,
            center: (0.0, 0.0),
        };
    }

    let mut north = f64::MIN;
    let mut south = f64::MAX;
    let mut east = f64::MIN;
    let mut west = f64::MAX;

    for record in records {
        let loc = &record.location;
        north = north.max(loc.latitude);
        south = south.min(loc.latitude);
        east = east.max(loc.longitude);
        west = west.min(loc.longitude);
    }

    BoundingBox {
        north,
        south,
        east,
        west,
        center: ((north + south) / 2.0, (east + west) / 2.0),
    }
}

/// Records within `radius_km` of the center, boundary inclusive.
pub fn within_radius<'a>(
    records: &[&'a CatalogRecord],
    center_lat: f64,
    center_lon: f64,
    radius_km: f64,
) -> Result<Vec<&'a CatalogRecord>> {
    validate_coordinates(center_lat, center_lon)?;

    Ok(records
        .iter()
        .filter(|r| {
            haversine_km(
                center_lat,
                center_lon,
                r.location.latitude,
                r.location.longitude,
            ) <= radius_km
        })
        .copied()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record_at;
    use proptest::prelude::*;

    #[test]
    fn test_distance_known_pair() {
        // New York to London, roughly 5570 km
        let d = distance_km(40.7128, -74.0060, 51.5074, -0.1278).unwrap();
        assert!((d - 5570.0).abs() < 20.0, "got {}", d);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let d = distance_km(48.1351, 11.5820, 48.1351, 11.5820).unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_distance_rejects_out_of_range() {
        assert!(distance_km(91.0, 0.0, 0.0, 0.0).is_err());
        assert!(distance_km(0.0, -181.0, 0.0, 0.0).is_err());
        assert!(distance_km(0.0, 0.0, -90.5, 0.0).is_err());
    }

    #[test]
    fn test_triangle_sanity() {
        // New York, London, Paris
        let ab = distance_km(40.7128, -74.0060, 51.5074, -0.1278).unwrap();
        let bc = distance_km(51.5074, -0.1278, 48.8566, 2.3522).unwrap();
        let ac = distance_km(40.7128, -74.0060, 48.8566, 2.3522).unwrap();
        assert!(ac <= ab + bc + 1e-6);
    }

    #[test]
    fn test_bounding_box_empty_is_full_earth() {
        let bbox = bounding_box(&[]);
        assert_eq!(bbox.north, 90.0);
        assert_eq!(bbox.south, -90.0);
        assert_eq!(bbox.east, 180.0);
        assert_eq!(bbox.west, -180.0);
        assert_eq!(bbox.center, (0.0, 0.0));
    }

    #[test]
    fn test_bounding_box_covers_all_points() {
        let a = record_at("a", "A", 40.0, -74.0);
        let b = record_at("b", "B", 48.0, 11.0);
        let c = record_at("c", "C", 35.0, 139.0);
        let records = vec![&a, &b, &c];

        let bbox = bounding_box(&records);
        assert_eq!(bbox.north, 48.0);
        assert_eq!(bbox.south, 35.0);
        assert_eq!(bbox.east, 139.0);
        assert_eq!(bbox.west, -74.0);
        for r in &records {
            assert!(r.location.latitude <= bbox.north && r.location.latitude >= bbox.south);
        }
    }

    #[test]
    fn test_within_radius_inclusive_boundary() {
        let center = record_at("center", "Center", 0.0, 0.0);
        let near = record_at("near", "Near", 0.01, 0.0);
        let far = record_at("far", "Far", 5.0, 5.0);
        let records = vec![&center, &near, &far];

        // ~1.11 km between center and near
        let d = distance_km(0.0, 0.0, 0.01, 0.0).unwrap();
        let hits = within_radius(&records, 0.0, 0.0, d).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|r| r.id == "near"));
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let ab = distance_km(lat1, lon1, lat2, lon2).unwrap();
            let ba = distance_km(lat2, lon2, lat1, lon1).unwrap();
            prop_assert!((ab - ba).abs() < 1e-9);
            prop_assert!(ab >= 0.0);
        }
    }
}
