//! # Geo Clustering Module
//!
//! ## Purpose
//! Groups geographically close records into clusters for map rendering at a
//! given zoom level. Records with no nearby neighbor stay as singletons.
//!
//! ## Input/Output Specification
//! - **Input**: Record collection, map zoom level
//! - **Output**: Clusters (centroid, member count, members) plus singletons;
//!   every input record lands in exactly one of the two
//! - **Algorithm**: Greedy single pass in input order. Clusters are not
//!   merged afterwards even if two results are mutually close, so membership
//!   is order-sensitive. Acceptable for map display, where the grouping is
//!   advisory.

use crate::geo::haversine_km;
use crate::CatalogRecord;
use serde::Serialize;

/// A synthetic map point aggregating nearby records
#[derive(Debug, Clone, Serialize)]
pub struct GeoCluster<'a> {
    /// Centroid latitude (arithmetic mean of members)
    pub latitude: f64,
    /// Centroid longitude (arithmetic mean of members)
    pub longitude: f64,
    /// Number of member records
    pub count: usize,
    /// The aggregated records
    pub members: Vec<&'a CatalogRecord>,
}

/// Clusters plus the records that stayed alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterOutcome<'a> {
    pub clusters: Vec<GeoCluster<'a>>,
    pub singles: Vec<&'a CatalogRecord>,
}

/// Aggregation radius for a map zoom level, in kilometers.
///
/// Lower zoom (more zoomed out) yields a larger radius; the floor is 1 km.
pub fn radius_for_zoom(zoom: u8) -> f64 {
    (20.0 - f64::from(zoom)).max(1.0)
}

/// Greedy single-pass grouping in input order.
pub fn cluster<'a>(records: &[&'a CatalogRecord], zoom: u8) -> ClusterOutcome<'a> {
    let radius_km = radius_for_zoom(zoom);
    let mut processed = vec![false; records.len()];
    let mut outcome = ClusterOutcome::default();

    for i in 0..records.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;
        let seed = records[i];

        // All other unprocessed records within the radius join the seed
        let mut members = vec![seed];
        for j in (i + 1)..records.len() {
            if processed[j] {
                continue;
            }
            let candidate = records[j];
            let d = haversine_km(
                seed.location.latitude,
                seed.location.longitude,
                candidate.location.latitude,
                candidate.location.longitude,
            );
            if d <= radius_km {
                processed[j] = true;
                members.push(candidate);
            }
        }

        if members.len() == 1 {
            outcome.singles.push(seed);
        } else {
            let count = members.len();
            let lat_sum: f64 = members.iter().map(|r| r.location.latitude).sum();
            let lon_sum: f64 = members.iter().map(|r| r.location.longitude).sum();
            outcome.clusters.push(GeoCluster {
                latitude: lat_sum / count as f64,
                longitude: lon_sum / count as f64,
                count,
                members,
            });
        }
    }

    outcome
}
