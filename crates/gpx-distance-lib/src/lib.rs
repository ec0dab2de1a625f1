//! GPX Distance Library - Shortest and longest distance to a track log
//!
//! This library measures how close and how far the points of a GPX track log get from a
//! single reference point. Distances are great-circle distances on a sphere, rounded to
//! whole meters.
//!
//! # Architecture
//!
//! - **[`GeoPoint`]**: A latitude/longitude pair in decimal degrees
//! - **[`haversine`]**: The distance function between two points
//! - **[`TrackLog`]**: Parsed GPX data (tracks, segments, points) with cached counts
//! - **[`DistanceRange`]**: The reduction of all point distances to (shortest, longest)
//!
//! # Performance Characteristics
//!
//! - **Load Time**: O(N) to parse and count the track points
//! - **Reduction**: O(N), parallelized with rayon above [`Config::parallel_min_points`]
//! - **Memory**: O(N) for the parsed document

pub mod haversine;
mod point;
mod reduction;
mod track_log;

// Public API exports
pub use point::GeoPoint;
pub use reduction::{DistanceRange, shortest_and_longest, shortest_and_longest_par};
pub use track_log::TrackLog;

/// Configuration for the distance reduction
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sphere radius used for every distance, in meters.
    /// Default: [`haversine::EARTH_RADIUS_M`]
    pub earth_radius_m: f64,
    /// Number of track points at which the reduction switches to rayon.
    /// Smaller inputs are scanned sequentially in document order.
    pub parallel_min_points: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            earth_radius_m: haversine::EARTH_RADIUS_M,
            parallel_min_points: 100_000,
        }
    }
}

/// Error types for loading track logs
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    #[error("failed to read GPX file {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),
}

pub type Result<T> = std::result::Result<T, DistanceError>;
