//! Track log storage and parsing module
//!
//! This module provides the `TrackLog` struct, which owns parsed GPX data and walks its
//! track points (tracks → segments → points) for the distance reduction.

use crate::reduction::{shortest_and_longest_par, shortest_and_longest_with_radius};
use crate::{Config, DistanceError, DistanceRange, GeoPoint, Result};
use std::path::Path;

/// A parsed GPX file with precomputed counts
#[derive(Clone, Debug)]
pub struct TrackLog {
    /// The original GPX data
    gpx_data: gpx::Gpx,
    /// Cached total number of track points
    cached_total_points: usize,
    /// Cached total number of track segments
    cached_total_segments: usize,
}

impl TrackLog {
    /// Wrap already parsed GPX data
    ///
    /// A document without track points is valid; its distance range is `None`.
    pub fn new(gpx_data: gpx::Gpx) -> Self {
        let (total_segments, total_points) = gpx_data
            .tracks
            .iter()
            .flat_map(|track| &track.segments)
            .fold((0, 0), |(segments, points), segment| {
                (segments + 1, points + segment.points.len())
            });

        Self {
            gpx_data,
            cached_total_points: total_points,
            cached_total_segments: total_segments,
        }
    }

    /// Parse a GPX document held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let gpx_data = gpx::read(bytes)?;
        let track_log = Self::new(gpx_data);
        tracing::debug!(
            tracks = track_log.track_count(),
            segments = track_log.segment_count(),
            points = track_log.total_points(),
            "Parsed GPX data"
        );
        Ok(track_log)
    }

    /// Read a GPX file fully into memory, then parse it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DistanceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes)
    }

    /// Access the raw GPX data
    #[inline]
    pub fn gpx_data(&self) -> &gpx::Gpx {
        &self.gpx_data
    }

    /// Number of tracks in the document
    #[inline]
    pub fn track_count(&self) -> usize {
        self.gpx_data.tracks.len()
    }

    /// Number of segments across all tracks
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.cached_total_segments
    }

    /// Number of points across all tracks and segments
    #[inline]
    pub fn total_points(&self) -> usize {
        self.cached_total_points
    }

    /// Iterate over every track point in document order
    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.gpx_data
            .tracks
            .iter()
            .flat_map(|track| &track.segments)
            .flat_map(|segment| &segment.points)
            .map(GeoPoint::from)
    }

    /// Shortest and longest distance from `reference` to any track point
    ///
    /// Large logs are reduced in parallel; the result is the same either way.
    pub fn distance_range(&self, reference: GeoPoint, config: &Config) -> Option<DistanceRange> {
        if self.total_points() >= config.parallel_min_points {
            tracing::trace!("Parallel reduction over {} points", self.total_points());
            let points: Vec<GeoPoint> = self.points().collect();
            shortest_and_longest_par(reference, &points, config.earth_radius_m)
        } else {
            tracing::trace!("Sequential reduction over {} points", self.total_points());
            shortest_and_longest_with_radius(reference, self.points(), config.earth_radius_m)
        }
    }
}
