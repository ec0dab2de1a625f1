//! Geographic point type shared by the distance function and the reduction

/// A position in decimal degrees
///
/// Coordinates are not validated on construction; see [`GeoPoint::is_in_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if both coordinates lie within the WGS84 degree ranges
    #[inline]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// `geo` points store longitude as x and latitude as y
impl From<geo::Point<f64>> for GeoPoint {
    #[inline]
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<&gpx::Waypoint> for GeoPoint {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        waypoint.point().into()
    }
}
