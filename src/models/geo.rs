//! Geographic primitives: coordinates, viewports and distance math

use serde::{Deserialize, Serialize};

/// Mean length of one degree of latitude in kilometers
const KM_PER_LAT_DEGREE: f64 = 110.574;
/// Length of one degree of longitude at the equator in kilometers
const KM_PER_LON_DEGREE_EQUATOR: f64 = 111.320;

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A rectangular geographic region expressed as center plus degree spans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinates,
    /// Latitude span in decimal degrees
    pub lat_span: f64,
    /// Longitude span in decimal degrees
    pub lon_span: f64,
}

/// Derived bounding box of a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Viewport {
    /// Create a viewport from a center and degree spans
    #[must_use]
    pub fn new(center: Coordinates, lat_span: f64, lon_span: f64) -> Self {
        Self {
            center,
            lat_span,
            lon_span,
        }
    }

    /// Synthesize a square viewport of `span_km` kilometers around a point
    #[must_use]
    pub fn around(center: Coordinates, span_km: f64) -> Self {
        let lat_span = span_km / KM_PER_LAT_DEGREE;
        let km_per_lon_degree = KM_PER_LON_DEGREE_EQUATOR * center.latitude.to_radians().cos();
        let lon_span = if km_per_lon_degree.abs() < f64::EPSILON {
            // Degenerate at the poles, cover every longitude
            360.0
        } else {
            (span_km / km_per_lon_degree.abs()).min(360.0)
        };

        Self {
            center,
            lat_span,
            lon_span,
        }
    }

    /// Derive the rectangular bounds of this viewport
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_lat: self.center.latitude - self.lat_span / 2.0,
            max_lat: self.center.latitude + self.lat_span / 2.0,
            min_lon: self.center.longitude - self.lon_span / 2.0,
            max_lon: self.center.longitude + self.lon_span / 2.0,
        }
    }

    /// Strict rectangular containment test on both axes independently
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.bounds().contains(point)
    }
}

impl Bounds {
    /// Whether `point` lies inside this box, boundary included
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}
