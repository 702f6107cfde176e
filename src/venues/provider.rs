//! Provider seams for place search and reverse geocoding
//!
//! Both services are injected into the aggregator, so tests can
//! substitute fakes and production can swap backends.

use async_trait::async_trait;

use crate::Result;
use crate::models::{Coordinates, Placemark, RawPlace, Viewport};

/// Free-text place search over a geographic region
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Search for places matching `query` inside `region`
    ///
    /// Errors signal network, quota or parse failures. The aggregator
    /// treats a failed query as zero results for that term.
    async fn search(&self, query: &str, region: &Viewport) -> Result<Vec<RawPlace>>;
}

/// Resolve a coordinate into address components
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve `point` to a placemark, `None` when nothing is known
    async fn resolve(&self, point: Coordinates) -> Result<Option<Placemark>>;
}
