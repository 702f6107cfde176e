//! `SportSpot` - Local sports venue discovery and aggregation
//!
//! This library provides the core functionality for viewport-based venue
//! search: concurrent place-search fan-out, sport classification,
//! deduplication and distance ranking.

pub mod config;
pub mod error;
pub mod models;
pub mod venues;

// Re-export core types for public API
pub use config::{LoggingConfig, ProviderConfig, SearchConfig, SportSpotConfig, init_logging};
pub use error::SportSpotError;
pub use models::{
    Coordinates, Placemark, RawPlace, SearchState, Venue, VenueSearchResult, Viewport,
};
pub use venues::{
    NominatimClient, PlaceSearchProvider, ReverseGeocoder, SPORT_SEARCH_TERMS, VenueAggregator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SportSpotError>;
