//! Core data models for venue search

pub mod geo;
pub mod venue;

pub use geo::{Bounds, Coordinates, Viewport};
pub use venue::{
    Placemark, RawPlace, SearchState, UNKNOWN_VENUE_NAME, Venue, VenueSearchResult,
};
