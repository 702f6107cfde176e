//! Venue search aggregation
//!
//! Fans out one place-search query per sport term, filters the hits to
//! the viewport, classifies and normalizes them, then deduplicates,
//! ranks by distance and caps the result. Results are published
//! atomically, and a superseded search never overwrites a newer one.

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use futures::future;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::classify::{classify_sport, describe_sport};
use super::provider::{PlaceSearchProvider, ReverseGeocoder};
use super::terms::SPORT_SEARCH_TERMS;
use crate::config::SearchConfig;
use crate::models::{
    Coordinates, RawPlace, SearchState, UNKNOWN_VENUE_NAME, Venue, VenueSearchResult, Viewport,
};

/// Name published when reverse geocoding fails or returns nothing
const UNKNOWN_LOCATION_NAME: &str = "Unknown Location";

/// Scatter/gather venue search over an injected place-search provider
///
/// Every search runs the first `term_fan_out` catalog terms concurrently,
/// joins on all of them settling, and publishes one atomic snapshot.
/// Individual term failures are contained, the operation always produces
/// a result, possibly empty.
pub struct VenueAggregator<P, G> {
    provider: Arc<P>,
    geocoder: Arc<G>,
    config: SearchConfig,
    sequence: AtomicU64,
    state_tx: watch::Sender<SearchState>,
}

/// Accepted venues plus whether every term query failed
struct FanOutOutcome {
    venues: Vec<Venue>,
    all_failed: bool,
}

impl<P, G> VenueAggregator<P, G>
where
    P: PlaceSearchProvider,
    G: ReverseGeocoder,
{
    /// Create an aggregator over the given provider and geocoder
    pub fn new(provider: Arc<P>, geocoder: Arc<G>, config: SearchConfig) -> Self {
        let (state_tx, _) = watch::channel(SearchState::default());
        Self {
            provider,
            geocoder,
            config,
            sequence: AtomicU64::new(0),
            state_tx,
        }
    }

    /// Observe published search snapshots
    ///
    /// The previous snapshot stays valid while a search is in flight.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    /// Search venues inside a map viewport
    ///
    /// Hits outside the viewport bounds are discarded, ranking is by
    /// distance from the viewport center.
    pub async fn search_viewport(&self, viewport: Viewport) -> VenueSearchResult {
        self.run_search(viewport, viewport.center, true).await
    }

    /// Search venues around a point
    ///
    /// A square viewport is synthesized from the configured nearby span,
    /// and every provider hit is accepted. Ranking is by distance from
    /// `point`.
    pub async fn search_near(&self, point: Coordinates) -> VenueSearchResult {
        let viewport = Viewport::around(point, self.config.nearby_span_km);
        self.run_search(viewport, point, false).await
    }

    /// Search venues in the configured home city
    pub async fn search_home_city(&self) -> VenueSearchResult {
        let center = Coordinates::new(self.config.home_latitude, self.config.home_longitude);
        let viewport = Viewport::around(center, self.config.home_span_km);
        self.search_viewport(viewport).await
    }

    async fn run_search(
        &self,
        viewport: Viewport,
        origin: Coordinates,
        bounded: bool,
    ) -> VenueSearchResult {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "Searching venues around ({:.4}, {:.4}) with span ({:.4}, {:.4})",
            origin.latitude, origin.longitude, viewport.lat_span, viewport.lon_span
        );

        // Previous venues stay visible while this search is in flight
        self.state_tx.send_modify(|state| {
            state.in_progress = true;
            state.last_error = None;
        });

        // The location-name branch runs independently of the venue fan-out
        let (outcome, location_name) = tokio::join!(
            self.collect_candidates(&viewport, bounded),
            self.resolve_location_name(origin),
        );

        let venues = finalize(
            outcome.venues,
            origin,
            self.config.dedup_epsilon_deg,
            self.config.max_venues,
        );
        info!("Found {} unique sport venues", venues.len());

        let result = VenueSearchResult {
            venues,
            location_name,
            generated_at: Utc::now(),
        };
        self.publish(sequence, &result, outcome.all_failed);
        result
    }

    /// Fan out one provider query per term and join on all of them
    ///
    /// Queries run concurrently and settle independently, the join is a
    /// barrier over every branch.
    async fn collect_candidates(&self, viewport: &Viewport, bounded: bool) -> FanOutOutcome {
        let term_count = self.config.term_fan_out.min(SPORT_SEARCH_TERMS.len());
        let queries = SPORT_SEARCH_TERMS[..term_count]
            .iter()
            .map(|&term| async move { (term, self.provider.search(term, viewport).await) });
        let settled = future::join_all(queries).await;

        let mut venues = Vec::new();
        let mut failures = 0usize;
        for (term, outcome) in settled {
            match outcome {
                Ok(places) => {
                    debug!("'{term}' returned {} places", places.len());
                    venues.extend(
                        places
                            .iter()
                            .filter_map(|place| accept_place(place, viewport, term, bounded)),
                    );
                }
                Err(e) => {
                    warn!("Search failed for '{term}': {e}");
                    failures += 1;
                }
            }
        }

        FanOutOutcome {
            venues,
            all_failed: term_count > 0 && failures == term_count,
        }
    }

    async fn resolve_location_name(&self, point: Coordinates) -> String {
        match self.geocoder.resolve(point).await {
            Ok(Some(placemark)) => {
                let name = placemark.display_name();
                debug!("Search location: {name}");
                name
            }
            Ok(None) => UNKNOWN_LOCATION_NAME.to_string(),
            Err(e) => {
                warn!("Reverse geocoding failed: {e}");
                UNKNOWN_LOCATION_NAME.to_string()
            }
        }
    }

    /// Publish one atomic snapshot unless a newer search has been issued
    fn publish(&self, sequence: u64, result: &VenueSearchResult, all_failed: bool) {
        self.state_tx.send_if_modified(|state| {
            if self.sequence.load(Ordering::SeqCst) != sequence {
                debug!("Discarding superseded search result (sequence {sequence})");
                return false;
            }

            state.venues = result.venues.clone();
            state.location_name = result.location_name.clone();
            state.in_progress = false;
            state.last_error = all_failed.then(|| "All venue searches failed".to_string());
            state.sequence = sequence;
            true
        });
    }
}

/// Convert an accepted provider hit into a venue
///
/// Returns `None` for places without a coordinate and, when `bounded`,
/// for places outside the viewport.
fn accept_place(
    place: &RawPlace,
    viewport: &Viewport,
    term: &str,
    bounded: bool,
) -> Option<Venue> {
    let coordinate = place.coordinate?;
    if bounded && !viewport.contains(&coordinate) {
        return None;
    }

    let raw_name = place.name.as_deref().unwrap_or("");
    let sport = classify_sport(raw_name, term);
    let name = if raw_name.is_empty() {
        UNKNOWN_VENUE_NAME.to_string()
    } else {
        raw_name.to_string()
    };
    let id = place
        .id
        .clone()
        .unwrap_or_else(|| derive_id(&name, &coordinate));

    Some(Venue {
        id,
        name,
        sport: sport.to_string(),
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
        address: place.format_address(),
        description: describe_sport(sport),
    })
}

fn derive_id(name: &str, coordinate: &Coordinates) -> String {
    format!(
        "{}_{:.4}_{:.4}",
        name.to_lowercase().replace(' ', "_"),
        coordinate.latitude,
        coordinate.longitude
    )
}

/// First-wins duplicate removal
///
/// Two venues count as the same place when their lower-cased names are
/// equal, or their coordinates differ by less than `epsilon_deg` on both
/// axes. Quadratic scan, candidate volume is bounded by the fan-out.
#[must_use]
pub fn dedup_venues(venues: Vec<Venue>, epsilon_deg: f64) -> Vec<Venue> {
    let mut unique: Vec<Venue> = Vec::with_capacity(venues.len());

    for venue in venues {
        let is_duplicate = unique.iter().any(|kept| {
            kept.name.to_lowercase() == venue.name.to_lowercase()
                || ((kept.latitude - venue.latitude).abs() < epsilon_deg
                    && (kept.longitude - venue.longitude).abs() < epsilon_deg)
        });

        if !is_duplicate {
            unique.push(venue);
        }
    }

    unique
}

/// Dedup, rank ascending by distance from `origin` and cap the list
fn finalize(candidates: Vec<Venue>, origin: Coordinates, epsilon_deg: f64, cap: usize) -> Vec<Venue> {
    let mut venues = dedup_venues(candidates, epsilon_deg);

    venues.sort_by(|a, b| {
        origin
            .distance_km(&a.coordinate())
            .partial_cmp(&origin.distance_km(&b.coordinate()))
            .unwrap_or(CmpOrdering::Equal)
    });
    venues.truncate(cap);
    venues
}
