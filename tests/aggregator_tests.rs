//! Integration tests for the venue aggregation pipeline
//!
//! The aggregator is driven end-to-end against fake provider and
//! geocoder implementations injected through its constructor.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sportspot::venues::dedup_venues;
use sportspot::{
    Coordinates, PlaceSearchProvider, Placemark, RawPlace, ReverseGeocoder, SearchConfig,
    SportSpotError, Venue, VenueAggregator, Viewport,
};

/// Provider serving scripted per-term results
#[derive(Default)]
struct FakeProvider {
    places: HashMap<&'static str, Vec<RawPlace>>,
    failing: HashSet<&'static str>,
}

#[async_trait]
impl PlaceSearchProvider for FakeProvider {
    async fn search(&self, query: &str, _region: &Viewport) -> sportspot::Result<Vec<RawPlace>> {
        if self.failing.contains(query) {
            return Err(SportSpotError::provider(format!("'{query}' unavailable")));
        }
        Ok(self.places.get(query).cloned().unwrap_or_default())
    }
}

/// Provider echoing one venue named after the queried region center,
/// sleeping for the currently configured delay first
struct RegionEchoProvider {
    delay_ms: AtomicU64,
}

#[async_trait]
impl PlaceSearchProvider for RegionEchoProvider {
    async fn search(&self, _query: &str, region: &Viewport) -> sportspot::Result<Vec<RawPlace>> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(vec![RawPlace {
            name: Some(format!("Venue {:.1}", region.center.latitude)),
            coordinate: Some(region.center),
            ..RawPlace::default()
        }])
    }
}

struct FakeGeocoder {
    placemark: Option<Placemark>,
    fail: bool,
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn resolve(&self, _point: Coordinates) -> sportspot::Result<Option<Placemark>> {
        if self.fail {
            return Err(SportSpotError::geocode("reverse geocoding offline"));
        }
        Ok(self.placemark.clone())
    }
}

fn belgrade_geocoder() -> Arc<FakeGeocoder> {
    Arc::new(FakeGeocoder {
        placemark: Some(Placemark {
            sub_locality: None,
            locality: Some("Belgrade".to_string()),
            country: Some("Serbia".to_string()),
        }),
        fail: false,
    })
}

fn raw_place(name: &str, latitude: f64, longitude: f64) -> RawPlace {
    RawPlace {
        name: Some(name.to_string()),
        coordinate: Some(Coordinates::new(latitude, longitude)),
        ..RawPlace::default()
    }
}

fn belgrade_viewport() -> Viewport {
    Viewport::new(Coordinates::new(44.8, 20.4), 0.4, 0.4)
}

fn assert_sorted_by_distance(venues: &[Venue], origin: Coordinates) {
    let distances: Vec<f64> = venues
        .iter()
        .map(|venue| origin.distance_km(&venue.coordinate()))
        .collect();
    assert!(
        distances.windows(2).all(|pair| pair[0] <= pair[1]),
        "venues are not sorted by distance: {distances:?}"
    );
}

#[tokio::test]
async fn viewport_search_discards_out_of_bounds_places() {
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([(
            "gym",
            vec![
                raw_place("Inner Gym", 44.82, 20.42),
                raw_place("Edge Gym", 44.79, 20.38),
                raw_place("Outer Gym", 45.50, 20.42),
                RawPlace {
                    name: Some("Nowhere Gym".to_string()),
                    ..RawPlace::default()
                },
            ],
        )]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let viewport = belgrade_viewport();
    let result = aggregator.search_viewport(viewport).await;

    assert_eq!(result.venues.len(), 2);
    let bounds = viewport.bounds();
    for venue in &result.venues {
        assert!(venue.latitude >= bounds.min_lat && venue.latitude <= bounds.max_lat);
        assert!(venue.longitude >= bounds.min_lon && venue.longitude <= bounds.max_lon);
    }
    assert!(!result.venues.iter().any(|v| v.name == "Outer Gym"));
}

#[tokio::test]
async fn result_is_capped_at_fifty_and_sorted() {
    let crowded: Vec<RawPlace> = (0..60)
        .map(|i| {
            raw_place(
                &format!("Gym {i}"),
                44.8 + f64::from(i) * 0.002,
                20.4,
            )
        })
        .collect();
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([("gym", crowded)]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let viewport = belgrade_viewport();
    let result = aggregator.search_viewport(viewport).await;

    assert_eq!(result.venues.len(), 50);
    assert_sorted_by_distance(&result.venues, viewport.center);
    assert_eq!(result.venues[0].name, "Gym 0");
}

#[tokio::test]
async fn partial_failures_do_not_abort_other_terms() {
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([
            (
                "gym",
                vec![
                    raw_place("Gym One", 44.81, 20.41),
                    raw_place("Gym Two", 44.83, 20.43),
                ],
            ),
            ("fitness center", vec![raw_place("Fit Hub", 44.85, 20.45)]),
            ("tennis court", vec![raw_place("Court Club", 44.87, 20.39)]),
        ]),
        failing: HashSet::from([
            "sports club",
            "basketball court",
            "football field",
            "soccer field",
            "swimming pool",
        ]),
    });
    let aggregator = Arc::new(VenueAggregator::new(
        provider,
        belgrade_geocoder(),
        SearchConfig::default(),
    ));

    let result = aggregator.search_viewport(belgrade_viewport()).await;

    assert_eq!(result.venues.len(), 4);
    let state = aggregator.subscribe().borrow().clone();
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn duplicates_collapse_to_first_encountered() {
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([(
            "gym",
            vec![
                raw_place("City Gym", 44.81, 20.41),
                raw_place("city gym", 44.85, 20.45),
                raw_place("Different Name", 44.8103, 20.4105),
                raw_place("Standalone", 44.87, 20.47),
            ],
        )]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let result = aggregator.search_viewport(belgrade_viewport()).await;

    let names: Vec<&str> = result.venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(result.venues.len(), 2);
    assert!(names.contains(&"City Gym"));
    assert!(names.contains(&"Standalone"));
}

#[tokio::test]
async fn dedup_is_idempotent_on_its_own_output() {
    let venues: Vec<Venue> = vec![
        raw_place("City Gym", 44.81, 20.41),
        raw_place("CITY GYM", 44.85, 20.45),
        raw_place("Across The Street", 44.8104, 20.4102),
        raw_place("Standalone", 44.87, 20.47),
    ]
    .iter()
    .map(|place| Venue {
        id: place.name.clone().unwrap_or_default(),
        name: place.name.clone().unwrap_or_default(),
        sport: "sports".to_string(),
        latitude: place.coordinate.unwrap().latitude,
        longitude: place.coordinate.unwrap().longitude,
        address: String::new(),
        description: String::new(),
    })
    .collect();

    let once = dedup_venues(venues, 0.001);
    let twice = dedup_venues(once.clone(), 0.001);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn classification_flows_through_the_pipeline() {
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([
            ("tennis court", vec![raw_place("Central Tennis Club", 44.81, 20.41)]),
            ("gym", vec![raw_place("Widget Co", 44.83, 20.43)]),
        ]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let result = aggregator.search_viewport(belgrade_viewport()).await;

    let tennis = result
        .venues
        .iter()
        .find(|v| v.name == "Central Tennis Club")
        .unwrap();
    assert_eq!(tennis.sport, "tennis");
    assert_eq!(
        tennis.description,
        "Tennis facility with courts available for play"
    );

    let widget = result.venues.iter().find(|v| v.name == "Widget Co").unwrap();
    assert_eq!(widget.sport, "gym");
}

#[tokio::test]
async fn empty_provider_yields_empty_result_without_error() {
    let provider = Arc::new(FakeProvider::default());
    let aggregator = Arc::new(VenueAggregator::new(
        provider,
        belgrade_geocoder(),
        SearchConfig::default(),
    ));

    let result = aggregator.search_viewport(belgrade_viewport()).await;

    assert!(result.venues.is_empty());
    assert_eq!(result.location_name, "Belgrade, Serbia");
    let state = aggregator.subscribe().borrow().clone();
    assert!(state.last_error.is_none());
    assert!(!state.in_progress);
}

#[tokio::test]
async fn total_provider_unavailability_surfaces_last_error() {
    let provider = Arc::new(FakeProvider {
        failing: HashSet::from([
            "gym",
            "fitness center",
            "sports club",
            "tennis court",
            "basketball court",
            "football field",
            "soccer field",
            "swimming pool",
        ]),
        ..FakeProvider::default()
    });
    let aggregator = Arc::new(VenueAggregator::new(
        provider,
        belgrade_geocoder(),
        SearchConfig::default(),
    ));

    let result = aggregator.search_viewport(belgrade_viewport()).await;

    assert!(result.venues.is_empty());
    assert_eq!(result.location_name, "Belgrade, Serbia");
    let state = aggregator.subscribe().borrow().clone();
    assert!(state.last_error.is_some());
}

#[tokio::test]
async fn geocoder_failure_defaults_location_name() {
    let provider = Arc::new(FakeProvider::default());
    let geocoder = Arc::new(FakeGeocoder {
        placemark: None,
        fail: true,
    });
    let aggregator = VenueAggregator::new(provider, geocoder, SearchConfig::default());

    let result = aggregator.search_viewport(belgrade_viewport()).await;
    assert_eq!(result.location_name, "Unknown Location");
}

#[tokio::test]
async fn missing_placemark_defaults_location_name() {
    let provider = Arc::new(FakeProvider::default());
    let geocoder = Arc::new(FakeGeocoder {
        placemark: None,
        fail: false,
    });
    let aggregator = VenueAggregator::new(provider, geocoder, SearchConfig::default());

    let result = aggregator.search_viewport(belgrade_viewport()).await;
    assert_eq!(result.location_name, "Unknown Location");
}

#[tokio::test]
async fn empty_placemark_resolves_to_current_location() {
    let provider = Arc::new(FakeProvider::default());
    let geocoder = Arc::new(FakeGeocoder {
        placemark: Some(Placemark::default()),
        fail: false,
    });
    let aggregator = VenueAggregator::new(provider, geocoder, SearchConfig::default());

    let result = aggregator.search_viewport(belgrade_viewport()).await;
    assert_eq!(result.location_name, "Current Location");
}

#[tokio::test]
async fn point_search_accepts_every_provider_hit() {
    let point = Coordinates::new(44.8, 20.4);
    // Both hits are far outside the synthesized 10 km viewport
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([(
            "gym",
            vec![
                raw_place("Distant Gym", 45.8, 20.4),
                raw_place("Closer Gym", 45.0, 20.4),
            ],
        )]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let result = aggregator.search_near(point).await;

    assert_eq!(result.venues.len(), 2);
    assert_eq!(result.venues[0].name, "Closer Gym");
    assert_sorted_by_distance(&result.venues, point);
}

#[tokio::test]
async fn home_city_search_uses_configured_center() {
    let provider = Arc::new(FakeProvider {
        places: HashMap::from([(
            "gym",
            vec![
                raw_place("Downtown Gym", 44.7870, 20.4500),
                raw_place("Far Away Gym", 46.0, 20.45),
            ],
        )]),
        ..FakeProvider::default()
    });
    let aggregator = VenueAggregator::new(provider, belgrade_geocoder(), SearchConfig::default());

    let result = aggregator.search_home_city().await;

    // The 20 km home viewport keeps the downtown hit and drops the remote one
    assert_eq!(result.venues.len(), 1);
    assert_eq!(result.venues[0].name, "Downtown Gym");
}

#[tokio::test]
async fn stale_search_does_not_overwrite_newer_result() {
    let provider = Arc::new(RegionEchoProvider {
        delay_ms: AtomicU64::new(300),
    });
    let aggregator = Arc::new(VenueAggregator::new(
        Arc::clone(&provider),
        belgrade_geocoder(),
        SearchConfig::default(),
    ));

    let slow = tokio::spawn({
        let aggregator = Arc::clone(&aggregator);
        async move {
            aggregator
                .search_viewport(Viewport::new(Coordinates::new(40.0, 20.0), 0.4, 0.4))
                .await
        }
    });

    // Let the slow search start, then issue a fast superseding one
    tokio::time::sleep(Duration::from_millis(100)).await;
    provider.delay_ms.store(0, Ordering::SeqCst);
    let newer = aggregator
        .search_viewport(Viewport::new(Coordinates::new(50.0, 20.0), 0.4, 0.4))
        .await;
    assert_eq!(newer.venues[0].name, "Venue 50.0");

    // The superseded search still returns its own result to the caller
    let older = slow.await.unwrap();
    assert_eq!(older.venues[0].name, "Venue 40.0");

    // But the published snapshot belongs to the newer search
    let state = aggregator.subscribe().borrow().clone();
    assert_eq!(state.venues[0].name, "Venue 50.0");
    assert_eq!(state.sequence, 2);
    assert!(!state.in_progress);
}

#[tokio::test]
async fn previous_snapshot_is_retained_while_search_is_in_flight() {
    let provider = Arc::new(RegionEchoProvider {
        delay_ms: AtomicU64::new(0),
    });
    let aggregator = Arc::new(VenueAggregator::new(
        Arc::clone(&provider),
        belgrade_geocoder(),
        SearchConfig::default(),
    ));

    aggregator
        .search_viewport(Viewport::new(Coordinates::new(44.8, 20.4), 0.4, 0.4))
        .await;
    let receiver = aggregator.subscribe();
    assert_eq!(receiver.borrow().venues[0].name, "Venue 44.8");

    provider.delay_ms.store(300, Ordering::SeqCst);
    let pending = tokio::spawn({
        let aggregator = Arc::clone(&aggregator);
        async move {
            aggregator
                .search_viewport(Viewport::new(Coordinates::new(45.9, 20.4), 0.4, 0.4))
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    let in_flight = receiver.borrow().clone();
    assert!(in_flight.in_progress);
    assert_eq!(in_flight.venues[0].name, "Venue 44.8");

    pending.await.unwrap();
    let settled = receiver.borrow().clone();
    assert!(!settled.in_progress);
    assert_eq!(settled.venues[0].name, "Venue 45.9");
}
