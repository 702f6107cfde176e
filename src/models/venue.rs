//! Venue, place and search-result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Display name used when the provider does not supply one
pub const UNKNOWN_VENUE_NAME: &str = "Unknown Venue";

/// A single raw result from a place-search provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlace {
    /// Provider-assigned identifier, if any
    pub id: Option<String>,
    pub name: Option<String>,
    pub coordinate: Option<Coordinates>,
    /// Provider category hint (e.g. "fitness_centre")
    pub category: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
}

impl RawPlace {
    /// Join available address components with ", "
    ///
    /// The street number is dropped without a street, the street line is
    /// dropped entirely when no street is known.
    #[must_use]
    pub fn format_address(&self) -> String {
        let mut components: Vec<String> = Vec::new();

        match (&self.street, &self.street_number) {
            (Some(street), Some(number)) => components.push(format!("{street} {number}")),
            (Some(street), None) => components.push(street.clone()),
            _ => {}
        }

        if let Some(city) = &self.locality {
            components.push(city.clone());
        }

        if let Some(country) = &self.country {
            components.push(country.clone());
        }

        components.join(", ")
    }
}

/// Address components resolved by reverse geocoding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    pub sub_locality: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
}

impl Placemark {
    /// Human-readable location name built from the available components
    ///
    /// Yields "Current Location" when every component is absent or empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        let components: Vec<&str> = [&self.sub_locality, &self.locality, &self.country]
            .into_iter()
            .filter_map(|component| component.as_deref())
            .filter(|component| !component.is_empty())
            .collect();

        if components.is_empty() {
            "Current Location".to_string()
        } else {
            components.join(", ")
        }
    }
}

/// A normalized sports venue
///
/// Value object, immutable after construction. Venues live only for the
/// lifetime of the search result that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub sport: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub description: String,
}

impl Venue {
    /// The venue's coordinate
    #[must_use]
    pub fn coordinate(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Emoji icon for the venue's sport category
    #[must_use]
    pub fn sport_icon(&self) -> &'static str {
        match self.sport.to_lowercase().as_str() {
            "soccer" | "football" => "⚽",
            "basketball" => "🏀",
            "tennis" => "🎾",
            "baseball" => "⚾",
            "american football" => "🏈",
            "volleyball" => "🏐",
            "swimming" => "🏊",
            "running" | "track" => "🏃",
            "cycling" => "🚴",
            "boxing" => "🥊",
            "martial arts" => "🥋",
            "golf" => "⛳",
            "ice hockey" => "🏒",
            "skiing" => "⛷️",
            "snowboarding" => "🏂",
            "surfing" => "🏄",
            "skateboarding" => "🛹",
            "wrestling" => "🤼",
            "weightlifting" | "gym" => "🏋️",
            "gymnastics" => "🤸",
            _ => "🏟️",
        }
    }

    /// Static Belgrade venues a presentation layer can show before the
    /// first search completes
    #[must_use]
    pub fn fallback_venues() -> Vec<Venue> {
        fn venue(
            id: &str,
            name: &str,
            sport: &str,
            latitude: f64,
            longitude: f64,
            address: &str,
            description: &str,
        ) -> Venue {
            Venue {
                id: id.to_string(),
                name: name.to_string(),
                sport: sport.to_string(),
                latitude,
                longitude,
                address: address.to_string(),
                description: description.to_string(),
            }
        }

        vec![
            venue(
                "fallback_rajko_mitic_stadium",
                "Rajko Mitić Stadium",
                "soccer",
                44.7831,
                20.4668,
                "Ljutice Bogdana 1a, Belgrade",
                "Home stadium of Red Star Belgrade football club",
            ),
            venue(
                "fallback_partizan_stadium",
                "Partizan Stadium",
                "soccer",
                44.7890,
                20.4612,
                "Humska 1, Belgrade",
                "Home stadium of Partizan Belgrade football club",
            ),
            venue(
                "fallback_aleksandar_nikolic_hall",
                "Aleksandar Nikolić Hall",
                "basketball",
                44.8125,
                20.4656,
                "Čika Ljubina 8, Belgrade",
                "Premier basketball arena in Belgrade",
            ),
            venue(
                "fallback_tasmajdan_sports_center",
                "Tašmajdan Sports Center",
                "tennis",
                44.8067,
                20.4719,
                "Tašmajdan Park, Belgrade",
                "Public tennis courts in Tašmajdan Park",
            ),
            venue(
                "fallback_kalemegdan_park_fields",
                "Kalemegdan Park Fields",
                "soccer",
                44.8225,
                20.4487,
                "Kalemegdan Park, Belgrade",
                "Beautiful football fields in historic Kalemegdan Park",
            ),
            venue(
                "fallback_ada_ciganlija_beach",
                "Ada Ciganlija Beach",
                "volleyball",
                44.7908,
                20.4064,
                "Ada Ciganlija, Belgrade",
                "Beach volleyball courts on Belgrade's river island",
            ),
            venue(
                "fallback_kosutnjak_park_courts",
                "Košutnjak Park Courts",
                "basketball",
                44.7677,
                20.4391,
                "Košutnjak Park, Belgrade",
                "Outdoor basketball courts in Košutnjak forest",
            ),
            venue(
                "fallback_sava_river_running_track",
                "Sava River Running Track",
                "running",
                44.8169,
                20.4131,
                "Sava River Embankment, Belgrade",
                "Scenic running track along the Sava River",
            ),
            venue(
                "fallback_pinki_sports_complex",
                "Pinki Sports Complex",
                "swimming",
                44.7439,
                20.3775,
                "Pinki, Belgrade",
                "Modern swimming pool complex",
            ),
            venue(
                "fallback_vozdovac_gym",
                "Voždovac Gym",
                "gym",
                44.7774,
                20.4874,
                "Voždovac, Belgrade",
                "Popular fitness center with weightlifting facilities",
            ),
        ]
    }
}

/// Ordered venue list produced by one search invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSearchResult {
    /// Venues sorted ascending by distance from the search origin
    pub venues: Vec<Venue>,
    /// Human-readable name for the search center
    pub location_name: String,
    /// When this result was assembled
    pub generated_at: DateTime<Utc>,
}

/// Consumer-facing snapshot published after each search
///
/// The previous snapshot's venues stay visible while a search is in
/// flight, consumers never observe a partially assembled list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchState {
    pub venues: Vec<Venue>,
    pub location_name: String,
    pub in_progress: bool,
    pub last_error: Option<String>,
    /// Sequence number of the search that produced this snapshot
    pub sequence: u64,
}
