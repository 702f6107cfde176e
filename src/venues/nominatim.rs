//! OpenStreetMap Nominatim place-search and reverse-geocoding client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::provider::{PlaceSearchProvider, ReverseGeocoder};
use crate::Result;
use crate::config::ProviderConfig;
use crate::error::SportSpotError;
use crate::models::{Coordinates, Placemark, RawPlace, Viewport};

/// Nominatim API client
///
/// Implements both provider seams against the public OSM endpoints.
/// Nominatim's usage policy requires an identifying user agent, which is
/// taken from the provider configuration.
pub struct NominatimClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

/// Single place from the Nominatim search endpoint
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: Option<u64>,
    lat: Option<String>,
    lon: Option<String>,
    name: Option<String>,
    display_name: Option<String>,
    category: Option<String>,
    #[serde(rename = "type")]
    place_type: Option<String>,
    address: Option<NominatimAddress>,
}

/// Address details shared by the search and reverse endpoints
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    house_number: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    suburb: Option<String>,
    country: Option<String>,
}

/// Response from the Nominatim reverse endpoint
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
    /// Set instead of a result when the point cannot be geocoded
    error: Option<String>,
}

impl NominatimClient {
    /// Create a new client from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| SportSpotError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl PlaceSearchProvider for NominatimClient {
    async fn search(&self, query: &str, region: &Viewport) -> Result<Vec<RawPlace>> {
        let bounds = region.bounds();
        let url = format!(
            "{}/search?q={}&format=jsonv2&addressdetails=1&limit={}&viewbox={},{},{},{}&bounded=1",
            self.base_url,
            urlencoding::encode(query),
            self.page_size,
            bounds.min_lon,
            bounds.min_lat,
            bounds.max_lon,
            bounds.max_lat,
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SportSpotError::provider(format!("Place search request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match status.as_u16() {
                429 => SportSpotError::provider("Place search rate limit exceeded"),
                _ => SportSpotError::provider(format!("Place search returned {status}")),
            });
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            SportSpotError::provider(format!("Failed to parse place search response: {e}"))
        })?;

        debug!("Nominatim returned {} places for '{}'", places.len(), query);
        Ok(places
            .into_iter()
            .map(NominatimPlace::into_raw_place)
            .collect())
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn resolve(&self, point: Coordinates) -> Result<Option<Placemark>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&addressdetails=1",
            self.base_url, point.latitude, point.longitude,
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SportSpotError::geocode(format!("Reverse geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SportSpotError::geocode(format!(
                "Reverse geocoding returned {}",
                response.status()
            )));
        }

        let reverse: NominatimReverse = response.json().await.map_err(|e| {
            SportSpotError::geocode(format!("Failed to parse reverse geocoding response: {e}"))
        })?;

        if reverse.error.is_some() {
            return Ok(None);
        }

        Ok(reverse.address.map(NominatimAddress::into_placemark))
    }
}

impl NominatimPlace {
    /// Convert into the provider-independent place representation
    fn into_raw_place(self) -> RawPlace {
        let coordinate = match (
            self.lat.as_deref().and_then(|v| v.parse::<f64>().ok()),
            self.lon.as_deref().and_then(|v| v.parse::<f64>().ok()),
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };

        // Prefer the place name, fall back to the first display-name segment
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|display| display.split(',').next())
                    .map(|segment| segment.trim().to_string())
                    .filter(|segment| !segment.is_empty())
            });

        let address = self.address.unwrap_or_default();

        RawPlace {
            id: self.place_id.map(|id| format!("osm_{id}")),
            name,
            coordinate,
            category: self.place_type.or(self.category),
            street: address.road,
            street_number: address.house_number,
            locality: address.city.or(address.town).or(address.village),
            country: address.country,
        }
    }
}

impl NominatimAddress {
    fn into_placemark(self) -> Placemark {
        Placemark {
            sub_locality: self.suburb,
            locality: self.city.or(self.town).or(self.village),
            country: self.country,
        }
    }
}
