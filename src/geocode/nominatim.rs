//! Nominatim-backed geocoder.
//!
//! Uses the public search endpoint with `format=jsonv2`. The usage policy
//! wants a descriptive User-Agent and modest request rates; callers get the
//! UA from settings and the suggestion layer debounces.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{AddressCandidate, GeocodeError, Geocoder};
use crate::models::{Address, Coordinates};

/// Results outside this state are dropped.
const STATE_FILTER: &str = "North Carolina";

#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    address: PlaceAddress,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
}

impl PlaceAddress {
    fn city_like(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }
}

fn place_to_candidate(place: Place) -> Result<AddressCandidate, GeocodeError> {
    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::Decode(format!("bad latitude: {}", place.lat)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::Decode(format!("bad longitude: {}", place.lon)))?;

    Ok(AddressCandidate {
        display_name: place.display_name,
        coordinates: Coordinates {
            latitude,
            longitude,
        },
        city: place.address.city_like(),
        house_number: place.address.house_number,
        road: place.address.road,
        state: place.address.state,
        postcode: place.address.postcode,
    })
}

/// Keep only candidates resolved to North Carolina. A candidate without a
/// state component cannot be confirmed in-state and is dropped too.
fn filter_state(candidates: Vec<AddressCandidate>) -> Vec<AddressCandidate> {
    candidates
        .into_iter()
        .filter(|c| c.state.as_deref() == Some(STATE_FILTER))
        .collect()
}

/// Client for a Nominatim-compatible search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn raw_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError> {
        debug!(query, limit, "geocoder search");
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("countrycodes", "us"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Decode(e.to_string()))?;
        let candidates = places
            .into_iter()
            .map(place_to_candidate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(filter_state(candidates))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &Address) -> Result<Option<Coordinates>, GeocodeError> {
        let candidates = self.raw_search(&address.to_query(), 1).await?;
        Ok(candidates.first().map(|c| c.coordinates))
    }

    async fn search(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, GeocodeError> {
        self.raw_search(text, limit).await
    }
}
