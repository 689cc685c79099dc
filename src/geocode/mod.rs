//! Address geocoding via a public geocoding API.

mod nominatim;
mod suggest;

pub use nominatim::NominatimGeocoder;
pub use suggest::{
    DebouncedSuggester, Suggester, Suggestion, DEBOUNCE_MS, MAX_SUGGESTIONS, MIN_QUERY_LEN,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Address, Coordinates};

/// Errors from geocoding requests.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder returned HTTP {0}")]
    Status(u16),

    #[error("unexpected geocoder response: {0}")]
    Decode(String),
}

/// One match for a free-text address search.
#[derive(Debug, Clone)]
pub struct AddressCandidate {
    pub display_name: String,
    pub coordinates: Coordinates,
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

/// Resolves addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode a parsed address. `None` means the geocoder found nothing.
    async fn geocode(&self, address: &Address) -> Result<Option<Coordinates>, GeocodeError>;

    /// Search free text for candidate addresses.
    async fn search(&self, text: &str, limit: usize)
        -> Result<Vec<AddressCandidate>, GeocodeError>;
}
