//! Address-to-representative lookup flow.

use thiserror::Error;
use tracing::{debug, warn};

use super::resolver::{DistrictResolver, LegislatorDirectory};
use crate::geocode::Geocoder;
use crate::models::{Address, Coordinates, District, Legislator};

/// Errors surfaced to the person entering an address.
///
/// The display strings for the first two variants are shown verbatim in the
/// CLI, so they stay in plain language.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid address format")]
    InvalidAddress,

    #[error("Could not geocode address")]
    GeocodeFailed,

    #[error("lookup failed: {0}")]
    Internal(String),
}

/// Everything resolved for one address.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub address: Address,
    pub coordinates: Coordinates,
    pub districts: Vec<District>,
    pub legislators: Vec<Legislator>,
}

/// Chains parse, geocode, district resolution, and the legislator
/// directory. Each stage's failure maps to one [`LookupError`] variant;
/// nothing past this boundary panics on user input.
pub struct RepresentativeLookup<'a> {
    geocoder: &'a dyn Geocoder,
    districts: &'a dyn DistrictResolver,
    directory: &'a dyn LegislatorDirectory,
}

impl<'a> RepresentativeLookup<'a> {
    pub fn new(
        geocoder: &'a dyn Geocoder,
        districts: &'a dyn DistrictResolver,
        directory: &'a dyn LegislatorDirectory,
    ) -> Self {
        Self {
            geocoder,
            districts,
            directory,
        }
    }

    pub async fn lookup(&self, text: &str) -> Result<LookupResult, LookupError> {
        let address = Address::parse(text).ok_or(LookupError::InvalidAddress)?;
        debug!(city = %address.city, "address parsed");

        let coordinates = match self.geocoder.geocode(&address).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => return Err(LookupError::GeocodeFailed),
            Err(e) => {
                warn!(error = %e, "geocoding failed");
                return Err(LookupError::GeocodeFailed);
            }
        };

        let districts = self
            .districts
            .resolve(&coordinates)
            .await
            .map_err(|e| LookupError::Internal(e.to_string()))?;
        let legislators = self
            .directory
            .for_districts(&districts)
            .await
            .map_err(|e| LookupError::Internal(e.to_string()))?;

        Ok(LookupResult {
            address,
            coordinates,
            districts,
            legislators,
        })
    }
}
