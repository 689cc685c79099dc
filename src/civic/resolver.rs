//! District and legislator backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Chamber, ContactChannels, Coordinates, District, DistrictKind, Legislator, Party,
    SocialHandles, StairPosition,
};

/// Errors from civic data backends.
#[derive(Debug, Error)]
pub enum CivicError {
    #[error("district lookup failed: {0}")]
    District(String),

    #[error("legislator lookup failed: {0}")]
    Directory(String),
}

/// Maps a coordinate to the legislative districts containing it.
#[async_trait]
pub trait DistrictResolver: Send + Sync {
    async fn resolve(&self, location: &Coordinates) -> Result<Vec<District>, CivicError>;
}

/// Looks up the legislators serving a set of districts.
#[async_trait]
pub trait LegislatorDirectory: Send + Sync {
    async fn for_districts(&self, districts: &[District]) -> Result<Vec<Legislator>, CivicError>;
}

/// Placeholder resolver: every coordinate maps to the same state house and
/// senate pair. Stands in until a real boundary lookup is wired up.
pub struct StaticDistrictResolver;

#[async_trait]
impl DistrictResolver for StaticDistrictResolver {
    async fn resolve(&self, _location: &Coordinates) -> Result<Vec<District>, CivicError> {
        Ok(vec![
            District::new("nc-house-31", "NC House District 31", DistrictKind::StateHouse),
            District::new("nc-senate-22", "NC Senate District 22", DistrictKind::StateSenate),
        ])
    }
}

/// Placeholder directory: fabricates one representative or senator per
/// district. Contact details use reserved example domains and numbers.
pub struct StaticLegislatorDirectory;

impl StaticLegislatorDirectory {
    fn representative_for(district: &District) -> Legislator {
        Legislator {
            id: format!("{}-rep", district.id),
            name: "Rep. Alex Whitfield".to_string(),
            title: "State Representative".to_string(),
            party: Party::Democrat,
            district_id: district.id.clone(),
            chamber: Chamber::House,
            contact: ContactChannels {
                email: Some("alex.whitfield@example.org".to_string()),
                phone: Some("919-555-0131".to_string()),
                office_phone: Some("919-555-0130".to_string()),
                website: Some("https://example.org/representatives/alex-whitfield".to_string()),
                mailing_address: Some("16 W Jones St, Raleigh, NC 27601".to_string()),
            },
            committees: vec!["Housing".to_string(), "Local Government".to_string()],
            priority: 1,
            position: StairPosition::Support,
            social: Some(SocialHandles {
                twitter: Some("@RepWhitfieldNC".to_string()),
                facebook: None,
                instagram: None,
            }),
        }
    }

    fn senator_for(district: &District) -> Legislator {
        Legislator {
            id: format!("{}-sen", district.id),
            name: "Sen. Jamie Calloway".to_string(),
            title: "State Senator".to_string(),
            party: Party::Republican,
            district_id: district.id.clone(),
            chamber: Chamber::Senate,
            contact: ContactChannels {
                email: Some("jamie.calloway@example.org".to_string()),
                phone: None,
                office_phone: Some("919-555-0122".to_string()),
                website: None,
                mailing_address: Some("16 W Jones St, Raleigh, NC 27601".to_string()),
            },
            committees: vec![
                "Commerce and Insurance".to_string(),
                "Transportation".to_string(),
            ],
            priority: 2,
            position: StairPosition::Undecided,
            social: None,
        }
    }
}

#[async_trait]
impl LegislatorDirectory for StaticLegislatorDirectory {
    async fn for_districts(&self, districts: &[District]) -> Result<Vec<Legislator>, CivicError> {
        let legislators = districts
            .iter()
            .filter_map(|district| match district.kind {
                DistrictKind::StateHouse => Some(Self::representative_for(district)),
                DistrictKind::StateSenate => Some(Self::senator_for(district)),
                _ => None,
            })
            .collect();
        Ok(legislators)
    }
}
