//! Elected-official records with contact channels and advocacy stance.

use serde::{Deserialize, Serialize};

/// Party affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    #[serde(rename = "D")]
    Democrat,
    #[serde(rename = "R")]
    Republican,
    #[serde(rename = "I")]
    Independent,
    Other,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Democrat => "D",
            Self::Republican => "R",
            Self::Independent => "I",
            Self::Other => "Other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Democrat => "Democrat",
            Self::Republican => "Republican",
            Self::Independent => "Independent",
            Self::Other => "Other",
        }
    }
}

/// Legislative chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
        }
    }
}

/// Stated position on single-stair reform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairPosition {
    StrongSupport,
    Support,
    Undecided,
    Oppose,
    StrongOppose,
}

impl StairPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongSupport => "strong_support",
            Self::Support => "support",
            Self::Undecided => "undecided",
            Self::Oppose => "oppose",
            Self::StrongOppose => "strong_oppose",
        }
    }
}

/// Ways to reach a legislator's office. All channels are optional; dispatch
/// validates the channel needed for a given method before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<String>,
}

impl ContactChannels {
    /// Best phone number for the call flow, preferring the direct line.
    pub fn any_phone(&self) -> Option<&str> {
        self.phone.as_deref().or(self.office_phone.as_deref())
    }
}

/// Social media handles, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialHandles {
    pub fn is_empty(&self) -> bool {
        self.twitter.is_none() && self.facebook.is_none() && self.instagram.is_none()
    }
}

/// An elected official a constituent can contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
    pub id: String,
    pub name: String,
    /// Office title, e.g. "State Representative".
    pub title: String,
    pub party: Party,
    pub district_id: String,
    pub chamber: Chamber,
    #[serde(default)]
    pub contact: ContactChannels,
    #[serde(default)]
    pub committees: Vec<String>,
    /// Advocacy priority, 1 (lowest) through 5 (highest).
    pub priority: u8,
    pub position: StairPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialHandles>,
}
