//! Legislative district types.

use serde::{Deserialize, Serialize};

/// Kind of legislative geographic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictKind {
    StateHouse,
    StateSenate,
    UsHouse,
    Local,
}

impl DistrictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateHouse => "state_house",
            Self::StateSenate => "state_senate",
            Self::UsHouse => "us_house",
            Self::Local => "local",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "state_house" => Some(Self::StateHouse),
            "state_senate" => Some(Self::StateSenate),
            "us_house" => Some(Self::UsHouse),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// A legislative district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub kind: DistrictKind,
}

impl District {
    pub fn new(id: &str, name: &str, kind: DistrictKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_str_roundtrip() {
        for kind in [
            DistrictKind::StateHouse,
            DistrictKind::StateSenate,
            DistrictKind::UsHouse,
            DistrictKind::Local,
        ] {
            assert_eq!(DistrictKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DistrictKind::parse("county"), None);
    }

    #[test]
    fn test_kind_serde_wire_form() {
        let json = serde_json::to_string(&DistrictKind::StateSenate).unwrap();
        assert_eq!(json, "\"state_senate\"");
    }
}
