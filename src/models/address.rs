//! Address and coordinate types for the outreach flow.

use serde::{Deserialize, Serialize};

/// A parsed North Carolina street address.
///
/// Produced by naive comma-splitting of free-text input; this is not a
/// robust postal parser and the zip field carries whatever the last token
/// of the third segment was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// Parse a free-text address by comma-splitting.
    ///
    /// The first segment is the street, the second the city, and the last
    /// whitespace token of the third segment (when present) the zip. The
    /// state is always "NC". Returns `None` when fewer than two
    /// comma-separated segments are present.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return None;
        }

        let zip = parts
            .get(2)
            .and_then(|seg| seg.split_whitespace().last())
            .unwrap_or("")
            .to_string();

        Some(Self {
            street: parts[0].to_string(),
            city: parts[1].to_string(),
            state: "NC".to_string(),
            zip,
        })
    }

    /// Render a single query line for geocoding.
    pub fn to_query(&self) -> String {
        if self.zip.is_empty() {
            format!("{}, {}, {}", self.street, self.city, self.state)
        } else {
            format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
        }
    }
}

/// A latitude/longitude pair from the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_address() {
        let addr = Address::parse("123 Main St, Charlotte, NC 28202").unwrap();
        assert_eq!(addr.street, "123 Main St");
        assert_eq!(addr.city, "Charlotte");
        assert_eq!(addr.state, "NC");
        assert_eq!(addr.zip, "28202");
    }

    #[test]
    fn test_parse_requires_two_segments() {
        assert!(Address::parse("123 Main St").is_none());
        assert!(Address::parse("").is_none());
        assert!(Address::parse("123 Main St,").is_none());
    }

    #[test]
    fn test_parse_without_zip_segment() {
        let addr = Address::parse("45 Oak Ave, Durham").unwrap();
        assert_eq!(addr.city, "Durham");
        assert_eq!(addr.zip, "");
    }

    #[test]
    fn test_parse_zip_is_last_token_of_third_segment() {
        // Naive by design: whatever trails the third segment is the zip.
        let addr = Address::parse("45 Oak Ave, Durham, NC").unwrap();
        assert_eq!(addr.zip, "NC");
    }

    #[test]
    fn test_to_query_includes_zip_when_present() {
        let addr = Address::parse("123 Main St, Charlotte, NC 28202").unwrap();
        assert_eq!(addr.to_query(), "123 Main St, Charlotte, NC 28202");

        let addr = Address::parse("45 Oak Ave, Durham").unwrap();
        assert_eq!(addr.to_query(), "45 Oak Ave, Durham, NC");
    }
}
