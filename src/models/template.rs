//! Message template types for constituent outreach.
//!
//! Templates are immutable and defined in code (`outreach::templates`);
//! bodies and subjects carry bracket tokens that are substituted at send
//! time.

use serde::{Deserialize, Serialize};

/// Delivery channel a template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Email,
    Letter,
    PhoneScript,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Letter => "letter",
            Self::PhoneScript => "phone_script",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "letter" => Some(Self::Letter),
            "phone_script" | "phone" => Some(Self::PhoneScript),
            _ => None,
        }
    }
}

/// Register the template is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateTone {
    Formal,
    Personal,
    Urgent,
}

impl TemplateTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Personal => "personal",
            Self::Urgent => "urgent",
        }
    }
}

/// A reusable outreach message with substitution tokens.
///
/// Recognized tokens: `[USER_NAME]`, `[REPRESENTATIVE_NAME]`, `[DISTRICT]`,
/// `[CITY]`, `[CITY_COUNTY]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub body: String,
    pub category: TemplateCategory,
    pub tone: TemplateTone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for cat in [
            TemplateCategory::Email,
            TemplateCategory::Letter,
            TemplateCategory::PhoneScript,
        ] {
            assert_eq!(TemplateCategory::parse(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn test_category_parse_accepts_phone_shorthand() {
        assert_eq!(TemplateCategory::parse("phone"), Some(TemplateCategory::PhoneScript));
        assert_eq!(TemplateCategory::parse("fax"), None);
    }

    #[test]
    fn test_category_wire_form() {
        let json = serde_json::to_string(&TemplateCategory::PhoneScript).unwrap();
        assert_eq!(json, "\"phone_script\"");
    }
}
