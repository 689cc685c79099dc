//! Contact-action records for the engagement log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel an outreach action was sent over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Email,
    Letter,
    Phone,
    Social,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Letter => "letter",
            Self::Phone => "phone",
            Self::Social => "social",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "letter" => Some(Self::Letter),
            "phone" => Some(Self::Phone),
            "social" => Some(Self::Social),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Pending,
    Sent,
    Failed,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// A contact action as it exists before being recorded.
///
/// The log assigns `id` and `created_at` when the action is appended.
#[derive(Debug, Clone)]
pub struct NewContactAction {
    pub user_name: String,
    pub user_email: Option<String>,
    pub legislator_id: String,
    pub legislator_name: String,
    pub method: ContactMethod,
    pub template_id: Option<String>,
    pub template_title: Option<String>,
    /// Final message text as dispatched, tokens substituted.
    pub message: String,
    pub status: ContactStatus,
    pub notes: Option<String>,
    /// Reserved for response annotation; nothing sets this yet.
    pub response: Option<String>,
}

/// A recorded outreach action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAction {
    pub id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub legislator_id: String,
    pub legislator_name: String,
    pub method: ContactMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_title: Option<String>,
    /// Final message text as dispatched, tokens substituted.
    #[serde(default)]
    pub message: String,
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reserved for response annotation; nothing sets this yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewContactAction {
    /// Promote to a recorded action with an assigned id and timestamp.
    pub fn into_action(self, id: String, created_at: DateTime<Utc>) -> ContactAction {
        ContactAction {
            id,
            user_name: self.user_name,
            user_email: self.user_email,
            legislator_id: self.legislator_id,
            legislator_name: self.legislator_name,
            method: self.method,
            template_id: self.template_id,
            template_title: self.template_title,
            message: self.message,
            status: self.status,
            notes: self.notes,
            response: self.response,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_roundtrip() {
        for method in [
            ContactMethod::Email,
            ContactMethod::Letter,
            ContactMethod::Phone,
            ContactMethod::Social,
        ] {
            assert_eq!(ContactMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(ContactMethod::parse("pigeon"), None);
    }

    #[test]
    fn test_action_serde_omits_empty_optionals() {
        let action = NewContactAction {
            user_name: "Pat Doe".into(),
            user_email: None,
            legislator_id: "nc-house-31".into(),
            legislator_name: "Rep. Example".into(),
            method: ContactMethod::Phone,
            template_id: None,
            template_title: None,
            message: "Hello, my name is Pat Doe.".into(),
            status: ContactStatus::Sent,
            notes: None,
            response: None,
        }
        .into_action("a-1".into(), Utc::now());

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"method\":\"phone\""));
        assert!(json.contains("\"status\":\"sent\""));
        assert!(json.contains("\"user_name\":\"Pat Doe\""));
        assert!(json.contains("\"message\""));
        assert!(!json.contains("user_email"));
        assert!(!json.contains("template_id"));
        assert!(!json.contains("template_title"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("response"));
    }

    #[test]
    fn test_action_deserialize_without_optionals() {
        let json = r#"{
            "id": "a-2",
            "user_name": "Pat Doe",
            "legislator_id": "nc-senate-22",
            "legislator_name": "Sen. Example",
            "method": "email",
            "message": "Dear Sen. Example",
            "status": "sent",
            "created_at": "2025-06-01T12:00:00Z"
        }"#;
        let action: ContactAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.method, ContactMethod::Email);
        assert!(action.user_email.is_none());
        assert!(action.template_id.is_none());
        assert!(action.notes.is_none());
        assert!(action.response.is_none());
    }

    #[test]
    fn test_into_action_carries_user_and_message() {
        let action = NewContactAction {
            user_name: "Pat Doe".into(),
            user_email: Some("pat@example.net".into()),
            legislator_id: "nc-house-31".into(),
            legislator_name: "Rep. Example".into(),
            method: ContactMethod::Email,
            template_id: Some("formal-email".into()),
            template_title: Some("Formal email".into()),
            message: "Dear Rep. Example, please support the bill.".into(),
            status: ContactStatus::Sent,
            notes: None,
            response: None,
        }
        .into_action("a-3".into(), Utc::now());

        assert_eq!(action.user_name, "Pat Doe");
        assert_eq!(action.user_email.as_deref(), Some("pat@example.net"));
        assert_eq!(action.template_title.as_deref(), Some("Formal email"));
        assert!(action.message.contains("support the bill"));
    }
}
