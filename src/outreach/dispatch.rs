//! Simulated message dispatch.
//!
//! No channel actually transmits anything. Each operation validates that
//! the legislator has the needed contact channel and that the sender
//! supplied the required fields, waits a configurable simulated latency,
//! and returns a receipt. A real delivery integration would slot in behind
//! the same trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::templates::FormattedMessage;
use crate::models::{ContactMethod, Legislator};

/// Default simulated latency in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 400;

/// Errors from dispatch validation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no {0} channel available for this legislator")]
    MissingChannel(ContactMethod),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// The person sending the message.
#[derive(Debug, Clone)]
pub struct Sender {
    pub name: String,
    pub email: Option<String>,
}

/// Proof that a dispatch completed.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub tracking_id: String,
    pub method: ContactMethod,
    pub simulated: bool,
    pub completed_at: DateTime<Utc>,
}

/// Sends a formatted message over one of the contact channels.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send_email(
        &self,
        legislator: &Legislator,
        sender: &Sender,
        message: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError>;

    async fn send_letter(
        &self,
        legislator: &Legislator,
        sender: &Sender,
        message: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError>;

    async fn call(
        &self,
        legislator: &Legislator,
        script: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError>;

    async fn post_social(
        &self,
        legislator: &Legislator,
        message: &str,
    ) -> Result<DispatchReceipt, DispatchError>;
}

/// Stand-in dispatcher that validates and waits but never transmits.
pub struct SimulatedDispatcher {
    latency: Duration,
}

impl Default for SimulatedDispatcher {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

impl SimulatedDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the simulated latency. Tests use zero.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn complete(&self, method: ContactMethod) -> DispatchReceipt {
        tokio::time::sleep(self.latency).await;
        DispatchReceipt {
            tracking_id: Uuid::new_v4().to_string(),
            method,
            simulated: true,
            completed_at: Utc::now(),
        }
    }
}

#[async_trait]
impl Dispatcher for SimulatedDispatcher {
    async fn send_email(
        &self,
        legislator: &Legislator,
        sender: &Sender,
        message: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let to = legislator
            .contact
            .email
            .as_deref()
            .ok_or(DispatchError::MissingChannel(ContactMethod::Email))?;
        if sender.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            return Err(DispatchError::MissingField("sender email"));
        }

        info!(to, subject = %message.subject, "simulated email");
        Ok(self.complete(ContactMethod::Email).await)
    }

    async fn send_letter(
        &self,
        legislator: &Legislator,
        sender: &Sender,
        message: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let to = legislator
            .contact
            .mailing_address
            .as_deref()
            .ok_or(DispatchError::MissingChannel(ContactMethod::Letter))?;
        if sender.name.trim().is_empty() {
            return Err(DispatchError::MissingField("sender name"));
        }

        info!(to, subject = %message.subject, "simulated letter");
        Ok(self.complete(ContactMethod::Letter).await)
    }

    async fn call(
        &self,
        legislator: &Legislator,
        script: &FormattedMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let number = legislator
            .contact
            .any_phone()
            .ok_or(DispatchError::MissingChannel(ContactMethod::Phone))?;

        info!(number, script = %script.subject, "simulated phone call");
        Ok(self.complete(ContactMethod::Phone).await)
    }

    async fn post_social(
        &self,
        legislator: &Legislator,
        message: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        let has_handle = legislator.social.as_ref().is_some_and(|s| !s.is_empty());
        if !has_handle {
            return Err(DispatchError::MissingChannel(ContactMethod::Social));
        }

        info!(legislator = %legislator.name, chars = message.len(), "simulated social post");
        Ok(self.complete(ContactMethod::Social).await)
    }
}
