//! Outbound call providers
//!
//! Each vendor client places a call to a normalized number and points the
//! vendor back at this service (or a hosted script) for call control.

pub mod dispatcher;
pub mod twilio;
pub mod vonage;

use async_trait::async_trait;

use crate::domain::{CallReceipt, PhoneNumber, ProviderKind};
use crate::errors::{Result, VoiceError};

pub use dispatcher::CallDispatcher;
pub use twilio::TwilioProvider;
pub use vonage::VonageProvider;

/// A telephony vendor able to start an outbound call
#[async_trait]
pub trait CallProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Request a call to `to`; the vendor dials asynchronously
    async fn create_call(&self, to: &PhoneNumber) -> Result<CallReceipt>;
}

/// Turn a non-success provider response into a [`VoiceError::ProviderError`]
pub(crate) async fn ensure_success(
    kind: ProviderKind,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(VoiceError::ProviderError {
        provider: kind.to_string(),
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(VoiceError::from)
}
