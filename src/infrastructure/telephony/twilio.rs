use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{ensure_success, http_client, CallProvider};
use crate::config::TwilioSettings;
use crate::domain::{CallReceipt, PhoneNumber, ProviderKind};
use crate::errors::Result;

/// Twilio Programmable Voice client
#[derive(Clone)]
pub struct TwilioProvider {
    settings: TwilioSettings,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct CreateCallResponse {
    sid: Option<String>,
    status: Option<String>,
}

impl TwilioProvider {
    pub fn new(settings: TwilioSettings) -> Result<Self> {
        let http = http_client(settings.timeout)?;
        Ok(Self { settings, http })
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.settings.api_base, self.settings.account_sid
        )
    }
}

#[async_trait]
impl CallProvider for TwilioProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Twilio
    }

    async fn create_call(&self, to: &PhoneNumber) -> Result<CallReceipt> {
        let form = [
            ("To", to.as_str()),
            ("From", self.settings.from_number.as_str()),
            ("Url", self.settings.webhook_url.as_str()),
            ("Method", "POST"),
        ];

        let response = self
            .http
            .post(self.calls_url())
            .basic_auth(&self.settings.account_sid, Some(&self.settings.auth_token))
            .form(&form)
            .send()
            .await?;

        let body: CreateCallResponse = ensure_success(self.kind(), response).await?.json().await?;
        info!(
            call_sid = body.sid.as_deref().unwrap_or("-"),
            status = body.status.as_deref().unwrap_or("-"),
            "twilio call created"
        );

        Ok(CallReceipt {
            provider: ProviderKind::Twilio,
            call_id: body.sid,
        })
    }
}
