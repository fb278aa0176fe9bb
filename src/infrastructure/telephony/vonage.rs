use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{ensure_success, http_client, CallProvider};
use crate::config::VonageSettings;
use crate::domain::{CallReceipt, PhoneNumber, ProviderKind};
use crate::errors::Result;
use crate::infrastructure::auth::VonageTokenSigner;

/// Vonage Voice API client
#[derive(Clone)]
pub struct VonageProvider {
    settings: VonageSettings,
    signer: VonageTokenSigner,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct CreateCallResponse {
    uuid: Option<String>,
    status: Option<String>,
}

impl VonageProvider {
    /// Build a client, loading the private key from `settings.private_key_path`
    pub fn new(settings: VonageSettings) -> Result<Self> {
        let signer = VonageTokenSigner::from_file(
            settings.application_id.clone(),
            &settings.private_key_path,
        )?;
        Self::with_signer(settings, signer)
    }

    pub fn with_signer(settings: VonageSettings, signer: VonageTokenSigner) -> Result<Self> {
        let http = http_client(settings.timeout)?;
        Ok(Self {
            settings,
            signer,
            http,
        })
    }
}

#[async_trait]
impl CallProvider for VonageProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Vonage
    }

    async fn create_call(&self, to: &PhoneNumber) -> Result<CallReceipt> {
        // Vonage wants bare digits, no leading '+'
        let body = json!({
            "to": [{ "type": "phone", "number": to.digits() }],
            "from": {
                "type": "phone",
                "number": self.settings.from_number.trim_start_matches('+'),
            },
            "answer_url": [self.settings.answer_url],
        });

        let response = self
            .http
            .post(format!("{}/v1/calls", self.settings.api_base))
            .bearer_auth(self.signer.generate_token()?)
            .json(&body)
            .send()
            .await?;

        let body: CreateCallResponse = ensure_success(self.kind(), response).await?.json().await?;
        info!(
            uuid = body.uuid.as_deref().unwrap_or("-"),
            status = body.status.as_deref().unwrap_or("-"),
            "vonage call created"
        );

        Ok(CallReceipt {
            provider: ProviderKind::Vonage,
            call_id: body.uuid,
        })
    }
}
