use std::sync::Arc;

use tracing::{error, info};

use super::CallProvider;
use crate::domain::{CallReceipt, PhoneNumber, ProviderKind};
use crate::errors::{Result, VoiceError};

/// Tries providers in order until one accepts the call
#[derive(Clone, Default)]
pub struct CallDispatcher {
    providers: Vec<Arc<dyn CallProvider>>,
}

impl CallDispatcher {
    pub fn new(providers: Vec<Arc<dyn CallProvider>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn has_provider(&self, kind: ProviderKind) -> bool {
        self.providers.iter().any(|p| p.kind() == kind)
    }

    pub fn providers(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Place a call, falling back to the next provider on failure
    pub async fn trigger(&self, to: &PhoneNumber) -> Result<CallReceipt> {
        if self.providers.is_empty() {
            return Err(VoiceError::NoProviderConfigured);
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.create_call(to).await {
                Ok(receipt) => {
                    info!(provider = %receipt.provider, to = %to, "call initiated");
                    return Ok(receipt);
                }
                Err(e) => {
                    error!("{} call failed, trying next provider: {}", provider.kind(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(VoiceError::AllProvidersFailed(
            last_error.map(|e| e.to_string()).unwrap_or_default(),
        ))
    }
}
