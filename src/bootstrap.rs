//! # Service bootstrap
//!
//! Wires configuration into provider clients and starts the webhook server.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infrastructure::telephony::{CallDispatcher, CallProvider, TwilioProvider, VonageProvider};
use crate::infrastructure::web::{start_web_server, AppState};

/// Service launcher
pub struct Launcher {
    config: AppConfig,
}

impl Launcher {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Validate configuration, build the providers and serve until Ctrl-C
    pub async fn launch(&self) -> Result<()> {
        info!("🚀 Launching salon voice assistant...");
        self.config.validate()?;

        let dispatcher = self.build_dispatcher()?;
        let state = Arc::new(AppState::from_config(&self.config, dispatcher)?);

        start_web_server(&self.config.web_bind, state).await?;
        info!("✅ Server stopped");
        Ok(())
    }

    /// Providers in fallback order: Vonage first, then Twilio
    pub fn build_dispatcher(&self) -> Result<CallDispatcher> {
        let mut providers: Vec<Arc<dyn CallProvider>> = Vec::new();

        match self.config.vonage_settings() {
            Some(settings) => {
                providers.push(Arc::new(VonageProvider::new(settings)?));
                info!("📞 Vonage provider enabled");
            }
            None => info!("Vonage not configured"),
        }

        match self.config.twilio_settings() {
            Some(settings) => {
                providers.push(Arc::new(TwilioProvider::new(settings)?));
                info!("📞 Twilio provider enabled");
            }
            None => info!("Twilio not configured"),
        }

        if providers.is_empty() {
            warn!("⚠️  No call provider configured, /trigger-call will report failure");
        }

        Ok(CallDispatcher::new(providers))
    }
}
