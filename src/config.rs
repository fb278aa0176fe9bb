use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::core::VoiceSettings;

/// Path Twilio posts speech results to
pub const TWILIO_WEBHOOK_PATH: &str = "/voice/webhook";
/// Path Vonage fetches the first NCCO from
pub const VONAGE_ANSWER_PATH: &str = "/vonage/answer";
/// Path Vonage posts speech input events to
pub const VONAGE_EVENT_PATH: &str = "/vonage/event";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Salon voice assistant webhook service (Twilio / Vonage)"
)]
pub struct AppConfig {
    /// HTTP 监听地址
    #[arg(long, env = "WEB_BIND", default_value = "0.0.0.0:8000")]
    pub web_bind: String,

    /// Public base URL the providers can reach this service on
    #[arg(long, env = "WEBHOOK_URL", default_value = "http://localhost:8000")]
    pub webhook_url: String,

    /// Prefix for numbers entered without a country code
    #[arg(long, env = "DEFAULT_COUNTRY_CODE", default_value = "+91")]
    pub default_country_code: String,

    /// Speech recognition and TTS language
    #[arg(long, env = "SPEECH_LANGUAGE", default_value = "en-IN")]
    pub speech_language: String,

    /// TwiML voice
    #[arg(long, env = "TTS_VOICE", default_value = "Polly.Aditi")]
    pub tts_voice: String,

    /// Timeout for call-creation requests, in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = 10)]
    pub provider_timeout_secs: u64,

    // Twilio 配置
    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    pub twilio_account_sid: Option<String>,

    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub twilio_auth_token: Option<String>,

    #[arg(long, env = "TWILIO_PHONE_NUMBER")]
    pub twilio_phone_number: Option<String>,

    #[arg(long, env = "TWILIO_API_BASE", default_value = "https://api.twilio.com")]
    pub twilio_api_base: String,

    // Vonage 配置
    #[arg(long, env = "VONAGE_APPLICATION_ID")]
    pub vonage_application_id: Option<String>,

    /// PEM private key of the Vonage application
    #[arg(long, env = "VONAGE_PRIVATE_KEY_PATH")]
    pub vonage_private_key_path: Option<PathBuf>,

    #[arg(long, env = "VONAGE_PHONE_NUMBER")]
    pub vonage_phone_number: Option<String>,

    /// Hosted NCCO answer URL; defaults to this service's own answer endpoint
    #[arg(long, env = "VONAGE_ANSWER_URL")]
    pub vonage_answer_url: Option<String>,

    #[arg(long, env = "VONAGE_API_BASE", default_value = "https://api.nexmo.com")]
    pub vonage_api_base: String,
}

/// Resolved Twilio credentials
#[derive(Debug, Clone)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub api_base: String,
    /// Absolute URL of the voice webhook
    pub webhook_url: String,
    pub timeout: Duration,
}

/// Resolved Vonage credentials
#[derive(Debug, Clone)]
pub struct VonageSettings {
    pub application_id: String,
    pub private_key_path: PathBuf,
    pub from_number: String,
    pub api_base: String,
    pub answer_url: String,
    pub timeout: Duration,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.web_bind.parse::<SocketAddr>().is_err() {
            anyhow::bail!("WEB_BIND must be host:port, got '{}'", self.web_bind);
        }

        let base = Url::parse(&self.webhook_url)
            .map_err(|e| anyhow::anyhow!("WEBHOOK_URL is not a valid URL: {}", e))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("WEBHOOK_URL must be http or https");
        }

        let code = self.default_country_code.as_str();
        if !code.starts_with('+') || code.len() < 2 || !code[1..].chars().all(|c| c.is_ascii_digit())
        {
            anyhow::bail!(
                "DEFAULT_COUNTRY_CODE must look like +91, got '{}'",
                self.default_country_code
            );
        }

        let twilio = [
            present(&self.twilio_account_sid),
            present(&self.twilio_auth_token),
            present(&self.twilio_phone_number),
        ];
        if twilio.iter().any(Option::is_some) && !twilio.iter().all(Option::is_some) {
            anyhow::bail!(
                "Twilio is partially configured: TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER are all required"
            );
        }

        let vonage_set = [
            present(&self.vonage_application_id).is_some(),
            self.vonage_private_key_path.is_some(),
            present(&self.vonage_phone_number).is_some(),
        ];
        if vonage_set.iter().any(|v| *v) && !vonage_set.iter().all(|v| *v) {
            anyhow::bail!(
                "Vonage is partially configured: VONAGE_APPLICATION_ID, VONAGE_PRIVATE_KEY_PATH and VONAGE_PHONE_NUMBER are all required"
            );
        }

        if self.provider_timeout_secs == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        Ok(())
    }

    /// Absolute public URL for a path served by this process
    pub fn public_url(&self, path: &str) -> anyhow::Result<String> {
        let base = Url::parse(&self.webhook_url)?;
        Ok(base.join(path)?.to_string())
    }

    /// Voice settings whose callback points at `path`
    pub fn voice_settings(&self, path: &str) -> anyhow::Result<VoiceSettings> {
        Ok(VoiceSettings::new(
            self.speech_language.clone(),
            self.tts_voice.clone(),
            self.public_url(path)?,
        ))
    }

    fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// 获取 Twilio 配置（如果可用）
    pub fn twilio_settings(&self) -> Option<TwilioSettings> {
        let account_sid = present(&self.twilio_account_sid)?;
        let auth_token = present(&self.twilio_auth_token)?;
        let from_number = present(&self.twilio_phone_number)?;
        let webhook_url = self.public_url(TWILIO_WEBHOOK_PATH).ok()?;

        Some(TwilioSettings {
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
            api_base: self.twilio_api_base.trim_end_matches('/').to_string(),
            webhook_url,
            timeout: self.provider_timeout(),
        })
    }

    /// 获取 Vonage 配置（如果可用）
    pub fn vonage_settings(&self) -> Option<VonageSettings> {
        let application_id = present(&self.vonage_application_id)?;
        let private_key_path = self.vonage_private_key_path.clone()?;
        let from_number = present(&self.vonage_phone_number)?;
        let answer_url = match present(&self.vonage_answer_url) {
            Some(url) => url.to_string(),
            None => self.public_url(VONAGE_ANSWER_PATH).ok()?,
        };

        Some(VonageSettings {
            application_id: application_id.to_string(),
            private_key_path,
            from_number: from_number.to_string(),
            api_base: self.vonage_api_base.trim_end_matches('/').to_string(),
            answer_url,
            timeout: self.provider_timeout(),
        })
    }
}
