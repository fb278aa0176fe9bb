//! Standardized error handling
//!
//! Error type shared by the responder, the provider clients and the web layer

use thiserror::Error;

/// Main error type of the voice service
#[derive(Error, Debug)]
pub enum VoiceError {
    /// Invalid caller input (phone number, request payload)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Transport-level failure talking to a provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Provider answered with a non-success status
    #[error("{provider} rejected the call request ({status}): {body}")]
    ProviderError {
        provider: String,
        status: u16,
        body: String,
    },

    /// Signing the provider credentials failed
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// No call provider has credentials configured
    #[error("No call provider configured")]
    NoProviderConfigured,

    /// Every configured provider failed; carries the last failure
    #[error("All call providers failed: {0}")]
    AllProvidersFailed(String),

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for VoiceError {
    fn from(err: anyhow::Error) -> Self {
        VoiceError::Unknown(err.to_string())
    }
}

impl From<std::io::Error> for VoiceError {
    fn from(err: std::io::Error) -> Self {
        VoiceError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for VoiceError {
    fn from(err: serde_json::Error) -> Self {
        VoiceError::ValidationError(err.to_string())
    }
}

impl From<reqwest::Error> for VoiceError {
    fn from(err: reqwest::Error) -> Self {
        VoiceError::NetworkError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for VoiceError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        VoiceError::CredentialError(err.to_string())
    }
}

impl From<url::ParseError> for VoiceError {
    fn from(err: url::ParseError) -> Self {
        VoiceError::ConfigError(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, VoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = VoiceError::ProviderError {
            provider: "twilio".to_string(),
            status: 401,
            body: "Authenticate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "twilio rejected the call request (401): Authenticate"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: VoiceError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, VoiceError::ConfigError(_)));

        let err: VoiceError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "Unknown error: boom");
    }
}
