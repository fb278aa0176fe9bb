//! Provider authentication
//!
//! Vonage's Voice API authenticates with a short-lived RS256 JWT signed by the
//! application's private key.

use std::path::Path;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VoiceError};

/// Token lifetime in seconds
const TOKEN_TTL_SECS: u64 = 15 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct VonageClaims {
    pub application_id: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Clone)]
pub struct VonageTokenSigner {
    application_id: String,
    encoding_key: EncodingKey,
}

impl VonageTokenSigner {
    pub fn from_pem(application_id: impl Into<String>, pem: &[u8]) -> Result<Self> {
        Ok(Self {
            application_id: application_id.into(),
            encoding_key: EncodingKey::from_rsa_pem(pem)?,
        })
    }

    pub fn from_file(application_id: impl Into<String>, path: &Path) -> Result<Self> {
        let pem = std::fs::read(path).map_err(|e| {
            VoiceError::ConfigError(format!(
                "cannot read Vonage private key {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_pem(application_id, &pem)
    }

    pub fn generate_token(&self) -> Result<String> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| VoiceError::CredentialError(e.to_string()))?
            .as_secs();

        let claims = VonageClaims {
            application_id: self.application_id.clone(),
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;
        Ok(token)
    }
}
