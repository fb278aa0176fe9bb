//! Call and reply models

use serde::{Deserialize, Serialize};

/// Telephony vendors the service can place calls through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Twilio,
    Vonage,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Twilio => write!(f, "twilio"),
            ProviderKind::Vonage => write!(f, "vonage"),
        }
    }
}

/// Outcome of a successful call-creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallReceipt {
    pub provider: ProviderKind,
    /// Provider call id (Twilio `sid`, Vonage `uuid`)
    pub call_id: Option<String>,
}

/// What to tell the caller next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Hang up after speaking instead of listening again
    pub end_call: bool,
}

impl Reply {
    pub fn continue_with(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_call: false,
        }
    }

    pub fn end_with(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_call: true,
        }
    }
}
