//! Phone number model
//!
//! Numbers entered on the demo page or posted to `/trigger-call` arrive in
//! every shape imaginable; providers only accept `+<country><number>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VoiceError};

/// Country code applied when the caller omits one
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// A normalized phone number (`+` followed by digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw user input
    ///
    /// Spaces, dashes and parentheses are dropped. A number without a leading
    /// `+` loses its trunk zeros and gets `default_country_code` prepended.
    pub fn normalize(raw: &str, default_country_code: &str) -> Result<Self> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if cleaned.is_empty() {
            return Err(VoiceError::ValidationError(
                "Phone number is required".to_string(),
            ));
        }

        let number = if cleaned.starts_with('+') {
            cleaned
        } else {
            let local = cleaned.trim_start_matches('0');
            if local.is_empty() {
                return Err(VoiceError::ValidationError(format!(
                    "Invalid phone number: {}",
                    raw
                )));
            }
            format!("{}{}", default_country_code, local)
        };

        let digits = number.strip_prefix('+').unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(VoiceError::ValidationError(format!(
                "Invalid phone number: {}",
                raw
            )));
        }

        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits without the leading `+`
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
