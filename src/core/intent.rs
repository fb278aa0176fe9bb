//! Intent detection
//!
//! Single-turn keyword matching over the caller's transcribed speech. No
//! context is carried between requests.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::{find_service, SalonService};

/// Salon intents the assistant understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Booking,
    Pricing,
    Hours,
    Services,
    Doorstep,
    Contact,
    Farewell,
    Greeting,
    Unknown,
}

/// Detected intent plus the service it refers to, if one was named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedIntent {
    pub intent: Intent,
    pub service: Option<&'static SalonService>,
}

// Evaluated in order; the first hit wins.
static INTENT_PATTERNS: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    vec![
        (
            Intent::Booking,
            Regex::new(r"(?i)\b(book\w*|appointments?|schedul\w*|reserv\w*|slots?)\b").unwrap(),
        ),
        (
            Intent::Pricing,
            Regex::new(r"(?i)\b(prices?|pricing|costs?|costing|charges?|fees?|rates?|how\s+much|expensive|cheap\w*)\b")
                .unwrap(),
        ),
        (
            Intent::Hours,
            Regex::new(r"(?i)\b(hours?|timings?|open\w*|clos(e|ed|es|ing)|what\s+time)\b").unwrap(),
        ),
        (
            Intent::Doorstep,
            Regex::new(r"(?i)\b(doorstep|home\s+service|at\s+home|come\s+(to|home)|address|location|where)\b")
                .unwrap(),
        ),
        (
            Intent::Services,
            Regex::new(r"(?i)\b(services?|offer\w*|treatments?|menu|do\s+you\s+do|what\s+do\s+you\s+have)\b")
                .unwrap(),
        ),
        (
            Intent::Contact,
            Regex::new(r"(?i)\b(contact|phone\s+number|number|call\s+back|reach\s+you|whatsapp)\b")
                .unwrap(),
        ),
        (
            Intent::Farewell,
            Regex::new(r"(?i)\b(bye|goodbye|thanks|thank\s+you|that'?s\s+all|nothing\s+else)\b")
                .unwrap(),
        ),
        (
            Intent::Greeting,
            Regex::new(r"(?i)\b(hello|hi|hey|namaste|good\s+(morning|afternoon|evening))\b").unwrap(),
        ),
    ]
});

/// Keyword intent detector
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentDetector;

impl IntentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify one utterance
    ///
    /// An utterance naming a service with no keyword other than a greeting is
    /// treated as a question about that service.
    pub fn detect(&self, utterance: &str) -> DetectedIntent {
        let service = find_service(utterance);

        let intent = match INTENT_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(utterance))
            .map(|(intent, _)| *intent)
        {
            // "hi, I'd like a haircut" asks about the haircut
            Some(Intent::Greeting) | None if service.is_some() => Intent::Services,
            Some(intent) => intent,
            None => Intent::Unknown,
        };

        DetectedIntent { intent, service }
    }
}
