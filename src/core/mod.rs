//! Core layer: request-independent conversation logic
//!
//! Intent detection, scripted replies and call-control markup rendering

pub mod intent;
pub mod markup;
pub mod responder;

pub use intent::{DetectedIntent, Intent, IntentDetector};
pub use markup::{Ncco, Twiml, VoiceSettings};
pub use responder::SalonResponder;
