//! 沙龙语音助手
//!
//! Webhook-driven voice front end for Goodness Glamour Salon:
//! - Twilio voice webhooks answered with TwiML
//! - Vonage answer/event webhooks answered with NCCO
//! - Outbound calls through Vonage with Twilio as fallback
//! - Keyword intent matching over salon topics (hours, prices, bookings, services)
//!
//! # 架构分层
//!
//! - `domain`: business entities (phone numbers, services, replies)
//! - `core`: intent detection, scripted responder, call-control markup
//! - `infrastructure`: provider clients, provider auth, logging, HTTP server
//! - `bootstrap`: wiring and startup

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use bootstrap::Launcher;
pub use config::AppConfig;
pub use crate::core::{Intent, IntentDetector, Ncco, SalonResponder, Twiml, VoiceSettings};
pub use domain::{CallReceipt, PhoneNumber, ProviderKind, Reply};
pub use errors::{Result, VoiceError};
pub use infrastructure::logger;
pub use infrastructure::telephony::{CallDispatcher, CallProvider, TwilioProvider, VonageProvider};
pub use infrastructure::web::{create_router, AppState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
