//! Domain Layer
//!
//! Core business entity definitions

pub mod call;
pub mod phone;
pub mod salon;

pub use call::{CallReceipt, ProviderKind, Reply};
pub use phone::{PhoneNumber, DEFAULT_COUNTRY_CODE};
pub use salon::{find_service, BusinessProfile, SalonService, BUSINESS, SERVICES};
