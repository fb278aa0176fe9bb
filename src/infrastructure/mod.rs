//! 基础设施层：外部系统交互
//!
//! Provider clients, provider authentication, logging and the HTTP server

pub mod auth;
pub mod logger;
pub mod telephony;
pub mod web;
