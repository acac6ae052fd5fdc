//! # RenoHub Infra
//!
//! Infrastructure implementations for RenoHub.
//!
//! This crate contains:
//! - The shared retrying HTTP client
//! - The Notion API client and the deliverable store over it
//! - The Gemini summary client
//! - The HTTP mail-provider client
//! - Environment configuration loading
//! - Error conversions from transport errors into the domain error
//!
//! ## Architecture
//! - Implements the port traits defined in `renohub-core`
//! - All network access lives here; upper layers see domain types only

pub mod config;
pub mod errors;
pub mod gemini;
pub mod http;
pub mod mail;
pub mod notion;

pub use errors::InfraError;
pub use gemini::GeminiClient;
pub use http::HttpClient;
pub use mail::MailClient;
pub use notion::{NotionClient, NotionDeliverableStore};
