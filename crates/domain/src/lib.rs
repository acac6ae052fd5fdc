//! # RenoHub Domain
//!
//! Business domain types and models for RenoHub.
//!
//! This crate contains:
//! - Notion page and property value types
//! - Dashboard view types (deliverables, gates, payments, bids)
//! - Domain error types and Result definitions
//! - Injected configuration structures (gate checklist, budget rules)
//! - Pure text-normalization utilities
//!
//! ## Architecture
//! - No dependencies on other RenoHub crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
pub use utils::text::norm_key;
