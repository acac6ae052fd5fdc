//! # RenoHub Core
//!
//! Pure business services and port definitions.
//!
//! This crate contains:
//! - Property extraction over the Notion property bag
//! - Deliverable reconciliation and gate scoring
//! - Financial aggregation (budget, vendor spend, payment buckets, forecast)
//! - Trade-room bid comparison
//! - The submission dedupe state machine
//! - Summary-prompt assembly and the notifier/summarizer ports
//!
//! ## Architecture
//! - Depends only on `renohub-domain`
//! - No network or filesystem code; external effects go through port traits
//!   implemented in `renohub-infra`

pub mod bids;
pub mod dashboard;
pub mod dedupe;
pub mod fields;
pub mod finance;
pub mod notify;
pub mod properties;
pub mod reconcile;
pub mod summary;

pub use dedupe::{DedupeOutcome, DedupeService, DeliverableStore};
pub use notify::Notifier;
pub use summary::SummaryGenerator;
