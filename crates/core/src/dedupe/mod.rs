//! Submission dedupe: promote new deliverables in place, merge duplicates
//! into the canonical record.

mod ports;
mod service;

pub use ports::DeliverableStore;
pub use service::{DedupeOutcome, DedupeService};
