//! Deliverable reconciliation: status normalization, Missing-placeholder
//! synthesis, and per-gate approval scoring.

mod service;
mod status;

pub use service::reconcile;
pub use status::normalize_status;
