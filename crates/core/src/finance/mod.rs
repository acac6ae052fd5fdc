//! Financial aggregation: budget formula, vendor spend, payment buckets,
//! cash-flow forecast.

mod service;

pub use service::aggregate;
