//! Domain types and models

pub mod bids;
pub mod config;
pub mod dashboard;
pub mod deliverable;
pub mod finance;
pub mod page;

pub use bids::*;
pub use config::*;
pub use dashboard::*;
pub use deliverable::*;
pub use finance::*;
pub use page::*;
