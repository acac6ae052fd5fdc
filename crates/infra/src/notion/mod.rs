//! Notion REST API client and the deliverable store over it.

mod client;
mod store;
mod types;

pub use client::NotionClient;
pub use store::NotionDeliverableStore;
