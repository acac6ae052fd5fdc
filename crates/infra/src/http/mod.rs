//! Shared HTTP client with timeout and bounded retry.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
