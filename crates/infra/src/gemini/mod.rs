//! Gemini generateContent client.

mod client;

pub use client::GeminiClient;
