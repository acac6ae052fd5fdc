//! HTTP mail-provider client.

mod client;

pub use client::MailClient;
