//! HTTP server for the renovation dashboard.
//!
//! Routes are thin: they fan out Notion queries, hand the pages to
//! `renohub-core`, and serialize the result. All request handling state
//! lives in [`AppState`].

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
