//! Pure utility functions shared across the workspace.

pub mod text;
