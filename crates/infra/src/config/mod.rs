//! Application configuration loading.

mod loader;

pub use loader::{load, load_from_env, load_rules_file};
