//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application. Values that are really project configuration (the gate
//! checklist, the budget rules) live in [`crate::types::config`] with these
//! as their compiled-in defaults.

/// Notion REST API version header value.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default generative model used for KPI summaries.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Planned construction start, used for the countdown alert.
pub const CONSTRUCTION_START_DATE: &str = "2025-11-22";

// Budget rule defaults (see BudgetRules)
pub const DEFAULT_SHIPPING_ADDEND_MYR: f64 = 27_900.0;
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.05;
pub const DEFAULT_CONTINGENCY_RATE: f64 = 0.10;

// Response list caps
pub const UPCOMING_PAYMENTS_CAP: usize = 10;
pub const RECENT_PAID_CAP: usize = 10;
pub const TOP_VENDORS_CAP: usize = 5;
pub const RECENT_ACTIVITY_CAP: usize = 10;

/// Number of calendar months covered by the cash-flow forecast.
pub const FORECAST_MONTHS: usize = 4;

/// Title given to form submissions before deduplication renames them.
pub const NEW_SUBMISSION_TITLE: &str = "New submission";
