//! Injected configuration structures.
//!
//! The gate checklist and the budget rules were module-level literals in
//! every draft of the dashboard; they are modeled here as loaded, versioned
//! configuration so gate definitions can evolve without redeploying code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONTINGENCY_RATE, DEFAULT_DISCOUNT_RATE, DEFAULT_SHIPPING_ADDEND_MYR, GEMINI_MODEL,
};

/// Required deliverable types per project gate.
///
/// Keys are gate names ("G0 Pre Construction" .. "G6 Design Close-out");
/// iteration order is the gate order, which `BTreeMap` gives for free since
/// gate names sort lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub required_by_gate: BTreeMap<String, Vec<String>>,
}

impl GateConfig {
    pub fn required_for(&self, gate: &str) -> &[String] {
        self.required_by_gate.get(gate).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("G0 Pre Construction", &["G0 — Move out to temporary residence"]),
            (
                "G1 Concept",
                &["G1 — Moodboard", "G1 — Proposed renovation floor plan", "G1 — 3D render"],
            ),
            (
                "G2 Schematic",
                &[
                    "G2 — 3D render",
                    "G2 — Floor plans 1:100",
                    "G2 — Building elevations",
                    "G2 — Area schedules",
                ],
            ),
            (
                "G3 Design Development",
                &[
                    "G3 — Doors and windows",
                    "G3 — Construction drawings",
                    "G3 — MEP drawings",
                    "G3 — Interior design plans",
                    "G3 — Schedules",
                    "G3 — Finishes",
                ],
            ),
            (
                "G4 Authority Submission",
                &[
                    "G4 — Renovation permit",
                    "G4 — Structural drawings",
                    "G4 — BQ complete",
                    "G4 — Quotation package ready",
                    "G4 — Authority submission set",
                    "G4 — MEP single-line diagrams",
                    "G4 — Structural calculations",
                ],
            ),
            (
                "G5 Construction Documentation",
                &[
                    "G5 — Contractor awarded",
                    "G5 — Tender package issued",
                    "G5 — Site mobilization complete",
                    "G5 — Demolition complete certificate",
                    "G5 — Structural works complete",
                    "G5 — Carpentry complete",
                    "G5 — Finishes complete",
                    "G5 — IFC construction drawings",
                    "G5 — Method statements",
                    "G5 — Work plans",
                ],
            ),
            (
                "G6 Design Close-out",
                &[
                    "G6 — Final inspection complete",
                    "G6 — Handover certificate",
                    "G6 — As-built drawings",
                ],
            ),
        ];

        let required_by_gate = table
            .iter()
            .map(|(gate, docs)| {
                ((*gate).to_string(), docs.iter().map(|d| (*d).to_string()).collect())
            })
            .collect();

        Self { required_by_gate }
    }
}

/// Fixed arithmetic applied on top of the in-scope budget subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRules {
    pub shipping_addend_myr: f64,
    pub discount_rate: f64,
    pub contingency_rate: f64,
}

impl BudgetRules {
    /// `(subtotal + shipping) × (1 − discount) × (1 + contingency)`
    pub fn total_budget(&self, subtotal: f64) -> f64 {
        (subtotal + self.shipping_addend_myr)
            * (1.0 - self.discount_rate)
            * (1.0 + self.contingency_rate)
    }
}

impl Default for BudgetRules {
    fn default() -> Self {
        Self {
            shipping_addend_myr: DEFAULT_SHIPPING_ADDEND_MYR,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            contingency_rate: DEFAULT_CONTINGENCY_RATE,
        }
    }
}

/// Per-data-source database ids. Every id is optional: a missing id degrades
/// that source to an empty result set instead of failing the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Databases {
    pub budget: Option<String>,
    pub actuals: Option<String>,
    pub milestones: Option<String>,
    pub deliverables: Option<String>,
    pub vendor_registry: Option<String>,
    pub payments: Option<String>,
    pub work_packages: Option<String>,
    pub sourcing_master_list: Option<String>,
    pub activity_log: Option<String>,
}

/// Outbound email settings for the deliverable notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub owner_emails: Vec<String>,
}

/// Top-level application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub notion_api_key: String,
    pub databases: Databases,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub update_password: Option<String>,
    pub webhook_secret: Option<String>,
    pub mail: Option<MailConfig>,
    pub port: u16,
    pub gates: GateConfig,
    pub budget_rules: BudgetRules,
}

impl AppConfig {
    /// Minimal config for tests: one API key, everything else defaulted.
    pub fn for_tests(notion_api_key: impl Into<String>) -> Self {
        Self {
            notion_api_key: notion_api_key.into(),
            databases: Databases::default(),
            gemini_api_key: None,
            gemini_model: GEMINI_MODEL.to_string(),
            update_password: None,
            webhook_secret: None,
            mail: None,
            port: 8787,
            gates: GateConfig::default(),
            budget_rules: BudgetRules::default(),
        }
    }
}
