//! Deliverable and gate view types.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a deliverable, normalized from free-text store values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliverableStatus {
    Missing,
    Submitted,
    Approved,
    Rejected,
}

impl DeliverableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// A view over a deliverable record. Synthesized "Missing" placeholders have
/// no source record id and no URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    /// Source record id; `None` for synthesized placeholders.
    pub id: Option<String>,
    pub title: String,
    pub deliverable_type: String,
    pub gate: String,
    pub status: DeliverableStatus,
    pub category: String,
    /// Whether this deliverable is on its gate's required checklist.
    pub is_critical: bool,
    pub assignees: Vec<String>,
    pub url: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
}

/// Per-gate approval summary over the required checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateSummary {
    pub gate: String,
    /// Approved deliverables that match a required type for this gate.
    pub approved: usize,
    /// Number of required types for the gate, not the count of submissions.
    pub total: usize,
    pub gate_approval_rate: f64,
}

/// Result of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    pub deliverables: Vec<Deliverable>,
    pub gates: Vec<GateSummary>,
}
