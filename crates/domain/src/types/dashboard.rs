//! Assembled dashboard response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::deliverable::{Deliverable, GateSummary};
use super::finance::{PaymentItem, PaymentsSchedule, VendorSpend};

/// Headline KPI block.
///
/// Deserialization defaults missing fields to zero; summary requests may
/// post a partial snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kpis {
    #[serde(rename = "budgetMYR")]
    pub budget_myr: f64,
    #[serde(rename = "paidMYR")]
    pub paid_myr: f64,
    #[serde(rename = "remainingMYR")]
    pub remaining_myr: f64,
    pub deliverables_approved: usize,
    pub deliverables_total: usize,
    #[serde(rename = "totalOutstandingMYR")]
    pub total_outstanding_myr: f64,
    #[serde(rename = "totalOverdueMYR")]
    pub total_overdue_myr: f64,
    pub paid_vs_budget: f64,
    pub deliverables_progress: f64,
    pub milestones_at_risk: usize,
}

/// Attention flags surfaced at the top of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alerts {
    pub days_to_construction_start: i64,
    pub g3_not_approved: bool,
    pub payments_overdue: Vec<PaymentItem>,
    pub renovation_permit_approved: bool,
    pub contractor_awarded: bool,
}

/// One entry of the recent activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub event_type: String,
    pub deliverable: String,
    pub details: String,
    pub timestamp: String,
    pub source: String,
    pub url: Option<String>,
}

/// Full dashboard payload returned by `GET /proxy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub kpis: Kpis,
    pub gates: Vec<GateSummary>,
    pub top_vendors: Vec<VendorSpend>,
    pub budget_by_trade: BTreeMap<String, f64>,
    pub deliverables: Vec<Deliverable>,
    pub payments_schedule: PaymentsSchedule,
    pub recent_activity: Vec<ActivityEntry>,
    pub alerts: Alerts,
    pub timestamp: String,
}
