//! Financial view types: payments, vendor spend, forecast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized payment status. Store values are free-text strings, compared
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Outstanding,
    Overdue,
    Paid,
    Other,
}

/// One payment row as surfaced in the schedule lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    pub id: String,
    pub payment_for: String,
    pub vendor: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    pub url: Option<String>,
}

/// One month of the cash-flow forecast, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMonth {
    pub month: String,
    pub total_amount: f64,
}

/// Payment classification buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsSchedule {
    pub upcoming: Vec<PaymentItem>,
    pub overdue: Vec<PaymentItem>,
    pub recent_paid: Vec<PaymentItem>,
    pub forecast: Vec<ForecastMonth>,
}

/// Paid-to-date spend for one resolved vendor name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSpend {
    pub name: String,
    pub paid: f64,
    pub trade: String,
}

/// Output of the financial aggregator for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub budget_myr: f64,
    pub subtotal_myr: f64,
    pub paid_myr: f64,
    pub budget_by_trade: BTreeMap<String, f64>,
    pub top_vendors: Vec<VendorSpend>,
    pub schedule: PaymentsSchedule,
    pub total_outstanding_myr: f64,
    pub total_overdue_myr: f64,
}
