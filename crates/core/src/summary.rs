//! AI summary prompt assembly and the generator port.

use async_trait::async_trait;
use renohub_domain::{Kpis, Result};

/// Text generation over an external model endpoint. Implemented by the
/// Gemini client in `renohub-infra`.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Fixed natural-language template over the KPI snapshot.
pub fn build_summary_prompt(kpis: &Kpis) -> String {
    format!(
        "Summarize this project data: Budget {} MYR, Paid {} MYR. \
         Deliverables {}/{} approved. Milestones at risk: {}. \
         Overdue payments: {}. Focus on key risks and progress.",
        kpis.budget_myr,
        kpis.paid_myr,
        kpis.deliverables_approved,
        kpis.deliverables_total,
        kpis.milestones_at_risk,
        if kpis.total_overdue_myr > 0.0 { "Yes" } else { "No" },
    )
}
