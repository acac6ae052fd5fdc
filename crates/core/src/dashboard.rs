//! Dashboard assembly: KPI block, alerts, recent activity.

use chrono::NaiveDate;
use renohub_domain::constants::{CONSTRUCTION_START_DATE, RECENT_ACTIVITY_CAP};
use renohub_domain::{
    ActivityEntry, Alerts, Dashboard, DeliverableStatus, FinancialSummary, Kpis, Page,
    Reconciliation, norm_key,
};

use crate::{fields, properties};

const G3_GATE: &str = "G3 Design Development";

/// Fold the reconciled deliverables, financials and raw milestone/activity
/// pages into the dashboard payload.
pub fn assemble(
    reconciliation: Reconciliation,
    financials: FinancialSummary,
    milestones: &[Page],
    activity_log: &[Page],
    now: NaiveDate,
    timestamp: String,
) -> Dashboard {
    let Reconciliation { deliverables, gates } = reconciliation;

    let approved =
        deliverables.iter().filter(|d| d.status == DeliverableStatus::Approved).count();
    let total = deliverables.len();
    let milestones_at_risk = milestones
        .iter()
        .filter(|m| norm_key(&properties::text(m, fields::RISK_STATUS)) == "at risk")
        .count();

    let kpis = Kpis {
        budget_myr: financials.budget_myr,
        paid_myr: financials.paid_myr,
        remaining_myr: financials.budget_myr - financials.paid_myr,
        deliverables_approved: approved,
        deliverables_total: total,
        total_outstanding_myr: financials.total_outstanding_myr,
        total_overdue_myr: financials.total_overdue_myr,
        paid_vs_budget: if financials.budget_myr > 0.0 {
            financials.paid_myr / financials.budget_myr
        } else {
            0.0
        },
        deliverables_progress: if total > 0 { approved as f64 / total as f64 } else { 0.0 },
        milestones_at_risk,
    };

    let approved_deliverable = |needle: &str| {
        deliverables.iter().any(|d| {
            norm_key(&d.deliverable_type).contains(needle)
                && d.status == DeliverableStatus::Approved
        })
    };

    let construction_start =
        properties::parse_iso_date(CONSTRUCTION_START_DATE).unwrap_or(now);
    let g3_rate = gates
        .iter()
        .find(|g| g.gate == G3_GATE)
        .map(|g| g.gate_approval_rate)
        .unwrap_or(0.0);

    let alerts = Alerts {
        days_to_construction_start: (construction_start - now).num_days(),
        g3_not_approved: g3_rate < 1.0,
        payments_overdue: financials.schedule.overdue.clone(),
        renovation_permit_approved: approved_deliverable("renovation permit"),
        contractor_awarded: approved_deliverable("contractor awarded"),
    };

    let recent_activity = activity_log
        .iter()
        .take(RECENT_ACTIVITY_CAP)
        .map(|p| ActivityEntry {
            event_type: properties::text(p, fields::EVENT_TYPE),
            deliverable: properties::text(p, fields::ACTIVITY_ID),
            details: properties::text(p, fields::EVENT_DESCRIPTION),
            timestamp: properties::text(p, fields::EVENT_TIMESTAMP),
            source: properties::text(p, fields::COMPANY_NAME),
            url: p.url.clone(),
        })
        .collect();

    Dashboard {
        kpis,
        gates,
        top_vendors: financials.top_vendors,
        budget_by_trade: financials.budget_by_trade,
        deliverables,
        payments_schedule: financials.schedule,
        recent_activity,
        alerts,
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use renohub_domain::{BudgetRules, GateConfig};

    use super::*;
    use crate::{finance, reconcile};

    fn deliverable_page(id: &str, gate: &str, doc_type: &str, status: &str) -> Page {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "properties": {
                "Select Deliverable:": { "type": "title", "title": [{ "plain_text": doc_type }] },
                "Gate": { "type": "multi_select", "multi_select": [{ "name": gate }] },
                "Status": { "type": "select", "select": { "name": status } }
            }
        }))
        .expect("valid page")
    }

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 12).expect("valid date")
    }

    fn assemble_with(deliverable_pages: &[Page], milestones: &[Page]) -> Dashboard {
        let reconciliation = reconcile::reconcile(deliverable_pages, &GateConfig::default());
        let financials =
            finance::aggregate(&[], &[], &[], &[], &BudgetRules::default(), now());
        assemble(
            reconciliation,
            financials,
            milestones,
            &[],
            now(),
            "2025-11-12T00:00:00Z".to_string(),
        )
    }

    #[test]
    fn kpis_track_approval_counts_and_ratios() {
        let pages = vec![
            deliverable_page("d1", "G1 Concept", "G1 — Moodboard", "Approved"),
            deliverable_page("d2", "G1 Concept", "G1 — 3D render", "Submitted"),
        ];
        let dashboard = assemble_with(&pages, &[]);

        assert_eq!(dashboard.kpis.deliverables_approved, 1);
        assert!(dashboard.kpis.deliverables_total > 2, "placeholders counted");
        assert!(dashboard.kpis.deliverables_progress > 0.0);
        assert!(dashboard.kpis.deliverables_progress < 1.0);
    }

    #[test]
    fn g3_alert_clears_only_at_full_approval() {
        let all_g3: Vec<Page> = GateConfig::default()
            .required_for(G3_GATE)
            .iter()
            .enumerate()
            .map(|(i, doc)| deliverable_page(&format!("g3-{i}"), G3_GATE, doc, "Approved"))
            .collect();

        assert!(assemble_with(&[], &[]).alerts.g3_not_approved);
        assert!(!assemble_with(&all_g3, &[]).alerts.g3_not_approved);
    }

    #[test]
    fn permit_and_contractor_flags_require_approval() {
        let pages = vec![
            deliverable_page("p1", "G4 Authority Submission", "G4 — Renovation permit", "Approved"),
            deliverable_page("p2", "G5 Construction Documentation", "G5 — Contractor awarded", "Submitted"),
        ];
        let dashboard = assemble_with(&pages, &[]);

        assert!(dashboard.alerts.renovation_permit_approved);
        assert!(!dashboard.alerts.contractor_awarded);
    }

    #[test]
    fn countdown_is_days_until_construction_start() {
        let dashboard = assemble_with(&[], &[]);
        // 2025-11-12 to 2025-11-22
        assert_eq!(dashboard.alerts.days_to_construction_start, 10);
    }

    #[test]
    fn at_risk_milestones_are_counted_case_insensitively() {
        let milestone = |status: &str| -> Page {
            serde_json::from_value(serde_json::json!({
                "id": "m",
                "properties": {
                    "Risk_Status": { "type": "select", "select": { "name": status } }
                }
            }))
            .expect("valid page")
        };
        let milestones = vec![milestone("At Risk"), milestone("at risk"), milestone("On Track")];

        let dashboard = assemble_with(&[], &milestones);
        assert_eq!(dashboard.kpis.milestones_at_risk, 2);
    }

    #[test]
    fn activity_feed_is_capped_to_ten() {
        let entries: Vec<Page> = (0..15)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": format!("a{i}"),
                    "properties": {
                        "Event_Type": { "type": "select", "select": { "name": "Status Change" } },
                        "Activity_ID": { "type": "title", "title": [{ "plain_text": format!("ACT-{i}") }] },
                        "Event_Description": { "type": "rich_text", "rich_text": [{ "plain_text": "moved" }] },
                        "Event_Timestamp": { "type": "created_time", "created_time": "2025-11-01T00:00:00Z" }
                    }
                }))
                .expect("valid page")
            })
            .collect();

        let reconciliation = reconcile::reconcile(&[], &GateConfig::default());
        let financials = finance::aggregate(&[], &[], &[], &[], &BudgetRules::default(), now());
        let dashboard = assemble(
            reconciliation,
            financials,
            &[],
            &entries,
            now(),
            "t".to_string(),
        );

        assert_eq!(dashboard.recent_activity.len(), 10);
        assert_eq!(dashboard.recent_activity[0].deliverable, "ACT-0");
        assert_eq!(dashboard.recent_activity[0].event_type, "Status Change");
    }
}
