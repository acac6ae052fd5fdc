//! Reconciliation of submitted deliverables against the gate checklist.

use std::collections::HashSet;

use renohub_domain::utils::text::{norm_key, pair_key};
use renohub_domain::{Deliverable, DeliverableStatus, GateConfig, GateSummary, Page, Reconciliation};
use tracing::debug;

use crate::reconcile::normalize_status;
use crate::{fields, properties};

/// Category whose records carry their lifecycle in `Review Status` rather
/// than `Status`.
const CONSTRUCTION_CERTIFICATE: &str = "Construction Certificate";

/// Category assigned to synthesized placeholders.
const PLACEHOLDER_CATEGORY: &str = "Design Document";

/// Merge retrieved deliverable records with the required-documents table.
///
/// Produces the full deliverable list (submitted records plus one
/// synthesized "Missing" placeholder per absent required item) and the
/// per-gate approval summaries. Uniqueness within one run is keyed by the
/// normalized `(gate, deliverable-type)` pair, so reconciling the same input
/// twice synthesizes the same placeholders.
pub fn reconcile(pages: &[Page], gates: &GateConfig) -> Reconciliation {
    let mut deliverables: Vec<Deliverable> = pages.iter().map(|p| map_deliverable(p, gates)).collect();

    let existing: HashSet<String> =
        deliverables.iter().map(|d| pair_key(&d.gate, &d.deliverable_type)).collect();

    for (gate, required) in &gates.required_by_gate {
        for required_type in required {
            if !existing.contains(&pair_key(gate, required_type)) {
                deliverables.push(placeholder(gate, required_type));
            }
        }
    }

    let summaries = score_gates(&deliverables, gates);
    debug!(
        deliverables = deliverables.len(),
        gates = summaries.len(),
        "reconciled deliverables against gate checklist"
    );

    Reconciliation { deliverables, gates: summaries }
}

fn map_deliverable(page: &Page, gates: &GateConfig) -> Deliverable {
    let deliverable_type = properties::text(page, fields::DELIVERABLE_TYPE);
    let category = properties::text(page, fields::CATEGORY);

    // Gate comes from the multi-select when set, else the derived field.
    let gate = properties::multi_select(page, fields::GATE)
        .into_iter()
        .next()
        .unwrap_or_else(|| properties::text(page, fields::GATE_AUTO));

    // Construction certificates track review state in a separate column.
    let raw_status = if category == CONSTRUCTION_CERTIFICATE {
        properties::text(page, fields::REVIEW_STATUS)
    } else {
        properties::text(page, fields::STATUS)
    };

    let is_critical = gates
        .required_for(&gate)
        .iter()
        .any(|required| norm_key(required) == norm_key(&deliverable_type));

    Deliverable {
        id: Some(page.id.clone()),
        title: deliverable_type.clone(),
        deliverable_type,
        gate,
        status: normalize_status(&raw_status),
        category,
        is_critical,
        assignees: properties::people(page, fields::OWNER),
        url: page.url.clone(),
        due_date: properties::date_str(page, fields::TARGET_DUE),
        priority: properties::text(page, fields::PRIORITY),
    }
}

fn placeholder(gate: &str, required_type: &str) -> Deliverable {
    Deliverable {
        id: None,
        title: required_type.to_string(),
        deliverable_type: required_type.to_string(),
        gate: gate.to_string(),
        status: DeliverableStatus::Missing,
        category: PLACEHOLDER_CATEGORY.to_string(),
        is_critical: true,
        assignees: Vec::new(),
        url: None,
        due_date: None,
        priority: String::new(),
    }
}

/// Per-gate approval over required items only: `total` is the checklist
/// length, never the submission count. Gates with an empty checklist are
/// dropped.
fn score_gates(deliverables: &[Deliverable], gates: &GateConfig) -> Vec<GateSummary> {
    gates
        .required_by_gate
        .iter()
        .filter(|(_, required)| !required.is_empty())
        .map(|(gate, required)| {
            let gate_key = norm_key(gate);
            let approved = deliverables
                .iter()
                .filter(|d| {
                    norm_key(&d.gate) == gate_key
                        && d.status == DeliverableStatus::Approved
                        && required
                            .iter()
                            .any(|req| norm_key(req) == norm_key(&d.deliverable_type))
                })
                .count();
            let total = required.len();

            GateSummary {
                gate: gate.clone(),
                approved,
                total,
                gate_approval_rate: if total > 0 { approved as f64 / total as f64 } else { 0.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use renohub_domain::utils::text::pair_key;

    use super::*;

    fn deliverable_page(id: &str, gate: &str, doc_type: &str, status: &str) -> Page {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "url": format!("https://notion.so/{id}"),
            "properties": {
                "Select Deliverable:": { "type": "title", "title": [{ "plain_text": doc_type }] },
                "Gate": { "type": "multi_select", "multi_select": [{ "name": gate }] },
                "Status": { "type": "select", "select": { "name": status } },
                "Category": { "type": "select", "select": { "name": "Design Document" } }
            }
        }))
        .expect("valid page")
    }

    fn small_gates() -> GateConfig {
        let mut required = std::collections::BTreeMap::new();
        required.insert(
            "G1 Concept".to_string(),
            vec!["G1 — Moodboard".to_string(), "G1 — 3D render".to_string()],
        );
        required.insert("G2 Schematic".to_string(), Vec::new());
        GateConfig { required_by_gate: required }
    }

    #[test]
    fn synthesizes_exactly_one_placeholder_per_missing_required_item() {
        let pages = vec![deliverable_page("d1", "G1 Concept", "G1 — Moodboard", "Approved")];
        let result = reconcile(&pages, &small_gates());

        let placeholders: Vec<_> =
            result.deliverables.iter().filter(|d| d.id.is_none()).collect();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].deliverable_type, "G1 — 3D render");
        assert_eq!(placeholders[0].status, DeliverableStatus::Missing);
        assert!(placeholders[0].assignees.is_empty());
        assert!(placeholders[0].url.is_none());
    }

    #[test]
    fn reconciliation_is_idempotent_on_placeholder_keys() {
        let pages = vec![deliverable_page("d1", "G1 Concept", "G1 — Moodboard", "Approved")];
        let gates = small_gates();

        let first = reconcile(&pages, &gates);
        let second = reconcile(&pages, &gates);

        let keys = |r: &Reconciliation| {
            let mut keys: Vec<_> = r
                .deliverables
                .iter()
                .map(|d| pair_key(&d.gate, &d.deliverable_type))
                .collect();
            keys.sort();
            keys
        };
        assert_eq!(keys(&first), keys(&second));

        let unique: std::collections::HashSet<_> = keys(&first).into_iter().collect();
        assert_eq!(unique.len(), first.deliverables.len(), "no duplicate keys");
    }

    #[test]
    fn free_text_matching_tolerates_case_and_dash_variants() {
        // Hand-entered type with ASCII dash and odd casing must still match
        // the checklist's em-dash entry.
        let pages = vec![deliverable_page("d1", "G1 Concept", "g1 - MOODBOARD", "approved")];
        let result = reconcile(&pages, &small_gates());

        let g1 = &result.gates[0];
        assert_eq!(g1.gate, "G1 Concept");
        assert_eq!(g1.approved, 1);
        assert_eq!(g1.total, 2);
        assert!((g1.gate_approval_rate - 0.5).abs() < f64::EPSILON);

        // No placeholder was synthesized for the matched item.
        assert!(!result
            .deliverables
            .iter()
            .any(|d| d.id.is_none() && norm_key(&d.deliverable_type) == "g1 - moodboard"));
    }

    #[test]
    fn total_counts_required_items_not_submissions() {
        // Two extra non-required submissions must not inflate the total.
        let pages = vec![
            deliverable_page("d1", "G1 Concept", "G1 — Moodboard", "Approved"),
            deliverable_page("d2", "G1 Concept", "Site photos", "Approved"),
            deliverable_page("d3", "G1 Concept", "Meeting notes", "Submitted"),
        ];
        let result = reconcile(&pages, &small_gates());

        let g1 = &result.gates[0];
        assert_eq!(g1.total, 2);
        assert_eq!(g1.approved, 1);
    }

    #[test]
    fn gates_with_empty_checklists_are_dropped() {
        let result = reconcile(&[], &small_gates());
        assert_eq!(result.gates.len(), 1, "G2 Schematic has no required items");
        assert_eq!(result.gates[0].gate, "G1 Concept");
    }

    #[test]
    fn empty_database_yields_zero_approved_full_totals() {
        let result = reconcile(&[], &small_gates());

        let g1 = &result.gates[0];
        assert_eq!(g1.approved, 0);
        assert_eq!(g1.total, 2);
        assert_eq!(g1.gate_approval_rate, 0.0);
        assert_eq!(result.deliverables.len(), 2, "every required item synthesized");
    }

    #[test]
    fn construction_certificates_use_the_review_status_column() {
        let page: Page = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "properties": {
                "Select Deliverable:": { "type": "title", "title": [{ "plain_text": "G5 — Structural works complete" }] },
                "Gate": { "type": "multi_select", "multi_select": [{ "name": "G5 Construction Documentation" }] },
                "Category": { "type": "select", "select": { "name": "Construction Certificate" } },
                "Status": { "type": "select", "select": { "name": "Draft" } },
                "Review Status": { "type": "select", "select": { "name": "Pending Review" } }
            }
        }))
        .expect("valid page");

        let result = reconcile(&[page], &GateConfig::default());
        let cert = result
            .deliverables
            .iter()
            .find(|d| d.id.as_deref() == Some("c1"))
            .expect("certificate mapped");
        assert_eq!(cert.status, DeliverableStatus::Submitted);
        assert!(cert.is_critical);
    }
}
