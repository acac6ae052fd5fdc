//! The dedupe state machine over one submission.
//!
//! Form submissions land as pages titled "New submission" with the intended
//! deliverable carried in a multi-select. Each run either promotes the page
//! in place (no duplicate) or merges it into the existing record and deletes
//! it. A merged-from marker is written on the survivor before the delete and
//! "already gone" deletes are tolerated, so a retried run converges instead
//! of double-appending.

use std::sync::Arc;

use chrono::NaiveDate;
use renohub_domain::constants::NEW_SUBMISSION_TITLE;
use renohub_domain::{Page, PropertyValue, RenoHubError, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::dedupe::DeliverableStore;
use crate::{fields, properties};

/// What one dedupe run did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DedupeOutcome {
    /// Nothing to do for this page.
    Skipped { reason: String },
    /// No duplicate existed; the submission became the canonical record.
    Promoted { deliverable: String },
    /// Merged into an existing record; the submission was deleted.
    Merged { deliverable: String, survivor_id: String, deleted_id: String },
}

/// Dedupe over the deliverables store.
pub struct DedupeService {
    store: Arc<dyn DeliverableStore>,
}

impl DedupeService {
    pub fn new(store: Arc<dyn DeliverableStore>) -> Self {
        Self { store }
    }

    /// Run the state machine for one submission page.
    ///
    /// `today` stamps merged comments; callers pass the current date.
    pub async fn process_submission(
        &self,
        page_id: &str,
        today: NaiveDate,
    ) -> Result<DedupeOutcome> {
        let submission = self.store.retrieve(page_id).await?;

        let Some(deliverable) =
            properties::multi_select(&submission, fields::DELIVERABLE_TAG).into_iter().next()
        else {
            return Ok(DedupeOutcome::Skipped { reason: "no deliverable selected".to_string() });
        };

        let title = properties::text(&submission, fields::DELIVERABLE_TYPE);
        if !title.is_empty() && title != NEW_SUBMISSION_TITLE {
            return Ok(DedupeOutcome::Skipped { reason: "already titled".to_string() });
        }

        let candidates = self.store.find_by_title(&deliverable).await?;
        let Some(existing) = candidates.iter().find(|p| p.id != page_id) else {
            self.store.update(page_id, title_property(&deliverable)).await?;
            info!(page_id, deliverable = %deliverable, "promoted submission to canonical record");
            return Ok(DedupeOutcome::Promoted { deliverable });
        };

        // A survivor already marked with this submission id means a previous
        // run merged but failed before the delete; skip straight to it.
        let merged_from = properties::text(existing, fields::MERGED_FROM);
        if !merged_from.contains(page_id) {
            let update = merge_properties(existing, &submission, page_id, today)?;
            self.store.update(&existing.id, update).await?;
        }
        self.store.delete(page_id).await?;

        info!(
            page_id,
            survivor_id = %existing.id,
            deliverable = %deliverable,
            "merged duplicate submission"
        );
        Ok(DedupeOutcome::Merged {
            deliverable,
            survivor_id: existing.id.clone(),
            deleted_id: page_id.to_string(),
        })
    }

    /// Process every page still titled "New submission". Per-page failures
    /// are logged and skipped so one bad record cannot stall the sweep.
    pub async fn sweep(&self, today: NaiveDate) -> Result<Vec<DedupeOutcome>> {
        let pending = self.store.find_by_title(NEW_SUBMISSION_TITLE).await?;
        info!(pending = pending.len(), "dedupe sweep started");

        let mut outcomes = Vec::with_capacity(pending.len());
        for page in &pending {
            match self.process_submission(&page.id, today).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(page_id = %page.id, error = %err, "dedupe sweep entry failed");
                    outcomes.push(DedupeOutcome::Skipped { reason: err.to_string() });
                }
            }
        }
        Ok(outcomes)
    }
}

fn title_property(deliverable: &str) -> Value {
    json!({
        fields::DELIVERABLE_TYPE[0]: {
            "title": [{ "text": { "content": deliverable } }]
        }
    })
}

/// Build the property patch that folds `submission` into `existing`.
fn merge_properties(
    existing: &Page,
    submission: &Page,
    submission_id: &str,
    today: NaiveDate,
) -> Result<Value> {
    let mut props = Map::new();

    // Files are appended, never replaced, duplicates included.
    for names in [fields::FILES, fields::ATTACHED_DOCUMENT] {
        let new_files = properties::files(submission, names);
        if !new_files.is_empty() {
            let mut merged = properties::files(existing, names);
            merged.extend(new_files);
            props.insert(names[0].to_string(), json!({ "files": to_value(&merged)? }));
        }
    }

    let new_comments = properties::text(submission, fields::COMMENTS);
    if !new_comments.is_empty() {
        let existing_comments = properties::text(existing, fields::COMMENTS);
        let merged = if existing_comments.is_empty() {
            new_comments
        } else {
            format!("{existing_comments}\n\n[{}] {new_comments}", today.format("%Y-%m-%d"))
        };
        props.insert(
            fields::COMMENTS[0].to_string(),
            json!({ "rich_text": [{ "text": { "content": merged } }] }),
        );
    }

    props.insert(fields::STATUS[0].to_string(), json!({ "select": { "name": "Submitted" } }));

    for names in [fields::CATEGORY, fields::GATE, fields::SUBMITTED_BY, fields::TRADE] {
        if let Some(payload) = submission.prop(names).and_then(copyable) {
            props.insert(names[0].to_string(), payload);
        }
    }

    if let Some(PropertyValue::Date { date: Some(date) }) = submission.prop(fields::TARGET_DUE) {
        props.insert(fields::TARGET_DUE[0].to_string(), json!({ "date": to_value(date)? }));
    }

    let marker = match properties::text(existing, fields::MERGED_FROM) {
        m if m.is_empty() => submission_id.to_string(),
        m => format!("{m}, {submission_id}"),
    };
    props.insert(
        fields::MERGED_FROM[0].to_string(),
        json!({ "rich_text": [{ "text": { "content": marker } }] }),
    );

    Ok(Value::Object(props))
}

/// Untagged patch payload for a select or non-empty multi-select.
fn copyable(value: &PropertyValue) -> Option<Value> {
    match value {
        PropertyValue::Select { select: Some(option) } => {
            Some(json!({ "select": { "name": option.name } }))
        }
        PropertyValue::MultiSelect { multi_select } if !multi_select.is_empty() => {
            let names: Vec<Value> =
                multi_select.iter().map(|o| json!({ "name": o.name })).collect();
            Some(json!({ "multi_select": names }))
        }
        _ => None,
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| RenoHubError::Internal(e.to_string()))
}
