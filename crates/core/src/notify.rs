//! Deliverable update notifications: message assembly and the mail port.

use async_trait::async_trait;
use renohub_domain::{Page, Result};

use crate::{fields, properties};

/// One outbound plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

/// Outbound mail delivery, implemented by the HTTP mail client in
/// `renohub-infra`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Render the update notification for one deliverable page.
pub fn deliverable_update_email(page: &Page) -> EmailMessage {
    let deliverable = non_empty(properties::text(page, fields::DELIVERABLE_TYPE), "Untitled");
    let status = non_empty(properties::text(page, fields::STATUS), "N/A");
    let review_status = non_empty(properties::text(page, fields::REVIEW_STATUS), "N/A");
    let gate = non_empty(properties::multi_select(page, fields::GATE).join(", "), "N/A");
    let submitted_by =
        non_empty(properties::multi_select(page, fields::SUBMITTED_BY).join(", "), "N/A");
    let target_due =
        non_empty(properties::text(page, fields::TARGET_DUE), "Not set");
    let comments = non_empty(properties::text(page, fields::COMMENTS), "None");
    let page_url = format!("https://notion.so/{}", page.id.replace('-', ""));

    let subject = format!("Designer Deliverable Updated: {deliverable}");
    let body = format!(
        "A Designer Deliverable has been updated:\n\
         \n\
         DELIVERABLE: {deliverable}\n\
         GATE: {gate}\n\
         STATUS: {status}\n\
         REVIEW STATUS: {review_status}\n\
         SUBMITTED BY: {submitted_by}\n\
         TARGET DUE: {target_due}\n\
         \n\
         COMMENTS:\n\
         {comments}\n\
         \n\
         View in Notion: {page_url}\n\
         \n\
         Automated notification from the Designer Deliverables database\n"
    );

    EmailMessage { subject, body }
}

fn non_empty(value: String, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value }
}
