//! Free-text status classification.
//!
//! The store's status values are inconsistent strings ("Pending Review",
//! "approved", "Resubmission required", ...), not a closed enum, so statuses
//! are normalized by keyword matching. Negations are checked before the
//! positive keywords so "Not approved" never counts as approved.

use renohub_domain::{norm_key, DeliverableStatus};

/// Map a free-text status or review-status string to the four-way enum.
pub fn normalize_status(raw: &str) -> DeliverableStatus {
    let normalized = norm_key(raw);
    if normalized.is_empty() {
        return DeliverableStatus::Missing;
    }

    if normalized.contains("reject")
        || normalized.contains("declined")
        || normalized.contains("not approved")
    {
        return DeliverableStatus::Rejected;
    }

    if normalized.contains("approved") {
        return DeliverableStatus::Approved;
    }

    if normalized.contains("pending")
        || normalized.contains("comment")
        || normalized.contains("resubmission")
        || normalized.contains("submit")
    {
        return DeliverableStatus::Submitted;
    }

    DeliverableStatus::Missing
}
