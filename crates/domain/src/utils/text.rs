//! Pure string utilities for matching free-text field values.
//!
//! Designers type deliverable names by hand, so checklist matching never
//! uses exact equality: keys are lowercased, trimmed, whitespace-collapsed,
//! and dash variants (em dash, en dash, minus sign) are unified before
//! comparison.

/// Normalize a string for use as a comparison key.
#[must_use]
pub fn norm_key(s: &str) -> String {
    let folded: String = s
        .chars()
        .map(|c| match c {
            '\u{2014}' | '\u{2013}' | '\u{2212}' => '-',
            other => other,
        })
        .collect();

    folded.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Composite key for deliverable uniqueness within one reconciliation run.
#[must_use]
pub fn pair_key(gate: &str, deliverable_type: &str) -> String {
    format!("{}|{}", norm_key(gate), norm_key(deliverable_type))
}
