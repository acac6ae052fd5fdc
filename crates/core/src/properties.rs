//! Total, never-panicking extraction over the Notion property bag.
//!
//! Every accessor takes a list of accepted field names (see
//! [`crate::fields`]) and unwraps the tagged property value to a plain
//! scalar or list. Absent or malformed fields yield empty defaults rather
//! than errors; callers feed the results straight into arithmetic and string
//! comparison and rely on that contract.

use chrono::NaiveDate;
use renohub_domain::{FileRef, FormulaValue, Page, PropertyValue, RollupValue};

/// Plain-text rendering of a property value.
///
/// Title and rich text yield the first segment's plain text; select, status
/// and formula strings yield their payload; dates yield the ISO start
/// string; rollup arrays yield the joined text of their elements. Numeric
/// and boolean kinds render empty; use [`number`] and [`flag`] for those.
pub fn text(page: &Page, names: &[&str]) -> String {
    page.prop(names).map(value_text).unwrap_or_default()
}

/// Numeric payload of a number, numeric formula, or numeric rollup.
pub fn number(page: &Page, names: &[&str]) -> Option<f64> {
    match page.prop(names)? {
        PropertyValue::Number { number } => *number,
        PropertyValue::Formula { formula: FormulaValue::Number { number } } => *number,
        PropertyValue::Rollup { rollup: RollupValue::Number { number } } => *number,
        _ => None,
    }
}

/// Boolean payload of a checkbox or boolean formula. Absent fields are false.
pub fn flag(page: &Page, names: &[&str]) -> bool {
    match page.prop(names) {
        Some(PropertyValue::Checkbox { checkbox }) => *checkbox,
        Some(PropertyValue::Formula { formula: FormulaValue::Boolean { boolean } }) => {
            boolean.unwrap_or(false)
        }
        _ => false,
    }
}

/// ISO start string of a date property (or date formula / created time).
pub fn date_str(page: &Page, names: &[&str]) -> Option<String> {
    match page.prop(names)? {
        PropertyValue::Date { date } => date.as_ref().map(|d| d.start.clone()),
        PropertyValue::Formula { formula: FormulaValue::Date { date } } => {
            date.as_ref().map(|d| d.start.clone())
        }
        PropertyValue::CreatedTime { created_time } => Some(created_time.clone()),
        _ => None,
    }
}

/// Calendar date of a date property; datetimes are truncated to their day.
pub fn date(page: &Page, names: &[&str]) -> Option<NaiveDate> {
    parse_iso_date(&date_str(page, names)?)
}

/// Parse the date part of an ISO date or datetime string.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(0..10)?, "%Y-%m-%d").ok()
}

/// First related page id of a relation property.
pub fn relation_id(page: &Page, names: &[&str]) -> Option<String> {
    match page.prop(names)? {
        PropertyValue::Relation { relation } => relation.first().map(|r| r.id.clone()),
        _ => None,
    }
}

/// Names of a people property's members (empty names dropped).
pub fn people(page: &Page, names: &[&str]) -> Vec<String> {
    match page.prop(names) {
        Some(PropertyValue::People { people }) => {
            people.iter().filter_map(|p| p.name.clone()).filter(|n| !n.is_empty()).collect()
        }
        _ => Vec::new(),
    }
}

/// Option names of a multi-select property.
pub fn multi_select(page: &Page, names: &[&str]) -> Vec<String> {
    match page.prop(names) {
        Some(PropertyValue::MultiSelect { multi_select }) => {
            multi_select.iter().map(|o| o.name.clone()).collect()
        }
        _ => Vec::new(),
    }
}

/// File attachments of a files property, payloads untouched.
pub fn files(page: &Page, names: &[&str]) -> Vec<FileRef> {
    match page.prop(names) {
        Some(PropertyValue::Files { files }) => files.clone(),
        _ => Vec::new(),
    }
}

fn value_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Title { title } => {
            title.first().map(|s| s.plain_text.clone()).unwrap_or_default()
        }
        PropertyValue::RichText { rich_text } => {
            rich_text.first().map(|s| s.plain_text.clone()).unwrap_or_default()
        }
        PropertyValue::Select { select } => {
            select.as_ref().map(|o| o.name.clone()).unwrap_or_default()
        }
        PropertyValue::Status { status } => {
            status.as_ref().map(|o| o.name.clone()).unwrap_or_default()
        }
        PropertyValue::MultiSelect { multi_select } => {
            multi_select.first().map(|o| o.name.clone()).unwrap_or_default()
        }
        PropertyValue::Date { date } => date.as_ref().map(|d| d.start.clone()).unwrap_or_default(),
        PropertyValue::Formula { formula } => match formula {
            FormulaValue::String { string } => string.clone().unwrap_or_default(),
            FormulaValue::Date { date } => {
                date.as_ref().map(|d| d.start.clone()).unwrap_or_default()
            }
            _ => String::new(),
        },
        PropertyValue::Rollup { rollup } => match rollup {
            RollupValue::Array { array } => {
                array.iter().map(value_text).filter(|t| !t.is_empty()).collect::<Vec<_>>().join(", ")
            }
            _ => String::new(),
        },
        PropertyValue::Url { url } => url.clone().unwrap_or_default(),
        PropertyValue::CreatedTime { created_time } => created_time.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(props: serde_json::Value) -> Page {
        serde_json::from_value(serde_json::json!({ "id": "p1", "properties": props }))
            .expect("valid page")
    }

    #[test]
    fn text_unwraps_title_select_and_formula() {
        let page = page(serde_json::json!({
            "Name": { "type": "title", "title": [{ "plain_text": "Moodboard" }] },
            "Status": { "type": "select", "select": { "name": "Approved" } },
            "Review Status": { "type": "status", "status": null },
            "Label": { "type": "formula", "formula": { "type": "string", "string": "G3" } }
        }));

        assert_eq!(text(&page, &["Name"]), "Moodboard");
        assert_eq!(text(&page, &["Status"]), "Approved");
        assert_eq!(text(&page, &["Review Status"]), "");
        assert_eq!(text(&page, &["Label"]), "G3");
    }

    #[test]
    fn absent_or_malformed_fields_never_error() {
        let page = page(serde_json::json!({
            "Empty Title": { "type": "title", "title": [] },
            "No Number": { "type": "number", "number": null }
        }));

        assert_eq!(text(&page, &["Empty Title"]), "");
        assert_eq!(text(&page, &["Nothing Here", "Also Missing"]), "");
        assert_eq!(number(&page, &["No Number"]), None);
        assert_eq!(number(&page, &["Missing"]), None);
        assert!(!flag(&page, &["Missing"]));
        assert!(people(&page, &["Missing"]).is_empty());
    }

    #[test]
    fn number_reads_formula_and_rollup_payloads() {
        let page = page(serde_json::json!({
            "Plain": { "type": "number", "number": 12.5 },
            "Computed": { "type": "formula", "formula": { "type": "number", "number": 3.0 } },
            "Rolled": { "type": "rollup", "rollup": { "type": "number", "number": 9.0 } }
        }));

        assert_eq!(number(&page, &["Plain"]), Some(12.5));
        assert_eq!(number(&page, &["Computed"]), Some(3.0));
        assert_eq!(number(&page, &["Rolled"]), Some(9.0));
    }

    #[test]
    fn date_truncates_datetimes_to_the_day() {
        let page = page(serde_json::json!({
            "Due": { "type": "date", "date": { "start": "2025-11-22T09:30:00.000+08:00" } }
        }));

        assert_eq!(
            date(&page, &["Due"]),
            NaiveDate::from_ymd_opt(2025, 11, 22)
        );
    }

    #[test]
    fn rollup_array_joins_inner_text() {
        let page = page(serde_json::json!({
            "Tags": { "type": "rollup", "rollup": { "type": "array", "array": [
                { "type": "rich_text", "rich_text": [{ "plain_text": "one" }] },
                { "type": "rich_text", "rich_text": [{ "plain_text": "two" }] }
            ]}}
        }));

        assert_eq!(text(&page, &["Tags"]), "one, two");
    }

    #[test]
    fn relation_returns_first_linked_id() {
        let page = page(serde_json::json!({
            "Vendor_Registry": { "type": "relation", "relation": [
                { "id": "vendor-1" }, { "id": "vendor-2" }
            ]}
        }));

        assert_eq!(relation_id(&page, &["Vendor_Registry", "Vendor"]), Some("vendor-1".into()));
    }
}
