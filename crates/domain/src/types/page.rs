//! Notion page and property value types.
//!
//! A page is an opaque id, a URL, and a property bag. Property values are a
//! tagged union keyed by property kind, mirroring the wire format of the
//! Notion REST API, so extraction can pattern-match exhaustively instead of
//! probing dynamic fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row in the external document database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    /// Look up the first present property among the given names.
    ///
    /// Field names drifted across the dashboard's history, so logical
    /// attributes are resolved through a list of accepted source names.
    pub fn prop<'a>(&'a self, names: &[&str]) -> Option<&'a PropertyValue> {
        names.iter().find_map(|name| self.properties.get(*name))
    }
}

/// Tagged property value, one variant per Notion property kind.
///
/// Unknown kinds deserialize to [`PropertyValue::Unknown`] instead of
/// failing, preserving the never-throws extraction contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichTextSegment>,
    },
    RichText {
        rich_text: Vec<RichTextSegment>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Number {
        number: Option<f64>,
    },
    Date {
        date: Option<DateValue>,
    },
    Checkbox {
        checkbox: bool,
    },
    Formula {
        formula: FormulaValue,
    },
    Relation {
        relation: Vec<RelationRef>,
    },
    Rollup {
        rollup: RollupValue,
    },
    People {
        people: Vec<Person>,
    },
    Files {
        files: Vec<FileRef>,
    },
    Url {
        url: Option<String>,
    },
    CreatedTime {
        created_time: String,
    },
    #[serde(other)]
    Unknown,
}

/// One segment of a title or rich-text property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextSegment {
    #[serde(default)]
    pub plain_text: String,
}

/// A select / status / multi-select option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date property payload; `start` is an ISO date or datetime string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// The computed payload of a formula property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unknown,
}

/// A reference to a related page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// The computed payload of a rollup property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Number { number: Option<f64> },
    Array { array: Vec<PropertyValue> },
    #[serde(other)]
    Unknown,
}

/// A person referenced by a people property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
}

/// A file attachment entry. Kept opaque: merge policy concatenates these
/// payloads verbatim, duplicates included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Value,
}
