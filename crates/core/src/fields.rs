//! Field-name alias tables for the Notion schemas.
//!
//! Column names drifted across the dashboard's history (snake_case vs
//! display names, renamed relations). Each logical attribute maps to the
//! list of accepted source names, resolved in order by
//! [`Page::prop`](renohub_domain::Page::prop); first match wins.

// Budget lines
pub const IN_SCOPE: &[&str] = &["inScope", "In Scope"];
pub const SUPPLY_MYR: &[&str] = &["supply_myr", "Supply (MYR)"];
pub const INSTALL_MYR: &[&str] = &["install_myr", "Install (MYR)"];
pub const TRADE: &[&str] = &["Trade"];

// Deliverables
pub const DELIVERABLE_TYPE: &[&str] = &["Select Deliverable:"];
pub const DELIVERABLE_TAG: &[&str] = &["Deliverable"];
pub const GATE: &[&str] = &["Gate"];
pub const GATE_AUTO: &[&str] = &["Gate (Auto)"];
pub const CATEGORY: &[&str] = &["Category"];
pub const STATUS: &[&str] = &["Status"];
pub const REVIEW_STATUS: &[&str] = &["Review Status"];
pub const OWNER: &[&str] = &["Owner"];
pub const TARGET_DUE: &[&str] = &["Target Due"];
pub const PRIORITY: &[&str] = &["Priority"];
pub const FILES: &[&str] = &["File"];
pub const ATTACHED_DOCUMENT: &[&str] = &["Attach your document"];
pub const COMMENTS: &[&str] = &["Comments"];
pub const SUBMITTED_BY: &[&str] = &["Submitted By"];
pub const MERGED_FROM: &[&str] = &["Merged From"];

// Payments
pub const DUE_DATE: &[&str] = &["DueDate", "Due Date"];
pub const PAID_DATE: &[&str] = &["PaidDate", "Paid Date"];
pub const AMOUNT_MYR: &[&str] = &["Amount (RM)", "Amount (MYR)"];
pub const PAYMENT_FOR: &[&str] = &["Payment For"];
pub const PAYMENT_VENDOR: &[&str] = &["Vendor"];

// Actuals & vendor registry
pub const VENDOR_RELATION: &[&str] = &["Vendor_Registry", "Vendor"];
pub const COMPANY_NAME: &[&str] = &["Company_Name", "Name"];
pub const PAID_MYR: &[&str] = &["Paid (MYR)"];

// Milestones
pub const RISK_STATUS: &[&str] = &["Risk_Status"];

// Activity log
pub const EVENT_TYPE: &[&str] = &["Event_Type"];
pub const ACTIVITY_ID: &[&str] = &["Activity_ID"];
pub const EVENT_DESCRIPTION: &[&str] = &["Event_Description"];
pub const EVENT_TIMESTAMP: &[&str] = &["Event_Timestamp"];

// Sourcing master list (bids)
pub const ITEM_NAME: &[&str] = &["Item Name"];
pub const BID_CATEGORY: &[&str] = &["Category"];
pub const ROOM: &[&str] = &["Room"];
pub const BID_VENDOR: &[&str] = &["Vendor"];
pub const QUANTITY: &[&str] = &["Quantity"];
pub const UNIT_PRICE_MYR: &[&str] = &["Unit Price (MYR)"];
pub const TOTAL_PRICE_MYR: &[&str] = &["Total Price (MYR)"];
pub const COVERAGE: &[&str] = &["Coverage"];
pub const NOTES: &[&str] = &["Notes"];
