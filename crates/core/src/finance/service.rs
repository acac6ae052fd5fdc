//! Aggregation over the budget, actuals, payments and vendor databases.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Months, NaiveDate};
use renohub_domain::constants::{FORECAST_MONTHS, RECENT_PAID_CAP, TOP_VENDORS_CAP, UPCOMING_PAYMENTS_CAP};
use renohub_domain::{
    norm_key, BudgetRules, FinancialSummary, ForecastMonth, Page, PaymentItem, PaymentsSchedule,
    VendorSpend,
};
use tracing::debug;

use crate::{fields, properties};

/// Build the financial view for one request.
///
/// `now` is the request's calendar date; payment classification and the
/// forecast window are both anchored to it. Status comparisons are
/// case-insensitive throughout, records with lowercase statuses count the
/// same as their canonical forms.
pub fn aggregate(
    budget: &[Page],
    actuals: &[Page],
    payments: &[Page],
    vendors: &[Page],
    rules: &BudgetRules,
    now: NaiveDate,
) -> FinancialSummary {
    let subtotal_myr = budget_subtotal(budget);
    let budget_myr = rules.total_budget(subtotal_myr);
    let budget_by_trade = budget_by_trade(budget);

    let paid_by_vendor = paid_by_vendor(actuals, vendors);
    let paid_myr: f64 = paid_by_vendor.values().sum();
    let top_vendors = top_vendors(&paid_by_vendor);

    let overdue = overdue_payments(payments, now);
    let upcoming = upcoming_payments(payments, now);
    let recent_paid = recent_paid_payments(payments);
    let forecast = forecast(payments, now);

    let total_overdue_myr: f64 = overdue.iter().map(|p| p.amount).sum();
    let total_outstanding_myr: f64 =
        total_overdue_myr + upcoming.iter().map(|p| p.amount).sum::<f64>();

    debug!(
        budget_lines = budget.len(),
        payments = payments.len(),
        overdue = overdue.len(),
        upcoming = upcoming.len(),
        "aggregated financials"
    );

    FinancialSummary {
        budget_myr,
        subtotal_myr,
        paid_myr,
        budget_by_trade,
        top_vendors,
        schedule: PaymentsSchedule { upcoming, overdue, recent_paid, forecast },
        total_outstanding_myr,
        total_overdue_myr,
    }
}

fn budget_subtotal(budget: &[Page]) -> f64 {
    budget
        .iter()
        .filter(|p| properties::flag(p, fields::IN_SCOPE))
        .map(line_total)
        .sum()
}

fn budget_by_trade(budget: &[Page]) -> BTreeMap<String, f64> {
    let mut by_trade = BTreeMap::new();
    for page in budget.iter().filter(|p| properties::flag(p, fields::IN_SCOPE)) {
        let trade = match properties::text(page, fields::TRADE) {
            t if t.is_empty() => "Other".to_string(),
            t => t,
        };
        *by_trade.entry(trade).or_insert(0.0) += line_total(page);
    }
    by_trade
}

fn line_total(page: &Page) -> f64 {
    properties::number(page, fields::SUPPLY_MYR).unwrap_or(0.0)
        + properties::number(page, fields::INSTALL_MYR).unwrap_or(0.0)
}

/// Paid-to-date spend per vendor name, resolved through the vendor registry
/// relation. Unresolvable relations land under "Unknown".
fn paid_by_vendor(actuals: &[Page], vendors: &[Page]) -> HashMap<String, f64> {
    let registry: HashMap<&str, String> = vendors
        .iter()
        .map(|p| {
            let name = match properties::text(p, fields::COMPANY_NAME) {
                n if n.is_empty() => "Unknown".to_string(),
                n => n,
            };
            (p.id.as_str(), name)
        })
        .collect();

    let mut by_vendor = HashMap::new();
    for page in actuals.iter().filter(|p| status_is(p, fields::STATUS, "paid")) {
        let name = properties::relation_id(page, fields::VENDOR_RELATION)
            .and_then(|id| registry.get(id.as_str()).cloned())
            .unwrap_or_else(|| "Unknown".to_string());
        *by_vendor.entry(name).or_insert(0.0) +=
            properties::number(page, fields::PAID_MYR).unwrap_or(0.0);
    }
    by_vendor
}

fn top_vendors(paid_by_vendor: &HashMap<String, f64>) -> Vec<VendorSpend> {
    let mut ranked: Vec<_> = paid_by_vendor.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOP_VENDORS_CAP)
        .map(|(name, paid)| VendorSpend { name: name.clone(), paid: *paid, trade: "—".to_string() })
        .collect()
}

fn status_is(page: &Page, names: &[&str], expected: &str) -> bool {
    norm_key(&properties::text(page, names)) == expected
}

fn payment_item(page: &Page) -> PaymentItem {
    let payment_for = match properties::text(page, fields::PAYMENT_FOR) {
        t if t.is_empty() => "Untitled".to_string(),
        t => t,
    };
    PaymentItem {
        id: page.id.clone(),
        payment_for,
        vendor: properties::text(page, fields::PAYMENT_VENDOR),
        amount: properties::number(page, fields::AMOUNT_MYR).unwrap_or(0.0),
        due_date: properties::date_str(page, fields::DUE_DATE),
        paid_date: properties::date_str(page, fields::PAID_DATE),
        url: page.url.clone(),
    }
}

fn is_outstanding_or_overdue(page: &Page) -> bool {
    status_is(page, fields::STATUS, "outstanding") || status_is(page, fields::STATUS, "overdue")
}

fn due_date(page: &Page) -> Option<NaiveDate> {
    properties::date(page, fields::DUE_DATE)
}

/// Outstanding or overdue payments whose due date has passed, ascending by
/// due date. Not capped; every overdue row surfaces.
fn overdue_payments(payments: &[Page], now: NaiveDate) -> Vec<PaymentItem> {
    let mut overdue: Vec<PaymentItem> = payments
        .iter()
        .filter(|p| is_outstanding_or_overdue(p) && due_date(p).is_some_and(|d| d < now))
        .map(payment_item)
        .collect();
    overdue.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    overdue
}

/// Outstanding payments not yet due (or with no due date), ascending by due
/// date with undated rows last, capped to ten.
fn upcoming_payments(payments: &[Page], now: NaiveDate) -> Vec<PaymentItem> {
    let mut upcoming: Vec<PaymentItem> = payments
        .iter()
        .filter(|p| {
            status_is(p, fields::STATUS, "outstanding")
                && due_date(p).is_none_or(|d| d >= now)
        })
        .map(payment_item)
        .collect();
    upcoming.sort_by(|a, b| match (&a.due_date, &b.due_date) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(x), Some(y)) => x.cmp(y),
    });
    upcoming.truncate(UPCOMING_PAYMENTS_CAP);
    upcoming
}

/// Paid payments, most recent first, capped to ten.
fn recent_paid_payments(payments: &[Page]) -> Vec<PaymentItem> {
    let mut paid: Vec<PaymentItem> = payments
        .iter()
        .filter(|p| status_is(p, fields::STATUS, "paid"))
        .map(payment_item)
        .collect();
    paid.sort_by(|a, b| b.paid_date.cmp(&a.paid_date));
    paid.truncate(RECENT_PAID_CAP);
    paid
}

/// Four-month cash-flow forecast over outstanding and overdue payments.
///
/// Payments without a due date, or due before the current month, are folded
/// entirely into month 0 as unscheduled catch-up, so the four buckets sum to
/// everything owed inside the window plus everything already late.
fn forecast(payments: &[Page], now: NaiveDate) -> Vec<ForecastMonth> {
    let owed: Vec<&Page> = payments.iter().filter(|p| is_outstanding_or_overdue(p)).collect();

    let first_month = first_of_month(now);
    let unscheduled: f64 = owed
        .iter()
        .filter(|p| due_date(p).is_none_or(|d| d < first_month))
        .map(|p| properties::number(p, fields::AMOUNT_MYR).unwrap_or(0.0))
        .sum();

    (0..FORECAST_MONTHS)
        .map(|i| {
            let month_start = first_month + Months::new(i as u32);
            let month_end = month_start + Months::new(1);

            let mut total_amount: f64 = owed
                .iter()
                .filter(|p| due_date(p).is_some_and(|d| d >= month_start && d < month_end))
                .map(|p| properties::number(p, fields::AMOUNT_MYR).unwrap_or(0.0))
                .sum();
            if i == 0 {
                total_amount += unscheduled;
            }

            ForecastMonth { month: month_start.format("%b").to_string(), total_amount }
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // The first of any month always exists.
    date.with_day(1).unwrap_or(date)
}
