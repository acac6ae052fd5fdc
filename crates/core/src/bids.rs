//! Trade-room bid comparison over the sourcing master list.

use std::collections::BTreeMap;

use renohub_domain::{Bid, BidsReport, Page, TradeRoomComparison};
use tracing::debug;

use crate::{fields, properties};

/// Group sourcing rows by (trade, room) and rank each group by price.
///
/// The effective total is the stored total price when present, else quantity
/// times unit price, else the bare unit price as a rate-only comparator.
/// Rows with no price data at all are skipped. Ties keep insertion order.
pub fn compare_bids(pages: &[Page]) -> BidsReport {
    let mut groups: BTreeMap<(String, String), Vec<Bid>> = BTreeMap::new();
    let mut total_bids = 0usize;

    for page in pages {
        let Some(bid) = map_bid(page) else { continue };
        let trade = properties::text(page, fields::BID_CATEGORY);
        let room = properties::text(page, fields::ROOM);
        groups.entry((trade, room)).or_default().push(bid);
        total_bids += 1;
    }

    let trade_room_comparisons: Vec<TradeRoomComparison> = groups
        .into_iter()
        .map(|((trade, room), mut bids)| {
            bids.sort_by(|a, b| a.total_price_myr.total_cmp(&b.total_price_myr));
            // Groups are never empty; a group only exists once a bid landed.
            let lowest_bid = bids[0].clone();
            let highest_bid = bids[bids.len() - 1].clone();
            TradeRoomComparison {
                trade,
                room,
                vendor_count: bids.len(),
                price_range: highest_bid.total_price_myr - lowest_bid.total_price_myr,
                lowest_bid,
                highest_bid,
                all_bids: bids,
            }
        })
        .collect();

    debug!(groups = trade_room_comparisons.len(), bids = total_bids, "compared sourcing bids");

    BidsReport { total_groups: trade_room_comparisons.len(), total_bids, trade_room_comparisons }
}

fn map_bid(page: &Page) -> Option<Bid> {
    let total = properties::number(page, fields::TOTAL_PRICE_MYR);
    let unit = properties::number(page, fields::UNIT_PRICE_MYR);
    let quantity = properties::number(page, fields::QUANTITY);

    let effective_total = match (total, unit, quantity) {
        (Some(t), _, _) => t,
        (None, Some(u), Some(q)) => u * q,
        (None, Some(u), None) => u,
        (None, None, _) => return None,
    };

    Some(Bid {
        vendor: properties::text(page, fields::BID_VENDOR),
        item_name: properties::text(page, fields::ITEM_NAME),
        total_price_myr: effective_total,
        unit_price_myr: unit,
        quantity,
        coverage: properties::text(page, fields::COVERAGE),
        notes: properties::text(page, fields::NOTES),
        url: page.url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid_page(
        vendor: &str,
        trade: &str,
        room: &str,
        total: Option<f64>,
        unit: Option<f64>,
        qty: Option<f64>,
    ) -> Page {
        serde_json::from_value(serde_json::json!({
            "id": format!("bid-{vendor}"),
            "properties": {
                "Item Name": { "type": "title", "title": [{ "plain_text": "Cabinet run" }] },
                "Vendor": { "type": "rich_text", "rich_text": [{ "plain_text": vendor }] },
                "Category": { "type": "select", "select": { "name": trade } },
                "Room": { "type": "select", "select": { "name": room } },
                "Total Price (MYR)": { "type": "number", "number": total },
                "Unit Price (MYR)": { "type": "number", "number": unit },
                "Quantity": { "type": "number", "number": qty }
            }
        }))
        .expect("valid page")
    }

    #[test]
    fn groups_sort_ascending_with_lowest_and_highest() {
        let pages = vec![
            bid_page("B", "Cabinetry", "Wet Kitchen", Some(17000.0), Some(212.5), Some(80.0)),
            bid_page("A", "Cabinetry", "Wet Kitchen", Some(12000.0), Some(150.0), Some(80.0)),
            bid_page("C", "Cabinetry", "Wet Kitchen", Some(14500.0), None, None),
        ];
        let report = compare_bids(&pages);

        assert_eq!(report.total_groups, 1);
        assert_eq!(report.total_bids, 3);
        let group = &report.trade_room_comparisons[0];
        assert_eq!(group.vendor_count, 3);
        assert_eq!(group.lowest_bid.vendor, "A");
        assert_eq!(group.highest_bid.vendor, "B");
        assert_eq!(group.price_range, 5000.0);
        let order: Vec<_> = group.all_bids.iter().map(|b| b.vendor.as_str()).collect();
        assert_eq!(order, ["A", "C", "B"]);
    }

    #[test]
    fn effective_total_falls_back_to_quantity_times_unit_then_unit() {
        let pages = vec![
            bid_page("computed", "Tiling", "Bath", None, Some(50.0), Some(10.0)),
            bid_page("rate-only", "Tiling", "Bath", None, Some(120.0), None),
            bid_page("no-price", "Tiling", "Bath", None, None, Some(4.0)),
        ];
        let report = compare_bids(&pages);

        assert_eq!(report.total_bids, 2, "rows with no price data are skipped");
        let group = &report.trade_room_comparisons[0];
        assert_eq!(group.lowest_bid.vendor, "rate-only");
        assert_eq!(group.lowest_bid.total_price_myr, 120.0);
        assert_eq!(group.highest_bid.total_price_myr, 500.0);
    }

    #[test]
    fn distinct_rooms_form_distinct_groups() {
        let pages = vec![
            bid_page("A", "Cabinetry", "Wet Kitchen", Some(100.0), None, None),
            bid_page("A", "Cabinetry", "Dry Kitchen", Some(200.0), None, None),
        ];
        let report = compare_bids(&pages);
        assert_eq!(report.total_groups, 2);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = compare_bids(&[]);
        assert_eq!(report.total_groups, 0);
        assert_eq!(report.total_bids, 0);
        assert!(report.trade_room_comparisons.is_empty());
    }
}
