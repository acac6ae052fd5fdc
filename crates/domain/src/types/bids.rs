//! Trade-room bid comparison types.

use serde::{Deserialize, Serialize};

/// One bid row from the sourcing master list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Bid {
    pub vendor: String,
    pub item_name: String,
    pub total_price_myr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_myr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub coverage: String,
    pub notes: String,
    pub url: Option<String>,
}

/// All bids for one (trade, room) group, sorted ascending by effective total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TradeRoomComparison {
    pub trade: String,
    pub room: String,
    pub vendor_count: usize,
    pub price_range: f64,
    pub lowest_bid: Bid,
    pub highest_bid: Bid,
    pub all_bids: Vec<Bid>,
}

/// Payload of `GET /proxy/bids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BidsReport {
    pub trade_room_comparisons: Vec<TradeRoomComparison>,
    pub total_groups: usize,
    pub total_bids: usize,
}
