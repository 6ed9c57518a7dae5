use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wallet::Direction;

/// Portfolio-level risk/return statistics, all in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub rate_of_return: Decimal,
    pub volatility: Decimal,
    pub value_at_risk: Decimal,
}

/// Market statistics attached to an asset row.
///
/// `None` on the wire means the statistics service was unavailable; the row
/// still renders without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStatistics {
    pub long_name: String,
    pub current_price: Decimal,
    pub change_for_day: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_for_day_direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_direction: Option<Direction>,
}

/// One position in a portfolio or advice allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Short market name, e.g. `GOOG`.
    pub asset_name: String,
    /// Percentage of the whole portfolio, 0-100.
    pub part_of_portfolio: u8,
    pub overall_sum: Decimal,
    #[serde(default)]
    pub statistics: Option<AssetStatistics>,
}

/// The purchased portfolio returned by `GET /assets/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub metrics: Metrics,
    pub assets: Vec<Asset>,
    pub invested_sum: Decimal,
}

/// Detailed per-asset statistics from `GET /assets/{name}/stat/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub long_name: String,
    pub exchange: String,
    pub timezone: String,
    pub currency: String,
    pub previous_close: Decimal,
    pub current_price: Decimal,
    pub change_for_day: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_for_day_direction: Option<Direction>,
    pub change_for_day_sum: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_for_day_sum_direction: Option<Direction>,
    /// Total traded volume formatted by the server, e.g. `15.3M`.
    pub volume: Option<String>,
    pub day_range_low: Decimal,
    pub day_range_high: Decimal,
    pub year_range_low: Decimal,
    pub year_range_high: Decimal,
    pub timestamp: i64,
    /// Price at day start for the last months, keyed by millisecond timestamp.
    pub history: BTreeMap<i64, Decimal>,
}
