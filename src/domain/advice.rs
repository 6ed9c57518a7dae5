use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::{Asset, Metrics};

/// A suggested allocation from `GET /assets/advice/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub metrics: Metrics,
    pub assets: Vec<Asset>,
    /// The sum the server suggests investing.
    pub suggested_sum: Decimal,
    /// The actual risk level of the advice, 0-100.
    pub risk_level: u8,
}

impl Advice {
    /// The discrete band the advice's risk level falls into.
    #[must_use]
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_level(self.risk_level)
    }
}

/// Body of `POST /assets/`: commit to an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentOrder {
    pub metrics: Metrics,
    pub assets: Vec<Asset>,
    pub invested_sum: Decimal,
}

impl InvestmentOrder {
    /// Build an order committing `invested_sum` to the advised allocation.
    #[must_use]
    pub fn from_advice(advice: &Advice, invested_sum: Decimal) -> Self {
        Self {
            metrics: advice.metrics.clone(),
            assets: advice.assets.clone(),
            invested_sum,
        }
    }
}

/// The slider state driving an advice refetch: a risk level and the sum the
/// user is ready to invest. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAmountQuery {
    /// Risk level, 0-100.
    pub risk_level: u8,
    /// Positive investing sum.
    pub amount: Decimal,
}

impl RiskAmountQuery {
    /// Create a query, clamping the risk level into 0-100.
    #[must_use]
    pub fn new(risk_level: u8, amount: Decimal) -> Self {
        Self {
            risk_level: risk_level.min(100),
            amount,
        }
    }
}

/// Discrete risk band for a continuous 0-100 risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Map a slider value into its band: 0-33 low, 34-66 medium, 67+ high.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        if level <= 33 {
            Self::Low
        } else if level <= 66 {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskBand::from_level(0), RiskBand::Low);
        assert_eq!(RiskBand::from_level(33), RiskBand::Low);
        assert_eq!(RiskBand::from_level(34), RiskBand::Medium);
        assert_eq!(RiskBand::from_level(66), RiskBand::Medium);
        assert_eq!(RiskBand::from_level(67), RiskBand::High);
        assert_eq!(RiskBand::from_level(100), RiskBand::High);
    }

    #[test]
    fn test_query_clamps_risk() {
        let query = RiskAmountQuery::new(130, dec!(500));
        assert_eq!(query.risk_level, 100);
    }

    #[test]
    fn test_order_from_advice() {
        let advice: Advice = serde_json::from_str(
            r#"{
                "metrics": {"rate_of_return": "8.0", "volatility": "12.0", "value_at_risk": "6.0"},
                "assets": [{"asset_name": "VOO", "part_of_portfolio": 100, "overall_sum": "900.0"}],
                "suggested_sum": "900.0",
                "risk_level": 40
            }"#,
        )
        .unwrap();
        assert_eq!(advice.risk_band(), RiskBand::Medium);

        let order = InvestmentOrder::from_advice(&advice, dec!(750));
        assert_eq!(order.invested_sum, dec!(750));
        assert_eq!(order.assets, advice.assets);
    }
}
