use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wallet identifier - newtype for type safety.
///
/// The inner UUID is private so all construction goes through the defined
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletId(Uuid);

impl WalletId {
    /// Create a new `WalletId` from a UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the wallet ID as a UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for WalletId {
    fn from(id: Uuid) -> Self {
        Self::new(id)
    }
}

/// Sign of a money amount, serialized as `"+"` or `"-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "+")]
    Inflow,
    #[serde(rename = "-")]
    Outflow,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "+"),
            Self::Outflow => write!(f, "-"),
        }
    }
}

/// One wallet tile on the home view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub id: WalletId,
    pub bank_name: String,
    pub card_number: String,
    pub balance: Decimal,
}

impl WalletSummary {
    /// Last four digits of the card number, for masked display.
    #[must_use]
    pub fn card_suffix(&self) -> &str {
        let digits = self.card_number.len();
        &self.card_number[digits.saturating_sub(4)..]
    }
}

/// A single wallet transaction. The amount is always non-negative; the sign
/// lives in `sum_direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub sum: Decimal,
    pub sum_direction: Direction,
}

/// Daily purchases/sells totals from the expenses statistics endpoint,
/// keyed by the day's Unix timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayExpenses {
    pub purchases: Decimal,
    pub sells: Decimal,
}

/// Expenses statistics: day timestamp to totals.
pub type ExpensesStatistics = BTreeMap<i64, DayExpenses>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_id_roundtrip() {
        let id: WalletId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_transaction_deserializes_api_shape() {
        let tx: Transaction = serde_json::from_str(
            r#"{"created_at": "2021-06-03T10:15:00Z", "name": "Purchase of 3 asset(s)",
                "sum": "8232.49", "sum_direction": "-"}"#,
        )
        .unwrap();
        assert_eq!(tx.sum, dec!(8232.49));
        assert_eq!(tx.sum_direction, Direction::Outflow);
    }

    #[test]
    fn test_card_suffix() {
        let wallet = WalletSummary {
            id: WalletId::new(Uuid::nil()),
            bank_name: "Monzo".to_string(),
            card_number: "4111111111111111".to_string(),
            balance: dec!(100),
        };
        assert_eq!(wallet.card_suffix(), "1111");
    }

    #[test]
    fn test_expenses_statistics_integer_keys() {
        let stats: ExpensesStatistics = serde_json::from_str(
            r#"{"1622678400": {"purchases": "8232.49", "sells": "5000.0"},
                "1623024000": {"purchases": "600.0", "sells": "0"}}"#,
        )
        .unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&1622678400].sells, dec!(5000.0));
    }
}
