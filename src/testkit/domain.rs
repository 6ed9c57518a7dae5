//! Builders for domain values used across tests.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::{
    Advice, Asset, Direction, InvestmentOrder, Metrics, Portfolio, Transaction, User, WalletId,
    WalletSummary,
};

/// A probe-shaped user.
#[must_use]
pub fn user(username: &str) -> User {
    User {
        pk: 1,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
    }
}

/// A wallet with a fresh random id.
#[must_use]
pub fn wallet(bank_name: &str, balance: Decimal) -> WalletSummary {
    wallet_with_id(WalletId::new(Uuid::new_v4()), bank_name, balance)
}

#[must_use]
pub fn wallet_with_id(id: WalletId, bank_name: &str, balance: Decimal) -> WalletSummary {
    WalletSummary {
        id,
        bank_name: bank_name.to_string(),
        card_number: "4111111111111111".to_string(),
        balance,
    }
}

/// An outflow transaction at a fixed timestamp.
#[must_use]
pub fn transaction(name: &str, sum: Decimal) -> Transaction {
    Transaction {
        created_at: Utc.with_ymd_and_hms(2021, 6, 3, 10, 15, 0).unwrap(),
        name: name.to_string(),
        sum,
        sum_direction: Direction::Outflow,
    }
}

#[must_use]
pub fn metrics() -> Metrics {
    Metrics {
        rate_of_return: dec!(11.2),
        volatility: dec!(20.1),
        value_at_risk: dec!(9.5),
    }
}

/// A single-asset allocation summing to 100%.
#[must_use]
pub fn asset(name: &str, overall_sum: Decimal) -> Asset {
    Asset {
        asset_name: name.to_string(),
        part_of_portfolio: 100,
        overall_sum,
        statistics: None,
    }
}

/// Advice suggesting `suggested_sum` at `risk_level`.
#[must_use]
pub fn advice(risk_level: u8, suggested_sum: Decimal) -> Advice {
    Advice {
        metrics: metrics(),
        assets: vec![asset("GOOG", suggested_sum)],
        suggested_sum,
        risk_level,
    }
}

#[must_use]
pub fn portfolio(invested_sum: Decimal) -> Portfolio {
    Portfolio {
        metrics: metrics(),
        assets: vec![asset("GOOG", invested_sum)],
        invested_sum,
    }
}

#[must_use]
pub fn investment_order(invested_sum: Decimal) -> InvestmentOrder {
    InvestmentOrder {
        metrics: metrics(),
        assets: vec![asset("GOOG", invested_sum)],
        invested_sum,
    }
}
