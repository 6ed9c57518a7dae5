//! Domain types mirroring the fulfillment API's wire shapes.
//!
//! Money is [`rust_decimal::Decimal`] throughout; directions ("+"/"-") are
//! carried separately from magnitudes, exactly as the API serializes them.

mod advice;
mod asset;
mod projection;
mod user;
mod wallet;

pub use advice::{Advice, InvestmentOrder, RiskAmountQuery, RiskBand};
pub use asset::{Asset, AssetDetail, AssetStatistics, Metrics, Portfolio};
pub use projection::monthly_projection;
pub use user::User;
pub use wallet::{DayExpenses, Direction, ExpensesStatistics, Transaction, WalletId, WalletSummary};
