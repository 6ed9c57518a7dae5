//! Data-fetch orchestration.
//!
//! The transport gives no guarantee about completion order, so every
//! logical fetch target (advice query, transactions-for-wallet) tags its
//! requests with a monotonic sequence number from [`Latest`] and publishes
//! a completion only when no newer request has been issued since. A
//! superseded completion is discarded, never applied - that is the whole
//! cancellation story.

mod advice;
mod latest;
mod selection;

pub use advice::{AdviceRefetcher, AdviceState};
pub use latest::{Latest, Ticket};
pub use selection::{TransactionFeed, TransactionsState};
