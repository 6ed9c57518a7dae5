//! Remote API port.
//!
//! [`Api`] is the one seam between the orchestrator and the network: one
//! method per remote operation, each failing with the adapter taxonomy in
//! [`ApiError`](crate::error::ApiError). The production implementation is
//! [`HttpApi`]; tests script the port through the testkit.

mod http;
mod types;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    Advice, AssetDetail, ExpensesStatistics, InvestmentOrder, Portfolio, RiskAmountQuery,
    Transaction, User, WalletId, WalletSummary,
};
use crate::error::ApiResult;

pub use http::HttpApi;
pub use types::{LoginRequest, LoginResponse};

/// Typed remote operations of the fulfillment API.
///
/// Implementations attach the current credential to every request and
/// surface failures verbatim; retry policy (there is none) belongs to
/// callers.
#[async_trait]
pub trait Api: Send + Sync {
    /// `POST /auth/login/` - exchange credentials for a bearer token.
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// `GET /auth/logout/` - invalidate the server-side session.
    async fn logout(&self) -> ApiResult<()>;

    /// `GET /auth/user/` - the identity probe.
    async fn current_user(&self) -> ApiResult<User>;

    /// `GET /wallets/` - wallet summaries for the logged-in user.
    async fn wallets(&self) -> ApiResult<Vec<WalletSummary>>;

    /// `GET /wallets/{id}/transactions/` - transactions of one wallet.
    async fn wallet_transactions(&self, wallet: &WalletId) -> ApiResult<Vec<Transaction>>;

    /// `POST /wallets/{id}/topup/` - add funds to a wallet.
    async fn top_up(&self, wallet: &WalletId, sum: Decimal) -> ApiResult<()>;

    /// `GET /wallets/expenses/stat/` - daily purchases/sells totals.
    async fn expenses_statistics(&self) -> ApiResult<ExpensesStatistics>;

    /// `GET /assets/` - the purchased portfolio; `None` when nothing is
    /// purchased yet (HTTP 204).
    async fn portfolio(&self) -> ApiResult<Option<Portfolio>>;

    /// `GET /assets/advice/` - advice at the server-chosen defaults.
    async fn initial_advice(&self) -> ApiResult<Advice>;

    /// `GET /assets/advice/?investing_sum=&risk_level=` - advice at an
    /// explicit risk level and sum.
    async fn advice(&self, query: &RiskAmountQuery) -> ApiResult<Advice>;

    /// `GET /assets/{name}/stat/` - detailed statistics for one asset.
    async fn asset_detail(&self, name: &str) -> ApiResult<AssetDetail>;

    /// `POST /assets/` - sell the existing portfolio (if any) and purchase
    /// the given allocation.
    async fn submit_investment(&self, order: &InvestmentOrder) -> ApiResult<()>;
}
