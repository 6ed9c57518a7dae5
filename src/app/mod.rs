//! Application orchestration.
//!
//! [`App`] wires the credential store, the HTTP adapter, the session state
//! machine, and the data fetchers into one explicitly constructed object -
//! single shared instance per running application, no hidden globals. The
//! presentation layer drives it from user events and observes the watch
//! surfaces it exposes.

mod notice;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::api::{Api, HttpApi};
use crate::config::Config;
use crate::domain::{
    Advice, AssetDetail, ExpensesStatistics, InvestmentOrder, Portfolio, RiskAmountQuery,
    Transaction, WalletId, WalletSummary,
};
use crate::error::Result;
use crate::fetch::{AdviceRefetcher, TransactionFeed};
use crate::session::{CredentialStore, Session, SessionManager};

pub use notice::{Notice, NoticeBoard};

/// The session and data-fetch orchestrator.
pub struct App {
    api: Arc<dyn Api>,
    credentials: Arc<CredentialStore>,
    session: SessionManager,
    advice: AdviceRefetcher,
    transactions: TransactionFeed,
    notices: NoticeBoard,
}

impl App {
    /// Build the production wiring: durable credential store and HTTP
    /// adapter per the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::open(
            config.storage.credentials_file.clone(),
        )?);
        let api: Arc<dyn Api> = Arc::new(HttpApi::new(&config.network.api_url, credentials.clone()));
        Ok(Self::with_api(config, api, credentials))
    }

    /// Build with an injected adapter. This is the seam the testkit uses.
    #[must_use]
    pub fn with_api(config: &Config, api: Arc<dyn Api>, credentials: Arc<CredentialStore>) -> Self {
        let session = SessionManager::new(api.clone(), credentials.clone());
        let advice = AdviceRefetcher::new(api.clone(), config.advice.throttle_window());
        let transactions = TransactionFeed::new(api.clone());
        Self {
            api,
            credentials,
            session,
            advice,
            transactions,
            notices: NoticeBoard::new(),
        }
    }

    /// Resolve identity once at startup. Nothing else is reachable until
    /// this probe completes.
    pub async fn start(&self) -> Session {
        self.session.probe().await
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    #[must_use]
    pub fn advice(&self) -> &AdviceRefetcher {
        &self.advice
    }

    #[must_use]
    pub fn transactions(&self) -> &TransactionFeed {
        &self.transactions
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Log in and re-probe. Errors pass through to the login surface.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        self.session.login(username, password).await
    }

    /// Log out, drop the credential, and forget per-session fetch state.
    pub async fn sign_out(&self) -> Result<()> {
        self.session.logout().await?;
        self.transactions.reset();
        Ok(())
    }

    /// Fetch wallet summaries and default-select the first wallet so its
    /// transactions start loading.
    pub async fn load_wallets(&self) -> Result<Vec<WalletSummary>> {
        let wallets = self.api.wallets().await?;
        self.transactions.select_default(&wallets);
        Ok(wallets)
    }

    /// Transactions for an explicitly chosen wallet, one-shot.
    pub async fn wallet_transactions(&self, wallet: &WalletId) -> Result<Vec<Transaction>> {
        Ok(self.api.wallet_transactions(wallet).await?)
    }

    /// Add funds to a wallet.
    pub async fn top_up(&self, wallet: &WalletId, sum: Decimal) -> Result<()> {
        self.api.top_up(wallet, sum).await?;
        Ok(())
    }

    pub async fn expenses(&self) -> Result<ExpensesStatistics> {
        Ok(self.api.expenses_statistics().await?)
    }

    /// The purchased portfolio; `None` when nothing is purchased yet.
    pub async fn load_portfolio(&self) -> Result<Option<Portfolio>> {
        Ok(self.api.portfolio().await?)
    }

    /// Load advice at the server-chosen defaults onto the advice surface.
    pub async fn refresh_advice(&self) {
        self.advice.refresh().await;
    }

    /// Enqueue a throttled advice refetch for new slider values.
    pub fn request_advice(&self, query: RiskAmountQuery) {
        self.advice.request(query);
    }

    /// One-shot advice fetch at explicit values, bypassing the throttle.
    pub async fn advice_at(&self, query: &RiskAmountQuery) -> Result<Advice> {
        Ok(self.api.advice(query).await?)
    }

    pub async fn asset_detail(&self, name: &str) -> Result<AssetDetail> {
        Ok(self.api.asset_detail(name).await?)
    }

    /// Commit to an allocation. On success a one-time
    /// [`Notice::InvestmentCompleted`] is posted for the next view to show.
    pub async fn invest(&self, order: &InvestmentOrder) -> Result<()> {
        self.api.submit_investment(order).await?;
        info!(invested_sum = %order.invested_sum, "Investment committed");
        self.notices.post(Notice::InvestmentCompleted);
        Ok(())
    }

    /// Consume the pending notice, if any. A second call returns `None`,
    /// so reloading a view never re-shows a stale success message.
    #[must_use]
    pub fn take_notice(&self) -> Option<Notice> {
        self.notices.take()
    }
}
