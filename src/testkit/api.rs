//! Mock [`Api`] implementation for testing.
//!
//! [`ScriptedApi`] pops pre-loaded results per operation, optionally
//! sleeping before completing so tests can script out-of-order responses.
//! Every call is recorded together with the credential visible in the
//! shared [`CredentialStore`] at call time, which is how the credential
//! lifecycle properties are asserted without real HTTP.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::api::{Api, LoginRequest, LoginResponse};
use crate::domain::{
    Advice, AssetDetail, ExpensesStatistics, InvestmentOrder, Portfolio, RiskAmountQuery,
    Transaction, User, WalletId, WalletSummary,
};
use crate::error::{ApiError, ApiResult};
use crate::session::CredentialStore;

/// One scripted completion: an optional delay before the result is
/// returned, then the result itself.
pub struct Scripted<T> {
    delay: Option<Duration>,
    result: ApiResult<T>,
}

impl<T> Scripted<T> {
    /// A completion that returns immediately.
    pub fn ok(value: T) -> Self {
        Self {
            delay: None,
            result: Ok(value),
        }
    }

    /// A failure that returns immediately.
    pub fn err(error: ApiError) -> Self {
        Self {
            delay: None,
            result: Err(error),
        }
    }

    /// Delay this completion; combine with paused tokio time to script
    /// which of two in-flight requests finishes first.
    #[must_use]
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A recorded adapter call: which operation ran and the credential the
/// store held at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub call: ApiCall,
    pub credential: Option<String>,
}

/// The operation behind a [`RecordedCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login { username: String },
    Logout,
    CurrentUser,
    Wallets,
    WalletTransactions { wallet: WalletId },
    TopUp { wallet: WalletId, sum: Decimal },
    ExpensesStatistics,
    Portfolio,
    InitialAdvice,
    Advice { risk_level: u8, amount: Decimal },
    AssetDetail { name: String },
    SubmitInvestment { invested_sum: Decimal },
}

#[derive(Default)]
struct Script {
    login: VecDeque<Scripted<LoginResponse>>,
    logout: VecDeque<Scripted<()>>,
    current_user: VecDeque<Scripted<User>>,
    wallets: VecDeque<Scripted<Vec<WalletSummary>>>,
    wallet_transactions: VecDeque<Scripted<Vec<Transaction>>>,
    top_up: VecDeque<Scripted<()>>,
    expenses: VecDeque<Scripted<ExpensesStatistics>>,
    portfolio: VecDeque<Scripted<Option<Portfolio>>>,
    initial_advice: VecDeque<Scripted<Advice>>,
    advice: VecDeque<Scripted<Advice>>,
    asset_detail: VecDeque<Scripted<AssetDetail>>,
    submit_investment: VecDeque<Scripted<()>>,
}

/// A mock adapter with scripted per-operation results.
///
/// Exhausted queues fail with a recognizable [`ApiError::Server`] so a
/// missing script line shows up in the test output rather than hanging or
/// silently defaulting.
pub struct ScriptedApi {
    credentials: Arc<CredentialStore>,
    script: Mutex<Script>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    /// Create a mock observing the given credential store.
    #[must_use]
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self {
            credentials,
            script: Mutex::new(Script::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand: a mock with its own ephemeral credential store.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Arc::new(CredentialStore::ephemeral()))
    }

    /// The credential store this mock observes.
    #[must_use]
    pub fn credentials(&self) -> Arc<CredentialStore> {
        self.credentials.clone()
    }

    // Builder-style scripting, one method per operation.

    #[must_use]
    pub fn with_login(self, results: Vec<Scripted<LoginResponse>>) -> Self {
        self.script.lock().login = results.into();
        self
    }

    #[must_use]
    pub fn with_logout(self, results: Vec<Scripted<()>>) -> Self {
        self.script.lock().logout = results.into();
        self
    }

    #[must_use]
    pub fn with_current_user(self, results: Vec<Scripted<User>>) -> Self {
        self.script.lock().current_user = results.into();
        self
    }

    #[must_use]
    pub fn with_wallets(self, results: Vec<Scripted<Vec<WalletSummary>>>) -> Self {
        self.script.lock().wallets = results.into();
        self
    }

    #[must_use]
    pub fn with_wallet_transactions(self, results: Vec<Scripted<Vec<Transaction>>>) -> Self {
        self.script.lock().wallet_transactions = results.into();
        self
    }

    #[must_use]
    pub fn with_top_up(self, results: Vec<Scripted<()>>) -> Self {
        self.script.lock().top_up = results.into();
        self
    }

    #[must_use]
    pub fn with_expenses(self, results: Vec<Scripted<ExpensesStatistics>>) -> Self {
        self.script.lock().expenses = results.into();
        self
    }

    #[must_use]
    pub fn with_portfolio(self, results: Vec<Scripted<Option<Portfolio>>>) -> Self {
        self.script.lock().portfolio = results.into();
        self
    }

    #[must_use]
    pub fn with_initial_advice(self, results: Vec<Scripted<Advice>>) -> Self {
        self.script.lock().initial_advice = results.into();
        self
    }

    #[must_use]
    pub fn with_advice(self, results: Vec<Scripted<Advice>>) -> Self {
        self.script.lock().advice = results.into();
        self
    }

    #[must_use]
    pub fn with_asset_detail(self, results: Vec<Scripted<AssetDetail>>) -> Self {
        self.script.lock().asset_detail = results.into();
        self
    }

    #[must_use]
    pub fn with_submit_investment(self, results: Vec<Scripted<()>>) -> Self {
        self.script.lock().submit_investment = results.into();
        self
    }

    /// Append another probe result after construction.
    pub fn push_current_user(&self, result: Scripted<User>) {
        self.script.lock().current_user.push_back(result);
    }

    /// Append another advice result after construction.
    pub fn push_advice(&self, result: Scripted<Advice>) {
        self.script.lock().advice.push_back(result);
    }

    /// Everything called so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// How many calls matched `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|record| predicate(&record.call))
            .count()
    }

    /// The risk levels of every fired advice request, in order.
    #[must_use]
    pub fn advice_risk_levels(&self) -> Vec<u8> {
        self.calls
            .lock()
            .iter()
            .filter_map(|record| match record.call {
                ApiCall::Advice { risk_level, .. } => Some(risk_level),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().push(RecordedCall {
            call,
            credential: self.credentials.get(),
        });
    }

    async fn run<T>(&self, op: &'static str, scripted: Option<Scripted<T>>) -> ApiResult<T> {
        let Some(scripted) = scripted else {
            return Err(ApiError::Server {
                message: format!("no scripted response for {op}"),
            });
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

#[async_trait]
impl Api for ScriptedApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.record(ApiCall::Login {
            username: request.username.clone(),
        });
        let next = self.script.lock().login.pop_front();
        self.run("login", next).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record(ApiCall::Logout);
        let next = self.script.lock().logout.pop_front();
        // Logout defaults to success; most tests don't care to script it.
        match next {
            Some(scripted) => self.run("logout", Some(scripted)).await,
            None => Ok(()),
        }
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.record(ApiCall::CurrentUser);
        let next = self.script.lock().current_user.pop_front();
        self.run("current_user", next).await
    }

    async fn wallets(&self) -> ApiResult<Vec<WalletSummary>> {
        self.record(ApiCall::Wallets);
        let next = self.script.lock().wallets.pop_front();
        self.run("wallets", next).await
    }

    async fn wallet_transactions(&self, wallet: &WalletId) -> ApiResult<Vec<Transaction>> {
        self.record(ApiCall::WalletTransactions { wallet: *wallet });
        let next = self.script.lock().wallet_transactions.pop_front();
        self.run("wallet_transactions", next).await
    }

    async fn top_up(&self, wallet: &WalletId, sum: Decimal) -> ApiResult<()> {
        self.record(ApiCall::TopUp {
            wallet: *wallet,
            sum,
        });
        let next = self.script.lock().top_up.pop_front();
        self.run("top_up", next).await
    }

    async fn expenses_statistics(&self) -> ApiResult<ExpensesStatistics> {
        self.record(ApiCall::ExpensesStatistics);
        let next = self.script.lock().expenses.pop_front();
        self.run("expenses_statistics", next).await
    }

    async fn portfolio(&self) -> ApiResult<Option<Portfolio>> {
        self.record(ApiCall::Portfolio);
        let next = self.script.lock().portfolio.pop_front();
        self.run("portfolio", next).await
    }

    async fn initial_advice(&self) -> ApiResult<Advice> {
        self.record(ApiCall::InitialAdvice);
        let next = self.script.lock().initial_advice.pop_front();
        self.run("initial_advice", next).await
    }

    async fn advice(&self, query: &RiskAmountQuery) -> ApiResult<Advice> {
        self.record(ApiCall::Advice {
            risk_level: query.risk_level,
            amount: query.amount,
        });
        let next = self.script.lock().advice.pop_front();
        self.run("advice", next).await
    }

    async fn asset_detail(&self, name: &str) -> ApiResult<AssetDetail> {
        self.record(ApiCall::AssetDetail {
            name: name.to_string(),
        });
        let next = self.script.lock().asset_detail.pop_front();
        self.run("asset_detail", next).await
    }

    async fn submit_investment(&self, order: &InvestmentOrder) -> ApiResult<()> {
        self.record(ApiCall::SubmitInvestment {
            invested_sum: order.invested_sum,
        });
        let next = self.script.lock().submit_investment.pop_front();
        self.run("submit_investment", next).await
    }
}
