//! Selection-scoped transactions feed.
//!
//! Refetches a wallet's transactions whenever the active selection changes.
//! Selecting the already-active wallet is a no-op; a response for a wallet
//! the user has since navigated away from is discarded.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::latest::Latest;
use crate::api::Api;
use crate::domain::{Transaction, WalletId, WalletSummary};

/// The transactions surface as observers see it.
#[derive(Debug, Clone, Default)]
pub struct TransactionsState {
    /// The selected wallet, if any.
    pub wallet: Option<WalletId>,
    /// A fetch for the selected wallet is in flight.
    pub loading: bool,
    /// Transactions of the newest completed fetch; kept on failure.
    pub transactions: Vec<Transaction>,
}

/// Fetches transactions for whichever wallet is currently selected.
pub struct TransactionFeed {
    api: Arc<dyn Api>,
    active: Mutex<Option<WalletId>>,
    state: watch::Sender<TransactionsState>,
    latest: Arc<Latest>,
}

impl TransactionFeed {
    #[must_use]
    pub fn new(api: Arc<dyn Api>) -> Self {
        let (state, _) = watch::channel(TransactionsState::default());
        Self {
            api,
            active: Mutex::new(None),
            state,
            latest: Arc::new(Latest::new()),
        }
    }

    /// Observe transaction updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TransactionsState> {
        self.state.subscribe()
    }

    /// The transactions surface as currently displayed.
    #[must_use]
    pub fn current(&self) -> TransactionsState {
        self.state.borrow().clone()
    }

    /// Select the first available wallet, if any. With no wallets there is
    /// nothing to fetch and the transactions view stays empty.
    pub fn select_default(&self, wallets: &[WalletSummary]) {
        if let Some(wallet) = wallets.first() {
            self.select(wallet.id);
        }
    }

    /// Change the active wallet and refetch its transactions.
    ///
    /// Reselecting the active wallet issues no new fetch. When the
    /// selection changes again before a fetch completes, the superseded
    /// response is discarded on arrival.
    pub fn select(&self, wallet: WalletId) {
        {
            let mut active = self.active.lock();
            if active.as_ref() == Some(&wallet) {
                debug!(%wallet, "Wallet already selected; skipping refetch");
                return;
            }
            *active = Some(wallet);
        }

        let ticket = self.latest.issue();
        self.state.send_modify(|s| {
            s.wallet = Some(wallet);
            s.loading = true;
        });

        let api = self.api.clone();
        let state = self.state.clone();
        let latest = self.latest.clone();
        tokio::spawn(async move {
            match api.wallet_transactions(&wallet).await {
                Ok(transactions) => {
                    latest.complete(ticket, || {
                        debug!(%wallet, count = transactions.len(), "Transactions loaded");
                        state.send_modify(|s| {
                            s.loading = false;
                            s.transactions = transactions;
                        });
                    });
                }
                Err(error) => {
                    warn!(%wallet, %error, "Transactions fetch failed; keeping previous list");
                    latest.complete(ticket, || {
                        state.send_modify(|s| s.loading = false);
                    });
                }
            }
        });
    }

    /// Forget the selection, e.g. when the session ends.
    pub fn reset(&self) {
        *self.active.lock() = None;
        self.latest.issue();
        self.state.send_replace(TransactionsState::default());
    }
}
