//! Throttled advice refetcher.
//!
//! The risk slider is a drag-style control; issuing one request per
//! intermediate value would flood the server. Queries are therefore
//! trailing-edge throttled: the first query in a quiet period fires
//! immediately, and everything arriving inside the cooldown window is
//! coalesced into a single request carrying the most recent values, fired
//! at the window boundary.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::latest::Latest;
use crate::api::Api;
use crate::domain::{Advice, RiskAmountQuery};

/// The advice surface as observers see it.
#[derive(Debug, Clone, Default)]
pub struct AdviceState {
    /// A request is in flight.
    pub loading: bool,
    /// The newest advice that has completed; kept on refresh failure.
    pub advice: Option<Advice>,
}

/// Coalesces rapid-fire risk/amount changes into at most one in-flight
/// request per throttle window, discarding superseded completions.
pub struct AdviceRefetcher {
    api: Arc<dyn Api>,
    queries: mpsc::Sender<RiskAmountQuery>,
    state: watch::Sender<AdviceState>,
    latest: Arc<Latest>,
}

impl AdviceRefetcher {
    /// Spawn the refetcher with the given throttle window.
    #[must_use]
    pub fn new(api: Arc<dyn Api>, window: Duration) -> Self {
        let (queries, rx) = mpsc::channel(64);
        let (state, _) = watch::channel(AdviceState::default());
        let latest = Arc::new(Latest::new());

        tokio::spawn(run_throttled(
            api.clone(),
            window,
            rx,
            state.clone(),
            latest.clone(),
        ));

        Self {
            api,
            queries,
            state,
            latest,
        }
    }

    /// Observe advice updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AdviceState> {
        self.state.subscribe()
    }

    /// The advice surface as currently displayed.
    #[must_use]
    pub fn current(&self) -> AdviceState {
        self.state.borrow().clone()
    }

    /// Enqueue a risk/amount change. Returns immediately; the throttle loop
    /// decides when (and whether) a request actually goes out.
    pub fn request(&self, query: RiskAmountQuery) {
        if self.queries.try_send(query).is_err() {
            // Queue full means a burst is already being coalesced; dropping
            // an intermediate value is exactly what the throttle does anyway.
            debug!("Advice query queue full; dropping intermediate value");
        }
    }

    /// Fetch the server-default advice, bypassing the throttle but not the
    /// staleness check: a slider query issued afterwards still wins.
    pub async fn refresh(&self) {
        let ticket = self.latest.issue();
        self.state.send_modify(|s| s.loading = true);
        let result = self.api.initial_advice().await;
        publish(&self.state, &self.latest, ticket, result);
    }
}

/// The throttle loop. One iteration of the outer loop is one quiet-period
/// leading fire; the inner loop is the cooldown window collecting the
/// trailing query.
async fn run_throttled(
    api: Arc<dyn Api>,
    window: Duration,
    mut rx: mpsc::Receiver<RiskAmountQuery>,
    state: watch::Sender<AdviceState>,
    latest: Arc<Latest>,
) {
    while let Some(query) = rx.recv().await {
        fire(&api, &state, &latest, query);

        'cooldown: loop {
            let deadline = Instant::now() + window;
            let mut trailing: Option<RiskAmountQuery> = None;

            loop {
                tokio::select! {
                    () = tokio::time::sleep_until(deadline) => break,
                    next = rx.recv() => match next {
                        Some(query) => trailing = Some(query),
                        None => return,
                    },
                }
            }

            match trailing {
                Some(query) => fire(&api, &state, &latest, query),
                None => break 'cooldown,
            }
        }
    }
}

/// Issue a sequence number and launch the fetch without blocking the loop.
fn fire(
    api: &Arc<dyn Api>,
    state: &watch::Sender<AdviceState>,
    latest: &Arc<Latest>,
    query: RiskAmountQuery,
) {
    debug!(risk_level = query.risk_level, amount = %query.amount, "Firing advice request");
    let ticket = latest.issue();
    state.send_modify(|s| s.loading = true);

    let api = api.clone();
    let state = state.clone();
    let latest = latest.clone();
    tokio::spawn(async move {
        let result = api.advice(&query).await;
        publish(&state, &latest, ticket, result);
    });
}

/// Apply a completion if it is still the newest request for this target.
/// A failed refresh keeps the previously displayed advice.
fn publish(
    state: &watch::Sender<AdviceState>,
    latest: &Latest,
    ticket: super::latest::Ticket,
    result: crate::error::ApiResult<Advice>,
) {
    match result {
        Ok(advice) => {
            latest.complete(ticket, || {
                state.send_replace(AdviceState {
                    loading: false,
                    advice: Some(advice),
                });
            });
        }
        Err(error) => {
            warn!(%error, "Advice refresh failed; keeping previous advice");
            latest.complete(ticket, || {
                state.send_modify(|s| s.loading = false);
            });
        }
    }
}
