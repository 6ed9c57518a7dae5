//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use finboard::app::App;
use finboard::config::Config;
use finboard::fetch::{AdviceState, TransactionsState};
use finboard::testkit::api::ScriptedApi;

/// Build an [`App`] wired to a scripted adapter and its credential store.
pub fn app_with(api: &Arc<ScriptedApi>) -> App {
    let credentials = api.credentials();
    App::with_api(&Config::default(), api.clone(), credentials)
}

/// Wait until no transactions fetch is in flight and return the state.
pub async fn settled_transactions(app: &App) -> TransactionsState {
    let mut updates = app.transactions().subscribe();
    loop {
        let state = updates.borrow().clone();
        if !state.loading {
            return state;
        }
        if updates.changed().await.is_err() {
            return state;
        }
    }
}

/// Wait until no advice fetch is in flight and return the state.
pub async fn settled_advice(app: &App) -> AdviceState {
    let mut updates = app.advice().subscribe();
    loop {
        let state = updates.borrow().clone();
        if !state.loading {
            return state;
        }
        if updates.changed().await.is_err() {
            return state;
        }
    }
}
