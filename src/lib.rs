//! Finboard - personal-finance dashboard client.
//!
//! This crate talks to a remote fulfillment API that owns all business
//! logic (portfolio construction, risk/return computation, advice
//! generation) and orchestrates the client side of it: the session
//! lifecycle, credential storage, and the asynchronous data fetches that
//! must never let a stale response overwrite a fresher one.
//!
//! # Architecture
//!
//! - **`api`** - The [`Api`](api::Api) port: one typed method per remote
//!   operation, implemented over HTTP by [`HttpApi`](api::HttpApi). The
//!   adapter attaches the stored credential to every request and performs
//!   no retries.
//! - **`session`** - Durable [`CredentialStore`](session::CredentialStore)
//!   and the [`Session`](session::Session) state machine driven by the
//!   identity probe.
//! - **`fetch`** - Sequence-numbered staleness control
//!   ([`Latest`](fetch::Latest)), the trailing-edge throttled advice
//!   refetcher, and the selection-scoped transactions feed.
//! - **`app`** - [`App`](app::App), the explicitly constructed orchestrator
//!   the presentation layer drives.
//! - **`cli`** - Terminal presentation: subcommands, tables, prompts.
//!
//! # Example
//!
//! ```no_run
//! use finboard::app::App;
//! use finboard::config::Config;
//!
//! # async fn run() -> finboard::error::Result<()> {
//! let config = Config::default();
//! let app = App::new(&config)?;
//! let session = app.start().await;
//! if session.requires_login() {
//!     app.sign_in("johnwick", "johnwick").await?;
//! }
//! let wallets = app.load_wallets().await?;
//! println!("{} wallet(s)", wallets.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod session;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
