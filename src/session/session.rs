//! Session state machine driven by the identity probe.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::CredentialStore;
use crate::api::{Api, LoginRequest};
use crate::domain::User;
use crate::error::{ApiError, Result};

/// The client's belief about the current authentication status.
///
/// Starts `Pending`; every transition comes from an identity-probe outcome.
/// `Authenticated` gates whether anything beyond the login surface renders;
/// while `Pending` the application shows only a loading indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Pending,
    Authenticated(User),
    Unauthenticated,
    Errored {
        message: String,
    },
}

impl Session {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The probed user, when authenticated.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether the login view is the one to present.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Errored { .. })
    }
}

/// Computes [`Session`] from identity probes and publishes it to observers.
///
/// Only one probe is in flight per mount/login event; callers keep their
/// login surface disabled for the span of the request, so there is no
/// superseded-probe race to resolve here.
pub struct SessionManager {
    api: Arc<dyn Api>,
    credentials: Arc<CredentialStore>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    #[must_use]
    pub fn new(api: Arc<dyn Api>, credentials: Arc<CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::Pending);
        Self {
            api,
            credentials,
            state,
        }
    }

    /// Observe session transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The session as currently believed.
    #[must_use]
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Run the identity probe and publish the outcome.
    ///
    /// All failures collapse to the login surface: a 401-class failure is
    /// `Unauthenticated`, anything else `Errored`. The user is never shown
    /// the difference between "never logged in" and "session expired".
    pub async fn probe(&self) -> Session {
        let next = match self.api.current_user().await {
            Ok(user) => {
                info!(username = %user.username, "Identity probe succeeded");
                Session::Authenticated(user)
            }
            Err(ApiError::Unauthorized) => Session::Unauthenticated,
            Err(error) => {
                warn!(%error, "Identity probe failed");
                Session::Errored {
                    message: error.to_string(),
                }
            }
        };
        self.state.send_replace(next.clone());
        next
    }

    /// Log in and re-run the identity probe.
    ///
    /// On login failure the error is returned to the caller and neither the
    /// credential store nor the session state is touched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let response = self
            .api
            .login(&LoginRequest::new(username, password))
            .await?;
        self.credentials.set(&response.key)?;
        Ok(self.probe().await)
    }

    /// Log out: tell the server, then drop the credential.
    ///
    /// The logout request itself is best-effort - a failure still clears
    /// the local credential and lands on the login surface.
    pub async fn logout(&self) -> Result<()> {
        if let Err(error) = self.api.logout().await {
            warn!(%error, "Logout request failed; clearing credential anyway");
        }
        self.credentials.clear()?;
        self.state.send_replace(Session::Unauthenticated);
        Ok(())
    }
}
