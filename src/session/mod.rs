//! Session and credential lifecycle.
//!
//! [`CredentialStore`] is the single source of truth for "are we logged in";
//! [`SessionManager`] turns identity-probe outcomes into the observable
//! [`Session`] state that gates everything else.

mod credential;
#[allow(clippy::module_inception)]
mod session;

pub use credential::CredentialStore;
pub use session::{Session, SessionManager};
