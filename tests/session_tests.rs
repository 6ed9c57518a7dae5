//! Session lifecycle: gating, credential handling, login/logout flows.

mod support;

use std::sync::Arc;

use finboard::api::LoginResponse;
use finboard::error::{ApiError, Error};
use finboard::session::Session;
use finboard::testkit::api::{ApiCall, Scripted, ScriptedApi};
use finboard::testkit::domain;

use support::app_with;

#[tokio::test]
async fn test_session_starts_pending() {
    let api = Arc::new(ScriptedApi::detached());
    let app = app_with(&api);

    // Until the identity probe resolves, nothing is reachable
    assert!(app.session().current().is_pending());
    assert!(!app.session().current().is_authenticated());
}

#[tokio::test]
async fn test_failed_probe_routes_to_login() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![Scripted::err(ApiError::Unauthorized)]),
    );
    let app = app_with(&api);

    let session = app.start().await;
    assert_eq!(session, Session::Unauthenticated);
    assert!(session.requires_login());
}

#[tokio::test]
async fn test_probe_server_error_collapses_to_login() {
    let api = Arc::new(ScriptedApi::detached().with_current_user(vec![Scripted::err(
        ApiError::Server {
            message: "boom".to_string(),
        },
    )]));
    let app = app_with(&api);

    let session = app.start().await;
    assert!(matches!(session, Session::Errored { .. }));
    assert!(session.requires_login());
}

#[tokio::test]
async fn test_fresh_load_then_login_reaches_home() {
    // E2E: no stored credential -> probe fails -> login -> probe succeeds
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![
                Scripted::err(ApiError::Unauthorized),
                Scripted::ok(domain::user("johnwick")),
            ])
            .with_login(vec![Scripted::ok(LoginResponse {
                key: "9c53a367".to_string(),
            })]),
    );
    let app = app_with(&api);

    let session = app.start().await;
    assert!(session.requires_login());

    let session = app.sign_in("johnwick", "johnwick").await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().username, "johnwick");

    // The login view is gone and the credential is in place
    assert!(!app.session().current().requires_login());
    assert_eq!(api.credentials().get().as_deref(), Some("9c53a367"));
}

#[tokio::test]
async fn test_session_transitions_are_observable() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![
                Scripted::err(ApiError::Unauthorized),
                Scripted::ok(domain::user("lyraking")),
            ])
            .with_login(vec![Scripted::ok(LoginResponse {
                key: "tok".to_string(),
            })]),
    );
    let app = app_with(&api);
    let mut updates = app.session().subscribe();

    assert!(updates.borrow().is_pending());

    app.start().await;
    updates.changed().await.unwrap();
    assert_eq!(*updates.borrow(), Session::Unauthenticated);

    app.sign_in("lyraking", "lyraking").await.unwrap();
    updates.changed().await.unwrap();
    assert!(updates.borrow().is_authenticated());
}

#[tokio::test]
async fn test_credential_attached_after_login_cleared_after_logout() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![
                Scripted::err(ApiError::Unauthorized),
                Scripted::ok(domain::user("johnwick")),
            ])
            .with_login(vec![Scripted::ok(LoginResponse {
                key: "fresh-token".to_string(),
            })])
            .with_wallets(vec![Scripted::ok(vec![]), Scripted::ok(vec![])]),
    );
    let app = app_with(&api);

    app.start().await;
    app.sign_in("johnwick", "johnwick").await.unwrap();

    // Every adapter call after login carries the new credential
    app.load_wallets().await.unwrap();
    let calls = api.calls();
    let wallets_call = calls
        .iter()
        .find(|record| record.call == ApiCall::Wallets)
        .unwrap();
    assert_eq!(wallets_call.credential.as_deref(), Some("fresh-token"));

    // The probe right after login already carried it too
    let last_probe = calls
        .iter()
        .rfind(|record| record.call == ApiCall::CurrentUser)
        .unwrap();
    assert_eq!(last_probe.credential.as_deref(), Some("fresh-token"));

    app.sign_out().await.unwrap();
    assert!(api.credentials().get().is_none());
    assert_eq!(app.session().current(), Session::Unauthenticated);

    // The next adapter call carries no credential
    app.load_wallets().await.unwrap();
    let calls = api.calls();
    let last_wallets = calls
        .iter()
        .rfind(|record| record.call == ApiCall::Wallets)
        .unwrap();
    assert_eq!(last_wallets.credential, None);
}

#[tokio::test]
async fn test_logout_request_precedes_credential_clear() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![Scripted::ok(domain::user("johnwick"))])
            .with_login(vec![]),
    );
    api.credentials().set("stored-token").unwrap();
    let app = app_with(&api);

    app.start().await;
    app.sign_out().await.unwrap();

    // The logout request itself still carried the credential
    let calls = api.calls();
    let logout_call = calls
        .iter()
        .find(|record| record.call == ApiCall::Logout)
        .unwrap();
    assert_eq!(logout_call.credential.as_deref(), Some("stored-token"));
    assert!(api.credentials().get().is_none());
}

#[tokio::test]
async fn test_login_failure_mutates_nothing() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_current_user(vec![Scripted::err(ApiError::Unauthorized)])
            .with_login(vec![Scripted::err(ApiError::Validation {
                message: "bad credentials".to_string(),
            })]),
    );
    let app = app_with(&api);

    app.start().await;
    let before = app.session().current();

    let err = app.sign_in("johnwick", "wrong").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Api(ApiError::Validation { .. })
    ));

    // Neither the credential store nor the session state moved
    assert!(api.credentials().get().is_none());
    assert_eq!(app.session().current(), before);

    // And no identity probe was issued for the failed attempt
    assert_eq!(
        api.count_calls(|call| *call == ApiCall::CurrentUser),
        1,
        "only the mount probe should have run"
    );
}

#[tokio::test]
async fn test_stored_credential_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth-token");

    {
        let store = finboard::session::CredentialStore::open(path.clone()).unwrap();
        store.set("persisted").unwrap();
    }

    // A new process opens the same file and is still logged in
    let store = Arc::new(finboard::session::CredentialStore::open(path).unwrap());
    let api = Arc::new(
        ScriptedApi::new(store.clone())
            .with_current_user(vec![Scripted::ok(domain::user("johnwick"))]),
    );
    let app = finboard::app::App::with_api(&finboard::config::Config::default(), api.clone(), store);

    let session = app.start().await;
    assert!(session.is_authenticated());
    assert_eq!(
        api.calls()[0].credential.as_deref(),
        Some("persisted"),
        "probe carried the stored credential"
    );
}
