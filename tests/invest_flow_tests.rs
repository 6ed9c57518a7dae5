//! Committing an investment and the one-time success notice.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;

use finboard::app::Notice;
use finboard::domain::InvestmentOrder;
use finboard::error::{ApiError, Error};
use finboard::testkit::api::{ApiCall, Scripted, ScriptedApi};
use finboard::testkit::domain;

use support::app_with;

#[tokio::test]
async fn test_successful_investment_posts_one_time_notice() {
    let api = Arc::new(ScriptedApi::detached().with_submit_investment(vec![Scripted::ok(())]));
    let app = app_with(&api);

    let order = domain::investment_order(dec!(750));
    app.invest(&order).await.unwrap();

    assert_eq!(
        api.count_calls(
            |call| matches!(call, ApiCall::SubmitInvestment { invested_sum } if *invested_sum == dec!(750))
        ),
        1
    );

    // The next view shows the toast exactly once
    assert_eq!(app.take_notice(), Some(Notice::InvestmentCompleted));
    assert_eq!(app.take_notice(), None, "a reload must not re-show the toast");
}

#[tokio::test]
async fn test_failed_investment_posts_no_notice() {
    let api = Arc::new(ScriptedApi::detached().with_submit_investment(vec![Scripted::err(
        ApiError::Validation {
            message: "User does not have any wallet with the specified invested sum".to_string(),
        },
    )]));
    let app = app_with(&api);

    let err = app.invest(&domain::investment_order(dec!(999999))).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Validation { .. })));
    assert_eq!(app.take_notice(), None);
}

#[tokio::test]
async fn test_order_built_from_advice_carries_chosen_sum() {
    let api = Arc::new(
        ScriptedApi::detached()
            .with_advice(vec![Scripted::ok(domain::advice(60, dec!(2000)))])
            .with_submit_investment(vec![Scripted::ok(())]),
    );
    let app = app_with(&api);

    let advice = app
        .advice_at(&finboard::domain::RiskAmountQuery::new(60, dec!(2000)))
        .await
        .unwrap();

    // User dials the amount down from the suggested sum before committing
    let order = InvestmentOrder::from_advice(&advice, dec!(1500));
    app.invest(&order).await.unwrap();

    assert_eq!(
        api.count_calls(
            |call| matches!(call, ApiCall::SubmitInvestment { invested_sum } if *invested_sum == dec!(1500))
        ),
        1
    );
}

#[tokio::test]
async fn test_portfolio_absent_then_present() {
    let api = Arc::new(ScriptedApi::detached().with_portfolio(vec![
        Scripted::ok(None),
        Scripted::ok(Some(domain::portfolio(dec!(1500)))),
    ]));
    let app = app_with(&api);

    // Before investing: 204, no portfolio
    assert!(app.load_portfolio().await.unwrap().is_none());

    // After investing: the purchased portfolio comes back
    let portfolio = app.load_portfolio().await.unwrap().unwrap();
    assert_eq!(portfolio.invested_sum, dec!(1500));
}
