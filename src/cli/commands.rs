//! Handlers for the finboard subcommands.
//!
//! Each handler resolves the session first: nothing past the login surface
//! is reachable until the identity probe completes, and a failed probe
//! only ever leads back to `finboard login`.

use chrono::{TimeZone, Utc};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};
use tabled::{Table, Tabled};

use crate::app::{App, Notice};
use crate::cli::{output, AdviceArgs, InvestArgs, LoginArgs, StatArgs, TopupArgs, TransactionsArgs};
use crate::domain::{
    monthly_projection, Advice, InvestmentOrder, Portfolio, RiskAmountQuery, RiskBand, Transaction,
    WalletId, WalletSummary,
};
use crate::error::{ApiError, Result};
use crate::fetch::{TransactionFeed, TransactionsState};
use crate::session::Session;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Card")]
    card: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Id")]
    id: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sum")]
    sum: String,
}

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    name: String,
    #[tabled(rename = "Part")]
    part: String,
    #[tabled(rename = "Sum")]
    sum: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Day")]
    day_change: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Purchases")]
    purchases: String,
    #[tabled(rename = "Sells")]
    sells: String,
}

/// Resolve the session and insist on an authenticated one.
async fn require_authenticated(app: &App) -> Result<Session> {
    let session = app.start().await;
    if session.requires_login() {
        output::error("Not logged in. Run `finboard login` first.");
        return Err(ApiError::Unauthorized.into());
    }
    Ok(session)
}

pub async fn login(app: &App, args: &LoginArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    match app.sign_in(&username, &password).await {
        Ok(Session::Authenticated(user)) => {
            output::ok(&format!("Logged in as {}", user.display_name()));
            Ok(())
        }
        Ok(_) => {
            output::error("Login succeeded but the identity probe did not; try again");
            Err(ApiError::Unauthorized.into())
        }
        Err(e) => {
            output::error(&format!("Login failed: {e}"));
            Err(e)
        }
    }
}

pub async fn logout(app: &App) -> Result<()> {
    app.sign_out().await?;
    output::ok("Logged out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    match app.start().await {
        Session::Authenticated(user) => {
            output::key_value("User", user.display_name());
            output::key_value("Username", &user.username);
            if !user.email.is_empty() {
                output::key_value("Email", &user.email);
            }
        }
        Session::Unauthenticated => output::note("Not logged in"),
        Session::Errored { message } => output::warn(&format!("Session check failed: {message}")),
        Session::Pending => unreachable!("start() resolves the probe"),
    }
    Ok(())
}

pub async fn wallets(app: &App) -> Result<()> {
    require_authenticated(app).await?;

    let wallets = app.load_wallets().await?;
    if wallets.is_empty() {
        output::note("No wallets yet");
        return Ok(());
    }

    output::section("Wallets");
    print_wallets(&wallets);

    // load_wallets default-selected the first wallet; show its transactions
    let state = wait_for_transactions(app.transactions()).await;
    if let Some(wallet) = state.wallet {
        let bank = wallets
            .iter()
            .find(|w| w.id == wallet)
            .map_or_else(|| wallet.to_string(), |w| w.bank_name.clone());
        output::section(&format!("Transactions - {bank}"));
        print_transactions(&state.transactions);
    }
    Ok(())
}

pub async fn transactions(app: &App, args: &TransactionsArgs) -> Result<()> {
    require_authenticated(app).await?;

    let wallet: WalletId = args.wallet.parse()?;
    app.transactions().select(wallet);
    let state = wait_for_transactions(app.transactions()).await;

    output::section("Transactions");
    print_transactions(&state.transactions);
    Ok(())
}

pub async fn topup(app: &App, args: &TopupArgs) -> Result<()> {
    require_authenticated(app).await?;

    let wallet: WalletId = args.wallet.parse()?;
    app.top_up(&wallet, args.sum).await?;
    output::ok(&format!("Wallet replenished with ${}", args.sum));
    Ok(())
}

pub async fn expenses(app: &App) -> Result<()> {
    require_authenticated(app).await?;

    let stats = app.expenses().await?;
    if stats.is_empty() {
        output::note("No transactions yet");
        return Ok(());
    }

    output::section("Expenses by day");
    let rows: Vec<ExpenseRow> = stats
        .iter()
        .map(|(timestamp, day)| ExpenseRow {
            day: format_day(*timestamp),
            purchases: format!("${}", day.purchases),
            sells: format!("${}", day.sells),
        })
        .collect();
    output::table(&Table::new(rows).to_string());
    Ok(())
}

pub async fn portfolio(app: &App) -> Result<()> {
    require_authenticated(app).await?;

    match app.load_portfolio().await? {
        None => {
            output::note("Currently you have no assets in portfolio");
            output::note(&format!(
                "Run {} to get a suggested allocation",
                output::highlight("finboard advice")
            ));
        }
        Some(portfolio) => print_portfolio(&portfolio),
    }
    Ok(())
}

pub async fn advice(app: &App, args: &AdviceArgs) -> Result<()> {
    require_authenticated(app).await?;

    // Server defaults first; explicit values refine them below
    app.refresh_advice().await;
    let Some(initial) = app.advice().current().advice else {
        return Err(ApiError::Server {
            message: "advice service unavailable".to_string(),
        }
        .into());
    };

    let advice = if args.risk.is_some() || args.amount.is_some() {
        let query = RiskAmountQuery::new(
            args.risk.unwrap_or(initial.risk_level),
            args.amount.unwrap_or(initial.suggested_sum),
        );
        let mut updates = app.advice().subscribe();
        app.request_advice(query);
        loop {
            if updates.changed().await.is_err() {
                break initial;
            }
            let state = updates.borrow().clone();
            if !state.loading {
                break state.advice.unwrap_or(initial);
            }
        }
    } else {
        initial
    };

    print_advice(&advice);
    Ok(())
}

pub async fn invest(app: &App, args: &InvestArgs) -> Result<()> {
    require_authenticated(app).await?;

    let query = RiskAmountQuery::new(args.risk, args.amount);
    let advice = app.advice_at(&query).await?;
    print_advice(&advice);

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Invest ${} in stocks with {} risk portfolio?",
                args.amount,
                RiskBand::from_level(args.risk)
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::note("Cancelled");
            return Ok(());
        }
    }

    let order = InvestmentOrder::from_advice(&advice, args.amount);
    app.invest(&order).await?;

    if let Some(Notice::InvestmentCompleted) = app.take_notice() {
        output::ok("Successfully invested!");
    }
    Ok(())
}

pub async fn stat(app: &App, args: &StatArgs) -> Result<()> {
    require_authenticated(app).await?;

    let detail = app.asset_detail(&args.asset).await?;

    output::section(&format!("{} ({})", detail.long_name, args.asset));
    output::key_value("Exchange", format!("{} ({})", detail.exchange, detail.timezone));
    output::key_value("Currency", &detail.currency);
    output::key_value("Price", format!("${}", detail.current_price));
    output::key_value("Previous close", format!("${}", detail.previous_close));
    output::key_value(
        "Day change",
        format!(
            "{}{}% ({}${})",
            direction_sign(detail.change_for_day_direction),
            detail.change_for_day,
            direction_sign(detail.change_for_day_sum_direction),
            detail.change_for_day_sum
        ),
    );
    if let Some(volume) = &detail.volume {
        output::key_value("Volume", volume);
    }
    output::key_value(
        "Day range",
        format!("${} - ${}", detail.day_range_low, detail.day_range_high),
    );
    output::key_value(
        "Year range",
        format!("${} - ${}", detail.year_range_low, detail.year_range_high),
    );

    if !detail.history.is_empty() {
        output::section("Recent history");
        for (timestamp, price) in detail.history.iter().rev().take(10) {
            output::key_value(&format_day(timestamp / 1000), format!("${price}"));
        }
    }
    Ok(())
}

async fn wait_for_transactions(feed: &TransactionFeed) -> TransactionsState {
    let mut updates = feed.subscribe();
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

fn print_wallets(wallets: &[WalletSummary]) {
    let rows: Vec<WalletRow> = wallets
        .iter()
        .map(|wallet| WalletRow {
            bank: wallet.bank_name.clone(),
            card: format!("•••• {}", wallet.card_suffix()),
            balance: format!("${}", wallet.balance),
            id: wallet.id.to_string(),
        })
        .collect();
    output::table(&Table::new(rows).to_string());
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        output::note("No transactions");
        return;
    }
    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|tx| TransactionRow {
            when: tx.created_at.format("%Y-%m-%d %H:%M").to_string(),
            name: tx.name.clone(),
            sum: format!("{} ${}", tx.sum_direction, tx.sum),
        })
        .collect();
    output::table(&Table::new(rows).to_string());
}

fn print_assets(advice_assets: &[crate::domain::Asset]) {
    let rows: Vec<AssetRow> = advice_assets
        .iter()
        .map(|asset| {
            let (price, day_change) = match &asset.statistics {
                Some(stats) => (
                    format!("${}", stats.current_price),
                    format!(
                        "{}{}%",
                        direction_sign(stats.change_for_day_direction),
                        stats.change_for_day
                    ),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            AssetRow {
                name: asset.asset_name.clone(),
                part: format!("{}%", asset.part_of_portfolio),
                sum: format!("${}", asset.overall_sum),
                price,
                day_change,
            }
        })
        .collect();
    output::table(&Table::new(rows).to_string());
}

fn print_portfolio(portfolio: &Portfolio) {
    output::section("Assets Portfolio");
    output::key_value("Total value", format!("${}", portfolio.invested_sum));
    output::key_value(
        "Expected RoR",
        format!("{}%", portfolio.metrics.rate_of_return),
    );
    output::key_value("Volatility", format!("{}%", portfolio.metrics.volatility));
    output::key_value("VaR", format!("{}%", portfolio.metrics.value_at_risk));

    let projection = monthly_projection(portfolio.invested_sum, portfolio.metrics.rate_of_return);
    if let Some(year_end) = projection.last() {
        output::key_value("Projected (1y)", format!("${year_end}"));
    }

    output::section("All Stocks");
    print_assets(&portfolio.assets);
}

fn print_advice(advice: &Advice) {
    output::note(&format!(
        "Based on your profile we suggest to invest {} in stocks with {} risk portfolio.",
        output::highlight(format!("${}", advice.suggested_sum)),
        output::highlight(advice.risk_band())
    ));
    output::key_value("Expected RoR", format!("{}%", advice.metrics.rate_of_return));
    output::key_value("Volatility", format!("{}%", advice.metrics.volatility));
    output::key_value("VaR", format!("{}%", advice.metrics.value_at_risk));
    output::section("Suggested allocation");
    print_assets(&advice.assets);
}

fn direction_sign(direction: Option<crate::domain::Direction>) -> String {
    direction.map_or_else(String::new, |d| d.to_string())
}

fn format_day(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map_or_else(|| timestamp.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}
