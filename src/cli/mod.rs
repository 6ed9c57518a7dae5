//! Command-line interface definitions.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Finboard - wallets, portfolio, and investment advice from the terminal.
#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "finboard.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the credential for subsequent commands
    Login(LoginArgs),

    /// Log out and drop the stored credential
    Logout,

    /// Show who is currently logged in
    Whoami,

    /// List wallets and the transactions of the active one
    Wallets,

    /// List transactions of a specific wallet
    Transactions(TransactionsArgs),

    /// Add funds to a wallet
    Topup(TopupArgs),

    /// Daily purchases/sells totals across all wallets
    Expenses,

    /// Show the purchased portfolio with metrics and projection
    Portfolio,

    /// Request investment advice
    Advice(AdviceArgs),

    /// Commit to an advised allocation
    Invest(InvestArgs),

    /// Detailed statistics for one asset
    Stat(StatArgs),
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Username; prompted for when omitted
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Parser, Debug)]
pub struct TransactionsArgs {
    /// Wallet id (UUID)
    pub wallet: String,
}

#[derive(Parser, Debug)]
pub struct TopupArgs {
    /// Wallet id (UUID)
    pub wallet: String,

    /// Sum to add
    pub sum: Decimal,
}

#[derive(Parser, Debug)]
pub struct AdviceArgs {
    /// Risk level, 0-100; server default when omitted
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub risk: Option<u8>,

    /// Investing sum; server default (max wallet balance) when omitted
    #[arg(long)]
    pub amount: Option<Decimal>,
}

#[derive(Parser, Debug)]
pub struct InvestArgs {
    /// Risk level for the allocation, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub risk: u8,

    /// Sum to invest
    #[arg(long)]
    pub amount: Decimal,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct StatArgs {
    /// Short asset name, e.g. GOOG
    pub asset: String,
}
