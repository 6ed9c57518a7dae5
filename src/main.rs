use clap::Parser;
use tracing::error;

use finboard::app::App;
use finboard::cli::{commands, Cli, Commands};
use finboard::config::Config;
use finboard::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    if let Err(e) = run(&cli, &config).await {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let app = App::new(config)?;

    match &cli.command {
        Commands::Login(args) => commands::login(&app, args).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Whoami => commands::whoami(&app).await,
        Commands::Wallets => commands::wallets(&app).await,
        Commands::Transactions(args) => commands::transactions(&app, args).await,
        Commands::Topup(args) => commands::topup(&app, args).await,
        Commands::Expenses => commands::expenses(&app).await,
        Commands::Portfolio => commands::portfolio(&app).await,
        Commands::Advice(args) => commands::advice(&app, args).await,
        Commands::Invest(args) => commands::invest(&app, args).await,
        Commands::Stat(args) => commands::stat(&app, args).await,
    }
}
