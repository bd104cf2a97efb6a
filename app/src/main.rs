// In app/src/main.rs

use std::sync::Arc;

use analysis::{AnalysisService, AnalysisSession, SessionOutcome};
use anyhow::Result;
use api_client::FeedbackGateway;
use clap::{Parser, Subcommand};
use core_types::{TradeId, TradeInput, UserId};
use database::TradeStore;
use tracing_subscriber::prelude::*;
use uuid::Uuid;
use web_server::AppState;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A crypto trading journal with risk tracking and AI trade feedback.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the HTTP API (trade CRUD and trade analysis).
    Serve,

    /// Computes the risk of a trade without storing it.
    Risk {
        #[arg(long)]
        entry: String,
        #[arg(long)]
        stop: String,
        /// Position size in dollars.
        #[arg(long)]
        position: String,
        /// Account size in dollars.
        #[arg(long)]
        account: String,
    },

    /// Logs a new trade for a user.
    LogTrade {
        #[arg(long)]
        user: Uuid,
        /// The crypto pair (e.g., "BTC/USDT").
        #[arg(long)]
        pair: String,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        position: f64,
        #[arg(long)]
        account: f64,
    },

    /// Lists a user's trades, newest first.
    Trades {
        #[arg(long)]
        user: Uuid,
    },

    /// Deletes one trade.
    DeleteTrade {
        #[arg(long)]
        id: Uuid,
    },

    /// Requests AI feedback on a user's most recent trades.
    Analyze {
        #[arg(long)]
        user: Uuid,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN) // Disable sqlx query debug logs
            .with_default(tracing::Level::INFO));
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => run_server().await?,
        Commands::Risk { entry, stop, position, account } => {
            handle_risk(&entry, &stop, &position, &account);
        }
        Commands::LogTrade { user, pair, entry, stop, position, account } => {
            let input = TradeInput {
                crypto_pair: pair,
                entry_price: entry,
                stop_loss: stop,
                position_size: position,
                account_size: account,
            };
            handle_log_trade(UserId(user), input).await?;
        }
        Commands::Trades { user } => handle_list_trades(UserId(user)).await?,
        Commands::DeleteTrade { id } => {
            let store = connect_store().await?;
            store.delete(TradeId(id)).await?;
            println!("Deleted trade {}", id);
        }
        Commands::Analyze { user } => handle_analyze(UserId(user)).await?,
    }

    Ok(())
}

async fn connect_store() -> Result<database::Db> {
    let settings = app_config::load_settings()?;
    let db = database::connect(&settings.database).await?;
    tracing::info!("Database connection established and migrations are up-to-date.");
    Ok(db)
}

/// Builds the analysis service, or `None` when the gateway credential is missing.
///
/// A missing credential disables analysis as a whole instead of failing per request.
fn build_analysis_service(settings: &app_config::GatewaySettings) -> Option<AnalysisService> {
    match api_client::new(settings) {
        Ok(client) => {
            let gateway: Arc<dyn FeedbackGateway> = Arc::new(client);
            Some(AnalysisService::new(gateway))
        }
        Err(e) => {
            tracing::error!(error = %e, "Trade analysis is disabled");
            None
        }
    }
}

// --- "Serve" Subcommand Logic ---

/// Loads settings, connects the trade store and runs the web server until terminated.
async fn run_server() -> Result<()> {
    let settings = app_config::load_settings()?;
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    let db = database::connect(&settings.database).await?;
    tracing::info!("Database connection established and migrations are up-to-date.");

    let analysis = build_analysis_service(&settings.gateway);
    let state = AppState::new(Arc::new(db), analysis, &settings.server.allowed_origin)?;

    web_server::run(settings.server, state).await?;
    anyhow::bail!("Web server terminated unexpectedly.");
}

fn handle_risk(entry: &str, stop: &str, position: &str, account: &str) {
    match risk::calculator::compute_risk_from_text(entry, stop, position, account) {
        Some(metrics) => {
            println!("{}", metrics);
            if metrics.is_high_risk() {
                println!("Warning: Risk exceeds recommended {}% threshold!", risk::HIGH_RISK_THRESHOLD_PERCENT);
            } else {
                println!("Risk is within acceptable limits");
            }
        }
        None => println!("Insufficient input: enter positive entry, position and account sizes and a non-zero stop."),
    }
}

async fn handle_log_trade(user: UserId, input: TradeInput) -> Result<()> {
    let new_trade = risk::prepare_trade(user, &input)?;
    let store = connect_store().await?;
    let record = store.create(new_trade).await?;
    println!(
        "Trade logged successfully: {} {} (risk {:.2}%)",
        record.id, record.crypto_pair, record.risk_percent
    );
    Ok(())
}

async fn handle_list_trades(user: UserId) -> Result<()> {
    let store = connect_store().await?;
    let trades = store.list(user).await?;
    if trades.is_empty() {
        println!("No trades logged yet.");
    }
    for trade in trades {
        let flag = if trade.risk_percent > risk::HIGH_RISK_THRESHOLD_PERCENT { " HIGH RISK" } else { "" };
        println!(
            "{} | {} | {:<20} | Entry: ${} | Stop: ${} | Account: ${} | Risk: {:.2}%{}",
            trade.created_at.format("%Y-%m-%d %H:%M"),
            trade.id,
            trade.crypto_pair,
            trade.entry_price,
            trade.stop_loss,
            trade.account_size,
            trade.risk_percent,
            flag
        );
    }
    Ok(())
}

/// Runs one in-process analysis session over the user's stored trades.
async fn handle_analyze(user: UserId) -> Result<()> {
    let settings = app_config::load_settings()?;
    let Some(service) = build_analysis_service(&settings.gateway) else {
        anyhow::bail!("Cannot analyze: the gateway API key is not configured.");
    };

    let db = database::connect(&settings.database).await?;
    let trades = db.list(user).await?;

    let mut session = AnalysisSession::new(Arc::new(service));
    let now_ms = chrono::Utc::now().timestamp_millis();
    match session.request_feedback(&trades, now_ms).await {
        SessionOutcome::NoTrades => println!("No trades: add some trades first to get AI feedback."),
        SessionOutcome::Throttled { retry_after_secs } => {
            println!("Please wait: you can analyze again in {} seconds.", retry_after_secs)
        }
        SessionOutcome::Feedback(feedback) => {
            println!("Analysis & Recommendations:\n{}", feedback);
        }
        SessionOutcome::Failed { status, message } => {
            anyhow::bail!("Analysis failed ({}): {}", status, message);
        }
    }
    Ok(())
}
