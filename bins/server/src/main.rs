//! Daftar API Server
//!
//! Main entry point for the Daftar reporting service.

use std::sync::Arc;

use chrono::Datelike;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use daftar_api::{AppState, create_router};
use daftar_core::demo::{DEMO_COMPANY_ID, DemoDataset};
use daftar_core::period::today_in_uae;
use daftar_core::{LedgerReader, ReportQueries};
use daftar_db::{SeaLedgerReader, connect};
use daftar_shared::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let reader: Arc<dyn LedgerReader> = match config
        .database
        .as_ref()
        .filter(|_| !config.uses_demo_ledger())
    {
        Some(database) => {
            let db = connect(
                &database.url,
                database.max_connections,
                database.min_connections,
            )
            .await?;
            info!("Connected to database");
            Arc::new(SeaLedgerReader::new(db))
        }
        None => {
            let ledger = DemoDataset::build(today_in_uae().year())?.into_ledger()?;
            warn!(company_id = %DEMO_COMPANY_ID, "No database configured, serving demo ledger");
            Arc::new(ledger)
        }
    };

    let state = AppState::new(ReportQueries::new(reader), config.reporting.currency.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let (json, pretty) = if logging.json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}
