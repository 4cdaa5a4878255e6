//! Database seeder for Daftar development and demos.
//!
//! Writes the demo company, its chart of accounts, a quarter of journal
//! entries, invoices, bills and a filed VAT return in one transaction.
//! Skips everything if the company already exists.
//!
//! Usage: cargo run --bin seeder [YEAR]

use chrono::Datelike;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use daftar_core::demo::DemoDataset;
use daftar_core::period::today_in_uae;
use daftar_db::{LedgerRepository, connect};
use daftar_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database = config
        .database
        .ok_or_else(|| anyhow::anyhow!("DAFTAR__DATABASE__URL must be set to seed"))?;

    let year = match std::env::args().nth(1) {
        Some(raw) => raw.parse()?,
        None => today_in_uae().year(),
    };

    info!("Connecting to database...");
    let db = connect(
        &database.url,
        database.max_connections,
        database.min_connections,
    )
    .await?;
    let repo = LedgerRepository::new(db);

    let dataset = DemoDataset::build(year)?;
    if repo.company_exists(dataset.company.id).await? {
        info!(company_id = %dataset.company.id, "Demo company already exists, skipping");
        return Ok(());
    }

    info!(company = %dataset.company.name, "Seeding company");
    let counts = repo.seed_dataset(&dataset).await?;
    info!(
        accounts = counts.accounts,
        entries = counts.entries,
        documents = counts.documents,
        vat_returns = counts.vat_returns,
        "Seeded demo dataset"
    );

    info!(%year, "Seeding complete");
    Ok(())
}
