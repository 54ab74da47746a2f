//! Seed script - creates the supply-chain tables and loads a small demo data set
//!
//! Run with: cargo run --bin seed-demo
//!
//! Uses the same configuration layers as the analytics binary. Point it at a
//! throwaway database, e.g. `APP__DATABASE__BACKEND=sqlite APP__DATABASE__DATABASE=demo.db`.

use anyhow::Context;
use tracing::info;

use pharma_analytics::config::{init_tracing, load_config};
use pharma_analytics::schema::{statements, DEMO_DATA_SQL, SCHEMA_SQL};
use pharma_analytics::Gateway;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = load_config().context("failed to load configuration")?;
    init_tracing(cfg.log_level(), cfg.log_json);
    cfg.log_loaded();

    info!("=== Pharmaceutical Analytics Demo Seed ===");

    let mut gateway = Gateway::new();
    gateway
        .connect(&cfg.database)
        .await
        .context("failed to connect to database")?;

    let result = seed(&gateway).await;
    gateway.close().await;
    result?;

    info!("=== Seed complete ===");
    info!("Run `cargo run --bin pharma-analytics` with the same settings to analyse it.");
    Ok(())
}

async fn seed(gateway: &Gateway) -> anyhow::Result<()> {
    info!("Creating tables...");
    gateway
        .execute_batch(SCHEMA_SQL)
        .await
        .context("failed to create schema")?;
    info!("  Ensured {} tables", statements(SCHEMA_SQL).count());

    info!("Loading demo data...");
    gateway
        .execute_batch(DEMO_DATA_SQL)
        .await
        .context("failed to insert demo data (already seeded?)")?;
    info!(
        "  Inserted rows into {} tables",
        statements(DEMO_DATA_SQL).count()
    );

    Ok(())
}
