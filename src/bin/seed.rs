// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create the schema and load the seed data into PostgreSQL.
//!
//! Safe to re-run: rows that already exist are left untouched.

use anyhow::Context;
use map_challenge::{config::Config, db::Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set to seed a database");
    }

    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let result = async {
        db.ensure_schema().await.context("Failed to create schema")?;
        db.seed().await.context("Failed to seed data")
    }
    .await;
    db.close().await;

    let report = result?;
    tracing::info!(
        challenges = report.challenges_inserted,
        points = report.points_inserted,
        "Seed complete"
    );
    Ok(())
}
