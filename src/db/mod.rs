//! Database layer.
//!
//! [`Database`] is constructed once at startup, shared through `AppState`,
//! and closed on shutdown. It is backed by PostgreSQL when a connection URL
//! is configured and by an in-memory store otherwise.

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use seed::SeedReport;

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Challenge, ChallengePatch, NewChallenge, PointRecord};

/// Database handle. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Postgres(PgStore),
    Memory(Arc<MemoryStore>),
}

impl Database {
    /// Connect according to `config.database_url`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url, config.database_max_connections).await?;
                Ok(Self {
                    backend: Backend::Postgres(store),
                })
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store");
                Ok(Self::in_memory())
            }
        }
    }

    /// Empty in-memory database.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.backend, Backend::Memory(_))
    }

    /// Release pooled connections. Safe to call more than once.
    pub async fn close(&self) {
        if let Backend::Postgres(store) = &self.backend {
            store.close().await;
        }
    }

    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.ensure_schema().await,
            Backend::Memory(_) => Ok(()),
        }
    }

    /// Insert the standard challenges and legacy points, keeping existing rows.
    pub async fn seed(&self) -> Result<SeedReport, AppError> {
        let report = match &self.backend {
            Backend::Postgres(store) => store.seed().await?,
            Backend::Memory(store) => store.seed(),
        };
        tracing::info!(
            challenges = report.challenges_inserted,
            points = report.points_inserted,
            "Seeding finished"
        );
        Ok(report)
    }

    // ─── Challenges ──────────────────────────────────────────────

    /// All challenges, ordered by day.
    pub async fn list_challenges(&self) -> Result<Vec<Challenge>, AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.list_challenges().await,
            Backend::Memory(store) => Ok(store.list_challenges()),
        }
    }

    pub async fn get_challenge(&self, day: i32) -> Result<Option<Challenge>, AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.get_challenge(day).await,
            Backend::Memory(store) => Ok(store.get_challenge(day)),
        }
    }

    /// Fails with [`AppError::Conflict`] if the day is taken.
    pub async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.create_challenge(new).await,
            Backend::Memory(store) => store.create_challenge(new),
        }
    }

    pub async fn update_challenge(
        &self,
        day: i32,
        patch: ChallengePatch,
    ) -> Result<Option<Challenge>, AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.update_challenge(day, patch).await,
            Backend::Memory(store) => Ok(store.update_challenge(day, patch)),
        }
    }

    // ─── Legacy points ───────────────────────────────────────────

    pub async fn list_points(&self) -> Result<Vec<PointRecord>, AppError> {
        match &self.backend {
            Backend::Postgres(store) => store.list_points().await,
            Backend::Memory(store) => Ok(store.list_points()),
        }
    }
}
