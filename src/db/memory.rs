//! In-memory backend for local development and tests.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use geojson::Geometry;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::db::seed::{self, SeedReport};
use crate::error::AppError;
use crate::models::{Challenge, ChallengePatch, NewChallenge, PointRecord};

/// Challenges keyed by day, points keyed by id.
#[derive(Default)]
pub struct MemoryStore {
    challenges: DashMap<i32, Challenge>,
    points: DashMap<i32, PointRecord>,
    next_challenge_id: AtomicI32,
    next_point_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_challenges(&self) -> Vec<Challenge> {
        let mut list: Vec<Challenge> = self.challenges.iter().map(|e| e.value().clone()).collect();
        list.sort_by_key(|c| c.day);
        list
    }

    pub fn get_challenge(&self, day: i32) -> Option<Challenge> {
        self.challenges.get(&day).map(|c| c.clone())
    }

    pub fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError> {
        match self.challenges.entry(new.day) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Challenge for day {} already exists",
                new.day
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_challenge_id.fetch_add(1, Ordering::SeqCst) + 1;
                let challenge = Challenge::from_new(id, new, Utc::now());
                slot.insert(challenge.clone());
                Ok(challenge)
            }
        }
    }

    pub fn update_challenge(&self, day: i32, patch: ChallengePatch) -> Option<Challenge> {
        let mut entry = self.challenges.get_mut(&day)?;
        entry.apply(patch, Utc::now());
        Some(entry.clone())
    }

    pub fn list_points(&self) -> Vec<PointRecord> {
        let mut list: Vec<PointRecord> = self.points.iter().map(|e| e.value().clone()).collect();
        list.sort_by_key(|p| p.id);
        list
    }

    /// Same semantics as the PostgreSQL seed: existing rows are left alone.
    pub fn seed(&self) -> SeedReport {
        let mut report = SeedReport::default();

        for challenge in seed::challenges() {
            if self.create_challenge(challenge).is_ok() {
                report.challenges_inserted += 1;
            }
        }

        for (name, lon, lat) in seed::SINGKARAK_POINTS {
            if self.points.iter().any(|p| p.name == name) {
                continue;
            }
            let id = self.next_point_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            self.points.insert(
                id,
                PointRecord {
                    id,
                    name: name.to_string(),
                    geometry: Geometry::new(geojson::Value::Point(vec![lon, lat])),
                    created_at: now,
                    updated_at: now,
                },
            );
            report.points_inserted += 1;
        }

        report
    }
}
