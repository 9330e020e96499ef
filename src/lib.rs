// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map Challenge: progress tracker for the 30-day mapping challenge
//!
//! This crate provides the backend API for the challenge dashboard and the
//! map rendering logic that turns stored GeoJSON into a displayable scene.

pub mod config;
pub mod db;
pub mod error;
pub mod map;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
