// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod challenge;
pub mod point;
pub mod stats;

pub use challenge::{Challenge, ChallengePatch, NewChallenge};
pub use point::PointRecord;
pub use stats::ProgressStats;
