//! Dashboard progress statistics, derived from the challenge list.

use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Challenge;

/// How many completed challenges the dashboard shows.
const RECENT_COMPLETED_LIMIT: usize = 5;

/// Overall progress through the challenge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressStats {
    pub total: u32,
    pub completed: u32,
    pub remaining: u32,
    /// Completion percentage, rounded to the nearest integer
    pub percentage: u32,
    /// First incomplete challenge by day
    pub next: Option<ChallengeSummary>,
    /// The last completed challenges, in day order
    pub recent_completed: Vec<ChallengeSummary>,
    /// Totals per challenge type label
    pub by_type: BTreeMap<String, TypeProgress>,
}

/// Short form of a challenge for dashboard lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChallengeSummary {
    pub day: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub completed: bool,
}

impl From<&Challenge> for ChallengeSummary {
    fn from(c: &Challenge) -> Self {
        Self {
            day: c.day,
            title: c.title.clone(),
            kind: c.kind.clone(),
            completed: c.completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TypeProgress {
    pub total: u32,
    pub completed: u32,
}

impl ProgressStats {
    /// Compute stats from challenges sorted by day.
    pub fn from_challenges(challenges: &[Challenge]) -> Self {
        let total = challenges.len() as u32;
        let completed_list: Vec<&Challenge> = challenges.iter().filter(|c| c.completed).collect();
        let completed = completed_list.len() as u32;

        let percentage = if total > 0 {
            (f64::from(completed) / f64::from(total) * 100.0).round() as u32
        } else {
            0
        };

        let mut by_type: BTreeMap<String, TypeProgress> = BTreeMap::new();
        for challenge in challenges {
            let entry = by_type.entry(challenge.kind.clone()).or_default();
            entry.total += 1;
            if challenge.completed {
                entry.completed += 1;
            }
        }

        let skip = completed_list.len().saturating_sub(RECENT_COMPLETED_LIMIT);

        Self {
            total,
            completed,
            remaining: total - completed,
            percentage,
            next: challenges
                .iter()
                .find(|c| !c.completed)
                .map(ChallengeSummary::from),
            recent_completed: completed_list
                .into_iter()
                .skip(skip)
                .map(ChallengeSummary::from)
                .collect(),
            by_type,
        }
    }
}
