// What-if scheduling: run all four ratings against the current state so
// the UI can label its answer buttons. Nothing is committed; the real
// state is untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::Error;
use crate::fsrs::Rating;
use crate::review::{self, ReviewOutcome};
use crate::state::CardMemoryState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPreview {
    pub again: ReviewOutcome,
    pub hard: ReviewOutcome,
    pub good: ReviewOutcome,
    pub easy: ReviewOutcome,
}

impl SchedulingPreview {
    pub fn for_rating(&self, rating: Rating) -> &ReviewOutcome {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

/// Evaluate all four ratings hypothetically. Deterministic in its
/// inputs: same state, config, and `now` always yield the same preview.
pub fn preview_all_ratings(
    state: &CardMemoryState,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<SchedulingPreview, Error> {
    Ok(SchedulingPreview {
        again: review::review(state, Rating::Again, config, now)?,
        hard: review::review(state, Rating::Hard, config, now)?,
        good: review::review(state, Rating::Good, config, now)?,
        easy: review::review(state, Rating::Easy, config, now)?,
    })
}
