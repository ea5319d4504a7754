// Per-card memory state. One value per card, created when the card is
// authored and replaced only by review(); the caller owns storage and
// serializes concurrent reviews of the same card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fsrs::NEUTRAL_DIFFICULTY;

/// Where a card sits in the learning lifecycle. `step` indexes into the
/// active ladder (learning_steps or relearning_steps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    New,
    Learning { step: usize },
    Review,
    Relearning { step: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMemoryState {
    /// Days for recall probability to decay to the desired retention.
    /// 0.0 until the card graduates, >= 0.1 afterwards.
    pub stability: f64,
    /// 1 (easiest) to 10.
    pub difficulty: f64,
    pub phase: Phase,
    /// Total lapses. Monotone except for migration or an explicit reset.
    pub lapse_count: u32,
    pub due_at: DateTime<Utc>,
    /// Absent until the first review.
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl CardMemoryState {
    /// State for a freshly authored card: phase `New`, due immediately.
    pub fn new_card(now: DateTime<Utc>) -> Self {
        Self {
            stability: 0.0,
            difficulty: NEUTRAL_DIFFICULTY,
            phase: Phase::New,
            lapse_count: 0,
            due_at: now,
            last_reviewed_at: None,
        }
    }

    /// A card is due the moment its due date arrives, boundary included.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Chronically lapsed cards get flagged for the caller to handle
    /// (suspend, re-author, tag); the engine only reports.
    pub fn is_leech(&self, threshold: u32) -> bool {
        self.lapse_count >= threshold
    }
}
