// Per-deck scheduling parameters. Decks can tune these independently;
// the engine never reads a global default, callers pass a config in.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// FSRS drives every stability/difficulty formula off 19 positional
/// weights; the indices are meaningful and must not be reordered.
pub const WEIGHT_COUNT: usize = 19;

/// Stock weight table, used until a deck has enough review history to
/// justify fitting its own.
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4, 0.6, 2.4, 5.8, 4.93, 0.94, 0.86, 0.01, 1.49, 0.14, 0.94, 2.18, 0.05,
    0.34, 1.26, 0.29, 2.61, 0.0, 0.0,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 19 positional FSRS weights.
    pub weights: [f64; WEIGHT_COUNT],
    /// Target recall probability at the scheduled due date, 0.70..=0.97.
    pub desired_retention: f64,
    /// Minute delays a new card climbs before graduating to review.
    pub learning_steps: Vec<u32>,
    /// Minute delays a lapsed card climbs before returning to review.
    pub relearning_steps: Vec<u32>,
    /// Upper bound on any scheduled interval, in days.
    pub maximum_interval: u32,
    /// Lapse count at which a card is flagged as a leech.
    pub leech_threshold: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            desired_retention: 0.9,
            learning_steps: vec![1, 10],
            relearning_steps: vec![10],
            maximum_interval: 36500,
            leech_threshold: 8,
        }
    }
}

impl SchedulerConfig {
    /// Fail-fast structural check. Run before any transition so a bad
    /// config never half-applies a review.
    pub fn validate(&self) -> Result<(), Error> {
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidConfig("weights must all be finite"));
        }
        if !(0.70..=0.97).contains(&self.desired_retention) {
            return Err(Error::InvalidConfig(
                "desired_retention must be within [0.70, 0.97]",
            ));
        }
        if self.learning_steps.is_empty() {
            return Err(Error::InvalidConfig("learning_steps must not be empty"));
        }
        if self.relearning_steps.is_empty() {
            return Err(Error::InvalidConfig("relearning_steps must not be empty"));
        }
        if self
            .learning_steps
            .iter()
            .chain(&self.relearning_steps)
            .any(|&m| m == 0)
        {
            return Err(Error::InvalidConfig("step minutes must be positive"));
        }
        if self.maximum_interval < 1 {
            return Err(Error::InvalidConfig("maximum_interval must be >= 1 day"));
        }
        if self.leech_threshold < 1 {
            return Err(Error::InvalidConfig("leech_threshold must be >= 1"));
        }
        Ok(())
    }
}
