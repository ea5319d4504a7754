// Conversion from the legacy two-parameter (ease factor + interval)
// scheduler state. The ease factor maps onto difficulty and the last
// interval seeds stability; ladder position and lapse history carry
// over as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fsrs::MIN_STABILITY;
use crate::state::{CardMemoryState, Phase};

/// Snapshot of a card scheduled by the legacy SM-2 style algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sm2State {
    /// 1.3 and up; 2.5 was the legacy default.
    pub ease_factor: f64,
    /// Last scheduled interval in days; 0 for unseen cards.
    pub interval_days: f64,
    /// Ladder position, `None` once graduated.
    pub learning_step: Option<usize>,
    pub lapse_count: u32,
    pub due_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

// ease 2.5 lands mid-range, 1.3 pegs the hard end, 3.0 the easy end.
pub fn ease_factor_to_difficulty(ease_factor: f64) -> f64 {
    (11.0 - (ease_factor - 1.3) * 6.0).clamp(1.0, 10.0)
}

// Both scales measure days, so the interval transfers directly.
pub fn interval_to_stability(interval_days: f64) -> f64 {
    interval_days.max(MIN_STABILITY)
}

/// Build an FSRS state from a legacy snapshot. The due date is kept so
/// migration never reshuffles an existing queue.
pub fn from_sm2(legacy: &Sm2State) -> CardMemoryState {
    let phase = match legacy.learning_step {
        Some(step) => Phase::Learning { step },
        None => Phase::Review,
    };
    CardMemoryState {
        stability: interval_to_stability(legacy.interval_days),
        difficulty: ease_factor_to_difficulty(legacy.ease_factor),
        phase,
        lapse_count: legacy.lapse_count,
        due_at: legacy.due_at,
        last_reviewed_at: legacy.last_reviewed_at,
    }
}
