// Review state machine: picks the memory-model update for the card's
// phase and walks the learning/relearning ladders.
//
// new -> learning -> review, with review -> relearning on a lapse.
// Every transition stamps last_reviewed_at and returns a fresh state;
// nothing here mutates the input or performs I/O.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SchedulerConfig;
use crate::error::Error;
use crate::fsrs::{self, MIN_STABILITY, Rating};
use crate::schedule;
use crate::state::{CardMemoryState, Phase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub state: CardMemoryState,
    /// Scheduled interval in days; fractional for ladder steps.
    pub scheduled_days: f64,
    /// Display label for the interval. Never feeds back into scheduling.
    pub interval_label: String,
    /// True when this review pushed the card over the leech threshold.
    /// Acting on it (tagging, suspending) is the caller's job.
    pub leech: bool,
}

/// Apply one review. The state is taken by reference and returned anew;
/// the caller must serialize concurrent reviews of the same card.
pub fn review(
    state: &CardMemoryState,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome, Error> {
    config.validate()?;

    let outcome = match state.phase {
        Phase::New => review_new(state, rating, config, now),
        Phase::Learning { step } => review_ladder(state, rating, config, now, step, Ladder::Learning),
        Phase::Relearning { step } => {
            review_ladder(state, rating, config, now, step, Ladder::Relearning)
        }
        Phase::Review => review_graduated(state, rating, config, now),
    };

    debug!(
        from = ?state.phase,
        to = ?outcome.state.phase,
        ?rating,
        scheduled_days = outcome.scheduled_days,
        "review applied"
    );

    Ok(outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ladder {
    Learning,
    Relearning,
}

impl Ladder {
    fn steps(self, config: &SchedulerConfig) -> &[u32] {
        match self {
            Ladder::Learning => &config.learning_steps,
            Ladder::Relearning => &config.relearning_steps,
        }
    }

    fn phase_at(self, step: usize) -> Phase {
        match self {
            Ladder::Learning => Phase::Learning { step },
            Ladder::Relearning => Phase::Relearning { step },
        }
    }
}

fn review_new(
    state: &CardMemoryState,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    match rating {
        // Effortless recall skips the ladder entirely.
        Rating::Easy => graduate(state.lapse_count, rating, config, now),
        Rating::Good if config.learning_steps.len() >= 2 => {
            // A solid first answer skips the shortest rung.
            hold_at_step(state, config, now, Ladder::Learning, 1, state.lapse_count)
        }
        _ => hold_at_step(state, config, now, Ladder::Learning, 0, state.lapse_count),
    }
}

fn review_ladder(
    state: &CardMemoryState,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
    step: usize,
    ladder: Ladder,
) -> ReviewOutcome {
    match rating {
        // Back to the first rung of the same ladder; counts as a lapse.
        Rating::Again => hold_at_step(state, config, now, ladder, 0, state.lapse_count + 1),
        Rating::Easy => graduate(state.lapse_count, rating, config, now),
        Rating::Hard | Rating::Good => {
            let next_step = step + 1;
            if next_step >= ladder.steps(config).len() {
                graduate(state.lapse_count, rating, config, now)
            } else {
                hold_at_step(state, config, now, ladder, next_step, state.lapse_count)
            }
        }
    }
}

fn review_graduated(
    state: &CardMemoryState,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let w = &config.weights;
    // Stored state may predate the floor; re-apply before dividing.
    let stability = state.stability.max(MIN_STABILITY);
    let elapsed = elapsed_days(state, now);
    let r = fsrs::retrievability(elapsed, stability, config.desired_retention);

    match rating {
        Rating::Again => {
            let new_stability = fsrs::s_fail(state.difficulty, stability, r, w);
            let new_difficulty = fsrs::next_d(state.difficulty, rating, w);
            let lapse_count = state.lapse_count + 1;
            let leech = lapse_count >= config.leech_threshold;
            if leech {
                warn!(
                    lapse_count,
                    threshold = config.leech_threshold,
                    "leech threshold reached"
                );
            }

            let minutes = config.relearning_steps[0];
            let scheduled_days = schedule::step_minutes_as_days(minutes);
            ReviewOutcome {
                state: CardMemoryState {
                    stability: new_stability,
                    difficulty: new_difficulty,
                    phase: Phase::Relearning { step: 0 },
                    lapse_count,
                    due_at: now + Duration::minutes(i64::from(minutes)),
                    last_reviewed_at: Some(now),
                },
                scheduled_days,
                interval_label: schedule::format_interval(scheduled_days),
                leech,
            }
        }
        Rating::Hard | Rating::Good | Rating::Easy => {
            let new_stability = fsrs::s_success(state.difficulty, stability, r, rating, w);
            let new_difficulty = fsrs::next_d(state.difficulty, rating, w);
            schedule_in_review(new_stability, new_difficulty, state.lapse_count, config, now)
        }
    }
}

// Graduation (from New via Easy, or off the end of a ladder) seeds the
// long-term state from the rating's initial stability and difficulty.
fn graduate(
    lapse_count: u32,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let stability = fsrs::s_0(rating, &config.weights);
    let difficulty = fsrs::d_0(rating, &config.weights);
    schedule_in_review(stability, difficulty, lapse_count, config, now)
}

fn schedule_in_review(
    stability: f64,
    difficulty: f64,
    lapse_count: u32,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let interval =
        schedule::interval_from_stability(stability, config.desired_retention, config.maximum_interval);
    let scheduled_days = f64::from(interval);
    ReviewOutcome {
        state: CardMemoryState {
            stability,
            difficulty,
            phase: Phase::Review,
            lapse_count,
            due_at: now + Duration::days(i64::from(interval)),
            last_reviewed_at: Some(now),
        },
        scheduled_days,
        interval_label: schedule::format_interval(scheduled_days),
        leech: false,
    }
}

// Stay in (or enter) a ladder at the given rung. Stability and
// difficulty ride along unchanged until graduation.
fn hold_at_step(
    state: &CardMemoryState,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
    ladder: Ladder,
    step: usize,
    lapse_count: u32,
) -> ReviewOutcome {
    let minutes = ladder.steps(config)[step];
    let scheduled_days = schedule::step_minutes_as_days(minutes);
    ReviewOutcome {
        state: CardMemoryState {
            stability: state.stability,
            difficulty: state.difficulty,
            phase: ladder.phase_at(step),
            lapse_count,
            due_at: now + Duration::minutes(i64::from(minutes)),
            last_reviewed_at: Some(now),
        },
        scheduled_days,
        interval_label: schedule::format_interval(scheduled_days),
        leech: false,
    }
}

fn elapsed_days(state: &CardMemoryState, now: DateTime<Utc>) -> f64 {
    match state.last_reviewed_at {
        // A clock that ran backwards counts as no elapsed time.
        Some(last) => ((now - last).num_seconds() as f64 / 86_400.0).max(0.0),
        None => 0.0,
    }
}
