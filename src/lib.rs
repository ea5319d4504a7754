//! Pure FSRS spaced-repetition scheduling engine.
//!
//! Callers feed `(state, rating, config, now)` in and get a new state
//! plus the scheduled interval back. The engine never reads a clock,
//! touches a database, or talks to the network; persistence and
//! per-card review serialization belong to the caller.
//!
//! Algorithm reference: https://github.com/open-spaced-repetition/fsrs4anki/wiki/The-Algorithm

pub mod config;
pub mod error;
pub mod fsrs;
pub mod migrate;
pub mod preview;
pub mod review;
pub mod schedule;
pub mod state;

pub use config::{DEFAULT_WEIGHTS, SchedulerConfig, WEIGHT_COUNT};
pub use error::Error;
pub use fsrs::{MIN_STABILITY, NEUTRAL_DIFFICULTY, Rating};
pub use preview::{SchedulingPreview, preview_all_ratings};
pub use review::{ReviewOutcome, review};
pub use schedule::{format_interval, interval_from_stability};
pub use state::{CardMemoryState, Phase};
