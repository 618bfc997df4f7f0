//! Workout Buddy Shared Library
//!
//! Pure analytic core of the coaching service: the activity data model,
//! time-series statistics, streaks, goal feasibility, insight composition
//! and workout plan construction. Nothing in this crate performs I/O.

pub mod errors;
pub mod feasibility;
pub mod format;
pub mod goals;
pub mod insights;
pub mod models;
pub mod patterns;
pub mod stats;
pub mod streak;
pub mod types;
pub mod validation;
pub mod workout;

// Re-export commonly used items
pub use errors::*;
pub use models::{
    ActivityWindow, DailyActivityRecord, FitnessLevel, FitnessSummary, Goal, GoalType,
    RawActivityRecord, UserId,
};
pub use stats::{Trend, TrendResult};
pub use streak::{StreakResult, DEFAULT_STEP_GOAL};
