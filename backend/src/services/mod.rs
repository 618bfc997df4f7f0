//! Business logic services
//!
//! Services fetch what an operation needs from the data store, run it
//! through the analytic core and shape the result for the routes.

pub mod goals;
pub mod insights;
pub mod research;
pub mod workout;

pub use goals::GoalsService;
pub use insights::{InsightsService, RandomTips};
pub use research::ResearchService;
pub use workout::WorkoutService;

use chrono::{Duration, NaiveDate};

/// Inclusive date range of `days` days ending on `end`
pub fn window_bounds(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = i64::from(days.max(1)) - 1;
    (end - Duration::days(span), end)
}
