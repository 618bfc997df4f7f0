//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod activity;
pub mod conversations;
pub mod goals;

pub use activity::{ActivityRecord, ActivityRepository, ActivitySummaryRecord};
pub use conversations::{ConversationRepository, MessageRecord};
pub use goals::{GoalRecord, GoalRepository};
