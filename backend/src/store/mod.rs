//! Data access seams for the coach
//!
//! The coach and services depend on these traits rather than on the pool,
//! so the router can be driven by the deterministic fixture store in tests
//! and local demos.

mod fixture;
mod memory;

pub use fixture::FixtureDataStore;
pub use memory::InMemoryConversationStore;

use crate::repositories::{ActivityRepository, ConversationRepository, GoalRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use workout_buddy_shared::types::{ChatMessage, Role};
use workout_buddy_shared::{ActivityWindow, DailyActivityRecord, FitnessSummary, Goal, UserId};

/// Read access to activity records and goals
#[async_trait]
pub trait FitnessDataStore: Send + Sync {
    /// Daily records in `[start, end]`
    async fn daily_records(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ActivityWindow>;

    /// Aggregate summary over `[start, end]`; `None` when nothing is stored
    async fn summary(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<FitnessSummary>>;

    /// Active goals, newest first
    async fn active_goals(&self, user_id: &UserId) -> Result<Vec<Goal>>;

    /// One goal of the user by id
    async fn goal(&self, user_id: &UserId, goal_id: &str) -> Result<Option<Goal>>;

    /// The record for a single day
    async fn record_for(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyActivityRecord>> {
        let window = self.daily_records(user_id, date, date).await?;
        Ok(window.latest().cloned())
    }
}

/// Persistent chat history
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append(
        &self,
        conversation_id: &str,
        user_id: &UserId,
        role: Role,
        content: &str,
        metadata: serde_json::Value,
    ) -> Result<()>;

    /// Messages oldest first; empty for an unknown conversation
    async fn history(&self, conversation_id: &str, user_id: &UserId) -> Result<Vec<ChatMessage>>;

    /// Remove a conversation; returns whether anything was deleted
    async fn clear(&self, conversation_id: &str, user_id: &UserId) -> Result<bool>;
}

/// Store backed by the shared PostgreSQL database
#[derive(Clone)]
pub struct PgFitnessDataStore {
    pool: PgPool,
}

impl PgFitnessDataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FitnessDataStore for PgFitnessDataStore {
    async fn daily_records(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ActivityWindow> {
        let rows = ActivityRepository::get_range(&self.pool, user_id, start, end).await?;
        Ok(rows.into_iter().map(DailyActivityRecord::from).collect())
    }

    async fn summary(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<FitnessSummary>> {
        ActivityRepository::get_summary(&self.pool, user_id, start, end).await
    }

    async fn active_goals(&self, user_id: &UserId) -> Result<Vec<Goal>> {
        let rows = GoalRepository::get_active(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn goal(&self, user_id: &UserId, goal_id: &str) -> Result<Option<Goal>> {
        let row = GoalRepository::get_by_id(&self.pool, goal_id, user_id).await?;
        Ok(row.map(Goal::from))
    }

    async fn record_for(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyActivityRecord>> {
        let row = ActivityRepository::get_for_date(&self.pool, user_id, date).await?;
        Ok(row.map(DailyActivityRecord::from))
    }
}

/// Chat history in the service's own tables
#[derive(Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn append(
        &self,
        conversation_id: &str,
        user_id: &UserId,
        role: Role,
        content: &str,
        metadata: serde_json::Value,
    ) -> Result<()> {
        ConversationRepository::append(&self.pool, conversation_id, user_id, role, content, metadata)
            .await
    }

    async fn history(&self, conversation_id: &str, user_id: &UserId) -> Result<Vec<ChatMessage>> {
        let rows = ConversationRepository::get_messages(&self.pool, conversation_id, user_id).await?;
        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    async fn clear(&self, conversation_id: &str, user_id: &UserId) -> Result<bool> {
        ConversationRepository::delete(&self.pool, conversation_id, user_id).await
    }
}
