//! Goals repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use workout_buddy_shared::{Goal, GoalType, UserId};

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: String,
    pub goal_type: String,
    pub target_value: Decimal,
    pub current_value: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal {
            id: record.id,
            goal_type: GoalType::from(record.goal_type),
            target_value: record.target_value.to_f64().unwrap_or(0.0),
            current_value: record
                .current_value
                .and_then(|v| v.to_f64())
                .unwrap_or(0.0),
            status: record.status,
            created_at: record.created_at,
            start_date: record.start_date,
            target_date: record.target_date,
        }
    }
}

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Active goals for a user, newest first
    pub async fn get_active(pool: &PgPool, user_id: &UserId) -> Result<Vec<GoalRecord>> {
        let records = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id::text AS id,
                   type AS goal_type,
                   target_value::numeric AS target_value,
                   current_value::numeric AS current_value,
                   start_date::date AS start_date,
                   target_date::date AS target_date,
                   status,
                   created_at::timestamptz AS created_at
            FROM goals
            WHERE user_id::text = $1 AND status = 'active'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get a goal by ID, scoped to its owner
    pub async fn get_by_id(
        pool: &PgPool,
        id: &str,
        user_id: &UserId,
    ) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id::text AS id,
                   type AS goal_type,
                   target_value::numeric AS target_value,
                   current_value::numeric AS current_value,
                   start_date::date AS start_date,
                   target_date::date AS target_date,
                   status,
                   created_at::timestamptz AS created_at
            FROM goals
            WHERE id::text = $1 AND user_id::text = $2
            "#,
        )
        .bind(id)
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
