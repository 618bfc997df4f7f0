//! Daily activity repository
//!
//! Reads the `fitness_data` table written by the device sync backend.
//! Identifiers are compared as text so integer and uuid user keys both match.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use workout_buddy_shared::models::activity_percentage;
use workout_buddy_shared::{DailyActivityRecord, FitnessSummary, RawActivityRecord, UserId};

/// Daily activity row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub steps: Option<i64>,
    pub distance: Option<Decimal>,
    pub calories: Option<i64>,
    pub active_minutes: Option<i64>,
    pub floors_climbed: Option<i64>,
    pub very_active_minutes: Option<i64>,
    pub fairly_active_minutes: Option<i64>,
    pub lightly_active_minutes: Option<i64>,
    pub heart_rate_avg: Option<i64>,
}

impl From<ActivityRecord> for DailyActivityRecord {
    fn from(row: ActivityRecord) -> Self {
        DailyActivityRecord::from(RawActivityRecord {
            date: row.date,
            steps: row.steps,
            distance_km: row.distance.and_then(|d| d.to_f64()),
            calories: row.calories,
            active_minutes: row.active_minutes,
            heart_rate_avg: row.heart_rate_avg,
            floors: row.floors_climbed,
            very_active_minutes: row.very_active_minutes,
            fairly_active_minutes: row.fairly_active_minutes,
            lightly_active_minutes: row.lightly_active_minutes,
        })
    }
}

/// Aggregate row for a date range
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivitySummaryRecord {
    pub total_days: i64,
    pub avg_steps: Option<Decimal>,
    pub total_distance: Option<Decimal>,
    pub total_calories: Option<i64>,
    pub total_active_minutes: Option<i64>,
    pub avg_heart_rate: Option<Decimal>,
    pub total_floors: Option<i64>,
    pub days_active: i64,
}

impl ActivitySummaryRecord {
    /// Convert to a summary; `None` when the range holds no rows
    pub fn into_summary(self) -> Option<FitnessSummary> {
        if self.total_days <= 0 {
            return None;
        }
        let total_days = u32::try_from(self.total_days).unwrap_or(u32::MAX);
        let days_active = u32::try_from(self.days_active.max(0)).unwrap_or(u32::MAX);
        let non_negative = |v: Option<i64>| v.unwrap_or(0).max(0) as u64;

        Some(FitnessSummary {
            avg_steps: self
                .avg_steps
                .and_then(|d| d.trunc().to_u32())
                .unwrap_or(0),
            total_distance_km: self
                .total_distance
                .and_then(|d| d.round_dp(1).to_f64())
                .unwrap_or(0.0)
                .max(0.0),
            total_calories: non_negative(self.total_calories),
            total_active_minutes: non_negative(self.total_active_minutes),
            avg_heart_rate: self.avg_heart_rate.and_then(|d| d.trunc().to_u32()),
            floors_climbed: non_negative(self.total_floors),
            days_active,
            total_days,
            activity_percentage: activity_percentage(days_active, total_days),
        })
    }
}

/// Activity repository
pub struct ActivityRepository;

impl ActivityRepository {
    /// Daily rows in `[start, end]`, newest first
    pub async fn get_range(
        pool: &PgPool,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>> {
        let records = sqlx::query_as::<_, ActivityRecord>(
            r#"
            SELECT
                date::date AS date,
                steps::bigint AS steps,
                distance::numeric AS distance,
                calories_burned::bigint AS calories,
                active_minutes::bigint AS active_minutes,
                floors_climbed::bigint AS floors_climbed,
                very_active_minutes::bigint AS very_active_minutes,
                fairly_active_minutes::bigint AS fairly_active_minutes,
                lightly_active_minutes::bigint AS lightly_active_minutes,
                resting_heart_rate::bigint AS heart_rate_avg
            FROM fitness_data
            WHERE user_id::text = $1
              AND date >= $2
              AND date <= $3
            ORDER BY date DESC
            "#,
        )
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Aggregate summary over `[start, end]`
    pub async fn get_summary(
        pool: &PgPool,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<FitnessSummary>> {
        let record = sqlx::query_as::<_, ActivitySummaryRecord>(
            r#"
            SELECT
                COUNT(*) AS total_days,
                AVG(steps)::numeric AS avg_steps,
                SUM(distance)::numeric AS total_distance,
                SUM(calories_burned)::bigint AS total_calories,
                SUM(active_minutes)::bigint AS total_active_minutes,
                AVG(resting_heart_rate)::numeric AS avg_heart_rate,
                SUM(floors_climbed)::bigint AS total_floors,
                COUNT(CASE WHEN steps >= 5000 THEN 1 END) AS days_active
            FROM fitness_data
            WHERE user_id::text = $1
              AND date >= $2
              AND date <= $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(record.into_summary())
    }

    /// The row for a single day, if synced
    pub async fn get_for_date(
        pool: &PgPool,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<ActivityRecord>> {
        let mut records = Self::get_range(pool, user_id, date, date).await?;
        Ok(records.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn summary_row(total_days: i64) -> ActivitySummaryRecord {
        ActivitySummaryRecord {
            total_days,
            avg_steps: Some(Decimal::from_str("8123.67").unwrap()),
            total_distance: Some(Decimal::from_str("42.36").unwrap()),
            total_calories: Some(17_500),
            total_active_minutes: Some(315),
            avg_heart_rate: Some(Decimal::from_str("71.4").unwrap()),
            total_floors: None,
            days_active: 6,
        }
    }

    #[test]
    fn test_row_defaults_missing_values() {
        let row = ActivityRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            steps: None,
            distance: None,
            calories: Some(-5),
            active_minutes: Some(30),
            floors_climbed: None,
            very_active_minutes: None,
            fairly_active_minutes: None,
            lightly_active_minutes: None,
            heart_rate_avg: None,
        };
        let record = DailyActivityRecord::from(row);
        assert_eq!(record.steps, 0);
        assert_eq!(record.distance_km, 0.0);
        assert_eq!(record.calories, 0);
        assert_eq!(record.active_minutes, 30);
        assert_eq!(record.heart_rate_avg, None);
    }

    #[test]
    fn test_decimal_distance_converted() {
        let row = ActivityRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            steps: Some(9000),
            distance: Some(Decimal::from_str("6.25").unwrap()),
            calories: Some(2400),
            active_minutes: Some(50),
            floors_climbed: Some(12),
            very_active_minutes: Some(20),
            fairly_active_minutes: Some(10),
            lightly_active_minutes: Some(20),
            heart_rate_avg: Some(68),
        };
        let record = DailyActivityRecord::from(row);
        assert_eq!(record.distance_km, 6.25);
        assert_eq!(record.floors, Some(12));
    }

    #[test]
    fn test_summary_conversion() {
        let summary = summary_row(7).into_summary().unwrap();
        assert_eq!(summary.avg_steps, 8123);
        assert_eq!(summary.total_distance_km, 42.4);
        assert_eq!(summary.avg_heart_rate, Some(71));
        assert_eq!(summary.floors_climbed, 0);
        assert_eq!(summary.days_active, 6);
        assert_eq!(summary.activity_percentage, 85.7);
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(summary_row(0).into_summary().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_get_range_against_database() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();
        let user = UserId::parse("1").unwrap();
        let end = chrono::Utc::now().date_naive();
        let start = end - chrono::Duration::days(7);
        let records = ActivityRepository::get_range(&pool, &user, start, end)
            .await
            .unwrap();
        assert!(records.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
