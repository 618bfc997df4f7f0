//! Insights service
//!
//! Provides business logic for:
//! - The periodic insight report (patterns, streak, summary)
//! - Today's check-in against the past week
//! - Trend, weekday breakdown, streak and period comparison queries

use super::window_bounds;
use crate::error::ApiError;
use crate::reply::Reply;
use crate::store::FitnessDataStore;
use crate::telemetry;
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::{error, info};
use workout_buddy_shared::insights::{
    compare_periods, compose_insights, create_summary, daily_insight, PeriodComparison, TipSource,
};
use workout_buddy_shared::patterns::{analyze_patterns, weekly_breakdown, WeeklyBreakdown};
use workout_buddy_shared::stats::detect_trend;
use workout_buddy_shared::streak::{calculate_streak, motivation_for_streak};
use workout_buddy_shared::types::{
    DailyInsightResponse, InsightsResponse, Period, StreakResponse, INSIGHTS_UNAVAILABLE,
};
use workout_buddy_shared::validation::{validate_step_goal, validate_window_days};
use workout_buddy_shared::{TrendResult, UserId};

pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const DEFAULT_BREAKDOWN_DAYS: u32 = 28;
pub const DEFAULT_STREAK_DAYS: u32 = 30;

/// Tip chosen uniformly at random
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTips;

impl TipSource for RandomTips {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

fn checked_days(days: Option<u32>, default: u32) -> Result<u32, ApiError> {
    let days = days.unwrap_or(default);
    validate_window_days(days).map_err(|m| ApiError::field("days", m))?;
    Ok(days)
}

/// Insights service for business logic
pub struct InsightsService;

impl InsightsService {
    /// Full report for a period; store failures degrade to an apology
    pub async fn generate(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        period: Period,
        today: NaiveDate,
        goal_steps: u32,
    ) -> Reply<InsightsResponse> {
        telemetry::coach_request("insights");
        info!(user_id = %user_id, period = period.as_str(), "Generating insights");

        let (start, end) = window_bounds(today, period.days());
        let fetched = tokio::try_join!(
            store.daily_records(user_id, start, end),
            store.active_goals(user_id),
        );

        let (window, goals) = match fetched {
            Ok(data) => data,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to load data for insights");
                telemetry::coach_degraded("insights");
                return Reply::degraded(INSIGHTS_UNAVAILABLE, e);
            }
        };

        let patterns = analyze_patterns(&window);
        let streak = calculate_streak(&window, goal_steps);

        Reply::Complete(InsightsResponse {
            user_id: user_id.clone(),
            period,
            days_analyzed: window.len() as u32,
            generated_at: Utc::now(),
            insights: compose_insights(&window, &goals),
            stats: patterns.stats.clone(),
            summary: create_summary(&patterns, &streak),
            motivation: motivation_for_streak(streak.current_streak).to_string(),
            patterns,
            streak,
            error: None,
        })
    }

    /// Today's record against the seven days before it
    pub async fn daily(
        store: &dyn FitnessDataStore,
        tips: &dyn TipSource,
        user_id: &UserId,
        today: NaiveDate,
        goal_steps: u32,
    ) -> Result<DailyInsightResponse, ApiError> {
        let yesterday = today - Duration::days(1);
        let (start, end) = window_bounds(yesterday, 7);
        let (record, week) = tokio::try_join!(
            store.record_for(user_id, today),
            store.daily_records(user_id, start, end),
        )
        .map_err(ApiError::Internal)?;

        Ok(DailyInsightResponse {
            user_id: user_id.clone(),
            date: today,
            insight: daily_insight(record.as_ref(), &week, goal_steps, tips),
        })
    }

    /// Step trend over the last `days` days
    pub async fn trends(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        days: Option<u32>,
        today: NaiveDate,
    ) -> Result<TrendResult, ApiError> {
        let days = checked_days(days, DEFAULT_TREND_DAYS)?;
        let (start, end) = window_bounds(today, days);
        let window = store
            .daily_records(user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        Ok(detect_trend(&window.steps()))
    }

    /// Per-weekday averages over the last `days` days
    pub async fn weekly_breakdown(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        days: Option<u32>,
        today: NaiveDate,
    ) -> Result<WeeklyBreakdown, ApiError> {
        let days = checked_days(days, DEFAULT_BREAKDOWN_DAYS)?;
        let (start, end) = window_bounds(today, days);
        let window = store
            .daily_records(user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        Ok(weekly_breakdown(&window))
    }

    /// Streaks against a step goal
    pub async fn streak(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        days: Option<u32>,
        goal_steps: u32,
        today: NaiveDate,
    ) -> Result<StreakResponse, ApiError> {
        let days = checked_days(days, DEFAULT_STREAK_DAYS)?;
        validate_step_goal(goal_steps).map_err(|m| ApiError::field("goal_steps", m))?;

        let (start, end) = window_bounds(today, days);
        let window = store
            .daily_records(user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        let streak = calculate_streak(&window, goal_steps);

        Ok(StreakResponse {
            motivation: motivation_for_streak(streak.current_streak).to_string(),
            streak,
            goal_steps,
        })
    }

    /// The last `period_days` days against the `period_days` before them
    pub async fn compare(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        period_days: u32,
        labels: (String, String),
        today: NaiveDate,
    ) -> Result<PeriodComparison, ApiError> {
        let (current_start, current_end) = window_bounds(today, period_days);
        let (previous_start, previous_end) =
            window_bounds(current_start - Duration::days(1), period_days);

        let (current, previous) = tokio::try_join!(
            store.daily_records(user_id, current_start, current_end),
            store.daily_records(user_id, previous_start, previous_end),
        )
        .map_err(ApiError::Internal)?;

        Ok(compare_periods(&current, &previous, &labels.0, &labels.1))
    }
}
