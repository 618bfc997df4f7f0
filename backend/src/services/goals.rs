//! Goals service for feasibility checks and progress analysis
//!
//! Provides business logic for:
//! - Feasibility of a proposed goal for a fitness level
//! - Progress against a stored goal's timeline, with adjustment suggestions
//! - Achievement prediction from the recent step trend
//! - Milestone generation

use super::window_bounds;
use crate::error::ApiError;
use crate::store::FitnessDataStore;
use chrono::NaiveDate;
use tracing::info;
use validator::Validate;
use workout_buddy_shared::feasibility::{assess_feasibility, FeasibilityResult};
use workout_buddy_shared::goals::{
    analyze_goal_progress, generate_milestones, predict_goal_achievement,
    suggest_goal_adjustments,
};
use workout_buddy_shared::stats::detect_trend;
use workout_buddy_shared::types::{FeasibilityRequest, GoalAnalysisResponse, MilestonesResponse};
use workout_buddy_shared::validation::{validate_goal_value, validate_timeframe_days};
use workout_buddy_shared::{FitnessLevel, Goal, UserId};

/// Days of activity behind the achievement prediction's trend
pub const PREDICTION_TREND_DAYS: u32 = 30;

/// Goals service for business logic
pub struct GoalsService;

impl GoalsService {
    /// Check whether a proposed goal is realistic
    pub fn feasibility(request: &FeasibilityRequest) -> Result<FeasibilityResult, ApiError> {
        request.validate()?;
        validate_goal_value(request.current_value)
            .map_err(|m| ApiError::field("current_value", m))?;
        validate_goal_value(request.target_value)
            .map_err(|m| ApiError::field("target_value", m))?;
        validate_timeframe_days(request.timeframe_days)
            .map_err(|m| ApiError::field("timeframe_days", m))?;

        let level = request
            .fitness_level
            .as_deref()
            .map(FitnessLevel::parse_or_default)
            .unwrap_or_default();

        Ok(assess_feasibility(
            &request.goal_type,
            request.current_value,
            request.target_value,
            request.timeframe_days,
            level,
        ))
    }

    async fn load_goal(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        goal_id: &str,
    ) -> Result<Goal, ApiError> {
        store
            .goal(user_id, goal_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))
    }

    /// Progress, adjustments and prediction for one goal
    pub async fn analysis(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        goal_id: &str,
        today: NaiveDate,
    ) -> Result<GoalAnalysisResponse, ApiError> {
        info!(user_id = %user_id, goal_id, "Analyzing goal");

        let (start, end) = window_bounds(today, PREDICTION_TREND_DAYS);
        let (goal, window) = tokio::try_join!(
            Self::load_goal(store, user_id, goal_id),
            async {
                store
                    .daily_records(user_id, start, end)
                    .await
                    .map_err(ApiError::Internal)
            },
        )?;

        let progress = analyze_goal_progress(&goal, today);
        let adjustments = suggest_goal_adjustments(&goal, &progress, today);
        let recent_trend = detect_trend(&window.steps()).trend;
        let prediction = predict_goal_achievement(
            goal.current_value,
            goal.target_value,
            progress.days_elapsed,
            progress.days_remaining,
            recent_trend,
        );

        Ok(GoalAnalysisResponse {
            goal_id: goal.id.clone(),
            progress,
            adjustments,
            prediction,
        })
    }

    /// Evenly spaced milestones between start and target date
    pub async fn milestones(
        store: &dyn FitnessDataStore,
        user_id: &UserId,
        goal_id: &str,
        today: NaiveDate,
    ) -> Result<MilestonesResponse, ApiError> {
        let goal = Self::load_goal(store, user_id, goal_id).await?;
        Ok(MilestonesResponse {
            goal_id: goal.id.clone(),
            milestones: generate_milestones(&goal, today),
        })
    }
}
