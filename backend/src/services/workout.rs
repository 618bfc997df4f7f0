//! Workout service
//!
//! Plans are built from the user's recent fitness level and exercise
//! research. Without research the plan is not generated and the caller
//! receives a degraded reply.

use super::{window_bounds, ResearchService};
use crate::error::ApiError;
use crate::reply::Reply;
use crate::store::FitnessDataStore;
use crate::telemetry;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};
use validator::Validate;
use workout_buddy_shared::patterns::calculate_fitness_level;
use workout_buddy_shared::types::{
    ProgressionRequest, QuickWorkoutRequest, WorkoutPlanRequest, WORKOUT_PLAN_UNAVAILABLE,
};
use workout_buddy_shared::workout::{
    build_workout_plan, default_equipment, progression_strategies, quick_workout, PlanOptions,
    ProgressionPlan, QuickWorkout, WorkoutPlan,
};
use workout_buddy_shared::{FitnessLevel, UserId};

/// Days of activity used to place the user on a fitness level
pub const LEVEL_WINDOW_DAYS: u32 = 7;

/// Progression strategies plus the workout they apply to
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionResponse {
    #[serde(flatten)]
    pub plan: ProgressionPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_workout: Option<serde_json::Value>,
}

/// Workout service for business logic
pub struct WorkoutService;

impl WorkoutService {
    /// Personalized multi-week plan
    pub async fn generate_plan(
        store: &dyn FitnessDataStore,
        research: &ResearchService,
        request: &WorkoutPlanRequest,
        today: NaiveDate,
    ) -> Result<Reply<WorkoutPlan>, ApiError> {
        request.validate()?;
        telemetry::coach_request("workout_plan");

        let user_id: &UserId = &request.user_id;
        info!(user_id = %user_id, goal = %request.goal, "Generating workout plan");

        let (start, end) = window_bounds(today, LEVEL_WINDOW_DAYS);
        let summary = match store.summary(user_id, start, end).await {
            Ok(summary) => summary.unwrap_or_default(),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to load fitness summary");
                telemetry::coach_degraded("workout_plan");
                return Ok(Reply::degraded(WORKOUT_PLAN_UNAVAILABLE, e));
            }
        };
        let level = calculate_fitness_level(&summary);

        let options = PlanOptions {
            goal: request.goal.clone(),
            duration_weeks: request.duration_weeks,
            days_per_week: request.days_per_week,
            equipment: request
                .equipment
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(default_equipment),
            limitations: request.limitations.clone().unwrap_or_default(),
        };

        let results = match research
            .search_exercises(&options.goal, level, &options.equipment, &options.limitations)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Exercise research unavailable");
                telemetry::coach_degraded("workout_plan");
                return Ok(Reply::degraded(WORKOUT_PLAN_UNAVAILABLE, e));
            }
        };

        Ok(Reply::Complete(build_workout_plan(
            user_id, &options, &summary, level, &results,
        )))
    }

    /// A single short session
    pub fn quick(request: &QuickWorkoutRequest) -> Result<QuickWorkout, ApiError> {
        request.validate()?;
        let equipment = request.equipment.clone().unwrap_or_default();
        Ok(quick_workout(
            request.goal.trim(),
            request.duration_minutes,
            &equipment,
        ))
    }

    /// How to progress from the current workout at a level
    pub fn progression(request: &ProgressionRequest) -> ProgressionResponse {
        ProgressionResponse {
            plan: progression_strategies(FitnessLevel::parse_or_default(&request.fitness_level)),
            current_workout: request.current_workout.clone(),
        }
    }
}
