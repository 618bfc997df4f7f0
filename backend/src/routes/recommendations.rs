//! Workout recommendation routes

use crate::error::ApiError;
use crate::reply::Reply;
use crate::services::workout::ProgressionResponse;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use workout_buddy_shared::types::{
    ProgressionRequest, QuickWorkoutRequest, WorkoutPlanRequest, WorkoutPlanUnavailable,
};
use workout_buddy_shared::workout::QuickWorkout;

/// Create recommendation routes
pub fn recommendations_routes() -> Router<AppState> {
    Router::new()
        .route("/workout-plan", post(workout_plan))
        .route("/quick-workout", post(quick_workout))
        .route("/progression", post(progression))
}

/// POST /recommendations/workout-plan - Personalized multi-week plan
async fn workout_plan(
    State(state): State<AppState>,
    Json(req): Json<WorkoutPlanRequest>,
) -> Result<Response, ApiError> {
    let reply =
        WorkoutService::generate_plan(state.store(), &state.research, &req, state.today()).await?;

    Ok(match reply {
        Reply::Complete(plan) => Json(plan).into_response(),
        Reply::Degraded { message, reason } => Json(WorkoutPlanUnavailable {
            message,
            error: reason,
        })
        .into_response(),
    })
}

/// POST /recommendations/quick-workout - A single short session
async fn quick_workout(Json(req): Json<QuickWorkoutRequest>) -> Result<Json<QuickWorkout>, ApiError> {
    Ok(Json(WorkoutService::quick(&req)?))
}

/// POST /recommendations/progression - Progression strategies by level
async fn progression(Json(req): Json<ProgressionRequest>) -> Json<ProgressionResponse> {
    Json(WorkoutService::progression(&req))
}
