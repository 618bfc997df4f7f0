//! Goals API routes

use crate::error::ApiError;
use crate::services::GoalsService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use workout_buddy_shared::feasibility::FeasibilityResult;
use workout_buddy_shared::types::{
    FeasibilityRequest, GoalAnalysisResponse, MilestonesResponse, UserQuery,
};

/// Create goals routes
pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/feasibility", post(feasibility))
        .route("/:goal_id/analysis", get(analysis))
        .route("/:goal_id/milestones", get(milestones))
}

/// POST /goals/feasibility - Check whether a proposed goal is realistic
async fn feasibility(
    Json(req): Json<FeasibilityRequest>,
) -> Result<Json<FeasibilityResult>, ApiError> {
    Ok(Json(GoalsService::feasibility(&req)?))
}

/// GET /goals/:goal_id/analysis - Progress, adjustments and prediction
async fn analysis(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<GoalAnalysisResponse>, ApiError> {
    let analysis =
        GoalsService::analysis(state.store(), &query.user_id, &goal_id, state.today()).await?;
    Ok(Json(analysis))
}

/// GET /goals/:goal_id/milestones - Milestones between start and target date
async fn milestones(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MilestonesResponse>, ApiError> {
    let milestones =
        GoalsService::milestones(state.store(), &query.user_id, &goal_id, state.today()).await?;
    Ok(Json(milestones))
}
