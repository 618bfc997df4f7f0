//! Insights API routes

use crate::error::ApiError;
use crate::services::InsightsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;
use workout_buddy_shared::insights::PeriodComparison;
use workout_buddy_shared::patterns::WeeklyBreakdown;
use workout_buddy_shared::types::{
    CompareRequest, DailyInsightResponse, InsightsRequest, InsightsResponse, StreakQuery,
    StreakResponse, UserQuery, WindowQuery,
};
use workout_buddy_shared::TrendResult;

/// Create insights routes
pub fn insights_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(generate_insights))
        .route("/daily", get(daily_insight))
        .route("/trends", get(trends))
        .route("/weekly-breakdown", get(weekly_breakdown))
        .route("/streak", get(streak))
        .route("/compare", post(compare))
}

/// POST /insights - Insight report for a period
async fn generate_insights(
    State(state): State<AppState>,
    Json(req): Json<InsightsRequest>,
) -> Json<InsightsResponse> {
    let reply = InsightsService::generate(
        state.store(),
        &req.user_id,
        req.period,
        state.today(),
        state.step_goal(),
    )
    .await;

    Json(reply.unwrap_or_else(|_, reason| {
        InsightsResponse::unavailable(req.user_id.clone(), req.period, reason)
    }))
}

/// GET /insights/daily - Today against the past week
async fn daily_insight(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<DailyInsightResponse>, ApiError> {
    let response = InsightsService::daily(
        state.store(),
        state.tips.as_ref(),
        &query.user_id,
        state.today(),
        state.step_goal(),
    )
    .await?;
    Ok(Json(response))
}

/// GET /insights/trends - Step trend over a window
async fn trends(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<TrendResult>, ApiError> {
    let trend =
        InsightsService::trends(state.store(), &query.user_id, query.days, state.today()).await?;
    Ok(Json(trend))
}

/// GET /insights/weekly-breakdown - Averages per weekday
async fn weekly_breakdown(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<WeeklyBreakdown>, ApiError> {
    let breakdown =
        InsightsService::weekly_breakdown(state.store(), &query.user_id, query.days, state.today())
            .await?;
    Ok(Json(breakdown))
}

/// GET /insights/streak - Streaks against a step goal
async fn streak(
    State(state): State<AppState>,
    Query(query): Query<StreakQuery>,
) -> Result<Json<StreakResponse>, ApiError> {
    let response = InsightsService::streak(
        state.store(),
        &query.user_id,
        query.days,
        query.goal_steps.unwrap_or_else(|| state.step_goal()),
        state.today(),
    )
    .await?;
    Ok(Json(response))
}

/// POST /insights/compare - This period against the previous one
async fn compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<PeriodComparison>, ApiError> {
    req.validate()?;
    let comparison = InsightsService::compare(
        state.store(),
        &req.user_id,
        req.period_days,
        req.labels(),
        state.today(),
    )
    .await?;
    Ok(Json(comparison))
}
