//! Chat API routes

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use workout_buddy_shared::types::{
    ChatHistoryResponse, ChatRequest, ChatResponse, ClearHistoryQuery, ClearHistoryResponse,
    UserQuery,
};

/// Create chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(chat))
        .route("/history", delete(clear_history))
        .route("/history/:conversation_id", get(get_history))
}

/// POST /chat - Send a message to the coach
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state.coach().chat(&req, state.today()).await?;
    Ok(Json(response))
}

/// GET /chat/history/:conversation_id - Stored messages, oldest first
async fn get_history(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    let history = state
        .coach()
        .history(&conversation_id, &query.user_id)
        .await?;
    Ok(Json(history))
}

/// DELETE /chat/history - Remove a conversation
async fn clear_history(
    State(state): State<AppState>,
    Query(query): Query<ClearHistoryQuery>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let response = state
        .coach()
        .clear(&query.conversation_id, &query.user_id)
        .await?;
    Ok(Json(response))
}
