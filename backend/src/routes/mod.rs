//! Route definitions for the Workout Buddy AI service
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod chat;
mod goals;
mod health;
mod insights;
mod metrics;
mod recommendations;

pub use chat::chat_routes;
pub use goals::goals_routes;
pub use insights::insights_routes;
pub use recommendations::recommendations_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::render_metrics))
        .nest("/chat", chat::chat_routes())
        .nest("/insights", insights::insights_routes())
        .nest("/recommendations", recommendations::recommendations_routes())
        .nest("/goals", goals::goals_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Service description and endpoint map
async fn root() -> Json<Value> {
    Json(json!({
        "service": "Workout Buddy AI Service",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chat": "/chat",
            "insights": "/insights",
            "recommendations": "/recommendations",
            "goals": "/goals",
            "health": "/health",
            "metrics": "/metrics",
        }
    }))
}
