//! Workout Buddy AI Service
//!
//! Coaching backend for the Workout Buddy fitness tracker.
//!
//! ## Architecture
//!
//! The service follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Agent: the chat coach (context, prompt, language model)
//! - Services: insights, goals, workout plans and research
//! - Stores and repositories: data access over PostgreSQL with SQLx
//! - Clients: Gemini and web search over HTTP

use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_buddy_ai::clients::{build_provider, GeminiClient, LanguageModel};
use workout_buddy_ai::state::{AppState, Backends};
use workout_buddy_ai::{config, db, routes, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Workout Buddy AI Service"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config);
    }

    // Create database pool
    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run migrations (skip in production if using separate migration job)
    if !config::AppConfig::is_production() {
        info!("Running database migrations...");
        db::run_migrations(&db_pool).await?;
    }

    // External clients
    let llm = GeminiClient::from_config(&config.ai)?
        .map(|client| Arc::new(client) as Arc<dyn LanguageModel>);
    let search = build_provider(&config.search)?;
    info!(
        llm = llm.as_ref().map(|m| m.name()).unwrap_or("none"),
        search = search.as_ref().map(|s| s.name()).unwrap_or("none"),
        "External clients configured"
    );

    let metrics = match telemetry::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install metrics recorder: {}. /metrics will be unavailable.", e);
            None
        }
    };

    // Create application state
    let backends = Backends::postgres(&db_pool).with_llm(llm).with_search(search);
    let state = AppState::new(db_pool, config.clone(), backends, metrics);

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "workout_buddy_ai=info,tower_http=info".into()
        } else {
            "workout_buddy_ai=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Warn about configuration that is unusual for production
fn validate_production_config(config: &config::AppConfig) {
    if !config.ai.is_configured() {
        warn!("No Gemini API key configured - chat will use canned responses");
    }

    if !config.search.is_configured() {
        warn!("No search API configured - workout plans will be unavailable");
    }

    // Check database URL is not localhost in production
    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
