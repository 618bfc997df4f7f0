//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Build once**: pool, clients and the coach are created at startup
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::agent::FitnessCoach;
use crate::clients::{LanguageModel, SearchProvider};
use crate::config::AppConfig;
use crate::services::{RandomTips, ResearchService};
use crate::store::{
    ConversationStore, FitnessDataStore, PgConversationStore, PgFitnessDataStore,
};
use chrono::{NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use workout_buddy_shared::insights::TipSource;

/// The data stores and external clients behind the coach
pub struct Backends {
    pub store: Arc<dyn FitnessDataStore>,
    pub conversations: Arc<dyn ConversationStore>,
    pub llm: Option<Arc<dyn LanguageModel>>,
    pub search: Option<Arc<dyn SearchProvider>>,
}

impl Backends {
    /// Database-backed stores, no external clients
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            store: Arc::new(PgFitnessDataStore::new(pool.clone())),
            conversations: Arc::new(PgConversationStore::new(pool.clone())),
            llm: None,
            search: None,
        }
    }

    pub fn with_llm(mut self, llm: Option<Arc<dyn LanguageModel>>) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_search(mut self, search: Option<Arc<dyn SearchProvider>>) -> Self {
        self.search = search;
        self
    }
}

/// Shared application state
///
/// This struct holds all shared resources that handlers need access to.
///
/// # Performance
///
/// - `db`: PgPool is internally Arc'd, cloning is O(1)
/// - `config`, `store`, `tips`, `coach`: wrapped in Arc, cloning is O(1)
/// - `research`: holds an optional Arc'd provider
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Activity and goal data
    pub store: Arc<dyn FitnessDataStore>,
    /// Web research over the configured search provider
    pub research: ResearchService,
    /// Motivational tip selection
    pub tips: Arc<dyn TipSource>,
    /// The chat coach
    pub coach: Arc<FitnessCoach>,
    /// Prometheus exposition, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        config: AppConfig,
        backends: Backends,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let research = ResearchService::new(backends.search);
        let coach = FitnessCoach::new(
            backends.store.clone(),
            backends.conversations,
            backends.llm,
            research.clone(),
            config.coach.clone(),
        );

        Self {
            db,
            config: Arc::new(config),
            store: backends.store,
            research,
            tips: Arc::new(RandomTips),
            coach: Arc::new(coach),
            metrics,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the data store
    #[inline]
    pub fn store(&self) -> &dyn FitnessDataStore {
        self.store.as_ref()
    }

    /// Get a reference to the coach
    #[inline]
    pub fn coach(&self) -> &FitnessCoach {
        &self.coach
    }

    /// Step goal used when a request does not name one
    #[inline]
    pub fn step_goal(&self) -> u32 {
        self.config.coach.default_step_goal
    }

    /// Current UTC date
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
