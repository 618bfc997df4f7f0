//! Web research for exercises and training topics
//!
//! Results from trusted fitness and medical sources are moved to the front
//! and the list is capped at fifteen entries.

use crate::clients::{ClientError, SearchProvider};
use std::sync::Arc;
use tracing::{error, info};
use workout_buddy_shared::workout::ResearchResult;
use workout_buddy_shared::FitnessLevel;

/// Domains whose results are listed first
pub const TRUSTED_DOMAINS: [&str; 10] = [
    "pubmed.ncbi.nlm.nih.gov",
    "acsm.org",
    "nsca.com",
    "mayoclinic.org",
    "health.harvard.edu",
    "nih.gov",
    "acefitness.org",
    "nasm.org",
    "strongerbyscience.com",
    "examine.com",
];

/// Longest result list returned
pub const MAX_RESULTS: usize = 15;

/// Query for exercises matching a goal, level and equipment
pub fn exercise_query(
    goal: &str,
    level: FitnessLevel,
    equipment: &[String],
    limitations: &[String],
) -> String {
    let equipment = if equipment.is_empty() {
        "bodyweight".to_string()
    } else {
        equipment
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut query = format!(
        "best {} exercises {} {} 2024 2025",
        goal,
        level.as_str(),
        equipment
    );
    if let Some(limitation) = limitations.first() {
        query.push_str(&format!(" with {} safe", limitation));
    }
    query
}

/// Query for a general training topic
pub fn topic_query(topic: &str, context: &str) -> String {
    format!("{} fitness training {} 2024 2025", topic, context)
}

pub fn is_trusted(link: &str) -> bool {
    TRUSTED_DOMAINS.iter().any(|domain| link.contains(domain))
}

/// Stable partition, trusted first, truncated to `MAX_RESULTS`
pub fn prioritize_trusted(results: Vec<ResearchResult>) -> Vec<ResearchResult> {
    let (mut trusted, other): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|r| is_trusted(&r.link));
    trusted.extend(other);
    trusted.truncate(MAX_RESULTS);
    trusted
}

/// Research front-end over the configured search provider
#[derive(Clone, Default)]
pub struct ResearchService {
    provider: Option<Arc<dyn SearchProvider>>,
}

impl ResearchService {
    pub fn new(provider: Option<Arc<dyn SearchProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Exercise research for a plan; an error when search is unavailable
    pub async fn search_exercises(
        &self,
        goal: &str,
        level: FitnessLevel,
        equipment: &[String],
        limitations: &[String],
    ) -> Result<Vec<ResearchResult>, ClientError> {
        let query = exercise_query(goal, level, equipment, limitations);
        info!(query = %query, "Searching exercises");

        let provider = self
            .provider
            .as_ref()
            .ok_or(ClientError::NotConfigured("web search"))?;

        let results = provider.search(&query).await.map_err(|e| {
            error!(provider = provider.name(), error = %e, "Exercise search failed");
            e
        })?;
        Ok(prioritize_trusted(results))
    }

    /// Topic research; empty when search is unavailable or fails
    pub async fn research_topic(&self, topic: &str, context: &str) -> Vec<ResearchResult> {
        let query = topic_query(topic, context);
        info!(query = %query, "Researching topic");

        let Some(provider) = self.provider.as_ref() else {
            info!("No search API configured");
            return Vec::new();
        };

        match provider.search(&query).await {
            Ok(results) => prioritize_trusted(results),
            Err(e) => {
                error!(provider = provider.name(), error = %e, "Research failed");
                Vec::new()
            }
        }
    }

    pub async fn training_method(&self, method: &str) -> Vec<ResearchResult> {
        self.research_topic(method, "training method benefits science")
            .await
    }

    pub async fn nutrition(&self, goal: &str) -> Vec<ResearchResult> {
        self.research_topic(
            &format!("nutrition for {}", goal),
            "evidence-based diet recommendations",
        )
        .await
    }

    pub async fn injury_prevention(&self, activity: &str) -> Vec<ResearchResult> {
        self.research_topic(
            &format!("{} injury prevention", activity),
            "safe training techniques",
        )
        .await
    }

    pub async fn recovery(&self) -> Vec<ResearchResult> {
        self.research_topic("muscle recovery techniques", "post-workout recovery science")
            .await
    }
}
