//! API request and response types

use crate::goals::{AchievementPrediction, AdjustmentSuggestions, GoalProgress, Milestone};
use crate::insights::DailyInsight;
use crate::models::{GoalType, UserId};
use crate::patterns::{PatternAnalysis, PatternStats};
use crate::streak::StreakResult;
use crate::workout::Source;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Chat
// ============================================================================

/// Chat request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 4000, message = "must be between 1 and 4000 characters"))]
    pub message: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub conversation_id: Option<String>,
}

/// Chat response; `error` is set when the reply is an apology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub tools_used: Vec<String>,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Speaker of a stored chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parse a stored role; anything but `user` is the assistant
    pub fn from_stored(value: &str) -> Self {
        if value.eq_ignore_ascii_case("user") {
            Role::User
        } else {
            Role::Assistant
        }
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Tools and sources behind an assistant turn; `{}` for user turns
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub conversation_id: String,
    pub user_id: UserId,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClearHistoryQuery {
    pub user_id: UserId,
    pub conversation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Insights
// ============================================================================

/// Reporting period; unknown names fall back to a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub fn days(&self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::Year => "This Year",
        }
    }
}

impl From<String> for Period {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Week,
        }
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub period: Period,
}

/// Full insight report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub user_id: UserId,
    pub period: Period,
    pub days_analyzed: u32,
    pub generated_at: DateTime<Utc>,
    pub insights: Vec<String>,
    pub patterns: PatternAnalysis,
    pub stats: Option<PatternStats>,
    pub streak: StreakResult,
    pub motivation: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Shown in place of insights when they cannot be produced
pub const INSIGHTS_UNAVAILABLE: &str = "Unable to generate insights at this time";

impl InsightsResponse {
    /// Body returned when the report could not be built
    pub fn unavailable(user_id: UserId, period: Period, reason: String) -> Self {
        Self {
            user_id,
            period,
            days_analyzed: 0,
            generated_at: Utc::now(),
            insights: vec![INSIGHTS_UNAVAILABLE.to_string()],
            patterns: PatternAnalysis::default(),
            stats: None,
            streak: StreakResult::default(),
            motivation: String::new(),
            summary: String::new(),
            error: Some(reason),
        }
    }
}

/// `user_id` plus an optional window length
#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
    pub user_id: UserId,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreakQuery {
    pub user_id: UserId,
    pub days: Option<u32>,
    pub goal_steps: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakResponse {
    #[serde(flatten)]
    pub streak: StreakResult,
    pub goal_steps: u32,
    pub motivation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyInsightResponse {
    pub user_id: UserId,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub insight: DailyInsight,
}

fn default_period_days() -> u32 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    pub user_id: UserId,
    #[serde(default = "default_period_days")]
    #[validate(range(min = 1, max = 182, message = "must be between 1 and 182"))]
    pub period_days: u32,
}

impl CompareRequest {
    /// Labels for the current and previous period
    pub fn labels(&self) -> (String, String) {
        match self.period_days {
            7 => ("This Week".to_string(), "Last Week".to_string()),
            30 => ("This Month".to_string(), "Last Month".to_string()),
            n => (format!("Last {} days", n), format!("Previous {} days", n)),
        }
    }
}

// ============================================================================
// Recommendations
// ============================================================================

fn default_duration_weeks() -> u32 {
    8
}

fn default_days_per_week() -> u32 {
    4
}

fn default_quick_minutes() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkoutPlanRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub goal: String,
    #[serde(default = "default_duration_weeks")]
    #[validate(range(min = 1, max = 52, message = "must be between 1 and 52 weeks"))]
    pub duration_weeks: u32,
    #[serde(default = "default_days_per_week")]
    #[validate(range(min = 1, max = 7, message = "must be between 1 and 7 days"))]
    pub days_per_week: u32,
    #[serde(default)]
    pub equipment: Option<Vec<String>>,
    #[serde(default)]
    pub limitations: Option<Vec<String>>,
}

/// Shown in place of a plan when it cannot be produced
pub const WORKOUT_PLAN_UNAVAILABLE: &str = "Unable to generate workout plan at this time";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanUnavailable {
    pub message: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuickWorkoutRequest {
    #[validate(length(min = 1, max = 100))]
    pub goal: String,
    #[serde(default = "default_quick_minutes")]
    #[validate(range(min = 5, max = 180, message = "must be between 5 and 180 minutes"))]
    pub duration_minutes: u32,
    #[serde(default)]
    pub equipment: Option<Vec<String>>,
}

fn default_fitness_level() -> String {
    "intermediate".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRequest {
    /// Echoed back untouched; strategies depend on the level only
    #[serde(default)]
    pub current_workout: Option<serde_json::Value>,
    #[serde(default = "default_fitness_level")]
    pub fitness_level: String,
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeasibilityRequest {
    pub goal_type: GoalType,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub current_value: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub target_value: f64,
    /// Zero or negative means no time left
    pub timeframe_days: i64,
    #[serde(default)]
    pub fitness_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAnalysisResponse {
    pub goal_id: String,
    pub progress: GoalProgress,
    pub adjustments: AdjustmentSuggestions,
    pub prediction: AchievementPrediction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestonesResponse {
    pub goal_id: String,
    pub milestones: Vec<Milestone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_defaults_to_week() {
        let request: InsightsRequest = serde_json::from_str(r#"{"user_id": 1}"#).unwrap();
        assert_eq!(request.period, Period::Week);
        let request: InsightsRequest =
            serde_json::from_str(r#"{"user_id": "1", "period": "decade"}"#).unwrap();
        assert_eq!(request.period, Period::Week);
        assert_eq!(Period::from("Month".to_string()).days(), 30);
        assert_eq!(Period::Year.days(), 365);
    }

    #[test]
    fn test_chat_request_validation() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"user_id": 3, "message": ""}"#).unwrap();
        assert!(request.validate().is_err());
        let request: ChatRequest =
            serde_json::from_str(r#"{"user_id": "3", "message": "hi"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.conversation_id.is_none());
    }

    #[test]
    fn test_workout_plan_defaults() {
        let request: WorkoutPlanRequest =
            serde_json::from_str(r#"{"user_id": 1, "goal": "muscle_gain"}"#).unwrap();
        assert_eq!(request.duration_weeks, 8);
        assert_eq!(request.days_per_week, 4);
        assert!(request.validate().is_ok());

        let request: WorkoutPlanRequest =
            serde_json::from_str(r#"{"user_id": 1, "goal": "x", "days_per_week": 9}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_compare_labels() {
        let request: CompareRequest = serde_json::from_str(r#"{"user_id": 1}"#).unwrap();
        assert_eq!(request.period_days, 7);
        assert_eq!(request.labels().1, "Last Week");
        let request = CompareRequest {
            user_id: UserId::from(1),
            period_days: 14,
        };
        assert_eq!(request.labels().0, "Last 14 days");
    }

    #[test]
    fn test_feasibility_accepts_past_deadline() {
        let past: FeasibilityRequest = serde_json::from_str(
            r#"{"goal_type": "steps", "current_value": 1, "target_value": 2, "timeframe_days": -1}"#,
        )
        .unwrap();
        assert_eq!(past.timeframe_days, -1);
        assert!(past.validate().is_ok());
    }

    #[test]
    fn test_chat_response_omits_missing_error() {
        let response = ChatResponse {
            message: "ok".to_string(),
            sources: Vec::new(),
            tools_used: Vec::new(),
            conversation_id: "c".to_string(),
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
    }
}
