//! User context for a chat turn
//!
//! The message decides which data is loaded next to the weekly summary.

use crate::services::window_bounds;
use crate::store::FitnessDataStore;
use chrono::NaiveDate;
use workout_buddy_shared::patterns::{weekly_breakdown, WeeklyBreakdown};
use workout_buddy_shared::stats::detect_trend;
use workout_buddy_shared::{FitnessSummary, Goal, TrendResult, UserId};

pub const SUMMARY_DAYS: u32 = 7;
pub const TREND_DAYS: u32 = 30;
pub const BREAKDOWN_DAYS: u32 = 28;

const GOAL_WORDS: &[&str] = &["goal", "progress", "achieve", "target"];
const TREND_WORDS: &[&str] = &["trend", "pattern", "improve", "week", "month"];
const WEEKDAY_WORDS: &[&str] = &["day", "monday", "tuesday", "weekend"];
const RESEARCH_WORDS: &[&str] = &[
    "research",
    "study",
    "science",
    "recovery",
    "nutrition",
    "injury",
];

fn mentions(message: &str, words: &[&str]) -> bool {
    words.iter().any(|word| message.contains(word))
}

/// Data a message asks for beyond the weekly summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextNeeds {
    pub goals: bool,
    pub trends: bool,
    pub weekly_breakdown: bool,
    pub research: bool,
}

impl ContextNeeds {
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        Self {
            goals: mentions(&message, GOAL_WORDS),
            trends: mentions(&message, TREND_WORDS),
            weekly_breakdown: mentions(&message, WEEKDAY_WORDS),
            research: mentions(&message, RESEARCH_WORDS),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoachContext {
    pub summary: FitnessSummary,
    pub goals: Option<Vec<Goal>>,
    pub trend: Option<TrendResult>,
    pub weekly_breakdown: Option<WeeklyBreakdown>,
}

impl CoachContext {
    /// Names of the data tools behind this context
    pub fn tools_used(&self) -> Vec<String> {
        let mut tools = vec!["fitness_summary".to_string()];
        if self.goals.is_some() {
            tools.push("goal_progress".to_string());
        }
        if self.trend.is_some() {
            tools.push("activity_trends".to_string());
        }
        if self.weekly_breakdown.is_some() {
            tools.push("weekly_breakdown".to_string());
        }
        tools
    }
}

/// Load everything `needs` names, concurrently
pub async fn gather(
    store: &dyn FitnessDataStore,
    user_id: &UserId,
    needs: ContextNeeds,
    today: NaiveDate,
) -> anyhow::Result<CoachContext> {
    let (summary_start, summary_end) = window_bounds(today, SUMMARY_DAYS);

    let (summary, goals, trend, breakdown) = tokio::try_join!(
        store.summary(user_id, summary_start, summary_end),
        async {
            if !needs.goals {
                return Ok(None);
            }
            store.active_goals(user_id).await.map(Some)
        },
        async {
            if !needs.trends {
                return Ok(None);
            }
            let (start, end) = window_bounds(today, TREND_DAYS);
            let window = store.daily_records(user_id, start, end).await?;
            Ok::<_, anyhow::Error>(Some(detect_trend(&window.steps())))
        },
        async {
            if !needs.weekly_breakdown {
                return Ok(None);
            }
            let (start, end) = window_bounds(today, BREAKDOWN_DAYS);
            let window = store.daily_records(user_id, start, end).await?;
            Ok::<_, anyhow::Error>(Some(weekly_breakdown(&window)))
        },
    )?;

    Ok(CoachContext {
        summary: summary.unwrap_or_default(),
        goals,
        trend,
        weekly_breakdown: breakdown,
    })
}
