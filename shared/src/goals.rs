//! Goal progress analysis
//!
//! Works from the goal's real start and target dates relative to a
//! caller-supplied `today`, so results are reproducible in tests.

use crate::format::{compact_number, round_to};
use crate::models::{Goal, GoalType};
use crate::stats::Trend;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days added to the deadline by an extension suggestion
pub const DEADLINE_EXTENSION_DAYS: i64 = 30;

/// Where a goal stands against its timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub on_track: bool,
    pub expected_progress: f64,
    pub actual_progress: f64,
    pub gap: f64,
    pub days_elapsed: i64,
    pub days_remaining: i64,
    pub recommendations: Vec<String>,
}

/// Analyze a goal as of `today`
///
/// Elapsed days count from the effective start (start date, else creation
/// day); remaining days count to the target date. Both clamp at zero.
pub fn analyze_goal_progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let days_elapsed = goal
        .effective_start()
        .map(|start| (today - start).num_days().max(0))
        .unwrap_or(0);
    let days_remaining = goal
        .target_date
        .map(|end| (end - today).num_days().max(0))
        .unwrap_or(0);

    let expected = expected_progress(days_elapsed, days_remaining);
    let actual = goal.progress_percentage() as f64;
    let on_track = actual >= expected * 0.9;

    GoalProgress {
        goal: goal.clone(),
        on_track,
        expected_progress: round_to(expected, 1),
        actual_progress: actual,
        gap: round_to(actual - expected, 1),
        days_elapsed,
        days_remaining,
        recommendations: goal_recommendations(goal, on_track),
    }
}

fn expected_progress(days_elapsed: i64, days_remaining: i64) -> f64 {
    let total = days_elapsed + days_remaining;
    if total > 0 {
        days_elapsed as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

fn goal_recommendations(goal: &Goal, on_track: bool) -> Vec<String> {
    let mut recommendations = Vec::new();

    if on_track {
        recommendations.push("✅ You're on track! Keep up the great work".to_string());
        recommendations.push(format!(
            "Maintain current activity level to reach {}",
            compact_number(goal.target_value)
        ));
    } else {
        let gap = goal.target_value - goal.current_value;
        recommendations.push(format!(
            "🎯 You need to increase by {} to reach your goal",
            compact_number(gap)
        ));
        recommendations.push("💪 Consider adding an extra workout or increasing intensity".to_string());
        recommendations.push("📈 Small daily improvements add up over time".to_string());
    }

    match goal.goal_type {
        GoalType::Steps => recommendations
            .push("🚶 Try: taking walking breaks every hour, parking farther away".to_string()),
        GoalType::WeightLoss => recommendations
            .push("🥗 Combine exercise with balanced nutrition for best results".to_string()),
        GoalType::MuscleGain => recommendations
            .push("🏋️ Focus on progressive overload and adequate protein intake".to_string()),
        GoalType::Distance | GoalType::Other(_) => {}
    }

    recommendations
}

// ============================================================================
// Adjustments
// ============================================================================

/// A suggested change to a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalAdjustment {
    ExtendDeadline {
        description: String,
        new_target_date: NaiveDate,
        reason: String,
    },
    LowerTarget {
        description: String,
        suggested_target: i64,
        reason: String,
    },
    IncreaseTarget {
        description: String,
        suggested_target: i64,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSuggestions {
    pub has_suggestions: bool,
    pub suggestions: Vec<GoalAdjustment>,
}

/// Suggest making a goal easier or harder based on its progress
///
/// A missing target date is extended from `today`.
pub fn suggest_goal_adjustments(
    goal: &Goal,
    progress: &GoalProgress,
    today: NaiveDate,
) -> AdjustmentSuggestions {
    let mut suggestions = Vec::new();

    if progress.actual_progress < progress.expected_progress * 0.7 {
        let base = goal.target_date.unwrap_or(today);
        suggestions.push(GoalAdjustment::ExtendDeadline {
            description: "Consider extending your deadline by 1 month".to_string(),
            new_target_date: base + Duration::days(DEADLINE_EXTENSION_DAYS),
            reason: "This gives you more realistic time to reach your goal sustainably".to_string(),
        });
    }

    if goal.target_value > goal.current_value * 1.5 {
        suggestions.push(GoalAdjustment::LowerTarget {
            description: "Consider a slightly lower target".to_string(),
            suggested_target: (goal.current_value * 1.3) as i64,
            reason: "Smaller, achievable goals lead to better long-term success".to_string(),
        });
    }

    if progress.on_track && progress.actual_progress > progress.expected_progress * 1.2 {
        suggestions.push(GoalAdjustment::IncreaseTarget {
            description: "You're doing great! Consider increasing your goal".to_string(),
            suggested_target: (goal.target_value * 1.1) as i64,
            reason: "You're exceeding expectations - challenge yourself more".to_string(),
        });
    }

    AdjustmentSuggestions {
        has_suggestions: !suggestions.is_empty(),
        suggestions,
    }
}

// ============================================================================
// Achievement prediction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl Likelihood {
    pub fn confidence(&self) -> u8 {
        match self {
            Likelihood::VeryHigh => 90,
            Likelihood::High => 75,
            Likelihood::Moderate => 60,
            Likelihood::Low => 40,
        }
    }
}

/// Likelihood of reaching a goal at the current pace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementPrediction {
    pub likelihood: Likelihood,
    pub confidence_percentage: u8,
    pub current_progress_percentage: f64,
    pub expected_progress_percentage: f64,
    pub on_track: bool,
    pub daily_rate_needed: f64,
    pub current_daily_rate: f64,
    pub recommendation: String,
}

pub fn predict_goal_achievement(
    current_value: f64,
    target_value: f64,
    days_elapsed: i64,
    days_remaining: i64,
    recent_trend: Trend,
) -> AchievementPrediction {
    let expected = expected_progress(days_elapsed, days_remaining);
    let actual = if target_value > 0.0 {
        current_value / target_value * 100.0
    } else {
        0.0
    };

    let daily_rate_needed = if days_remaining > 0 {
        (target_value - current_value) / days_remaining as f64
    } else {
        0.0
    };
    let current_daily_rate = if days_elapsed > 0 {
        current_value / days_elapsed as f64
    } else {
        0.0
    };

    let likelihood = if actual >= expected * 1.1 && recent_trend == Trend::Increasing {
        Likelihood::VeryHigh
    } else if actual >= expected * 0.9 {
        Likelihood::High
    } else if actual >= expected * 0.7 {
        Likelihood::Moderate
    } else {
        Likelihood::Low
    };

    let recommendation = match likelihood {
        Likelihood::VeryHigh => "🎉 You're on an excellent track! Keep up the great work!".to_string(),
        Likelihood::High => "✅ Stay consistent and you'll reach your goal".to_string(),
        Likelihood::Moderate => format!(
            "📈 Increase your daily effort by {:.0} to stay on track",
            daily_rate_needed - current_daily_rate
        ),
        Likelihood::Low => {
            "⚠️ Consider adjusting your goal or extending the timeline for sustainable progress"
                .to_string()
        }
    };

    AchievementPrediction {
        likelihood,
        confidence_percentage: likelihood.confidence(),
        current_progress_percentage: round_to(actual, 1),
        expected_progress_percentage: round_to(expected, 1),
        on_track: actual >= expected * 0.9,
        daily_rate_needed: round_to(daily_rate_needed, 2),
        current_daily_rate: round_to(current_daily_rate, 2),
        recommendation,
    }
}

// ============================================================================
// Milestones
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u32,
    pub target_value: f64,
    pub target_date: NaiveDate,
    pub progress_percentage: f64,
    pub description: String,
}

/// Evenly spaced milestones between the goal's start and target date
///
/// Three to five milestones, roughly one every two weeks. Goals without a
/// target date after their start get none.
pub fn generate_milestones(goal: &Goal, today: NaiveDate) -> Vec<Milestone> {
    let start = goal.effective_start().unwrap_or(today);
    let Some(target_date) = goal.target_date.filter(|end| *end > start) else {
        return Vec::new();
    };

    let total_days = (target_date - start).num_days();
    let count = (total_days / 14).clamp(3, 5);
    let total_change = goal.target_value - goal.current_value;

    (1..=count)
        .map(|i| {
            let fraction = i as f64 / count as f64;
            let value = goal.current_value + total_change * fraction;
            let date = start + Duration::days(total_days * i / count);
            Milestone {
                number: i as u32,
                target_value: round_to(value, 1),
                target_date: date,
                progress_percentage: round_to(fraction * 100.0, 1),
                description: format!("Reach {:.0} by {}", value, date.format("%B %d")),
            }
        })
        .collect()
}
