//! Goal feasibility estimation
//!
//! Compares the daily rate a goal requires against a fixed table of
//! realistic daily changes per goal type and fitness level.

use crate::format::round_to;
use crate::models::{FitnessLevel, GoalType};
use serde::{Deserialize, Serialize};

/// How hard a goal is relative to the realistic daily change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

/// Confidence in the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// Feasibility assessment of a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub is_feasible: bool,
    pub difficulty: Difficulty,
    /// Signed daily change needed, two decimals
    pub required_daily_change: f64,
    pub max_realistic_daily_change: f64,
    pub recommended_timeframe_days: i64,
    pub confidence: Confidence,
    pub notes: Vec<String>,
}

/// Realistic daily change for a goal type and level
///
/// Steps are per day, weight loss in kg per day, distance in km per day.
/// Goal types outside the table have no realistic rate (0).
pub fn max_realistic_daily_change(goal_type: &GoalType, level: FitnessLevel) -> f64 {
    match (goal_type, level) {
        (GoalType::Steps, FitnessLevel::Beginner) => 500.0,
        (GoalType::Steps, FitnessLevel::Intermediate) => 1000.0,
        (GoalType::Steps, FitnessLevel::Advanced) => 1500.0,
        (GoalType::WeightLoss, FitnessLevel::Beginner) => 0.05,
        (GoalType::WeightLoss, FitnessLevel::Intermediate) => 0.07,
        (GoalType::WeightLoss, FitnessLevel::Advanced) => 0.10,
        (GoalType::Distance, FitnessLevel::Beginner) => 0.5,
        (GoalType::Distance, FitnessLevel::Intermediate) => 1.0,
        (GoalType::Distance, FitnessLevel::Advanced) => 1.5,
        (GoalType::MuscleGain | GoalType::Other(_), _) => 0.0,
    }
}

/// Assess whether moving from `current_value` to `target_value` within
/// `timeframe_days` is realistic for the level
pub fn assess_feasibility(
    goal_type: &GoalType,
    current_value: f64,
    target_value: f64,
    timeframe_days: i64,
    level: FitnessLevel,
) -> FeasibilityResult {
    let total_change = target_value - current_value;
    let required = if timeframe_days > 0 {
        total_change / timeframe_days as f64
    } else {
        0.0
    };

    let max = max_realistic_daily_change(goal_type, level);
    let magnitude = required.abs();
    let is_feasible = magnitude <= max;
    let difficulty = if magnitude < max * 0.5 {
        Difficulty::Easy
    } else if is_feasible {
        Difficulty::Moderate
    } else {
        Difficulty::Challenging
    };

    let recommended_timeframe_days = if max > 0.0 {
        (total_change.abs() / max).floor() as i64
    } else {
        timeframe_days
    };

    FeasibilityResult {
        is_feasible,
        difficulty,
        required_daily_change: round_to(required, 2),
        max_realistic_daily_change: max,
        recommended_timeframe_days,
        confidence: if is_feasible {
            Confidence::High
        } else {
            Confidence::Medium
        },
        notes: feasibility_notes(is_feasible, difficulty),
    }
}

fn feasibility_notes(is_feasible: bool, difficulty: Difficulty) -> Vec<String> {
    let notes: &[&str] = if !is_feasible {
        &[
            "⚠️ This goal might be too aggressive for the timeframe",
            "Consider extending the deadline or adjusting the target",
            "Sustainable progress is better than burnout",
        ]
    } else if difficulty == Difficulty::Easy {
        &[
            "✅ This goal is very achievable",
            "Consider challenging yourself more if you'd like",
            "You have room to push harder",
        ]
    } else {
        &[
            "🎯 This is a realistic and challenging goal",
            "Stay consistent and you'll reach it",
            "Break it down into weekly milestones",
        ]
    };
    notes.iter().map(|n| n.to_string()).collect()
}
