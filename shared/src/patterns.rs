//! Activity pattern analysis
//!
//! Turns a window of daily records into human-readable trend, pattern and
//! recommendation lines plus the integer statistics shown alongside them.

use crate::format::thousands;
use crate::models::{ActivityWindow, FitnessLevel, FitnessSummary};
use crate::stats::{detect_trend, population_std_dev, StepStatistics, Trend};
use crate::streak::DEFAULT_STEP_GOAL;
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Minimum number of tracked days before trend and streak lines appear
pub const MIN_DAYS_FOR_TREND: usize = 7;

/// Integer statistics over tracked (non-zero) days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    pub average: u32,
    pub median: u32,
    pub min: u32,
    pub max: u32,
    pub std_dev: u32,
    pub consistency: f64,
    pub days_analyzed: usize,
    pub days_hit_goal: usize,
}

/// Findings derived from a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub trends: Vec<String>,
    pub patterns: Vec<String>,
    pub recommendations: Vec<String>,
    pub stats: Option<PatternStats>,
}

/// Analyze the step patterns of a window
///
/// Days with zero steps are treated as untracked and skipped.
pub fn analyze_patterns(window: &ActivityWindow) -> PatternAnalysis {
    if window.is_empty() {
        return PatternAnalysis::default();
    }

    let steps: Vec<f64> = window.steps().into_iter().filter(|s| *s > 0.0).collect();
    let Some(stats) = StepStatistics::from_steps(&steps) else {
        return PatternAnalysis {
            trends: vec!["No step data available".to_string()],
            recommendations: vec!["Start tracking your daily steps".to_string()],
            ..Default::default()
        };
    };

    let goal = f64::from(DEFAULT_STEP_GOAL);
    let consistency = stats.consistency();
    let mut trends = Vec::new();
    let mut patterns = Vec::new();
    let mut recommendations = Vec::new();

    trends.push(activity_level_line(stats.mean));

    patterns.push(if consistency >= 80.0 {
        format!("⭐ High consistency ({:.0}%) - your activity is very predictable", consistency)
    } else if consistency >= 60.0 {
        format!("📈 Moderate consistency ({:.0}%) - fairly regular activity", consistency)
    } else {
        format!("📉 Variable activity ({:.0}%) - try to be more consistent", consistency)
    });

    let (min, max) = (stats.min as i64, stats.max as i64);
    patterns.push(if stats.max - stats.min > 8000.0 {
        format!("📊 Wide variation in daily steps ({} - {})", thousands(min), thousands(max))
    } else {
        format!("📊 Steady daily steps ({} - {})", thousands(min), thousands(max))
    });

    if stats.mean < goal {
        let deficit = (goal - stats.mean) as i64;
        recommendations.push(format!("💪 Add {} daily steps to reach recommended goal", thousands(deficit)));
        recommendations.push("💡 Try: parking farther away, taking stairs, or short walks after meals".to_string());
    }

    if stats.std_dev > 3000.0 {
        recommendations.push("🎯 Work on consistency - aim for similar step counts each day".to_string());
        recommendations.push("📅 Set a daily step goal and track it throughout the day".to_string());
    }

    if stats.median > stats.mean * 1.2 {
        recommendations.push(
            "⚠️ Some very low activity days detected - try to maintain baseline activity".to_string(),
        );
    }

    if steps.len() >= MIN_DAYS_FOR_TREND {
        let trend = detect_trend(&steps);
        match trend.trend {
            Trend::Increasing => trends.push(format!(
                "📈 Positive trend: Activity increased {:.1}% over the period",
                trend.change_percentage
            )),
            Trend::Decreasing => trends.push(format!(
                "📉 Activity declined {:.1}% - let's get back on track",
                trend.change_percentage.abs()
            )),
            Trend::Stable | Trend::InsufficientData => {}
        }
    }

    let days_hit_goal = steps.iter().filter(|s| **s >= goal).count();
    if steps.len() >= MIN_DAYS_FOR_TREND {
        let share = days_hit_goal as f64 * 100.0 / steps.len() as f64;
        if share >= 80.0 {
            patterns.push(format!(
                "🔥 Strong streak: {}/{} days hit 10k goal ({:.0}%)",
                days_hit_goal,
                steps.len(),
                share
            ));
        }
    }

    PatternAnalysis {
        trends,
        patterns,
        recommendations,
        stats: Some(PatternStats {
            average: stats.mean as u32,
            median: stats.median as u32,
            min: stats.min as u32,
            max: stats.max as u32,
            std_dev: stats.std_dev as u32,
            consistency: crate::format::round_to(consistency, 1),
            days_analyzed: steps.len(),
            days_hit_goal,
        }),
    }
}

fn activity_level_line(mean: f64) -> String {
    if mean >= 12000.0 {
        "🔥 Excellent activity level - exceeding recommended daily steps".to_string()
    } else if mean >= 10000.0 {
        "✅ Great activity level - consistently meeting 10k daily steps".to_string()
    } else if mean >= 7500.0 {
        "👍 Good activity level - close to recommended 10k daily steps".to_string()
    } else {
        format!(
            "📊 Activity level below recommended - averaging {} steps/day",
            thousands(mean as i64)
        )
    }
}

// ============================================================================
// Fitness level
// ============================================================================

/// Derive a fitness level from average steps and total active minutes
pub fn calculate_fitness_level(summary: &FitnessSummary) -> FitnessLevel {
    let steps = summary.avg_steps;
    let minutes = summary.total_active_minutes;

    if (steps >= 12000 && minutes >= 250) || (steps >= 10000 && minutes >= 200) {
        FitnessLevel::Advanced
    } else if (steps >= 8500 && minutes >= 150) || (steps >= 7500 && minutes >= 120) {
        FitnessLevel::Intermediate
    } else {
        FitnessLevel::Beginner
    }
}

// ============================================================================
// Weekday breakdown
// ============================================================================

/// Averages for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    pub day: String,
    pub avg_steps: u32,
    pub avg_active_minutes: u32,
    pub samples: usize,
}

/// Activity by day of week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBreakdown {
    /// Monday first; weekdays with no records are omitted
    pub days: Vec<WeekdayAverage>,
    pub best_day: Option<String>,
    pub most_consistent_day: Option<String>,
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Group a window by weekday
///
/// The best day has the highest average steps; the most consistent day has
/// the lowest step deviation among weekdays with at least two samples.
/// Ties go to the earlier weekday.
pub fn weekly_breakdown(window: &ActivityWindow) -> WeeklyBreakdown {
    let mut best: Option<(f64, &'static str)> = None;
    let mut steadiest: Option<(f64, &'static str)> = None;
    let mut days = Vec::new();

    for weekday in WEEK {
        let records: Vec<_> = window
            .records()
            .iter()
            .filter(|r| r.date.weekday() == weekday)
            .collect();
        if records.is_empty() {
            continue;
        }

        let steps: Vec<f64> = records.iter().map(|r| f64::from(r.steps)).collect();
        let avg_steps = steps.iter().sum::<f64>() / steps.len() as f64;
        let avg_minutes =
            records.iter().map(|r| f64::from(r.active_minutes)).sum::<f64>() / records.len() as f64;
        let name = weekday_name(weekday);

        if best.map_or(true, |(top, _)| avg_steps > top) {
            best = Some((avg_steps, name));
        }
        if steps.len() >= 2 {
            let spread = population_std_dev(&steps);
            if steadiest.map_or(true, |(low, _)| spread < low) {
                steadiest = Some((spread, name));
            }
        }

        days.push(WeekdayAverage {
            day: name.to_string(),
            avg_steps: avg_steps.round() as u32,
            avg_active_minutes: avg_minutes.round() as u32,
            samples: records.len(),
        });
    }

    WeeklyBreakdown {
        days,
        best_day: best.map(|(_, name)| name.to_string()),
        most_consistent_day: steadiest.map(|(_, name)| name.to_string()),
    }
}

/// Weekday with the highest average steps
pub fn identify_best_day(window: &ActivityWindow) -> Option<String> {
    weekly_breakdown(window).best_day
}
