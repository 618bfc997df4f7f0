//! Insight composition
//!
//! Combines pattern findings, goal progress and optional calorie/distance
//! observations into a short, ordered list of user-facing lines, plus the
//! single-sentence summary, the daily check-in and period comparisons.

use crate::format::{round_to, thousands};
use crate::models::{ActivityWindow, DailyActivityRecord, Goal, ACTIVE_DAY_STEPS};
use crate::patterns::{analyze_patterns, PatternAnalysis};
use crate::stats::percent_change;
use crate::streak::StreakResult;
use serde::{Deserialize, Serialize};

/// Upper bound on composed insights
pub const MAX_INSIGHTS: usize = 5;

/// Shown when there is nothing to analyze
pub const START_TRACKING_MESSAGE: &str =
    "Start tracking your fitness data to get personalized insights!";

const HIGH_CALORIE_AVERAGE: f64 = 2500.0;
const LONG_DISTANCE_TOTAL_KM: f64 = 50.0;

/// Compose at most five insight lines for a window and the user's goals
///
/// Order: up to two trend findings, the top pattern, up to two goal
/// progress lines, the top recommendation, then calorie and distance
/// observations when notable.
pub fn compose_insights(window: &ActivityWindow, goals: &[Goal]) -> Vec<String> {
    if window.is_empty() {
        return vec![START_TRACKING_MESSAGE.to_string()];
    }

    let analysis = analyze_patterns(window);
    let mut insights: Vec<String> = Vec::new();

    insights.extend(analysis.trends.iter().take(2).cloned());
    insights.extend(analysis.patterns.iter().take(1).cloned());
    insights.extend(goals.iter().take(2).filter_map(goal_progress_insight));
    insights.extend(analysis.recommendations.first().cloned());

    let calories: Vec<f64> = window
        .records()
        .iter()
        .filter(|r| r.calories > 0)
        .map(|r| f64::from(r.calories))
        .collect();
    if !calories.is_empty() {
        let avg = calories.iter().sum::<f64>() / calories.len() as f64;
        if avg > HIGH_CALORIE_AVERAGE {
            insights.push(format!("🔥 High calorie burn: averaging {} calories/day", avg as i64));
        }
    }

    let total_distance: f64 = window.records().iter().map(|r| r.distance_km).sum();
    if total_distance > LONG_DISTANCE_TOTAL_KM {
        insights.push(format!("🏃 Great distance covered: {:.1}km total", total_distance));
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

/// Progress line for one goal; nothing for the 25-50% band
pub fn goal_progress_insight(goal: &Goal) -> Option<String> {
    let progress = goal.progress_percentage();
    let name = goal.goal_type.display_name();

    if progress >= 90 {
        Some(format!("🎉 Almost there! {}% towards your {} goal", progress, name))
    } else if progress >= 75 {
        Some(format!("🎯 Great progress: {}% towards your {} goal", progress, name))
    } else if progress >= 50 {
        Some(format!("📊 Halfway to your {} goal ({}%)", name, progress))
    } else if progress < 25 {
        Some(format!("💪 Let's focus on {} - currently at {}%", name, progress))
    } else {
        None
    }
}

/// One-sentence summary of activity level, consistency and streak
pub fn create_summary(analysis: &PatternAnalysis, streak: &StreakResult) -> String {
    let (average, consistency) = analysis
        .stats
        .as_ref()
        .map(|s| (s.average, s.consistency))
        .unwrap_or((0, 0.0));

    let mut parts = Vec::new();

    if average >= 10_000 {
        parts.push(format!(
            "You're averaging {} steps daily - excellent work!",
            thousands(i64::from(average))
        ));
    } else {
        parts.push(format!("You're averaging {} steps daily", thousands(i64::from(average))));
    }

    if consistency >= 80.0 {
        parts.push("Your consistency is outstanding".to_string());
    } else if consistency >= 60.0 {
        parts.push("You're staying fairly consistent".to_string());
    }

    if streak.current_streak >= 7 {
        parts.push(format!("You've maintained a {}-day streak!", streak.current_streak));
    } else if streak.current_streak >= 3 {
        parts.push(format!("You're on a {}-day streak", streak.current_streak));
    }

    parts.join(" ")
}

// ============================================================================
// Motivational tips
// ============================================================================

/// Rotating encouragement shown with the daily insight
pub const MOTIVATION_TIPS: [&str; 8] = [
    "💪 Every step counts towards your goals",
    "🌟 Consistency is the key to success",
    "🎯 Small daily improvements lead to big results",
    "🔥 You're stronger than you think",
    "✨ Make today count - you've got this!",
    "🚀 Progress, not perfection",
    "💯 Your health is worth the effort",
    "⭐ One day at a time, one step at a time",
];

/// Chooses one tip out of a list
pub trait TipSource: Send + Sync {
    /// Index into a list of `len` tips; `len` is never zero
    fn pick(&self, len: usize) -> usize;

    fn tip(&self) -> &'static str {
        MOTIVATION_TIPS[self.pick(MOTIVATION_TIPS.len()) % MOTIVATION_TIPS.len()]
    }
}

/// Always returns the same tip
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTip(pub usize);

impl TipSource for FixedTip {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

// ============================================================================
// Daily insight
// ============================================================================

/// How today compares with the weekly average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Above,
    Below,
}

/// Today's check-in against the past week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInsight {
    pub today_steps: u32,
    pub weekly_average: u32,
    pub comparison: Comparison,
    pub difference_percentage: f64,
    pub insights: Vec<String>,
    pub motivation: String,
}

/// Compare today's record (if any) with the week and add a tip
pub fn daily_insight(
    today: Option<&DailyActivityRecord>,
    week: &ActivityWindow,
    goal_steps: u32,
    tips: &dyn TipSource,
) -> DailyInsight {
    let today_steps = today.map(|r| r.steps).unwrap_or(0);
    let steps = f64::from(today_steps);
    let weekly_avg = if week.is_empty() {
        0.0
    } else {
        week.steps().iter().sum::<f64>() / week.len() as f64
    };

    let comparison = if steps > weekly_avg {
        Comparison::Above
    } else {
        Comparison::Below
    };
    let difference = percent_change(weekly_avg, steps).abs();

    let mut insights = Vec::new();
    if steps > weekly_avg * 1.2 {
        insights.push(format!(
            "🎉 Outstanding! You're {:.0}% above your weekly average!",
            difference
        ));
    } else if steps > weekly_avg {
        insights.push("✨ Great job! You're above your weekly average".to_string());
    } else if steps < weekly_avg * 0.8 {
        insights.push("📊 You're a bit below your usual pace today".to_string());
    } else {
        insights.push("📈 You're tracking close to your weekly average".to_string());
    }

    if today_steps >= goal_steps {
        insights.push(format!(
            "✅ You hit your {} step goal today!",
            thousands(i64::from(goal_steps))
        ));
    } else {
        insights.push(format!(
            "🎯 {} more steps to hit your goal",
            thousands(i64::from(goal_steps - today_steps))
        ));
    }

    DailyInsight {
        today_steps,
        weekly_average: weekly_avg as u32,
        comparison,
        difference_percentage: round_to(difference, 1),
        insights,
        motivation: tips.tip().to_string(),
    }
}

// ============================================================================
// Period comparison
// ============================================================================

/// Headline numbers for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub avg_steps: u32,
    pub total_distance: f64,
    pub total_calories: u64,
    pub active_days: u32,
}

impl PeriodStats {
    pub fn from_window(window: &ActivityWindow) -> Self {
        if window.is_empty() {
            return Self::default();
        }
        let records = window.records();
        let total_steps: u64 = records.iter().map(|r| u64::from(r.steps)).sum();
        Self {
            avg_steps: (total_steps / records.len() as u64) as u32,
            total_distance: round_to(records.iter().map(|r| r.distance_km).sum(), 1),
            total_calories: records.iter().map(|r| u64::from(r.calories)).sum(),
            active_days: records.iter().filter(|r| r.steps >= ACTIVE_DAY_STEPS).count() as u32,
        }
    }
}

/// Direction of a metric between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Same,
}

/// Percentage change of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub percentage: f64,
    pub direction: Direction,
}

impl MetricChange {
    fn between(previous: f64, current: f64) -> Self {
        let change = percent_change(previous, current);
        let direction = if change > 0.0 {
            Direction::Up
        } else if change < 0.0 {
            Direction::Down
        } else {
            Direction::Same
        };
        Self {
            percentage: round_to(change, 1),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPeriod {
    pub label: String,
    pub stats: PeriodStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodChanges {
    pub steps: MetricChange,
    pub distance: MetricChange,
    pub calories: MetricChange,
}

/// Current period measured against the one before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub current: LabeledPeriod,
    pub previous: LabeledPeriod,
    pub changes: PeriodChanges,
    pub summary: String,
}

pub fn compare_periods(
    current: &ActivityWindow,
    previous: &ActivityWindow,
    current_label: &str,
    previous_label: &str,
) -> PeriodComparison {
    let now = PeriodStats::from_window(current);
    let before = PeriodStats::from_window(previous);

    let changes = PeriodChanges {
        steps: MetricChange::between(f64::from(before.avg_steps), f64::from(now.avg_steps)),
        distance: MetricChange::between(before.total_distance, now.total_distance),
        calories: MetricChange::between(before.total_calories as f64, now.total_calories as f64),
    };

    let steps_change = percent_change(f64::from(before.avg_steps), f64::from(now.avg_steps));

    PeriodComparison {
        current: LabeledPeriod {
            label: current_label.to_string(),
            stats: now,
        },
        previous: LabeledPeriod {
            label: previous_label.to_string(),
            stats: before,
        },
        changes,
        summary: comparison_summary(steps_change),
    }
}

fn comparison_summary(steps_change: f64) -> String {
    if steps_change > 10.0 {
        format!(
            "🎉 Great improvement! Your activity increased by {:.0}% compared to last period",
            steps_change
        )
    } else if steps_change > 0.0 {
        format!("📈 Slight improvement - your activity is up {:.0}%", steps_change)
    } else if steps_change > -10.0 {
        "📊 Activity level is fairly consistent between periods".to_string()
    } else {
        format!(
            "📉 Activity decreased by {:.0}% - let's work on bringing it back up",
            steps_change.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalType;
    use crate::streak::calculate_streak;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn window(steps_most_recent_first: &[u32]) -> ActivityWindow {
        steps_most_recent_first
            .iter()
            .enumerate()
            .map(|(i, s)| DailyActivityRecord::with_steps(today() - Duration::days(i as i64), *s))
            .collect()
    }

    fn goal(goal_type: GoalType, current: f64, target: f64) -> Goal {
        Goal {
            id: "g1".to_string(),
            goal_type,
            target_value: target,
            current_value: current,
            status: "active".to_string(),
            created_at: None,
            start_date: None,
            target_date: None,
        }
    }

    #[test]
    fn test_empty_window_asks_to_start_tracking() {
        let insights = compose_insights(&ActivityWindow::default(), &[]);
        assert_eq!(insights, vec![START_TRACKING_MESSAGE.to_string()]);
    }

    #[test]
    fn test_insight_order_and_cap() {
        let goals = vec![
            goal(GoalType::Steps, 9500.0, 10000.0),
            goal(GoalType::WeightLoss, 10.0, 100.0),
            goal(GoalType::Distance, 99.0, 100.0),
        ];
        let insights = compose_insights(&window(&[6000, 6000, 6000]), &goals);

        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert!(insights[0].contains("Activity level below recommended"));
        assert!(insights[1].contains("High consistency"));
        assert_eq!(insights[2], "🎉 Almost there! 95% towards your Steps goal");
        assert_eq!(insights[3], "💪 Let's focus on Weight Loss - currently at 10%");
        assert!(insights[4].contains("Add 4,000 daily steps"));
    }

    #[test]
    fn test_calorie_and_distance_findings() {
        let records: Vec<_> = (0..10)
            .map(|i| DailyActivityRecord {
                calories: 3000,
                distance_km: 6.0,
                ..DailyActivityRecord::with_steps(today() - Duration::days(i), 12000)
            })
            .collect();
        let insights = compose_insights(&ActivityWindow::new(records), &[]);
        assert!(insights.iter().any(|i| i == "🔥 High calorie burn: averaging 3000 calories/day"));
        assert!(insights.iter().any(|i| i == "🏃 Great distance covered: 60.0km total"));
        assert!(insights.len() <= MAX_INSIGHTS);
    }

    #[test]
    fn test_goal_progress_bands() {
        let line = |current| goal_progress_insight(&goal(GoalType::Steps, current, 100.0));
        assert!(line(90.0).unwrap().starts_with("🎉"));
        assert!(line(75.0).unwrap().starts_with("🎯"));
        assert_eq!(line(50.0).unwrap(), "📊 Halfway to your Steps goal (50%)");
        assert!(line(30.0).is_none());
        assert!(line(24.0).unwrap().starts_with("💪"));
    }

    #[test]
    fn test_summary_sentence() {
        let w = window(&[11000, 11000, 11000]);
        let analysis = analyze_patterns(&w);
        let streak = calculate_streak(&w, 10_000);
        assert_eq!(
            create_summary(&analysis, &streak),
            "You're averaging 11,000 steps daily - excellent work! Your consistency is outstanding You're on a 3-day streak"
        );
    }

    #[test]
    fn test_daily_insight_outstanding_day() {
        let record = DailyActivityRecord::with_steps(today(), 12000);
        let insight = daily_insight(Some(&record), &window(&[8000; 7]), 10_000, &FixedTip(1));
        assert_eq!(insight.comparison, Comparison::Above);
        assert_eq!(insight.weekly_average, 8000);
        assert_eq!(insight.difference_percentage, 50.0);
        assert_eq!(insight.insights[0], "🎉 Outstanding! You're 50% above your weekly average!");
        assert_eq!(insight.insights[1], "✅ You hit your 10,000 step goal today!");
        assert_eq!(insight.motivation, MOTIVATION_TIPS[1]);
    }

    #[test]
    fn test_daily_insight_without_today() {
        let insight = daily_insight(None, &ActivityWindow::default(), 10_000, &FixedTip(0));
        assert_eq!(insight.today_steps, 0);
        assert_eq!(insight.comparison, Comparison::Below);
        assert_eq!(insight.insights[0], "📈 You're tracking close to your weekly average");
        assert_eq!(insight.insights[1], "🎯 10,000 more steps to hit your goal");
    }

    #[test]
    fn test_compare_periods() {
        let comparison = compare_periods(
            &window(&[12000; 7]),
            &window(&[10000; 7]),
            "This Week",
            "Last Week",
        );
        assert_eq!(comparison.changes.steps.percentage, 20.0);
        assert_eq!(comparison.changes.steps.direction, Direction::Up);
        assert_eq!(comparison.changes.distance.direction, Direction::Same);
        assert_eq!(comparison.current.stats.active_days, 7);
        assert!(comparison.summary.starts_with("🎉 Great improvement"));
    }

    #[test]
    fn test_compare_against_empty_period() {
        let comparison = compare_periods(&window(&[4000]), &ActivityWindow::default(), "a", "b");
        assert_eq!(comparison.changes.steps.percentage, 0.0);
        assert_eq!(comparison.summary, "📊 Activity level is fairly consistent between periods");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: never more than five insights, never none
        #[test]
        fn prop_insight_count_bounded(
            steps in prop::collection::vec(0u32..30000, 0..40),
            progress in prop::collection::vec(0.0f64..150.0, 0..4)
        ) {
            let goals: Vec<_> = progress.iter().map(|p| goal(GoalType::Steps, *p, 100.0)).collect();
            let insights = compose_insights(&window(&steps), &goals);
            prop_assert!(!insights.is_empty());
            prop_assert!(insights.len() <= MAX_INSIGHTS);
        }

        /// Property: composition is deterministic
        #[test]
        fn prop_insights_idempotent(steps in prop::collection::vec(0u32..30000, 0..40)) {
            let w = window(&steps);
            prop_assert_eq!(compose_insights(&w, &[]), compose_insights(&w, &[]));
        }
    }
}
