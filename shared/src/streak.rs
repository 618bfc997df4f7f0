//! Goal streaks over an activity window

use crate::format::round_to;
use crate::models::ActivityWindow;
use serde::{Deserialize, Serialize};

/// Daily step goal used when the caller supplies none
pub const DEFAULT_STEP_GOAL: u32 = 10_000;

/// Consecutive-day goal statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StreakResult {
    /// Run of goal days counting back from the most recent record
    pub current_streak: u32,
    /// Longest run anywhere in the window
    pub best_streak: u32,
    pub days_hit_goal: u32,
    pub total_days: u32,
    /// Share of days meeting the goal, one decimal
    pub percentage: f64,
}

/// Compute streaks for `goal_steps` over the window
pub fn calculate_streak(window: &ActivityWindow, goal_steps: u32) -> StreakResult {
    let records = window.records();
    if records.is_empty() {
        return StreakResult::default();
    }

    let hit = |steps: u32| steps >= goal_steps;

    let current_streak = records.iter().take_while(|r| hit(r.steps)).count() as u32;

    let mut best_streak = 0u32;
    let mut run = 0u32;
    let mut days_hit_goal = 0u32;
    for record in records {
        if hit(record.steps) {
            run += 1;
            days_hit_goal += 1;
            best_streak = best_streak.max(run);
        } else {
            run = 0;
        }
    }

    let total_days = records.len() as u32;

    StreakResult {
        current_streak,
        best_streak,
        days_hit_goal,
        total_days,
        percentage: round_to(f64::from(days_hit_goal) * 100.0 / f64::from(total_days), 1),
    }
}

/// Motivational message for a current streak length
pub fn motivation_for_streak(streak: u32) -> &'static str {
    match streak {
        30.. => "🏆 Incredible 30-day streak! You're unstoppable!",
        14..=29 => "🔥 Two weeks strong! Keep the momentum going!",
        7..=13 => "⭐ One week streak! You're building great habits!",
        3..=6 => "💪 Nice streak! Every day counts!",
        1..=2 => "✨ Great start! Let's build on this!",
        0 => "🎯 Today is a new day - let's crush it!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyActivityRecord;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    /// Build a window from step counts listed most recent first
    fn window(steps_most_recent_first: &[u32]) -> ActivityWindow {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        steps_most_recent_first
            .iter()
            .enumerate()
            .map(|(i, s)| DailyActivityRecord::with_steps(today - Duration::days(i as i64), *s))
            .collect()
    }

    #[test]
    fn test_streak_reference_example() {
        let result = calculate_streak(&window(&[12000, 11000, 9000, 13000]), DEFAULT_STEP_GOAL);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.best_streak, 2);
        assert_eq!(result.days_hit_goal, 3);
        assert_eq!(result.total_days, 4);
        assert_eq!(result.percentage, 75.0);
    }

    #[test]
    fn test_streak_ignores_input_order() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        // Oldest first on the way in; the window reorders
        let shuffled = ActivityWindow::new(vec![
            DailyActivityRecord::with_steps(today - Duration::days(3), 13000),
            DailyActivityRecord::with_steps(today - Duration::days(1), 11000),
            DailyActivityRecord::with_steps(today, 12000),
            DailyActivityRecord::with_steps(today - Duration::days(2), 9000),
        ]);
        assert_eq!(
            calculate_streak(&shuffled, DEFAULT_STEP_GOAL),
            calculate_streak(&window(&[12000, 11000, 9000, 13000]), DEFAULT_STEP_GOAL)
        );
    }

    #[test]
    fn test_streak_empty_window() {
        let result = calculate_streak(&ActivityWindow::default(), DEFAULT_STEP_GOAL);
        assert_eq!(result, StreakResult::default());
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn test_streak_best_run_in_the_middle() {
        let result = calculate_streak(&window(&[500, 10000, 10000, 10000, 200, 10000]), 10000);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.best_streak, 3);
        assert_eq!(result.days_hit_goal, 4);
        assert_eq!(result.percentage, 66.7);
    }

    #[test]
    fn test_motivation_thresholds() {
        assert!(motivation_for_streak(0).contains("new day"));
        assert!(motivation_for_streak(2).contains("Great start"));
        assert!(motivation_for_streak(3).contains("Nice streak"));
        assert!(motivation_for_streak(7).contains("One week"));
        assert!(motivation_for_streak(14).contains("Two weeks"));
        assert!(motivation_for_streak(45).contains("30-day"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: current <= best <= days hit <= total days
        #[test]
        fn prop_streak_bounds(
            steps in prop::collection::vec(0u32..20000, 0..60),
            goal in 1000u32..15000
        ) {
            let result = calculate_streak(&window(&steps), goal);
            prop_assert!(result.current_streak <= result.best_streak);
            prop_assert!(result.best_streak <= result.days_hit_goal);
            prop_assert!(result.days_hit_goal <= result.total_days);
            prop_assert!((0.0..=100.0).contains(&result.percentage));
        }

        /// Property: identical inputs give identical streaks
        #[test]
        fn prop_streak_idempotent(
            steps in prop::collection::vec(0u32..20000, 0..60),
            goal in 1000u32..15000
        ) {
            let w = window(&steps);
            prop_assert_eq!(calculate_streak(&w, goal), calculate_streak(&w, goal));
        }
    }
}
