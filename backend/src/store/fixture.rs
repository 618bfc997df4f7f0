//! Deterministic data store for tests and local demos

use super::FitnessDataStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;
use workout_buddy_shared::{ActivityWindow, DailyActivityRecord, FitnessSummary, Goal, GoalType, UserId};

/// Synthetic activity series plus two goals, identical for every user
///
/// For a day `i` days before the end of the requested range the record is
/// `steps = 8000 + 100i`, `distance = 5.5 + 0.1i`, `calories = 2500 + 50i`,
/// `active_minutes = 45 + 2i`, `heart_rate = 70 + i % 10`, `floors = 15 + i % 5`.
#[derive(Debug, Clone)]
pub struct FixtureDataStore {
    anchor: NaiveDate,
    empty_users: HashSet<UserId>,
    failing_users: HashSet<UserId>,
}

impl FixtureDataStore {
    /// Goal dates are laid out around `anchor`
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            empty_users: HashSet::new(),
            failing_users: HashSet::new(),
        }
    }

    /// Anchored on the current UTC date
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// The user has no records and no goals
    pub fn with_empty_user(mut self, user_id: UserId) -> Self {
        self.empty_users.insert(user_id);
        self
    }

    /// Every read for the user fails, as an unreachable database would
    pub fn with_failing_user(mut self, user_id: UserId) -> Self {
        self.failing_users.insert(user_id);
        self
    }

    fn check(&self, user_id: &UserId) -> Result<bool> {
        if self.failing_users.contains(user_id) {
            anyhow::bail!("fixture store unavailable for user {}", user_id);
        }
        Ok(!self.empty_users.contains(user_id))
    }

    /// The synthetic record `offset` days before `end`
    pub fn record(end: NaiveDate, offset: u32) -> DailyActivityRecord {
        let date = end - Duration::days(i64::from(offset));
        DailyActivityRecord {
            steps: 8000 + offset * 100,
            distance_km: 5.5 + f64::from(offset) * 0.1,
            calories: 2500 + offset * 50,
            active_minutes: 45 + offset * 2,
            heart_rate_avg: Some(70 + offset % 10),
            floors: Some(15 + offset % 5),
            ..DailyActivityRecord::new(date)
        }
    }

    fn goals(&self) -> Vec<Goal> {
        let at_midnight = |date: NaiveDate| {
            date.and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive))
        };
        vec![
            Goal {
                id: "1".to_string(),
                goal_type: GoalType::Steps,
                target_value: 10_000.0,
                current_value: 8_500.0,
                status: "active".to_string(),
                created_at: at_midnight(self.anchor - Duration::days(30)),
                start_date: None,
                target_date: Some(self.anchor + Duration::days(60)),
            },
            Goal {
                id: "2".to_string(),
                goal_type: GoalType::WeightLoss,
                target_value: 75.0,
                current_value: 80.0,
                status: "active".to_string(),
                created_at: at_midnight(self.anchor - Duration::days(60)),
                start_date: None,
                target_date: Some(self.anchor + Duration::days(120)),
            },
        ]
    }
}

#[async_trait]
impl FitnessDataStore for FixtureDataStore {
    async fn daily_records(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ActivityWindow> {
        if !self.check(user_id)? || end < start {
            return Ok(ActivityWindow::default());
        }
        let span = (end - start).num_days();
        let days = u32::try_from(span).unwrap_or(u32::MAX);
        Ok((0..=days).map(|i| Self::record(end, i)).collect())
    }

    async fn summary(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<FitnessSummary>> {
        let window = self.daily_records(user_id, start, end).await?;
        if window.is_empty() {
            return Ok(None);
        }
        Ok(Some(window.summary()))
    }

    async fn active_goals(&self, user_id: &UserId) -> Result<Vec<Goal>> {
        if !self.check(user_id)? {
            return Ok(Vec::new());
        }
        Ok(self.goals())
    }

    async fn goal(&self, user_id: &UserId, goal_id: &str) -> Result<Option<Goal>> {
        Ok(self
            .active_goals(user_id)
            .await?
            .into_iter()
            .find(|g| g.id == goal_id))
    }
}
