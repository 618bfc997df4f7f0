//! Data models for the Workout Buddy application
//!
//! Records are read once from the data store (or a fixture) and are
//! immutable afterwards. Missing or negative numeric values collapse to
//! zero at construction so the analytic functions never see gaps.

use crate::errors::InputError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// User identity
// ============================================================================

/// Canonical user identifier
///
/// Callers may send either a JSON integer or a string; both normalize to
/// the same trimmed string form here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyUserId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawUserId {
            Int(i64),
            Text(String),
        }

        match RawUserId::deserialize(deserializer) {
            Ok(RawUserId::Int(n)) => Ok(UserId::from(n)),
            Ok(RawUserId::Text(s)) => UserId::parse(&s).map_err(serde::de::Error::custom),
            Err(_) => Err(serde::de::Error::custom(InputError::InvalidUserId)),
        }
    }
}

// ============================================================================
// Daily activity
// ============================================================================

/// Nullable values as they come out of the store
#[derive(Debug, Clone, Default)]
pub struct RawActivityRecord {
    pub date: NaiveDate,
    pub steps: Option<i64>,
    pub distance_km: Option<f64>,
    pub calories: Option<i64>,
    pub active_minutes: Option<i64>,
    pub heart_rate_avg: Option<i64>,
    pub floors: Option<i64>,
    pub very_active_minutes: Option<i64>,
    pub fairly_active_minutes: Option<i64>,
    pub lightly_active_minutes: Option<i64>,
}

/// One day's aggregated wearable metrics for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub steps: u32,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub active_minutes: u32,
    #[serde(default)]
    pub heart_rate_avg: Option<u32>,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub very_active_minutes: u32,
    #[serde(default)]
    pub fairly_active_minutes: u32,
    #[serde(default)]
    pub lightly_active_minutes: u32,
}

impl DailyActivityRecord {
    /// An all-zero record for the given day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            distance_km: 0.0,
            calories: 0,
            active_minutes: 0,
            heart_rate_avg: None,
            floors: None,
            very_active_minutes: 0,
            fairly_active_minutes: 0,
            lightly_active_minutes: 0,
        }
    }

    /// A record carrying only a step count
    pub fn with_steps(date: NaiveDate, steps: u32) -> Self {
        Self {
            steps,
            ..Self::new(date)
        }
    }
}

fn count(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}

fn optional_count(value: Option<i64>) -> Option<u32> {
    value.filter(|v| *v > 0).map(|v| count(Some(v)))
}

impl From<RawActivityRecord> for DailyActivityRecord {
    fn from(raw: RawActivityRecord) -> Self {
        let distance_km = raw
            .distance_km
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0);

        Self {
            date: raw.date,
            steps: count(raw.steps),
            distance_km,
            calories: count(raw.calories),
            active_minutes: count(raw.active_minutes),
            heart_rate_avg: optional_count(raw.heart_rate_avg),
            floors: optional_count(raw.floors),
            very_active_minutes: count(raw.very_active_minutes),
            fairly_active_minutes: count(raw.fairly_active_minutes),
            lightly_active_minutes: count(raw.lightly_active_minutes),
        }
    }
}

/// Records ordered most recent first
///
/// Every order-dependent analysis (trend halves, current streak) takes a
/// window, so ordering is decided once at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityWindow {
    records: Vec<DailyActivityRecord>,
}

impl ActivityWindow {
    pub fn new(mut records: Vec<DailyActivityRecord>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    pub fn records(&self) -> &[DailyActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The newest record, if any
    pub fn latest(&self) -> Option<&DailyActivityRecord> {
        self.records.first()
    }

    /// Step counts, most recent first
    pub fn steps(&self) -> Vec<f64> {
        self.records.iter().map(|r| f64::from(r.steps)).collect()
    }

    /// Aggregate the window into a period summary
    pub fn summary(&self) -> FitnessSummary {
        FitnessSummary::from_records(&self.records)
    }
}

impl FromIterator<DailyActivityRecord> for ActivityWindow {
    fn from_iter<I: IntoIterator<Item = DailyActivityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Period summary
// ============================================================================

/// Steps at or above which a day counts as active
pub const ACTIVE_DAY_STEPS: u32 = 5_000;

/// Aggregated activity over a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub avg_steps: u32,
    pub total_distance_km: f64,
    pub total_calories: u64,
    pub total_active_minutes: u64,
    pub avg_heart_rate: Option<u32>,
    pub floors_climbed: u64,
    pub days_active: u32,
    pub total_days: u32,
    pub activity_percentage: f64,
}

impl FitnessSummary {
    pub fn from_records(records: &[DailyActivityRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total_days = records.len() as u32;
        let total_steps: u64 = records.iter().map(|r| u64::from(r.steps)).sum();
        let heart_rates: Vec<u32> = records.iter().filter_map(|r| r.heart_rate_avg).collect();
        let avg_heart_rate = if heart_rates.is_empty() {
            None
        } else {
            let sum: u64 = heart_rates.iter().map(|h| u64::from(*h)).sum();
            Some((sum / heart_rates.len() as u64) as u32)
        };
        let days_active = records
            .iter()
            .filter(|r| r.steps >= ACTIVE_DAY_STEPS)
            .count() as u32;

        Self {
            avg_steps: (total_steps / u64::from(total_days)) as u32,
            total_distance_km: crate::format::round_to(
                records.iter().map(|r| r.distance_km).sum(),
                1,
            ),
            total_calories: records.iter().map(|r| u64::from(r.calories)).sum(),
            total_active_minutes: records.iter().map(|r| u64::from(r.active_minutes)).sum(),
            avg_heart_rate,
            floors_climbed: records
                .iter()
                .map(|r| u64::from(r.floors.unwrap_or(0)))
                .sum(),
            days_active,
            total_days,
            activity_percentage: activity_percentage(days_active, total_days),
        }
    }
}

/// Share of active days, one decimal
pub fn activity_percentage(days_active: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    crate::format::round_to(f64::from(days_active) * 100.0 / f64::from(total_days), 1)
}

// ============================================================================
// Fitness level
// ============================================================================

/// Self-declared or derived training level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Parse a level name, falling back to intermediate for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => {
                "You're building your fitness foundation. Focus on consistency and gradual progression."
            }
            FitnessLevel::Intermediate => {
                "You have a solid fitness base. Ready for more challenging workouts and progressive overload."
            }
            FitnessLevel::Advanced => {
                "You're in great shape! Maintain your level with varied, challenging workouts."
            }
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(InputError::InvalidField {
                field: "fitness_level",
                reason: format!("unknown level '{}'", other),
            }),
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Goals
// ============================================================================

/// Goal category; unrecognized tags are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalType {
    Steps,
    WeightLoss,
    MuscleGain,
    Distance,
    Other(String),
}

impl GoalType {
    pub fn as_str(&self) -> &str {
        match self {
            GoalType::Steps => "steps",
            GoalType::WeightLoss => "weight_loss",
            GoalType::MuscleGain => "muscle_gain",
            GoalType::Distance => "distance",
            GoalType::Other(tag) => tag,
        }
    }

    /// Human form of the tag (`weight_loss` -> `Weight Loss`)
    pub fn display_name(&self) -> String {
        crate::format::title_case(self.as_str())
    }
}

impl From<String> for GoalType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "steps" => GoalType::Steps,
            "weight_loss" => GoalType::WeightLoss,
            "muscle_gain" => GoalType::MuscleGain,
            "distance" => GoalType::Distance,
            _ => GoalType::Other(value),
        }
    }
}

impl From<&str> for GoalType {
    fn from(value: &str) -> Self {
        GoalType::from(value.to_string())
    }
}

impl From<GoalType> for String {
    fn from(value: GoalType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's goal as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub goal_type: GoalType,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
}

impl Goal {
    /// `trunc(current / target * 100)`, zero for a non-positive target, not clamped
    pub fn progress_percentage(&self) -> i64 {
        if self.target_value > 0.0 {
            (self.current_value / self.target_value * 100.0).trunc() as i64
        } else {
            0
        }
    }

    /// Start of the goal's timeline: explicit start date, else creation day
    pub fn effective_start(&self) -> Option<NaiveDate> {
        self.start_date
            .or_else(|| self.created_at.map(|ts| ts.date_naive()))
    }
}
