//! Workout plan construction
//!
//! Builds week-by-week plans from a goal, a fitness level and the exercise
//! research gathered by the caller. Research is passed in, so everything
//! here stays deterministic.

use crate::format::truncate_chars;
use crate::models::{FitnessLevel, FitnessSummary, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Starting intensity in percent
pub const BASE_INTENSITY: f64 = 65.0;
/// Intensity ceiling in percent
pub const MAX_INTENSITY: u32 = 95;
/// Weekly intensity increase
pub const WEEKLY_PROGRESSION: f64 = 0.05;
/// Sets per exercise never exceed this
pub const MAX_SETS: u32 = 5;

const MAX_SOURCES_SCANNED: usize = 10;

// ============================================================================
// Inputs
// ============================================================================

/// A web search hit describing an exercise or topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Shape of the plan the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub goal: String,
    pub duration_weeks: u32,
    pub days_per_week: u32,
    pub equipment: Vec<String>,
    pub limitations: Vec<String>,
}

/// Equipment assumed when the user lists none
pub fn default_equipment() -> Vec<String> {
    ["bodyweight", "dumbbells", "resistance bands"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

// ============================================================================
// Plan types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub user_id: UserId,
    pub goal: String,
    pub fitness_level: FitnessLevel,
    pub duration_weeks: u32,
    pub days_per_week: u32,
    pub weekly_plans: Vec<WeekPlan>,
    pub principles: PlanPrinciples,
    pub sources: Vec<Source>,
    pub tips: Vec<String>,
    pub nutrition_guidelines: NutritionGuidelines,
    pub current_fitness_stats: CurrentFitnessStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week_number: u32,
    pub focus: String,
    pub intensity_level: u32,
    pub workouts: Vec<DailyWorkout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWorkout {
    pub day: u32,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_minutes: u32,
    pub exercises: Vec<ExerciseDetail>,
    pub warm_up: Routine,
    pub cool_down: Routine,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDetail {
    pub order: u32,
    pub name: String,
    pub description: String,
    pub sets: u32,
    pub reps_or_duration: String,
    pub rest_seconds: u32,
    pub tips: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub duration_minutes: u32,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrinciples {
    pub progressive_overload: String,
    pub recovery: String,
    pub variety: String,
    pub form_focus: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionGuidelines {
    pub focus: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentFitnessStats {
    pub avg_steps: u32,
    pub total_active_minutes: u64,
    pub fitness_level: FitnessLevel,
}

// ============================================================================
// Goal classification
// ============================================================================

/// Broad goal family, matched on keywords in the free-form goal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoalFamily {
    Strength,
    FatLoss,
    Endurance,
    General,
}

impl GoalFamily {
    fn of(goal: &str) -> Self {
        let goal = goal.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| goal.contains(w));
        if has(&["muscle", "gain", "strength"]) {
            GoalFamily::Strength
        } else if has(&["weight", "fat", "loss"]) {
            GoalFamily::FatLoss
        } else if has(&["endurance", "stamina"]) {
            GoalFamily::Endurance
        } else {
            GoalFamily::General
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    let text = text.to_lowercase();
    words.iter().any(|w| text.contains(w))
}

// ============================================================================
// Plan builder
// ============================================================================

/// Assemble a full plan
pub fn build_workout_plan(
    user_id: &UserId,
    options: &PlanOptions,
    summary: &FitnessSummary,
    level: FitnessLevel,
    research: &[ResearchResult],
) -> WorkoutPlan {
    let weekly_plans = (1..=options.duration_weeks)
        .map(|week| {
            let multiplier = intensity_multiplier(week);
            WeekPlan {
                week_number: week,
                focus: week_focus(week, options.duration_weeks).to_string(),
                intensity_level: intensity_percentage(multiplier),
                workouts: (1..=options.days_per_week)
                    .map(|day| daily_workout(day, options, level, multiplier, research))
                    .collect(),
            }
        })
        .collect();

    WorkoutPlan {
        user_id: user_id.clone(),
        goal: options.goal.clone(),
        fitness_level: level,
        duration_weeks: options.duration_weeks,
        days_per_week: options.days_per_week,
        weekly_plans,
        principles: PlanPrinciples {
            progressive_overload: "Intensity increases 5% per week".to_string(),
            recovery: format!("{} rest days per week", 7u32.saturating_sub(options.days_per_week)),
            variety: "Exercise variations every 2-3 weeks to prevent plateaus".to_string(),
            form_focus: "Quality over quantity - proper form is essential".to_string(),
        },
        sources: compile_sources(research),
        tips: plan_tips(&options.goal, level),
        nutrition_guidelines: nutrition_guidelines(&options.goal),
        current_fitness_stats: CurrentFitnessStats {
            avg_steps: summary.avg_steps,
            total_active_minutes: summary.total_active_minutes,
            fitness_level: level,
        },
    }
}

/// `1 + (week - 1) * 0.05`
pub fn intensity_multiplier(week: u32) -> f64 {
    1.0 + f64::from(week.saturating_sub(1)) * WEEKLY_PROGRESSION
}

/// 65% scaled by the multiplier, capped at 95%
pub fn intensity_percentage(multiplier: f64) -> u32 {
    ((BASE_INTENSITY * multiplier) as u32).min(MAX_INTENSITY)
}

/// Phase by quarter of the plan
pub fn week_focus(week: u32, total_weeks: u32) -> &'static str {
    let phase = if total_weeks == 0 {
        1.0
    } else {
        f64::from(week) / f64::from(total_weeks)
    };

    if phase <= 0.25 {
        "Foundation - Learning proper form and building base endurance"
    } else if phase <= 0.5 {
        "Building Volume - Increasing sets and reps"
    } else if phase <= 0.75 {
        "Intensity - Adding weight and difficulty"
    } else {
        "Peak Performance - Maximizing results"
    }
}

fn daily_workout(
    day: u32,
    options: &PlanOptions,
    level: FitnessLevel,
    multiplier: f64,
    research: &[ResearchResult],
) -> DailyWorkout {
    let workout_type = workout_type(day, &options.goal, options.days_per_week);
    let count = if level == FitnessLevel::Advanced { 6 } else { 5 };

    let exercises = research
        .iter()
        .take(count)
        .zip(1u32..)
        .map(|(hit, order)| {
            let name = if hit.title.is_empty() {
                format!("Exercise {}", order)
            } else {
                clean_exercise_name(&hit.title)
            };
            ExerciseDetail {
                order,
                name,
                description: truncate_chars(&hit.snippet, 200),
                sets: sets_for(level, multiplier),
                reps_or_duration: reps_for(&options.goal, level, multiplier),
                rest_seconds: rest_for(&options.goal, level),
                tips: exercise_tip(&hit.title).to_string(),
                source: hit.link.clone(),
            }
        })
        .collect();

    DailyWorkout {
        day,
        notes: workout_notes(&workout_type, level),
        workout_type,
        duration_minutes: duration_for(level, &options.goal),
        exercises,
        warm_up: warm_up(5),
        cool_down: cool_down(5),
    }
}

/// Session label for a training day, rotating through a goal-specific split
pub fn workout_type(day: u32, goal: &str, days_per_week: u32) -> String {
    let split: &[&str] = match GoalFamily::of(goal) {
        GoalFamily::Strength if days_per_week >= 5 => &[
            "Push (Chest, Shoulders, Triceps)",
            "Pull (Back, Biceps)",
            "Legs",
            "Upper Body",
            "Lower Body",
        ],
        GoalFamily::Strength if days_per_week >= 4 => {
            &["Upper Body Push", "Lower Body", "Upper Body Pull", "Full Body"]
        }
        GoalFamily::Strength => &["Upper Body", "Lower Body", "Full Body"],
        GoalFamily::FatLoss if days_per_week >= 5 => &[
            "HIIT Cardio",
            "Strength Circuit",
            "Cardio + Core",
            "Full Body Strength",
            "Active Recovery / Cardio",
        ],
        GoalFamily::FatLoss if days_per_week >= 4 => {
            &["HIIT", "Strength Circuit", "Cardio", "Full Body"]
        }
        GoalFamily::FatLoss => &["HIIT", "Strength", "Cardio"],
        GoalFamily::Endurance => &[
            "Long Steady Cardio",
            "Interval Training",
            "Tempo Run/Bike",
            "Recovery Cardio",
        ],
        GoalFamily::General => &["Full Body Strength", "Cardio", "Upper Body", "Lower Body"],
    };
    let index = (day.saturating_sub(1) as usize) % split.len();
    split[index].to_string()
}

pub fn duration_for(level: FitnessLevel, goal: &str) -> u32 {
    let base = match level {
        FitnessLevel::Beginner => 30,
        FitnessLevel::Intermediate => 45,
        FitnessLevel::Advanced => 60,
    };
    if contains_any(goal, &["endurance"]) {
        base + 15
    } else {
        base
    }
}

pub fn sets_for(level: FitnessLevel, multiplier: f64) -> u32 {
    let base = match level {
        FitnessLevel::Beginner => 2.0,
        FitnessLevel::Intermediate => 3.0,
        FitnessLevel::Advanced => 4.0,
    };
    ((base * multiplier) as u32).min(MAX_SETS)
}

pub fn reps_for(goal: &str, level: FitnessLevel, multiplier: f64) -> String {
    if contains_any(goal, &["muscle", "strength"]) {
        let base = match level {
            FitnessLevel::Beginner => 12.0,
            FitnessLevel::Intermediate => 10.0,
            FitnessLevel::Advanced => 8.0,
        };
        let reps = ((base / multiplier) as u32).max(6);
        format!("{}-{} reps", reps, reps + 2)
    } else if contains_any(goal, &["endurance"]) {
        if level == FitnessLevel::Beginner {
            "12-15 reps or 30 seconds".to_string()
        } else {
            "15-20 reps or 45 seconds".to_string()
        }
    } else {
        "10-12 reps".to_string()
    }
}

pub fn rest_for(goal: &str, level: FitnessLevel) -> u32 {
    if contains_any(goal, &["muscle", "strength"]) {
        if level == FitnessLevel::Advanced {
            90
        } else {
            60
        }
    } else if contains_any(goal, &["fat", "weight"]) {
        30
    } else {
        60
    }
}

/// Strip search-result noise from a page title
pub fn clean_exercise_name(title: &str) -> String {
    let name = title
        .replace("Best ", "")
        .replace(" Exercises", "")
        .replace(" Exercise", "");
    let name = name.split(" - ").next().unwrap_or_default();
    let name = name.split('|').next().unwrap_or_default();
    truncate_chars(name.trim(), 100)
}

pub fn exercise_tip(name: &str) -> &'static str {
    if contains_any(name, &["squat"]) {
        "Keep chest up, knees tracking over toes, weight in heels"
    } else if contains_any(name, &["push", "press"]) {
        "Engage core, control the movement, full range of motion"
    } else if contains_any(name, &["pull", "row"]) {
        "Squeeze shoulder blades together, avoid using momentum"
    } else if contains_any(name, &["plank"]) {
        "Keep body straight, engage core, breathe steadily"
    } else {
        "Focus on proper form, control the movement, breathe consistently"
    }
}

fn routine(duration_minutes: u32, activities: &[&str]) -> Routine {
    Routine {
        duration_minutes,
        activities: activities.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn warm_up(duration_minutes: u32) -> Routine {
    routine(
        duration_minutes,
        &[
            "Light cardio (jogging in place, jumping jacks) - 2 minutes",
            "Dynamic stretches (leg swings, arm circles, torso twists) - 2 minutes",
            "Movement-specific warm-up (lighter version of main exercises) - 1 minute",
        ],
    )
}

pub fn cool_down(duration_minutes: u32) -> Routine {
    routine(
        duration_minutes,
        &[
            "Light walking or easy movement - 2 minutes",
            "Static stretching (hold each stretch 20-30 seconds) - 2 minutes",
            "Deep breathing and recovery - 1 minute",
        ],
    )
}

pub fn workout_notes(workout_type: &str, level: FitnessLevel) -> Vec<String> {
    let mut notes = vec![
        "Listen to your body and adjust intensity as needed".to_string(),
        "Maintain proper form throughout - quality over quantity".to_string(),
    ];
    if workout_type.contains("HIIT") {
        notes.push("Push hard during work intervals, recover fully during rest".to_string());
    }
    if level == FitnessLevel::Beginner {
        notes.push("Don't hesitate to take extra rest if needed".to_string());
    }
    if workout_type.contains("Strength") {
        notes.push("Increase weight when you can complete all sets with good form".to_string());
    }
    notes
}

/// Unique links among the first ten results, in order
pub fn compile_sources(research: &[ResearchResult]) -> Vec<Source> {
    let mut seen = HashSet::new();
    research
        .iter()
        .take(MAX_SOURCES_SCANNED)
        .filter(|hit| !hit.link.is_empty() && seen.insert(hit.link.as_str()))
        .map(|hit| Source {
            title: if hit.title.is_empty() {
                "Source".to_string()
            } else {
                hit.title.clone()
            },
            url: hit.link.clone(),
        })
        .collect()
}

pub fn plan_tips(goal: &str, level: FitnessLevel) -> Vec<String> {
    let mut tips: Vec<&str> = vec![
        "🎯 Consistency is more important than perfection",
        "💧 Stay hydrated - drink water before, during, and after workouts",
        "😴 Get 7-9 hours of sleep for optimal recovery",
        "📊 Track your workouts to monitor progress",
        "⚠️ Stop if you feel sharp pain - discomfort is okay, pain is not",
    ];

    let goal = goal.to_lowercase();
    if goal == "weight_loss" || goal == "fat_loss" {
        tips.push("🍽️ Combine with calorie deficit for best results");
        tips.push("🏃 Add extra walking or light cardio on rest days");
    }
    if goal == "muscle_gain" || goal == "strength" {
        tips.push("🍖 Eat enough protein (0.8-1g per lb bodyweight)");
        tips.push("💪 Progressive overload - gradually increase weight/reps");
    }
    if level == FitnessLevel::Beginner {
        tips.push("🌱 Start conservative - it's okay to begin easier and build up");
        tips.push("📅 Schedule workouts like important appointments");
    }

    tips.into_iter().map(String::from).collect()
}

pub fn nutrition_guidelines(goal: &str) -> NutritionGuidelines {
    let guidelines = |focus: &str, protein: &str, carbs: &str, fats: &str, tips: [&str; 3]| {
        NutritionGuidelines {
            focus: focus.to_string(),
            protein: protein.to_string(),
            carbs: carbs.to_string(),
            fats: fats.to_string(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
        }
    };

    if contains_any(goal, &["weight", "fat", "loss"]) {
        guidelines(
            "Calorie Deficit",
            "High - 1.0-1.2g per lb bodyweight",
            "Moderate - prioritize whole grains and vegetables",
            "Moderate - focus on healthy fats (avocado, nuts, olive oil)",
            [
                "Create 300-500 calorie deficit daily",
                "Don't cut calories too drastically",
                "Eat plenty of vegetables for satiety",
            ],
        )
    } else if contains_any(goal, &["muscle", "gain"]) {
        guidelines(
            "Calorie Surplus + High Protein",
            "Very High - 1.0-1.2g per lb bodyweight",
            "High - fuel for workouts and recovery",
            "Moderate - support hormone production",
            [
                "Eat 200-300 calories above maintenance",
                "Time protein around workouts",
                "Focus on nutrient-dense foods",
            ],
        )
    } else if contains_any(goal, &["endurance"]) {
        guidelines(
            "Carbohydrates + Hydration",
            "Moderate - 0.8-1.0g per lb bodyweight",
            "High - primary fuel source",
            "Moderate",
            [
                "Carb-load before long sessions",
                "Stay well-hydrated",
                "Consider electrolyte replacement for long workouts",
            ],
        )
    } else {
        guidelines(
            "Balanced Nutrition",
            "Moderate - 0.8g per lb bodyweight",
            "Moderate - whole grains and fruits",
            "Moderate - healthy fats",
            [
                "Eat balanced meals with protein, carbs, and fats",
                "Focus on whole, minimally processed foods",
                "Listen to your hunger cues",
            ],
        )
    }
}

// ============================================================================
// Quick workouts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickExercise {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub rest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickRoutine {
    pub name: String,
    pub exercises: Vec<QuickExercise>,
    pub rounds: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWorkout {
    pub workout: QuickRoutine,
    pub duration_minutes: u32,
    pub goal: String,
    pub equipment_needed: Vec<String>,
}

fn timed(name: &str, duration: &str, rest: &str) -> QuickExercise {
    QuickExercise {
        name: name.to_string(),
        reps: None,
        duration: Some(duration.to_string()),
        rest: rest.to_string(),
    }
}

fn counted(name: &str, reps: &str, rest: &str) -> QuickExercise {
    QuickExercise {
        name: name.to_string(),
        reps: Some(reps.to_string()),
        duration: None,
        rest: rest.to_string(),
    }
}

/// A short session for today; unknown goals get the HIIT routine
pub fn quick_workout(goal: &str, duration_minutes: u32, equipment: &[String]) -> QuickWorkout {
    let workout = match goal {
        "muscle_gain" => QuickRoutine {
            name: "Quick Strength Circuit".to_string(),
            exercises: vec![
                counted("Push-ups", "12-15", "45 seconds"),
                counted("Squats", "15-20", "45 seconds"),
                counted("Dumbbell Rows", "12-15 each arm", "45 seconds"),
                counted("Lunges", "10-12 each leg", "45 seconds"),
                timed("Plank", "45-60 seconds", "60 seconds"),
            ],
            rounds: 3,
            notes: "Focus on form, increase weight when possible".to_string(),
        },
        "endurance" => QuickRoutine {
            name: "Quick Cardio Session".to_string(),
            exercises: vec![
                timed("Jogging in Place", "2 minutes", "30 seconds"),
                timed("Jumping Jacks", "1 minute", "30 seconds"),
                timed("Step-ups", "1 minute", "30 seconds"),
                timed("High Knees", "1 minute", "30 seconds"),
                timed("Cool-down Walk", "2 minutes", "none"),
            ],
            rounds: 2,
            notes: "Maintain steady pace, focus on breathing".to_string(),
        },
        _ => QuickRoutine {
            name: "Quick HIIT Workout".to_string(),
            exercises: vec![
                timed("Jumping Jacks", "1 minute", "30 seconds"),
                counted("Burpees", "10-12", "30 seconds"),
                timed("Mountain Climbers", "45 seconds", "30 seconds"),
                timed("High Knees", "45 seconds", "30 seconds"),
                timed("Plank", "30-45 seconds", "30 seconds"),
            ],
            rounds: if duration_minutes >= 20 { 3 } else { 2 },
            notes: "Complete all exercises, rest, then repeat for specified rounds".to_string(),
        },
    };

    QuickWorkout {
        workout,
        duration_minutes,
        goal: goal.to_string(),
        equipment_needed: if equipment.is_empty() {
            vec!["none - bodyweight only".to_string()]
        } else {
            equipment.to_vec()
        },
    }
}

// ============================================================================
// Progression
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPlan {
    pub current_level: FitnessLevel,
    pub progression_strategies: Vec<String>,
    pub recommended_timeline: String,
    pub notes: String,
}

pub fn progression_strategies(level: FitnessLevel) -> ProgressionPlan {
    let strategies: &[&str] = match level {
        FitnessLevel::Beginner => &[
            "Add 1-2 more reps per set",
            "Reduce rest time by 10-15 seconds",
            "Add one more set to each exercise",
            "Improve form and range of motion",
        ],
        FitnessLevel::Intermediate => &[
            "Increase weight by 5-10%",
            "Add 2-3 more reps per set",
            "Reduce rest time by 15-20 seconds",
            "Add a more challenging exercise variation",
            "Increase training frequency by 1 day",
        ],
        FitnessLevel::Advanced => &[
            "Increase weight by 5-10%",
            "Add advanced exercise variations",
            "Incorporate drop sets or supersets",
            "Reduce rest time for density training",
            "Add volume (sets/reps)",
        ],
    };

    ProgressionPlan {
        current_level: level,
        progression_strategies: strategies.iter().map(|s| s.to_string()).collect(),
        recommended_timeline: "Progress every 2-3 weeks".to_string(),
        notes: "Only progress when you can complete current workout with good form".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn hit(title: &str, link: &str) -> ResearchResult {
        ResearchResult {
            title: title.to_string(),
            snippet: format!("About {}", title),
            link: link.to_string(),
        }
    }

    fn research() -> Vec<ResearchResult> {
        vec![
            hit("Best Squat Exercises - Mayo Clinic", "https://mayoclinic.org/squat"),
            hit("Push-up Guide | ACE", "https://acefitness.org/pushup"),
            hit("Dumbbell Row", "https://nasm.org/row"),
            hit("Plank Exercise", "https://example.com/plank"),
            hit("Lunges", "https://example.com/lunge"),
            hit("Burpees", "https://example.com/burpee"),
            hit("Duplicate", "https://mayoclinic.org/squat"),
        ]
    }

    fn options(goal: &str, weeks: u32, days: u32) -> PlanOptions {
        PlanOptions {
            goal: goal.to_string(),
            duration_weeks: weeks,
            days_per_week: days,
            equipment: default_equipment(),
            limitations: Vec::new(),
        }
    }

    #[test]
    fn test_plan_shape() {
        let plan = build_workout_plan(
            &UserId::from(1),
            &options("muscle_gain", 8, 4),
            &FitnessSummary::default(),
            FitnessLevel::Intermediate,
            &research(),
        );
        assert_eq!(plan.weekly_plans.len(), 8);
        assert!(plan.weekly_plans.iter().all(|w| w.workouts.len() == 4));
        assert_eq!(plan.principles.recovery, "3 rest days per week");
        assert_eq!(plan.weekly_plans[0].workouts[0].workout_type, "Upper Body Push");
        assert_eq!(plan.weekly_plans[0].workouts[0].exercises.len(), 5);
        assert_eq!(plan.sources.len(), 6);
        assert!(plan.tips.iter().any(|t| t.contains("protein")));
        assert_eq!(plan.nutrition_guidelines.focus, "Calorie Surplus + High Protein");
    }

    #[test]
    fn test_intensity_progression_is_capped() {
        assert_eq!(intensity_percentage(intensity_multiplier(1)), 65);
        assert_eq!(intensity_percentage(intensity_multiplier(2)), 68);
        assert_eq!(intensity_percentage(intensity_multiplier(12)), 95);
    }

    #[rstest]
    #[case(1, 8, "Foundation - Learning proper form and building base endurance")]
    #[case(2, 8, "Foundation - Learning proper form and building base endurance")]
    #[case(4, 8, "Building Volume - Increasing sets and reps")]
    #[case(6, 8, "Intensity - Adding weight and difficulty")]
    #[case(8, 8, "Peak Performance - Maximizing results")]
    fn test_week_focus_by_quarter(#[case] week: u32, #[case] total: u32, #[case] expected: &str) {
        assert_eq!(week_focus(week, total), expected);
    }

    #[test]
    fn test_sets_and_reps() {
        assert_eq!(sets_for(FitnessLevel::Advanced, intensity_multiplier(8)), 5);
        assert_eq!(sets_for(FitnessLevel::Beginner, 1.0), 2);
        assert_eq!(reps_for("muscle_gain", FitnessLevel::Intermediate, 1.0), "10-12 reps");
        assert_eq!(reps_for("muscle_gain", FitnessLevel::Advanced, 1.5), "6-8 reps");
        assert_eq!(reps_for("endurance", FitnessLevel::Beginner, 1.0), "12-15 reps or 30 seconds");
        assert_eq!(reps_for("weight_loss", FitnessLevel::Advanced, 1.0), "10-12 reps");
        assert_eq!(rest_for("weight_loss", FitnessLevel::Beginner), 30);
        assert_eq!(rest_for("strength", FitnessLevel::Advanced), 90);
    }

    #[test]
    fn test_workout_type_rotation() {
        assert_eq!(workout_type(1, "weight_loss", 3), "HIIT");
        assert_eq!(workout_type(4, "weight_loss", 3), "HIIT");
        assert_eq!(workout_type(5, "build muscle", 5), "Lower Body");
        assert_eq!(workout_type(2, "endurance", 3), "Interval Training");
        assert_eq!(workout_type(1, "general", 3), "Full Body Strength");
    }

    #[test]
    fn test_clean_exercise_name() {
        assert_eq!(clean_exercise_name("Best Squat Exercises - Mayo Clinic"), "Squat");
        assert_eq!(clean_exercise_name("Push-up Guide | ACE"), "Push-up Guide");
        assert_eq!(clean_exercise_name("  Plank Exercise  "), "Plank");
    }

    #[test]
    fn test_exercise_tips() {
        assert!(exercise_tip("Goblet Squat").starts_with("Keep chest up"));
        assert!(exercise_tip("Bench Press").starts_with("Engage core"));
        assert!(exercise_tip("Bent-over Row").starts_with("Squeeze"));
        assert!(exercise_tip("Side Plank").starts_with("Keep body straight"));
        assert!(exercise_tip("Burpee").starts_with("Focus on proper form"));
    }

    #[test]
    fn test_notes_for_hiit_beginner() {
        let notes = workout_notes("HIIT", FitnessLevel::Beginner);
        assert_eq!(notes.len(), 4);
        assert!(notes[2].contains("work intervals"));
    }

    #[test]
    fn test_sources_deduplicated_and_scan_first_ten() {
        let mut hits = research();
        hits.extend((0..10).map(|i| hit("Extra", &format!("https://example.com/{}", i))));
        let sources = compile_sources(&hits);
        assert_eq!(sources.len(), 9);
        assert_eq!(sources[0].title, "Best Squat Exercises - Mayo Clinic");
        assert_eq!(compile_sources(&[hit("", "https://x.org")])[0].title, "Source");
    }

    #[test]
    fn test_quick_workout_defaults() {
        let workout = quick_workout("flexibility", 15, &[]);
        assert_eq!(workout.workout.name, "Quick HIIT Workout");
        assert_eq!(workout.workout.rounds, 2);
        assert_eq!(workout.equipment_needed, vec!["none - bodyweight only"]);
        assert_eq!(quick_workout("weight_loss", 20, &[]).workout.rounds, 3);
        assert_eq!(quick_workout("muscle_gain", 10, &[]).workout.rounds, 3);
    }

    #[test]
    fn test_progression_by_level() {
        let plan = progression_strategies(FitnessLevel::Beginner);
        assert_eq!(plan.progression_strategies.len(), 4);
        assert_eq!(plan.recommended_timeline, "Progress every 2-3 weeks");
        assert_eq!(
            progression_strategies(FitnessLevel::parse_or_default("unknown")).progression_strategies[0],
            "Increase weight by 5-10%"
        );
    }

    #[test]
    fn test_plan_without_research_has_no_exercises() {
        let plan = build_workout_plan(
            &UserId::from(2),
            &options("endurance", 2, 3),
            &FitnessSummary::default(),
            FitnessLevel::Beginner,
            &[],
        );
        assert!(plan.sources.is_empty());
        assert!(plan.weekly_plans[0].workouts[0].exercises.is_empty());
        assert_eq!(plan.weekly_plans[0].workouts[0].duration_minutes, 45);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: intensity and sets never exceed their caps
        #[test]
        fn prop_intensity_and_sets_capped(week in 1u32..60) {
            let multiplier = intensity_multiplier(week);
            prop_assert!(intensity_percentage(multiplier) <= MAX_INTENSITY);
            prop_assert!(sets_for(FitnessLevel::Advanced, multiplier) <= MAX_SETS);
        }

        /// Property: the plan has one week per requested week and one workout per day
        #[test]
        fn prop_plan_dimensions(weeks in 1u32..16, days in 1u32..7) {
            let plan = build_workout_plan(
                &UserId::from(3),
                &options("weight_loss", weeks, days),
                &FitnessSummary::default(),
                FitnessLevel::Intermediate,
                &research(),
            );
            prop_assert_eq!(plan.weekly_plans.len() as u32, weeks);
            prop_assert!(plan.weekly_plans.iter().all(|w| w.workouts.len() as u32 == days));
        }
    }
}
