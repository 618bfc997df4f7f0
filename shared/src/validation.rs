//! Input validation functions
//!
//! Custom checks for request values, plus a bridge from the `validator`
//! derive output to a single field-level error.

/// Longest chat message accepted, in characters
pub const MAX_MESSAGE_CHARS: usize = 4000;
/// Longest analysis window, in days
pub const MAX_WINDOW_DAYS: u32 = 365;
/// Longest goal timeframe, in days
pub const MAX_TIMEFRAME_DAYS: i64 = 3650;

/// Validate a chat message
pub fn validate_message(message: &str) -> Result<(), String> {
    if message.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!("Message cannot exceed {} characters", MAX_MESSAGE_CHARS));
    }
    Ok(())
}

/// Validate an analysis window length
pub fn validate_window_days(days: u32) -> Result<(), String> {
    if days == 0 {
        return Err("Days must be at least 1".to_string());
    }
    if days > MAX_WINDOW_DAYS {
        return Err(format!("Days must be at most {}", MAX_WINDOW_DAYS));
    }
    Ok(())
}

/// Validate a daily step goal
pub fn validate_step_goal(steps: u32) -> Result<(), String> {
    if steps == 0 {
        return Err("Step goal must be positive".to_string());
    }
    if steps > 100_000 {
        return Err("Step goal unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a goal's current or target value
pub fn validate_goal_value(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Value must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a goal timeframe; zero or negative days means the deadline has passed
pub fn validate_timeframe_days(days: i64) -> Result<(), String> {
    if days > MAX_TIMEFRAME_DAYS {
        return Err(format!("Timeframe cannot exceed {} days", MAX_TIMEFRAME_DAYS));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "user_id" => "User",
        "message" => "Message",
        "conversation_id" => "Conversation",
        "days" | "period_days" => "Days",
        "goal_steps" => "Step Goal",
        "goal" | "goal_type" => "Goal",
        "current_value" => "Current Value",
        "target_value" => "Target Value",
        "timeframe_days" => "Timeframe",
        "fitness_level" => "Fitness Level",
        "duration_weeks" => "Duration",
        "days_per_week" => "Days per Week",
        "duration_minutes" => "Duration",
        "equipment" => "Equipment",
        "limitations" => "Limitations",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }

    /// First failing field of a derive-validated struct, by field name
    pub fn from_errors(errors: &validator::ValidationErrors) -> Option<Self> {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {} check", e.code));
                    (field.to_string(), message)
                })
            })
            .collect();
        fields.sort();
        fields
            .into_iter()
            .next()
            .map(|(field, message)| Self::new(&field, &message))
    }
}
