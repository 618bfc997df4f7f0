//! Keyword replies used when no language model is configured

use workout_buddy_shared::format::thousands;
use workout_buddy_shared::FitnessSummary;

pub const MOCK_TOOL: &str = "mock_response";

pub fn canned_reply(message: &str, summary: &FitnessSummary) -> String {
    let message = message.to_lowercase();

    if message.contains("how am i doing") || message.contains("progress") {
        let total_days = if summary.total_days == 0 { 7 } else { summary.total_days };
        format!(
            "Looking at your recent activity, here's how you're doing:\n\n\
             📊 **This Week's Stats**:\n\
             - Average Steps: {}/day\n\
             - You've been active {} out of {} days\n\n\
             You're making progress! Keep up the consistent effort. 🎯\n",
            thousands(i64::from(summary.avg_steps)),
            summary.days_active,
            total_days
        )
    } else if message.contains("workout") || message.contains("exercise") {
        "I can help you with workout recommendations! Tell me:\n\n\
         1. What's your main goal? (muscle gain, weight loss, endurance, etc.)\n\
         2. How many days per week can you train?\n\
         3. What equipment do you have access to?\n\n\
         I'll create a personalized plan for you! 💪\n"
            .to_string()
    } else if message.contains("goal") {
        "Let's work on your fitness goals! 🎯\n\n\
         I can help you:\n\
         - Set realistic, achievable goals\n\
         - Track your progress\n\
         - Adjust your plan as needed\n\
         - Stay motivated\n\n\
         What specific goal would you like to focus on?\n"
            .to_string()
    } else {
        "I'm your AI fitness coach! I can help you with:\n\n\
         - 📊 Analyzing your fitness data and progress\n\
         - 💪 Creating personalized workout plans\n\
         - 🎯 Setting and tracking goals\n\
         - 📈 Providing insights and recommendations\n\n\
         What would you like to work on today?\n"
            .to_string()
    }
}
