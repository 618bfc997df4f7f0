//! Prompt assembly for the language model

use super::context::CoachContext;
use std::fmt::Write;
use workout_buddy_shared::format::{capitalize, compact_number, thousands, truncate_chars};
use workout_buddy_shared::types::{ChatMessage, Role};
use workout_buddy_shared::workout::ResearchResult;

/// Snippet length kept for each research hit
const SNIPPET_CHARS: usize = 300;
/// Research hits placed in the prompt
const PROMPT_RESEARCH_RESULTS: usize = 5;

pub const SYSTEM_PROMPT: &str = r#"You are an expert AI Fitness Coach specializing in personalized fitness guidance, workout programming, and health insights.

## Your Role

You help users achieve their fitness goals through:
- Evidence-based workout recommendations
- Personalized insights from their fitness data
- Goal tracking and progress analysis
- Motivational coaching and support
- Research-backed training advice

## Your Communication Style

- **Supportive**: Encourage and motivate users
- **Data-Driven**: Use their actual fitness data to provide insights
- **Educational**: Explain the reasoning behind recommendations
- **Actionable**: Give specific, practical advice
- **Realistic**: Set achievable goals and expectations

## Guidelines

### DO:
- Analyze the user's actual fitness data before making recommendations
- Cite sources when providing exercise or nutrition advice
- Explain training principles (progressive overload, recovery, etc.)
- Celebrate wins and progress, no matter how small
- Adjust recommendations to the user's fitness level
- Consider user limitations and safety
- Use emojis moderately for engagement

### DON'T:
- Provide medical advice or diagnosis
- Recommend extreme diets or dangerous practices
- Ignore the user's stated limitations or injuries
- Make assumptions without data
- Set unrealistic expectations
- Recommend working through pain

## When Discussing Injuries/Pain
- Always recommend consulting healthcare professionals
- Never diagnose or treat medical conditions
- Suggest safe, low-impact alternatives if appropriate

Your goal is to help users develop sustainable, healthy fitness habits. Focus on long-term behavior change, not quick fixes."#;

const RESPONSE_INSTRUCTIONS: &str = "Provide a helpful, personalized response based on the user's data and context above. Use specific numbers from their data when relevant. Be supportive and actionable.";

/// Label for the weekly summary block
pub const SUMMARY_LABEL: &str = "This Week";

/// `## User Context` section
pub fn context_section(context: &CoachContext) -> String {
    let summary = &context.summary;
    let mut out = String::from("## User Context\n\n");

    let _ = writeln!(out, "**Recent Activity ({})**:", SUMMARY_LABEL);
    let _ = writeln!(out, "- Average Steps: {}/day", thousands(i64::from(summary.avg_steps)));
    let _ = writeln!(out, "- Total Distance: {:.1} km", summary.total_distance_km);
    let _ = writeln!(out, "- Total Calories: {}", thousands(summary.total_calories as i64));
    let _ = writeln!(out, "- Active Minutes: {}", summary.total_active_minutes);
    let _ = writeln!(
        out,
        "- Days Active: {}/{}",
        summary.days_active, summary.total_days
    );

    if let Some(goals) = &context.goals {
        out.push_str("\n**Goals**:\n");
        for goal in goals {
            let _ = writeln!(
                out,
                "- {}: {}/{} ({}%)",
                goal.goal_type.as_str(),
                compact_number(goal.current_value),
                compact_number(goal.target_value),
                goal.progress_percentage()
            );
        }
    }

    if let Some(trend) = &context.trend {
        let _ = writeln!(
            out,
            "\n**Activity Trend**: {} ({:+.1}%)",
            capitalize(trend.trend.as_str()),
            trend.change_percentage
        );
    }

    if let Some(breakdown) = &context.weekly_breakdown {
        if let Some(best) = &breakdown.best_day {
            let _ = writeln!(out, "\n**Most Active Day**: {}", best);
        }
        if let Some(steady) = &breakdown.most_consistent_day {
            let _ = writeln!(out, "**Most Consistent Day**: {}", steady);
        }
    }

    out
}

/// The last `window` messages, oldest first; empty without history
pub fn history_section(history: &[ChatMessage], window: usize) -> String {
    if history.is_empty() || window == 0 {
        return String::new();
    }
    let mut out = String::from("## Conversation History\n\n");
    let skip = history.len().saturating_sub(window);
    for message in &history[skip..] {
        let speaker = match message.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        let _ = write!(out, "**{}**: {}\n\n", speaker, message.content);
    }
    out
}

fn research_section(research: &[ResearchResult]) -> String {
    if research.is_empty() {
        return String::new();
    }
    let mut out = String::from("## Research\n\n");
    for hit in research.iter().take(PROMPT_RESEARCH_RESULTS) {
        let _ = write!(
            out,
            "- **{}** ({})\n  {}\n",
            hit.title,
            hit.link,
            truncate_chars(&hit.snippet, SNIPPET_CHARS)
        );
    }
    out
}

/// Full user-turn prompt; the system prompt travels separately
pub fn build_prompt(
    message: &str,
    context: &CoachContext,
    history: &[ChatMessage],
    history_window: usize,
    research: &[ResearchResult],
) -> String {
    let sections = [
        context_section(context),
        research_section(research),
        history_section(history, history_window),
        format!("## Current User Message\n\n{}\n", message),
        format!("## Your Response\n\n{}\n", RESPONSE_INSTRUCTIONS),
    ];
    sections
        .iter()
        .filter(|section| !section.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
