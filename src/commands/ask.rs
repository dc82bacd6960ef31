use std::fmt::Write as _;

use tracing::info;

use crate::assistant::preferences::{Experience, Goal, UserPreferences};
use crate::assistant::Outcome;
use crate::commands::send_chunked;
use crate::dataset::types::ExerciseRecord;
use crate::state::Context;

const FOOTER: &str = "-# Powered by Cohere";

/// Ask anything about workouts or fitness
#[poise::command(slash_command)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question"] question: String,
    #[description = "What's your main fitness goal?"] goal: Option<Goal>,
    #[description = "What's your experience level?"] experience: Option<Experience>,
    #[description = "Any injuries or limitations?"] restrictions: Option<bool>,
) -> Result<(), anyhow::Error> {
    let prefs = UserPreferences {
        goal,
        experience,
        restrictions: restrictions.unwrap_or(false),
    };

    // Generation can take a while; show the "thinking" state
    ctx.defer().await?;

    let config = *ctx.data().generation_config.read().await;

    info!(
        user = ctx.author().name,
        question,
        goal = prefs.goal_label(),
        experience = prefs.experience_label(),
        restrictions = prefs.restrictions,
        "fitness query started"
    );

    let outcome = ctx.data().assistant.answer(&question, &prefs, config).await?;

    send_chunked(&ctx, &render(&outcome)).await
}

/// Render an outcome as Discord markdown.
pub(crate) fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::EmptyQuery => "⚠️ Please enter a question to get a response.".to_string(),
        Outcome::Found(record) => render_record(record),
        Outcome::NotFoundFallback { name, answer } => format!(
            "⚠️ I couldn't find specific details for '{}' in my database. \
             However, I can still provide general fitness advice based on your preferences.\n\n\
             ---\n### General Advice:\n{}\n\n{}",
            name, answer, FOOTER
        ),
        Outcome::General { answer } => {
            format!("---\n### Chatbot's Response:\n{}\n\n{}", answer, FOOTER)
        }
    }
}

fn render_record(record: &ExerciseRecord) -> String {
    let mut out = format!("✅ Here's what I found about **{}**:\n", record.title);
    let _ = writeln!(out, "**Type:** {}", record.kind);
    let _ = writeln!(out, "**Body Part:** {}", record.body_part);
    let _ = writeln!(out, "**Equipment:** {}", record.equipment);
    let _ = writeln!(out, "**Level:** {}", record.level);
    if record.has_rating() {
        let _ = writeln!(out, "**Rating:** {:?} / 10", record.rating);
    }
    let _ = write!(out, "> **Description:** {}", record.description);
    out
}
