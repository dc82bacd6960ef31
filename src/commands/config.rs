use crate::assistant::STOP_SEQUENCE;
use crate::state::{Context, GenerationConfig};

/// Configure fallback generation parameters (admin only)
#[poise::command(slash_command, guild_only)]
pub async fn config(
    ctx: Context<'_>,
    #[description = "fallback_max_tokens | fallback_temperature"] param: Option<String>,
    #[description = "New value"] value: Option<String>,
) -> Result<(), anyhow::Error> {
    let user_id = ctx.author().id.get();
    if !ctx.data().is_admin(user_id) {
        ctx.say("This command is admin-only.").await?;
        return Ok(());
    }

    match (param.as_deref(), value) {
        // Show current config
        (None, _) => {
            let config = *ctx.data().generation_config.read().await;
            ctx.say(format!(
                "**Generation Configuration:**\n\
                 model: `{}`\n\
                 `fallback_max_tokens`: {}\n\
                 `fallback_temperature`: {}\n\
                 stop sequence: `{}` (fixed)",
                ctx.data().model,
                config.fallback_max_tokens,
                config.fallback_temperature,
                STOP_SEQUENCE
            ))
            .await?;
        }
        (Some(key), Some(val)) => {
            let result = ctx.data().generation_config.write().await.set(key, &val);
            match result {
                Ok(()) => ctx.say(format!("`{}` set to {}", key, val.trim())).await?,
                Err(e) => ctx.say(format!("{:#}", e)).await?,
            };
        }
        (Some(_), None) => {
            ctx.say(format!(
                "Provide both `param` and `value`. Example: `/fitbot config {} 1500`",
                GenerationConfig::PARAMS[0]
            ))
            .await?;
        }
    }

    Ok(())
}
