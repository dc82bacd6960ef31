mod assistant;
mod commands;
mod dataset;
mod llm;
mod state;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use poise::{Framework, FrameworkOptions};
use tokio::sync::RwLock;
use tracing::{error, info, Level};

use assistant::FitnessAssistant;
use dataset::DatasetStore;
use llm::LlmClient;
use state::{AppState, GenerationConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let token = dotenv::var("DISCORD_TOKEN").context("DISCORD_TOKEN required")?;
    let guild_id: Option<serenity::GuildId> = dotenv::var("DISCORD_GUILD_ID")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(serenity::GuildId::new);

    // Load dataset; nothing works without it
    let dataset_path = PathBuf::from(
        dotenv::var("EXERCISE_DATASET").unwrap_or_else(|_| "megaGymDataset.csv".to_string()),
    );
    let datasets = DatasetStore::new();
    let table = datasets.load(&dataset_path).await?;
    if table.len() < assistant::prompts::SAMPLE_SIZE {
        return Err(dataset::DatasetError::InsufficientData {
            needed: assistant::prompts::SAMPLE_SIZE,
            available: table.len(),
        }
        .into());
    }

    // Init LLM client
    let llm_client = Arc::new(LlmClient::from_env()?);
    let model = llm_client.model().to_string();
    info!(model, "LLM client initialized");

    // Parse admin user IDs from env
    let admin_ids: HashSet<u64> = dotenv::var("ADMIN_USER_IDS")
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse::<u64>().ok())
        .collect();
    if !admin_ids.is_empty() {
        info!(count = admin_ids.len(), "Admin users configured");
    }

    let assistant = Arc::new(FitnessAssistant::new(llm_client, table.clone()));

    let app_state = AppState {
        dataset_path,
        table,
        assistant,
        model,
        admin_ids,
        generation_config: Arc::new(RwLock::new(GenerationConfig::default())),
    };

    let intents = serenity::GatewayIntents::GUILDS;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![commands::fitbot()],
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);

                let commands = &framework.options().commands;
                info!("Registering {} top-level command(s):", commands.len());
                for cmd in commands {
                    info!("  /{} ({} subcommands)", cmd.name, cmd.subcommands.len());
                    for sub in &cmd.subcommands {
                        info!("    /{} {}", cmd.name, sub.name);
                    }
                }

                if let Some(gid) = guild_id {
                    info!("Registering to guild {} (instant)", gid);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        gid,
                    )
                    .await?;
                } else {
                    info!("Registering globally (up to 1 hour delay)");
                    poise::builtins::register_globally(ctx, &framework.options().commands)
                        .await?;
                }

                Ok(app_state)
            })
        })
        .build();

    info!("Starting Fitbot...");

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }

    Ok(())
}
