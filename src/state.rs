use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use tokio::sync::RwLock;

use crate::assistant::FitnessAssistant;
use crate::dataset::types::ExerciseTable;

/// Generation parameters for the not-found fallback path (admins can modify at runtime).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub fallback_max_tokens: u32,
    pub fallback_temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            fallback_max_tokens: 1000,
            fallback_temperature: 0.7,
        }
    }
}

impl GenerationConfig {
    pub const PARAMS: &'static [&'static str] = &["fallback_max_tokens", "fallback_temperature"];

    /// Parse and apply one `param = value` update.
    pub fn set(&mut self, param: &str, value: &str) -> Result<()> {
        match param {
            "fallback_max_tokens" => {
                let tokens: u32 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("`{}` is not a token count", value))?;
                if tokens == 0 {
                    bail!("`fallback_max_tokens` must be at least 1");
                }
                self.fallback_max_tokens = tokens;
            }
            "fallback_temperature" => {
                let temperature: f32 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("`{}` is not a number", value))?;
                if !(0.0..=5.0).contains(&temperature) {
                    bail!("`fallback_temperature` must be between 0 and 5");
                }
                self.fallback_temperature = temperature;
            }
            _ => bail!(
                "Unknown param `{}`. Valid: `{}`",
                param,
                Self::PARAMS.join("`, `")
            ),
        }
        Ok(())
    }
}

pub struct AppState {
    pub dataset_path: PathBuf,
    pub table: Arc<ExerciseTable>,
    pub assistant: Arc<FitnessAssistant>,
    pub model: String,
    pub admin_ids: HashSet<u64>,
    pub generation_config: Arc<RwLock<GenerationConfig>>,
}

impl AppState {
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;
