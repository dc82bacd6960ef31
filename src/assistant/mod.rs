pub mod preferences;
pub mod prompts;
pub mod query;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::dataset::types::{ExerciseRecord, ExerciseTable};
use crate::llm::{GenerationRequest, Generator};
use crate::state::GenerationConfig;

use preferences::UserPreferences;
use prompts::compose_prompt;
use query::{extract_exercise_name, is_description_query};

/// Stop sequence sent with every generation request.
pub const STOP_SEQUENCE: &str = "--";

/// Result of handling one submitted query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was submitted. No lookup, no generation.
    EmptyQuery,
    /// The query named an exercise present in the dataset.
    Found(ExerciseRecord),
    /// The query looked like an exercise description request but the name
    /// was not in the dataset, so the model answered instead.
    NotFoundFallback { name: String, answer: String },
    /// General fitness question answered by the model.
    General { answer: String },
}

pub struct FitnessAssistant {
    generator: Arc<dyn Generator>,
    table: Arc<ExerciseTable>,
}

impl FitnessAssistant {
    pub fn new(generator: Arc<dyn Generator>, table: Arc<ExerciseTable>) -> Self {
        Self { generator, table }
    }

    /// Handle one query start to finish. Generation errors propagate unchanged.
    pub async fn answer(
        &self,
        query: &str,
        prefs: &UserPreferences,
        config: GenerationConfig,
    ) -> Result<Outcome> {
        if query.is_empty() {
            debug!("empty query submitted");
            return Ok(Outcome::EmptyQuery);
        }

        if !is_description_query(query) {
            info!(description_query = false, "answering general question");
            let answer = self.generate(query, prefs, None, None).await?;
            return Ok(Outcome::General { answer });
        }

        let name = extract_exercise_name(query);
        if let Some(record) = self.table.lookup(&name) {
            info!(description_query = true, exercise = %name, hit = true, "exercise lookup");
            return Ok(Outcome::Found(record.clone()));
        }

        info!(description_query = true, exercise = %name, hit = false, "exercise lookup");
        let answer = self
            .generate(
                query,
                prefs,
                Some(config.fallback_max_tokens),
                Some(config.fallback_temperature),
            )
            .await?;
        Ok(Outcome::NotFoundFallback { name, answer })
    }

    async fn generate(
        &self,
        query: &str,
        prefs: &UserPreferences,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String> {
        let prompt = {
            let mut rng = rand::thread_rng();
            compose_prompt(query, &self.table, prefs, &mut rng)?
        };

        let request = GenerationRequest {
            prompt,
            max_tokens,
            temperature,
            stop_sequences: vec![STOP_SEQUENCE.to_string()],
        };
        self.generator.generate(&request).await
    }
}
