use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One completion call to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub stop_sequences: Vec<String>,
}

/// Text generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Issue one blocking completion call. No retries.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stop_sequences: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    text: String,
}

/// Cohere chat API client.
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Result<Self> {
        // No timeout: a request waits on the transport until it completes or fails.
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }

    pub fn from_env() -> Result<Self> {
        let api_key = dotenv::var("COHERE_API_KEY").context("COHERE_API_KEY required")?;
        let base_url = dotenv::var("COHERE_BASE_URL")
            .unwrap_or_else(|_| "https://api.cohere.ai/v1".to_string());
        let model =
            dotenv::var("COHERE_MODEL").unwrap_or_else(|_| "command-nightly".to_string());

        Self::new(base_url, model, api_key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Resolve the chat endpoint from the base URL.
    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat", base)
        } else {
            format!("{}/v1/chat", base)
        }
    }

    fn body<'a>(&'a self, request: &'a GenerationRequest) -> ChatBody<'a> {
        ChatBody {
            model: &self.model,
            message: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stop_sequences: &request.stop_sequences,
        }
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            model = %self.model,
            max_tokens = ?request.max_tokens,
            temperature = ?request.temperature,
            prompt_len = request.prompt.len(),
            "generation request"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .context("Cohere chat request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed to read Cohere response")?;
        if !status.is_success() {
            bail!("Cohere chat returned {}: {}", status, text);
        }

        let reply: ChatReply =
            serde_json::from_str(&text).context("Failed to parse Cohere JSON")?;
        debug!(answer_len = reply.text.len(), "generation complete");
        Ok(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> LlmClient {
        LlmClient::new(
            base_url.to_string(),
            "command-nightly".to_string(),
            "test-key".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_resolution() {
        assert_eq!(
            client("https://api.cohere.ai/v1").endpoint(),
            "https://api.cohere.ai/v1/chat"
        );
        assert_eq!(
            client("https://api.cohere.ai/v1/").endpoint(),
            "https://api.cohere.ai/v1/chat"
        );
        assert_eq!(
            client("https://api.cohere.ai").endpoint(),
            "https://api.cohere.ai/v1/chat"
        );
        assert_eq!(
            client("http://localhost:8080/v1/chat").endpoint(),
            "http://localhost:8080/v1/chat"
        );
    }

    #[test]
    fn test_body_with_limits() {
        let llm = client("https://api.cohere.ai/v1");
        let request = GenerationRequest {
            prompt: "hello".to_string(),
            max_tokens: Some(1000),
            temperature: Some(0.5),
            stop_sequences: vec!["--".to_string()],
        };
        let json = serde_json::to_value(llm.body(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "command-nightly",
                "message": "hello",
                "max_tokens": 1000,
                "temperature": 0.5,
                "stop_sequences": ["--"],
            })
        );
    }

    #[test]
    fn test_body_omits_unset_limits() {
        let llm = client("https://api.cohere.ai/v1");
        let request = GenerationRequest {
            prompt: "hello".to_string(),
            max_tokens: None,
            temperature: None,
            stop_sequences: vec!["--".to_string()],
        };
        let json = serde_json::to_value(llm.body(&request)).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["stop_sequences"], serde_json::json!(["--"]));
    }

    #[test]
    fn test_reply_parsing() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response_id":"x","text":"Do ten reps.","generation_id":"y"}"#)
                .unwrap();
        assert_eq!(reply.text, "Do ten reps.");
    }
}
