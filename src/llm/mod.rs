use async_trait::async_trait;
use serde_json::Value;

pub mod content;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod templates;

pub use content::ContentService;
pub use generator::{ContentGenerator, LlmContentGenerator};
pub use handlers::configure_ai_routes;

pub type LlmError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(&self, prompt: &str, config: &Value) -> Result<String, LlmError>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (OpenAI, llama.cpp server, LocalAI, GPT4All API server).
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: Option<String>, base_url: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    async fn generate(&self, prompt: &str, config: &Value) -> Result<String, LlmError> {
        let max_tokens = config
            .get("max_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(1000);

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
                "max_tokens": max_tokens
            }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let result: Value = response.json().await?;
        let content = result["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("completion response has no message content")?;

        Ok(content.to_string())
    }
}
