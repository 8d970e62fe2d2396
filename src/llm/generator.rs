use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::parser::parse_ai_quiz_response;
use super::templates::quiz::{GeneratedQuestion, QUESTIONS_PER_QUIZ};
use super::{LLMProvider, LlmError};

/// Optional external content generator. Any error makes the caller fall back
/// to the deterministic templates.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Readiness check run once by `ContentService::initialize`.
    async fn probe(&self) -> Result<(), LlmError>;

    async fn try_generate_summary(&self, content: &str) -> Result<String, LlmError>;

    async fn try_generate_quiz(
        &self,
        content: &str,
        lesson_title: &str,
    ) -> Result<Vec<GeneratedQuestion>, LlmError>;
}

/// Generator backed by an [`LLMProvider`].
pub struct LlmContentGenerator {
    provider: Arc<dyn LLMProvider>,
}

impl LlmContentGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following lesson as a short list of key points in Markdown. \
         Start with the heading \"## Key Points\" and use \"• \" for bullets.\n\n{content}"
    )
}

fn quiz_prompt(content: &str, lesson_title: &str) -> String {
    format!(
        "Write {QUESTIONS_PER_QUIZ} multiple-choice questions about the lesson \"{lesson_title}\". \
         Answer only with a JSON array of objects with the fields \"question\" (string), \
         \"options\" (array of 4 strings) and \"correctIndex\" (0-based integer).\n\n{content}"
    )
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn probe(&self) -> Result<(), LlmError> {
        self.provider
            .generate("Reply with OK.", &json!({ "max_tokens": 5 }))
            .await
            .map(|_| ())
    }

    async fn try_generate_summary(&self, content: &str) -> Result<String, LlmError> {
        let summary = self
            .provider
            .generate(&summary_prompt(content), &json!({ "max_tokens": 600 }))
            .await?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err("model returned an empty summary".into());
        }
        Ok(summary.to_string())
    }

    async fn try_generate_quiz(
        &self,
        content: &str,
        lesson_title: &str,
    ) -> Result<Vec<GeneratedQuestion>, LlmError> {
        let raw = self
            .provider
            .generate(&quiz_prompt(content, lesson_title), &json!({ "max_tokens": 1200 }))
            .await?;
        let questions = parse_ai_quiz_response(raw.trim());
        if questions.is_empty() {
            return Err("model output contained no questions".into());
        }
        Ok(questions)
    }
}
