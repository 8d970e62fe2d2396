//! Lesson summaries and quiz suggestions.
//!
//! An external [`ContentGenerator`] is used only after [`ContentService::initialize`]
//! has confirmed it is reachable. Every generator failure degrades silently to
//! the templates; callers only see it as `generated: false`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::learn::error::LearnError;
use crate::learn::storage::LearnStore;

use super::generator::ContentGenerator;
use super::templates::{generate_template_quiz, generate_template_summary, GeneratedQuestion};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub cached: bool,
    pub generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuizResponse {
    pub questions: Vec<GeneratedQuestion>,
    pub generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    pub available: bool,
    pub fallback_enabled: bool,
    pub message: String,
}

pub struct ContentService {
    store: Arc<dyn LearnStore>,
    generator: Option<Arc<dyn ContentGenerator>>,
    ready: OnceCell<bool>,
}

impl ContentService {
    pub fn new(store: Arc<dyn LearnStore>, generator: Option<Arc<dyn ContentGenerator>>) -> Self {
        Self {
            store,
            generator,
            ready: OnceCell::new(),
        }
    }

    /// Probes the external generator once. Later calls return the first answer.
    pub async fn initialize(&self) -> bool {
        *self
            .ready
            .get_or_init(|| async {
                let Some(generator) = &self.generator else {
                    info!("No content generator configured, using template-based fallback");
                    return false;
                };
                match generator.probe().await {
                    Ok(()) => {
                        info!("Content generator is available");
                        true
                    }
                    Err(e) => {
                        warn!("Content generator probe failed, using template fallback: {}", e);
                        false
                    }
                }
            })
            .await
    }

    pub fn is_available(&self) -> bool {
        self.ready.get().copied().unwrap_or(false)
    }

    pub fn status(&self) -> GenerationStatus {
        let available = self.is_available();
        GenerationStatus {
            available,
            fallback_enabled: true,
            message: if available {
                "AI service is available".to_string()
            } else {
                "Using template-based fallback".to_string()
            },
        }
    }

    fn active_generator(&self) -> Option<&Arc<dyn ContentGenerator>> {
        if self.is_available() {
            self.generator.as_ref()
        } else {
            None
        }
    }

    pub async fn summarize(&self, lesson_id: Uuid) -> Result<SummaryResponse, LearnError> {
        let (lesson, cache) = self
            .store
            .get_lesson_with_summary_cache(lesson_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Lesson not found".to_string()))?;

        if let Some(cache) = cache {
            return Ok(SummaryResponse {
                summary: cache.summary,
                cached: true,
                generated: false,
            });
        }

        let (summary, generated) = match self.active_generator() {
            Some(generator) => match generator.try_generate_summary(&lesson.content).await {
                Ok(summary) => (summary, true),
                Err(e) => {
                    warn!("AI summary generation failed, using template: {}", e);
                    (generate_template_summary(&lesson.content), false)
                }
            },
            None => (generate_template_summary(&lesson.content), false),
        };

        match self.store.create_summary_cache(lesson_id, &summary).await {
            Ok(_) => {}
            // a concurrent first request cached it already
            Err(LearnError::Conflict(msg)) => {
                debug!("Summary for lesson {} already cached: {}", lesson_id, msg);
            }
            Err(e) => return Err(e),
        }

        Ok(SummaryResponse {
            summary,
            cached: false,
            generated,
        })
    }

    pub async fn generate_quiz_questions(
        &self,
        lesson_id: Uuid,
    ) -> Result<GeneratedQuizResponse, LearnError> {
        let lesson = self
            .store
            .get_lesson(lesson_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Lesson not found".to_string()))?;

        let (questions, generated) = match self.active_generator() {
            Some(generator) => match generator
                .try_generate_quiz(&lesson.content, &lesson.title)
                .await
            {
                Ok(questions) => (questions, true),
                Err(e) => {
                    warn!("AI quiz generation failed, using template: {}", e);
                    (generate_template_quiz(&lesson.content, &lesson.title), false)
                }
            },
            None => (generate_template_quiz(&lesson.content, &lesson.title), false),
        };

        Ok(GeneratedQuizResponse {
            questions,
            generated,
        })
    }

    pub async fn clear_summary_cache(&self, lesson_id: Uuid) -> Result<(), LearnError> {
        let removed = self.store.delete_summary_cache(lesson_id).await?;
        debug!("Cleared {} cached summaries for lesson {}", removed, lesson_id);
        Ok(())
    }
}
