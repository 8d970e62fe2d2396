use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::learn::quiz::QuizService;
use crate::learn::storage::LearnStore;
use crate::llm::content::ContentService;

pub struct AppState {
    pub config: AppConfig,
    pub quizzes: QuizService,
    pub content: ContentService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn LearnStore>, content: ContentService) -> Self {
        Self {
            config,
            quizzes: QuizService::new(store),
            content,
        }
    }
}
