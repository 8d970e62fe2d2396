//! Persistence boundary for the Learn module.
//!
//! Services only talk to storage through [`LearnStore`]. Implementations must
//! reject duplicate writes for the unique keys (quiz per lesson, result per
//! user and quiz, summary per lesson) with [`LearnError::Conflict`], so that
//! two racing requests never both succeed.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::LearnError;
use super::types::{
    Lesson, LessonContext, NewQuizQuestion, NewQuizResult, Quiz, QuizResult, SummaryCache,
};

#[async_trait]
pub trait LearnStore: Send + Sync {
    async fn get_lesson(&self, lesson_id: Uuid) -> Result<Option<Lesson>, LearnError>;

    async fn get_lesson_with_course_and_quiz(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<LessonContext>, LearnError>;

    async fn get_lesson_with_summary_cache(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<(Lesson, Option<SummaryCache>)>, LearnError>;

    async fn create_summary_cache(
        &self,
        lesson_id: Uuid,
        summary: &str,
    ) -> Result<SummaryCache, LearnError>;

    /// Returns the number of rows removed.
    async fn delete_summary_cache(&self, lesson_id: Uuid) -> Result<usize, LearnError>;

    /// Creates the quiz and all of its questions atomically.
    async fn create_quiz(
        &self,
        lesson_id: Uuid,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<Quiz, LearnError>;

    async fn get_quiz_by_lesson(&self, lesson_id: Uuid) -> Result<Option<Quiz>, LearnError>;

    async fn get_quiz_by_id(&self, quiz_id: Uuid) -> Result<Option<Quiz>, LearnError>;

    async fn get_quiz_result(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
    ) -> Result<Option<QuizResult>, LearnError>;

    async fn create_quiz_result(&self, result: NewQuizResult) -> Result<QuizResult, LearnError>;
}

// ----- Column codecs -----

pub fn encode_options(options: &[String]) -> Result<String, LearnError> {
    serde_json::to_string(options).map_err(|e| LearnError::Internal(e.to_string()))
}

pub fn decode_options(raw: &str) -> Result<Vec<String>, LearnError> {
    serde_json::from_str(raw)
        .map_err(|e| LearnError::Database(format!("Corrupt options column: {e}")))
}

pub fn encode_answers(answers: &[i32]) -> Result<String, LearnError> {
    serde_json::to_string(answers).map_err(|e| LearnError::Internal(e.to_string()))
}

pub fn decode_answers(raw: &str) -> Result<Vec<i32>, LearnError> {
    serde_json::from_str(raw)
        .map_err(|e| LearnError::Database(format!("Corrupt answers column: {e}")))
}
