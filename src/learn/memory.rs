use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::LearnError;
use super::storage::LearnStore;
use super::types::{
    Course, Lesson, LessonContext, NewQuizQuestion, NewQuizResult, Quiz, QuizQuestion,
    QuizResult, SummaryCache,
};

#[derive(Debug, Default)]
struct Tables {
    courses: HashMap<Uuid, Course>,
    lessons: HashMap<Uuid, Lesson>,
    quizzes: HashMap<Uuid, Quiz>,
    quiz_by_lesson: HashMap<Uuid, Uuid>,
    results: HashMap<(Uuid, Uuid), QuizResult>,
    summaries: HashMap<Uuid, SummaryCache>,
}

/// Process-local store. Every write takes the table lock, so the unique-key
/// checks below are race free.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLearnStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryLearnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_course(&self, course: Course) {
        let mut tables = self.tables.write().await;
        tables.courses.insert(course.id, course);
    }

    pub async fn insert_lesson(&self, lesson: Lesson) {
        let mut tables = self.tables.write().await;
        tables.lessons.insert(lesson.id, lesson);
    }

    pub async fn result_count(&self) -> usize {
        self.tables.read().await.results.len()
    }

    pub async fn quiz_count(&self) -> usize {
        self.tables.read().await.quizzes.len()
    }
}

#[async_trait]
impl LearnStore for InMemoryLearnStore {
    async fn get_lesson(&self, lesson_id: Uuid) -> Result<Option<Lesson>, LearnError> {
        let tables = self.tables.read().await;
        Ok(tables.lessons.get(&lesson_id).cloned())
    }

    async fn get_lesson_with_course_and_quiz(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<LessonContext>, LearnError> {
        let tables = self.tables.read().await;
        let Some(lesson) = tables.lessons.get(&lesson_id) else {
            return Ok(None);
        };
        let course = tables.courses.get(&lesson.course_id).cloned().ok_or_else(|| {
            LearnError::Database(format!("Lesson {lesson_id} references a missing course"))
        })?;
        let quiz = tables
            .quiz_by_lesson
            .get(&lesson_id)
            .and_then(|quiz_id| tables.quizzes.get(quiz_id))
            .cloned();

        Ok(Some(LessonContext {
            lesson: lesson.clone(),
            course,
            quiz,
        }))
    }

    async fn get_lesson_with_summary_cache(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<(Lesson, Option<SummaryCache>)>, LearnError> {
        let tables = self.tables.read().await;
        Ok(tables.lessons.get(&lesson_id).map(|lesson| {
            (lesson.clone(), tables.summaries.get(&lesson_id).cloned())
        }))
    }

    async fn create_summary_cache(
        &self,
        lesson_id: Uuid,
        summary: &str,
    ) -> Result<SummaryCache, LearnError> {
        let mut tables = self.tables.write().await;
        if tables.summaries.contains_key(&lesson_id) {
            return Err(LearnError::Conflict(format!(
                "Summary already cached for lesson {lesson_id}"
            )));
        }
        let entry = SummaryCache {
            id: Uuid::new_v4(),
            lesson_id,
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        tables.summaries.insert(lesson_id, entry.clone());
        Ok(entry)
    }

    async fn delete_summary_cache(&self, lesson_id: Uuid) -> Result<usize, LearnError> {
        let mut tables = self.tables.write().await;
        Ok(usize::from(tables.summaries.remove(&lesson_id).is_some()))
    }

    async fn create_quiz(
        &self,
        lesson_id: Uuid,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<Quiz, LearnError> {
        let mut tables = self.tables.write().await;
        if tables.quiz_by_lesson.contains_key(&lesson_id) {
            return Err(LearnError::Conflict(
                "A quiz already exists for this lesson".to_string(),
            ));
        }

        let quiz_id = Uuid::new_v4();
        let mut questions: Vec<QuizQuestion> = questions
            .into_iter()
            .map(|q| QuizQuestion {
                id: Uuid::new_v4(),
                quiz_id,
                question: q.question,
                options: q.options,
                correct_index: q.correct_index,
                order: q.order,
            })
            .collect();
        questions.sort_by_key(|q| q.order);

        let quiz = Quiz {
            id: quiz_id,
            lesson_id,
            created_at: Utc::now(),
            questions,
        };
        tables.quiz_by_lesson.insert(lesson_id, quiz_id);
        tables.quizzes.insert(quiz_id, quiz.clone());
        Ok(quiz)
    }

    async fn get_quiz_by_lesson(&self, lesson_id: Uuid) -> Result<Option<Quiz>, LearnError> {
        let tables = self.tables.read().await;
        Ok(tables
            .quiz_by_lesson
            .get(&lesson_id)
            .and_then(|quiz_id| tables.quizzes.get(quiz_id))
            .cloned())
    }

    async fn get_quiz_by_id(&self, quiz_id: Uuid) -> Result<Option<Quiz>, LearnError> {
        let tables = self.tables.read().await;
        Ok(tables.quizzes.get(&quiz_id).cloned())
    }

    async fn get_quiz_result(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
    ) -> Result<Option<QuizResult>, LearnError> {
        let tables = self.tables.read().await;
        Ok(tables.results.get(&(user_id, quiz_id)).cloned())
    }

    async fn create_quiz_result(&self, result: NewQuizResult) -> Result<QuizResult, LearnError> {
        let mut tables = self.tables.write().await;
        let key = (result.user_id, result.quiz_id);
        if tables.results.contains_key(&key) {
            return Err(LearnError::Conflict(
                "You have already submitted this quiz".to_string(),
            ));
        }
        let stored = QuizResult {
            id: Uuid::new_v4(),
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            score: result.score,
            total_questions: result.total_questions,
            answers: result.answers,
            submitted_at: Utc::now(),
        };
        tables.results.insert(key, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(order: i32) -> NewQuizQuestion {
        NewQuizQuestion {
            question: format!("Q{order}"),
            options: vec!["A".into(), "B".into()],
            correct_index: 0,
            order,
        }
    }

    #[tokio::test]
    async fn test_create_quiz_sorts_questions_and_rejects_duplicates() {
        let store = InMemoryLearnStore::new();
        let lesson_id = Uuid::new_v4();

        let quiz = store
            .create_quiz(lesson_id, vec![new_question(3), new_question(1), new_question(2)])
            .await
            .unwrap();
        let orders: Vec<i32> = quiz.questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let second = store.create_quiz(lesson_id, vec![new_question(1)]).await;
        assert!(matches!(second, Err(LearnError::Conflict(_))));
        assert_eq!(store.quiz_count().await, 1);
    }

    #[tokio::test]
    async fn test_result_unique_per_user_and_quiz() {
        let store = InMemoryLearnStore::new();
        let user_id = Uuid::new_v4();
        let quiz_id = Uuid::new_v4();
        let new_result = NewQuizResult {
            user_id,
            quiz_id,
            score: 1,
            total_questions: 1,
            answers: vec![0],
        };

        store.create_quiz_result(new_result.clone()).await.unwrap();
        let dup = store.create_quiz_result(new_result.clone()).await;
        assert!(matches!(dup, Err(LearnError::Conflict(_))));

        let other_user = NewQuizResult {
            user_id: Uuid::new_v4(),
            ..new_result
        };
        assert!(store.create_quiz_result(other_user).await.is_ok());
        assert_eq!(store.result_count().await, 2);
    }

    #[tokio::test]
    async fn test_delete_summary_cache_is_idempotent() {
        let store = InMemoryLearnStore::new();
        let lesson_id = Uuid::new_v4();
        store.create_summary_cache(lesson_id, "text").await.unwrap();

        assert_eq!(store.delete_summary_cache(lesson_id).await.unwrap(), 1);
        assert_eq!(store.delete_summary_cache(lesson_id).await.unwrap(), 0);
    }
}
