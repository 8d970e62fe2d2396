//! Quiz lifecycle: authoring, retrieval, one-shot submission and grading.

use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::error::LearnError;
use super::storage::LearnStore;
use super::types::{
    score_percentage, CreateQuizRequest, NewQuizQuestion, NewQuizResult, Quiz, QuizQuestion,
    QuizResultResponse, RevealedQuestion, SubmitQuizRequest, SubmitQuizResponse,
};

#[derive(Clone)]
pub struct QuizService {
    store: Arc<dyn LearnStore>,
}

/// Counts answers that match the question at the same position.
/// `questions` must already be in ascending `order`.
fn grade(questions: &[QuizQuestion], answers: &[i32]) -> i32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_index == **answer)
        .count() as i32
}

impl QuizService {
    pub fn new(store: Arc<dyn LearnStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        req: CreateQuizRequest,
        instructor_id: Uuid,
    ) -> Result<Quiz, LearnError> {
        req.validate()?;

        let context = self
            .store
            .get_lesson_with_course_and_quiz(req.lesson_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Lesson not found".to_string()))?;

        if context.course.instructor_id != instructor_id {
            return Err(LearnError::Forbidden(
                "You can only create quizzes for your own courses".to_string(),
            ));
        }

        if context.quiz.is_some() {
            return Err(LearnError::Conflict(
                "A quiz already exists for this lesson".to_string(),
            ));
        }

        for q in &req.questions {
            if q.correct_index as usize >= q.options.len() {
                return Err(LearnError::BadRequest(format!(
                    "Correct index {} is out of bounds for question \"{}\"",
                    q.correct_index, q.question
                )));
            }
        }

        let questions = req
            .questions
            .into_iter()
            .map(|q| NewQuizQuestion {
                question: q.question,
                options: q.options,
                correct_index: q.correct_index,
                order: q.order,
            })
            .collect();

        let quiz = self.store.create_quiz(req.lesson_id, questions).await?;
        info!(
            "Quiz {} created for lesson {} with {} questions",
            quiz.id,
            quiz.lesson_id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    pub async fn find_by_lesson(&self, lesson_id: Uuid) -> Result<Quiz, LearnError> {
        self.store
            .get_quiz_by_lesson(lesson_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Quiz not found for this lesson".to_string()))
    }

    pub async fn find_by_id(&self, quiz_id: Uuid) -> Result<Quiz, LearnError> {
        self.store
            .get_quiz_by_id(quiz_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Quiz not found".to_string()))
    }

    pub async fn submit(
        &self,
        req: SubmitQuizRequest,
        user_id: Uuid,
    ) -> Result<SubmitQuizResponse, LearnError> {
        req.validate()?;

        let quiz = self.find_by_id(req.quiz_id).await?;

        if self
            .store
            .get_quiz_result(user_id, quiz.id)
            .await?
            .is_some()
        {
            return Err(LearnError::Conflict(
                "You have already submitted this quiz".to_string(),
            ));
        }

        if req.answers.len() != quiz.questions.len() {
            return Err(LearnError::BadRequest(format!(
                "Expected {} answers, received {}",
                quiz.questions.len(),
                req.answers.len()
            )));
        }

        let score = grade(&quiz.questions, &req.answers);
        let total_questions = quiz.questions.len() as i32;

        // the store re-checks (user, quiz) uniqueness on insert
        let result = self
            .store
            .create_quiz_result(NewQuizResult {
                user_id,
                quiz_id: quiz.id,
                score,
                total_questions,
                answers: req.answers,
            })
            .await?;

        debug!(
            "User {} scored {}/{} on quiz {}",
            user_id, score, total_questions, quiz.id
        );

        Ok(SubmitQuizResponse {
            id: result.id,
            score: result.score,
            total_questions: result.total_questions,
            percentage: score_percentage(result.score, result.total_questions),
            submitted_at: result.submitted_at,
        })
    }

    pub async fn get_result(
        &self,
        quiz_id: Uuid,
        user_id: Uuid,
    ) -> Result<QuizResultResponse, LearnError> {
        let result = self
            .store
            .get_quiz_result(user_id, quiz_id)
            .await?
            .ok_or_else(|| LearnError::NotFound("Quiz result not found".to_string()))?;

        let quiz = self.find_by_id(quiz_id).await?;

        Ok(QuizResultResponse {
            id: result.id,
            score: result.score,
            total_questions: result.total_questions,
            percentage: score_percentage(result.score, result.total_questions),
            answers: result.answers,
            submitted_at: result.submitted_at,
            questions: quiz
                .questions
                .into_iter()
                .map(|q| RevealedQuestion {
                    id: q.id,
                    question: q.question,
                    options: q.options,
                    correct_index: q.correct_index,
                })
                .collect(),
        })
    }
}
