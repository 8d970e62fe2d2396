//! Types for the Learn module (quizzes, results, summaries)
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::error::LearnError;

pub const MIN_QUESTIONS_PER_QUIZ: usize = 1;
pub const MAX_QUESTIONS_PER_QUIZ: usize = 5;
pub const MIN_OPTIONS_PER_QUESTION: usize = 2;
pub const MAX_OPTIONS_PER_QUESTION: usize = 6;

// ============================================================================
// DOMAIN MODELS
// ============================================================================

// ----- Course / Lesson Models -----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub lesson_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A lesson joined with its owning course and its quiz, if one exists.
#[derive(Debug, Clone)]
pub struct LessonContext {
    pub lesson: Lesson,
    pub course: Course,
    pub quiz: Option<Quiz>,
}

// ----- Quiz Models -----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Always sorted by ascending `order`.
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub answers: Vec<i32>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizResult {
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub answers: Vec<i32>,
}

// ----- Summary Cache -----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryCache {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizQuestionRequest {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub lesson_id: Uuid,
    pub questions: Vec<CreateQuizQuestionRequest>,
}

impl CreateQuizRequest {
    /// Structural checks that do not need the store. The bounds check of
    /// `correct_index` against the option count is done by the service.
    pub fn validate(&self) -> Result<(), LearnError> {
        let count = self.questions.len();
        if count < MIN_QUESTIONS_PER_QUIZ {
            return Err(LearnError::BadRequest(
                "At least 1 question is required".to_string(),
            ));
        }
        if count > MAX_QUESTIONS_PER_QUIZ {
            return Err(LearnError::BadRequest(format!(
                "Maximum {MAX_QUESTIONS_PER_QUIZ} questions allowed per quiz"
            )));
        }

        let mut seen_orders = HashSet::new();
        for q in &self.questions {
            if q.question.trim().is_empty() {
                return Err(LearnError::BadRequest(
                    "Question text is required".to_string(),
                ));
            }
            if q.options.len() < MIN_OPTIONS_PER_QUESTION {
                return Err(LearnError::BadRequest(format!(
                    "At least {MIN_OPTIONS_PER_QUESTION} options are required"
                )));
            }
            if q.options.len() > MAX_OPTIONS_PER_QUESTION {
                return Err(LearnError::BadRequest(format!(
                    "Maximum {MAX_OPTIONS_PER_QUESTION} options allowed"
                )));
            }
            if q.correct_index < 0 {
                return Err(LearnError::BadRequest(
                    "Correct index must be 0 or greater".to_string(),
                ));
            }
            if q.order < 1 {
                return Err(LearnError::BadRequest(
                    "Question order must be 1 or greater".to_string(),
                ));
            }
            if !seen_orders.insert(q.order) {
                return Err(LearnError::BadRequest(format!(
                    "Duplicate question order {}",
                    q.order
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub quiz_id: Uuid,
    pub answers: Vec<i32>,
}

impl SubmitQuizRequest {
    pub fn validate(&self) -> Result<(), LearnError> {
        if self.answers.is_empty() {
            return Err(LearnError::BadRequest(
                "At least 1 answer is required".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Question as shown to quiz takers: no correct answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionResponse {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuizQuestionResponse>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            lesson_id: quiz.lesson_id,
            created_at: quiz.created_at,
            questions: quiz
                .questions
                .into_iter()
                .map(|q| QuizQuestionResponse {
                    id: q.id,
                    question: q.question,
                    options: q.options,
                    order: q.order,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub submitted_at: DateTime<Utc>,
}

/// Question with its answer key, only returned after the caller has submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevealedQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultResponse {
    pub id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub answers: Vec<i32>,
    pub submitted_at: DateTime<Utc>,
    pub questions: Vec<RevealedQuestion>,
}

/// `round(100 * score / total)`, half-up. A zero total yields 0.
pub fn score_percentage(score: i32, total: i32) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((f64::from(score) / f64::from(total)) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(order: i32, options: usize, correct_index: i32) -> CreateQuizQuestionRequest {
        CreateQuizQuestionRequest {
            question: format!("Question {order}?"),
            options: (0..options).map(|i| format!("Option {i}")).collect(),
            correct_index,
            order,
        }
    }

    #[test]
    fn test_score_percentage_rounds_half_up() {
        assert_eq!(score_percentage(2, 2), 100);
        assert_eq!(score_percentage(1, 2), 50);
        assert_eq!(score_percentage(1, 3), 33);
        assert_eq!(score_percentage(2, 3), 67);
        assert_eq!(score_percentage(1, 8), 13);
        assert_eq!(score_percentage(0, 0), 0);
    }

    #[test]
    fn test_create_request_requires_questions() {
        let req = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![],
        };
        assert!(matches!(req.validate(), Err(LearnError::BadRequest(_))));
    }

    #[test]
    fn test_create_request_limits() {
        let too_many = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: (1..=6).map(|o| question(o, 4, 0)).collect(),
        };
        assert!(too_many.validate().is_err());

        let one_option = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![question(1, 1, 0)],
        };
        assert!(one_option.validate().is_err());

        let seven_options = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![question(1, 7, 0)],
        };
        assert!(seven_options.validate().is_err());

        let negative = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![question(1, 4, -1)],
        };
        assert!(negative.validate().is_err());

        let duplicate_order = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![question(1, 4, 0), question(1, 4, 1)],
        };
        assert!(duplicate_order.validate().is_err());
    }

    #[test]
    fn test_out_of_bounds_correct_index_passes_structural_validation() {
        let req = CreateQuizRequest {
            lesson_id: Uuid::new_v4(),
            questions: vec![question(1, 2, 5)],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_submit_request_requires_answers() {
        let req = SubmitQuizRequest {
            quiz_id: Uuid::new_v4(),
            answers: vec![],
        };
        assert!(req.validate().is_err());

        let req = SubmitQuizRequest {
            quiz_id: Uuid::new_v4(),
            answers: vec![-1],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_quiz_response_hides_correct_index() {
        let quiz_id = Uuid::new_v4();
        let quiz = Quiz {
            id: quiz_id,
            lesson_id: Uuid::new_v4(),
            created_at: Utc::now(),
            questions: vec![QuizQuestion {
                id: Uuid::new_v4(),
                quiz_id,
                question: "Q?".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                correct_index: 1,
                order: 1,
            }],
        };
        let json = serde_json::to_value(QuizResponse::from(quiz)).unwrap();
        assert!(json["questions"][0].get("correctIndex").is_none());
        assert_eq!(json["questions"][0]["order"], 1);
        assert!(json.get("lessonId").is_some());
    }
}
