//! Diesel/Postgres implementation of [`LearnStore`].
//!
//! Diesel is synchronous, so every call borrows a pooled connection inside
//! `spawn_blocking`. Uniqueness is enforced by the table constraints declared
//! in `migrations/`; unique violations come back as `LearnError::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::core::shared::schema::learn::{
    learn_courses, learn_lessons, learn_quiz_questions, learn_quiz_results, learn_quizzes,
    learn_summary_cache,
};
use crate::core::shared::utils::DbPool;

use super::error::LearnError;
use super::storage::{decode_answers, decode_options, encode_answers, encode_options, LearnStore};
use super::types::{
    Course, Lesson, LessonContext, NewQuizQuestion, NewQuizResult, Quiz, QuizQuestion,
    QuizResult, SummaryCache,
};

impl From<DieselError> for LearnError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                LearnError::Conflict(info.message().to_string())
            }
            other => LearnError::Database(other.to_string()),
        }
    }
}

// ----- Row types -----

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_courses)]
pub struct DbCourse {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_lessons)]
pub struct DbLesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub lesson_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_quizzes)]
pub struct DbQuiz {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_quiz_questions)]
pub struct DbQuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: String,
    pub correct_index: i32,
    pub question_order: i32,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_quiz_results)]
pub struct DbQuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub answers: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = learn_summary_cache)]
pub struct DbSummaryCache {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbCourse> for Course {
    fn from(row: DbCourse) -> Self {
        Self {
            id: row.id,
            instructor_id: row.instructor_id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

impl From<DbLesson> for Lesson {
    fn from(row: DbLesson) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            content: row.content,
            lesson_order: row.lesson_order,
            created_at: row.created_at,
        }
    }
}

impl From<DbSummaryCache> for SummaryCache {
    fn from(row: DbSummaryCache) -> Self {
        Self {
            id: row.id,
            lesson_id: row.lesson_id,
            summary: row.summary,
            created_at: row.created_at,
        }
    }
}

fn db_question_to_question(row: DbQuizQuestion) -> Result<QuizQuestion, LearnError> {
    Ok(QuizQuestion {
        id: row.id,
        quiz_id: row.quiz_id,
        question: row.question,
        options: decode_options(&row.options)?,
        correct_index: row.correct_index,
        order: row.question_order,
    })
}

fn db_result_to_result(row: DbQuizResult) -> Result<QuizResult, LearnError> {
    Ok(QuizResult {
        id: row.id,
        user_id: row.user_id,
        quiz_id: row.quiz_id,
        score: row.score,
        total_questions: row.total_questions,
        answers: decode_answers(&row.answers)?,
        submitted_at: row.submitted_at,
    })
}

fn load_quiz(conn: &mut PgConnection, quiz: DbQuiz) -> Result<Quiz, LearnError> {
    let rows: Vec<DbQuizQuestion> = learn_quiz_questions::table
        .filter(learn_quiz_questions::quiz_id.eq(quiz.id))
        .order(learn_quiz_questions::question_order.asc())
        .load(conn)?;

    let questions = rows
        .into_iter()
        .map(db_question_to_question)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz {
        id: quiz.id,
        lesson_id: quiz.lesson_id,
        created_at: quiz.created_at,
        questions,
    })
}

fn find_quiz_by_lesson(conn: &mut PgConnection, lesson_id: Uuid) -> Result<Option<Quiz>, LearnError> {
    let row: Option<DbQuiz> = learn_quizzes::table
        .filter(learn_quizzes::lesson_id.eq(lesson_id))
        .first(conn)
        .optional()?;
    row.map(|q| load_quiz(conn, q)).transpose()
}

fn rename_conflict(e: LearnError, message: &str) -> LearnError {
    match e {
        LearnError::Conflict(_) => LearnError::Conflict(message.to_string()),
        other => other,
    }
}

// ----- Store -----

#[derive(Clone)]
pub struct PgLearnStore {
    pool: DbPool,
}

impl PgLearnStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, f: F) -> Result<T, LearnError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, LearnError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| LearnError::Database(e.to_string()))?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl LearnStore for PgLearnStore {
    async fn get_lesson(&self, lesson_id: Uuid) -> Result<Option<Lesson>, LearnError> {
        self.run(move |conn| {
            let row: Option<DbLesson> = learn_lessons::table
                .filter(learn_lessons::id.eq(lesson_id))
                .first(conn)
                .optional()?;
            Ok(row.map(Lesson::from))
        })
        .await
    }

    async fn get_lesson_with_course_and_quiz(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<LessonContext>, LearnError> {
        self.run(move |conn| {
            let row: Option<(DbLesson, DbCourse)> = learn_lessons::table
                .inner_join(learn_courses::table)
                .filter(learn_lessons::id.eq(lesson_id))
                .first(conn)
                .optional()?;

            let Some((lesson, course)) = row else {
                return Ok(None);
            };
            let quiz = find_quiz_by_lesson(conn, lesson_id)?;

            Ok(Some(LessonContext {
                lesson: lesson.into(),
                course: course.into(),
                quiz,
            }))
        })
        .await
    }

    async fn get_lesson_with_summary_cache(
        &self,
        lesson_id: Uuid,
    ) -> Result<Option<(Lesson, Option<SummaryCache>)>, LearnError> {
        self.run(move |conn| {
            let row: Option<(DbLesson, Option<DbSummaryCache>)> = learn_lessons::table
                .left_join(learn_summary_cache::table)
                .filter(learn_lessons::id.eq(lesson_id))
                .first(conn)
                .optional()?;
            Ok(row.map(|(lesson, cache)| (lesson.into(), cache.map(SummaryCache::from))))
        })
        .await
    }

    async fn create_summary_cache(
        &self,
        lesson_id: Uuid,
        summary: &str,
    ) -> Result<SummaryCache, LearnError> {
        let row = DbSummaryCache {
            id: Uuid::new_v4(),
            lesson_id,
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        self.run(move |conn| {
            diesel::insert_into(learn_summary_cache::table)
                .values(&row)
                .execute(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn delete_summary_cache(&self, lesson_id: Uuid) -> Result<usize, LearnError> {
        self.run(move |conn| {
            let deleted = diesel::delete(
                learn_summary_cache::table.filter(learn_summary_cache::lesson_id.eq(lesson_id)),
            )
            .execute(conn)?;
            Ok(deleted)
        })
        .await
    }

    async fn create_quiz(
        &self,
        lesson_id: Uuid,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<Quiz, LearnError> {
        let quiz_row = DbQuiz {
            id: Uuid::new_v4(),
            lesson_id,
            created_at: Utc::now(),
        };
        let question_rows = questions
            .into_iter()
            .map(|q| {
                Ok(DbQuizQuestion {
                    id: Uuid::new_v4(),
                    quiz_id: quiz_row.id,
                    question: q.question,
                    options: encode_options(&q.options)?,
                    correct_index: q.correct_index,
                    question_order: q.order,
                })
            })
            .collect::<Result<Vec<_>, LearnError>>()?;

        self.run(move |conn| {
            conn.transaction::<_, LearnError, _>(|conn| {
                diesel::insert_into(learn_quizzes::table)
                    .values(&quiz_row)
                    .execute(conn)
                    .map_err(|e| {
                        rename_conflict(e.into(), "A quiz already exists for this lesson")
                    })?;
                diesel::insert_into(learn_quiz_questions::table)
                    .values(&question_rows)
                    .execute(conn)?;
                load_quiz(conn, quiz_row)
            })
        })
        .await
    }

    async fn get_quiz_by_lesson(&self, lesson_id: Uuid) -> Result<Option<Quiz>, LearnError> {
        self.run(move |conn| find_quiz_by_lesson(conn, lesson_id)).await
    }

    async fn get_quiz_by_id(&self, quiz_id: Uuid) -> Result<Option<Quiz>, LearnError> {
        self.run(move |conn| {
            let row: Option<DbQuiz> = learn_quizzes::table
                .filter(learn_quizzes::id.eq(quiz_id))
                .first(conn)
                .optional()?;
            row.map(|q| load_quiz(conn, q)).transpose()
        })
        .await
    }

    async fn get_quiz_result(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
    ) -> Result<Option<QuizResult>, LearnError> {
        self.run(move |conn| {
            let row: Option<DbQuizResult> = learn_quiz_results::table
                .filter(learn_quiz_results::user_id.eq(user_id))
                .filter(learn_quiz_results::quiz_id.eq(quiz_id))
                .first(conn)
                .optional()?;
            row.map(db_result_to_result).transpose()
        })
        .await
    }

    async fn create_quiz_result(&self, result: NewQuizResult) -> Result<QuizResult, LearnError> {
        let row = DbQuizResult {
            id: Uuid::new_v4(),
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            score: result.score,
            total_questions: result.total_questions,
            answers: encode_answers(&result.answers)?,
            submitted_at: Utc::now(),
        };
        self.run(move |conn| {
            diesel::insert_into(learn_quiz_results::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| rename_conflict(e.into(), "You have already submitted this quiz"))?;
            db_result_to_result(row)
        })
        .await
    }
}
