//! # Learn Module - quizzes for lessons
//!
//! - Instructors attach one multiple-choice quiz to each lesson they teach
//! - Students submit answers exactly once and are graded immediately
//! - Results reveal the answer key only to the student who submitted
//!
//! ## Architecture
//!
//! - [`QuizService`] holds the lifecycle rules
//! - [`LearnStore`] is the persistence boundary, with an in-memory store and
//!   a diesel/Postgres store behind the `postgres` feature
//! - Axum handlers in [`handlers`] are a thin transport over the service

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::shared::state::AppState;

pub mod error;
pub mod handlers;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod quiz;
pub mod storage;
pub mod types;

pub use error::LearnError;
pub use memory::InMemoryLearnStore;
#[cfg(feature = "postgres")]
pub use postgres::PgLearnStore;
pub use quiz::QuizService;
pub use storage::LearnStore;

/// Configure all quiz routes
pub fn configure_learn_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quiz", post(handlers::create_quiz))
        .route("/api/quiz/submit", post(handlers::submit_quiz))
        .route("/api/quiz/lesson/:lesson_id", get(handlers::get_quiz_by_lesson))
        .route("/api/quiz/:id", get(handlers::get_quiz))
        .route("/api/quiz/:id/result", get(handlers::get_quiz_result))
}

pub fn configure(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    router.merge(configure_learn_routes())
}
