//! HTTP handlers for `/api/quiz`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::shared::state::AppState;
use crate::web::auth::{AuthenticatedUser, Role};
use crate::web::extract::ApiJson;

use super::error::LearnError;
use super::types::{
    CreateQuizRequest, QuizResponse, QuizResultResponse, SubmitQuizRequest, SubmitQuizResponse,
};

/// Create a quiz for a lesson the caller teaches
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizResponse>), LearnError> {
    user.require_role(Role::Instructor)?;
    let quiz = state.quizzes.create(req, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(quiz.into())))
}

pub async fn get_quiz_by_lesson(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<QuizResponse>, LearnError> {
    let quiz = state.quizzes.find_by_lesson(lesson_id).await?;
    Ok(Json(quiz.into()))
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<QuizResponse>, LearnError> {
    let quiz = state.quizzes.find_by_id(quiz_id).await?;
    Ok(Json(quiz.into()))
}

/// Grade and record a student's answers. One submission per quiz.
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<SubmitQuizRequest>,
) -> Result<(StatusCode, Json<SubmitQuizResponse>), LearnError> {
    user.require_role(Role::Student)?;
    let response = state.quizzes.submit(req, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_quiz_result(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<QuizResultResponse>, LearnError> {
    let result = state.quizzes.get_result(quiz_id, user.user_id).await?;
    Ok(Json(result))
}
