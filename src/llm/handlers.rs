//! HTTP handlers for `/api/ai`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::shared::state::AppState;
use crate::learn::error::LearnError;
use crate::web::auth::{AuthenticatedUser, Role};
use crate::web::extract::ApiJson;

use super::content::{GeneratedQuizResponse, GenerationStatus, SummaryResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub lesson_id: Uuid,
}

/// Echoes the requested lesson next to the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForLesson<T> {
    pub lesson_id: Uuid,
    #[serde(flatten)]
    pub body: T,
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
) -> Json<GenerationStatus> {
    Json(state.content.status())
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    ApiJson(req): ApiJson<LessonRequest>,
) -> Result<Json<ForLesson<SummaryResponse>>, LearnError> {
    let body = state.content.summarize(req.lesson_id).await?;
    Ok(Json(ForLesson {
        lesson_id: req.lesson_id,
        body,
    }))
}

pub async fn clear_summary(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(lesson_id): Path<Uuid>,
) -> Result<StatusCode, LearnError> {
    user.require_role(Role::Instructor)?;
    state.content.clear_summary_cache(lesson_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<LessonRequest>,
) -> Result<Json<ForLesson<GeneratedQuizResponse>>, LearnError> {
    user.require_role(Role::Instructor)?;
    let body = state.content.generate_quiz_questions(req.lesson_id).await?;
    Ok(Json(ForLesson {
        lesson_id: req.lesson_id,
        body,
    }))
}

pub fn configure_ai_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/status", get(get_status))
        .route("/api/ai/summarize", post(summarize))
        .route("/api/ai/summarize/:lesson_id", delete(clear_summary))
        .route("/api/ai/generate-quiz", post(generate_quiz))
}
