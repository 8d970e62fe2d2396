mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use learnserver::api_router::build_router;
use learnserver::core::config::AppConfig;
use learnserver::core::shared::state::AppState;
use learnserver::llm::ContentService;
use learnserver::web::auth::{Claims, Role};

use common::{seeded_store, Seeded};

const SECRET: &str = "test-secret";

fn app(seeded: &Seeded) -> Router {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = SECRET.to_string();
    let store = Arc::new(seeded.store.clone());
    let content = ContentService::new(store.clone(), None);
    build_router(Arc::new(AppState::new(config, store, content)))
}

fn token(user_id: Uuid, role: Role) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn quiz_body(lesson_id: Uuid) -> Value {
    json!({
        "lessonId": lesson_id,
        "questions": [
            {"question": "Second?", "options": ["a", "b", "c"], "correctIndex": 2, "order": 2},
            {"question": "First?", "options": ["a", "b"], "correctIndex": 0, "order": 1}
        ]
    })
}

#[tokio::test]
async fn test_requests_without_valid_token_are_unauthorized() {
    let seeded = seeded_store().await;
    let app = app(&seeded);

    let (status, body) = send(&app, Method::GET, "/api/ai/status", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/ai/status", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_quiz_lifecycle_over_http() {
    let seeded = seeded_store().await;
    let app = app(&seeded);
    let instructor = token(seeded.instructor_id, Role::Instructor);
    let student = token(Uuid::new_v4(), Role::Student);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quiz",
        Some(&student),
        Some(quiz_body(seeded.lesson_id)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/quiz",
        Some(&instructor),
        Some(quiz_body(seeded.lesson_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["questions"][0]["question"], "First?");
    assert!(created["questions"][0].get("correctIndex").is_none());
    let quiz_id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quiz",
        Some(&instructor),
        Some(quiz_body(seeded.lesson_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, by_lesson) = send(
        &app,
        Method::GET,
        &format!("/api/quiz/lesson/{}", seeded.lesson_id),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_lesson["id"], quiz_id.as_str());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quiz/submit",
        Some(&instructor),
        Some(json!({"quizId": quiz_id, "answers": [0, 2]})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quiz/submit",
        Some(&student),
        Some(json!({"quizId": quiz_id, "answers": [0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, submitted) = send(
        &app,
        Method::POST,
        "/api/quiz/submit",
        Some(&student),
        Some(json!({"quizId": quiz_id, "answers": [0, 1]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["score"], 1);
    assert_eq!(submitted["totalQuestions"], 2);
    assert_eq!(submitted["percentage"], 50);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quiz/submit",
        Some(&student),
        Some(json!({"quizId": quiz_id, "answers": [0, 2]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, result) = send(
        &app,
        Method::GET,
        &format!("/api/quiz/{quiz_id}/result"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["answers"], json!([0, 1]));
    assert_eq!(result["questions"][1]["correctIndex"], 2);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/quiz/{quiz_id}/result"),
        Some(&instructor),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ai_routes_use_template_fallback() {
    let seeded = seeded_store().await;
    let app = app(&seeded);
    let instructor = token(seeded.instructor_id, Role::Instructor);
    let student = token(Uuid::new_v4(), Role::Student);

    let (status, body) = send(&app, Method::GET, "/api/ai/status", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"available": false, "fallbackEnabled": true, "message": "Using template-based fallback"})
    );

    let request = json!({"lessonId": seeded.lesson_id});
    let (status, summary) = send(
        &app,
        Method::POST,
        "/api/ai/summarize",
        Some(&student),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["lessonId"], seeded.lesson_id.to_string());
    assert_eq!(summary["cached"], false);
    assert_eq!(summary["generated"], false);

    let (_, again) = send(
        &app,
        Method::POST,
        "/api/ai/summarize",
        Some(&student),
        Some(request.clone()),
    )
    .await;
    assert_eq!(again["cached"], true);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ai/generate-quiz",
        Some(&student),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, quiz) = send(
        &app,
        Method::POST,
        "/api/ai/generate-quiz",
        Some(&instructor),
        Some(request),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quiz["generated"], false);
    assert_eq!(quiz["questions"].as_array().unwrap().len(), 5);
    assert_eq!(quiz["questions"][0]["correctIndex"], 0);

    let uri = format!("/api/ai/summarize/{}", seeded.lesson_id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&instructor), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, missing) = send(
        &app,
        Method::POST,
        "/api/ai/summarize",
        Some(&student),
        Some(json!({"lessonId": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "Lesson not found");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let seeded = seeded_store().await;
    let app = app(&seeded);
    let instructor = token(seeded.instructor_id, Role::Instructor);
    let student = token(Uuid::new_v4(), Role::Student);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/quiz",
        Some(&instructor),
        Some(quiz_body(seeded.lesson_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quiz/submit",
        Some(&student),
        Some(json!({"quizId": created["id"], "answers": [1.5, 0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/summarize",
        Some(&student),
        Some(json!({"lessonId": "not-a-uuid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/generate-quiz",
        Some(&instructor),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
