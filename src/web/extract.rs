use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::learn::error::LearnError;

/// `Json` whose rejections render like every other API error (400 with
/// `{"error": ...}`) instead of axum's plain-text 4xx.
#[derive(Debug, Clone, Default)]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for LearnError {
    fn from(rejection: JsonRejection) -> Self {
        LearnError::BadRequest(rejection.body_text())
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = LearnError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
