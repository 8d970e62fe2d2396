//! Bearer-token identity for the learn API.
//!
//! Tokens are issued elsewhere; this side only verifies them (HS256 with the
//! shared `auth.jwt_secret`) and exposes who is calling and in which role.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::shared::state::AppState;
use crate::learn::error::LearnError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Instructor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Instructor => write!(f, "instructor"),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: Role,
    pub exp: i64,
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, LearnError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| LearnError::Unauthorized(format!("Invalid token: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn require_role(&self, role: Role) -> Result<(), LearnError> {
        if self.role == role {
            Ok(())
        } else {
            Err(LearnError::Forbidden(format!(
                "This action requires the {role} role"
            )))
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = LearnError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| LearnError::Unauthorized("No authentication token".to_string()))?;

        let claims = decode_claims(token, &state.config.auth.jwt_secret)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| LearnError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}
