use std::sync::Arc;

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lexquiz_core::types::User;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

// ── Passwords ─────────────────────────────────────────────────────────────

pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

/// False for a wrong password and for a hash that does not parse.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// Hash on the blocking pool; argon2 is CPU-bound.
pub async fn hash_password_blocking(plain: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain)).await?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .unwrap_or(false)
}

// ── Tokens ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(secret: &str, user: &User, ttl_days: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

// ── Extractor ─────────────────────────────────────────────────────────────

/// Claims of a request carrying a valid `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(' ').nth(1))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Access token required".into()))?;

        match verify_token(&state.config.jwt_secret, token) {
            Ok(claims) => Ok(Self(claims)),
            Err(e) => {
                tracing::debug!("rejected bearer token: {e}");
                Err(ApiError::Forbidden("Invalid token".into()))
            },
        }
    }
}
