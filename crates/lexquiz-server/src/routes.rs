use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::{SecondsFormat, Utc};
use lexquiz_core::{
    db::NewUser,
    types::{ChatTurn, Feedback, LeaderboardEntry, PublicUser, Role, ScoreRecord},
};
use lexquiz_domains::{
    quiz::{all_questions, find_quiz},
    semester_catalog,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    auth::{self, AuthUser},
    error::{internal, ApiError},
    AppState,
};

const LEADERBOARD_PAGE: usize = 10;

const ENDPOINTS: &[&str] = &[
    "GET  /api/health",
    "GET  /api/questions",
    "GET  /api/quizzes",
    "GET  /api/quizzes/:id",
    "GET  /api/leaderboard",
    "GET  /api/notes",
    "POST /api/feedback",
    "POST /api/chat",
    "POST /api/submit-quiz (guest)",
    "POST /api/auth/register",
    "POST /api/auth/login",
    "GET  /api/auth/profile (protected)",
    "POST /api/auth/submit-quiz (protected)",
    "GET  /api/auth/scores (protected)",
];

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Integer prefix of a path segment: `1abc` reads as 1, `abc` as nothing.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse().ok()
}

/// Unwrap a JSON body, reporting any rejection as a validation error.
fn body_or<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|_| ApiError::Validation(message.into()))
}

/// A present, non-empty string field.
fn filled(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

// ── Request body types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct FeedbackBody {
    name: Option<String>,
    email: Option<String>,
    category: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct HistoryItem {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatBody {
    message: Option<String>,
    #[serde(default)]
    chat_history: Option<Vec<HistoryItem>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestScoreBody {
    name: Option<String>,
    quiz_id: Option<i64>,
    score: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct RegisterBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserScoreBody {
    quiz_id: Option<i64>,
    score: Option<i64>,
}

// ── Catalog ───────────────────────────────────────────────────────────────

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Law Quiz API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "features": ["Authentication", "Quiz", "Leaderboard", "User Profiles", "Legal Assistant"],
        "uptime_s": state.start_time.elapsed().as_secs(),
    }))
}

pub(crate) async fn list_questions(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(all_questions(&state.quizzes)))
}

pub(crate) async fn list_quizzes(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.quizzes))
}

pub(crate) async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    leading_int(&id)
        .and_then(|id| find_quiz(&state.quizzes, id))
        .map(|quiz| Json(json!(quiz)))
        .ok_or_else(|| ApiError::NotFound("Quiz not found".into()))
}

pub(crate) async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.db.top_entries(LEADERBOARD_PAGE)))
}

pub(crate) async fn get_notes(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<Value> {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("localhost:{}", state.config.port));
    let public_base = format!("{scheme}://{host}/public");
    Json(json!(semester_catalog(&public_base)))
}

// ── Submissions ───────────────────────────────────────────────────────────

pub(crate) async fn post_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const MISSING: &str = "All fields are required";
    let body = body_or(payload, MISSING)?;
    let (Some(name), Some(email), Some(message)) =
        (filled(body.name), filled(body.email), filled(body.message))
    else {
        return Err(ApiError::Validation(MISSING.into()));
    };

    let feedback = Feedback {
        id: Utc::now().timestamp_millis(),
        name,
        email,
        category: body.category,
        message,
        date: now_iso(),
    };
    state
        .db
        .save_feedback(&feedback)
        .map_err(|e| internal("Failed to save feedback", state.config.is_production(), e))?;

    Ok(Json(json!({ "message": "Feedback received successfully. Thank you!" })))
}

pub(crate) async fn post_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const MISSING: &str = "Message is required";
    let body = body_or(payload, MISSING)?;
    let message = filled(body.message).ok_or_else(|| ApiError::Validation(MISSING.into()))?;

    let history: Vec<ChatTurn> = body
        .chat_history
        .unwrap_or_default()
        .into_iter()
        .map(|item| ChatTurn {
            role: if item.role == "user" { Role::User } else { Role::Assistant },
            content: item.content,
        })
        .collect();

    let reply = state.chat.respond(&message, &history).await;
    info!(
        provider = reply.provider.as_str(),
        message_len = message.len(),
        history_len = history.len(),
        "chat answered"
    );

    Ok(Json(json!({
        "message": "Success",
        "response": reply.text,
        "timestamp": now_iso(),
        "provider": reply.provider,
    })))
}

pub(crate) async fn submit_guest_quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GuestScoreBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const MISSING: &str = "Missing required fields";
    let body = body_or(payload, MISSING)?;
    let (Some(name), Some(_quiz_id), Some(score)) =
        (filled(body.name), body.quiz_id.filter(|id| *id != 0), body.score)
    else {
        return Err(ApiError::Validation(MISSING.into()));
    };

    let date = today();
    let rank = state.db.submit_score(LeaderboardEntry {
        user_id: None,
        username: name.clone(),
        score,
        date: date.clone(),
    });
    info!(username = %name, score, rank, "guest score submitted");

    Ok(Json(json!({
        "message": "Score submitted successfully",
        "entry": { "rank": rank, "name": name, "score": score, "date": date },
    })))
}

// ── Auth ──────────────────────────────────────────────────────────────────

pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const MISSING: &str = "All fields are required";
    let body = body_or(payload, MISSING)?;
    let (Some(username), Some(email), Some(password)) =
        (filled(body.username), filled(body.email), filled(body.password))
    else {
        return Err(ApiError::Validation(MISSING.into()));
    };

    let production = state.config.is_production();
    let password_hash = auth::hash_password_blocking(password)
        .await
        .map_err(|e| internal("Server error", production, e))?;

    let user = state
        .db
        .insert_user(NewUser {
            username: &username,
            email: &email,
            password_hash,
            created_at: today(),
        })
        .ok_or_else(|| ApiError::Conflict("User already exists".into()))?;

    let token = auth::issue_token(&state.config.jwt_secret, &user, state.config.jwt_ttl_days)
        .map_err(|e| internal("Server error", production, e))?;
    info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration successful",
            "token": token,
            "user": PublicUser::from(&user),
        })),
    ))
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".into());
    let body = payload.map(|Json(b)| b).map_err(|_| invalid())?;
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(invalid());
    };

    let user = state.db.user_by_email(&email).ok_or_else(invalid)?;
    if !auth::verify_password_blocking(password, user.password_hash.clone()).await {
        return Err(invalid());
    }

    let token = auth::issue_token(&state.config.jwt_secret, &user, state.config.jwt_ttl_days)
        .map_err(|e| internal("Server error", state.config.is_production(), e))?;
    info!(user_id = user.id, "user logged in");

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": PublicUser::from(&user),
    })))
}

pub(crate) async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .db
        .user_by_id(claims.user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(json!({ "user": PublicUser::from(&user) })))
}

pub(crate) async fn submit_user_quiz(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<UserScoreBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const MISSING: &str = "Missing required fields";
    let body = body_or(payload, MISSING)?;
    let (Some(quiz_id), Some(score)) = (body.quiz_id.filter(|id| *id != 0), body.score) else {
        return Err(ApiError::Validation(MISSING.into()));
    };

    let user = state
        .db
        .user_by_id(claims.user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let record = ScoreRecord {
        quiz_id,
        score,
        date: today(),
    };
    let user_scores = state
        .db
        .add_user_score(user.id, record.clone())
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    let rank = state.db.submit_score(LeaderboardEntry {
        user_id: Some(user.id),
        username: user.username.clone(),
        score,
        date: record.date.clone(),
    });
    info!(user_id = user.id, quiz_id, score, rank, "user score submitted");

    Ok(Json(json!({
        "message": "Score submitted successfully",
        "score": record,
        "userScores": user_scores,
    })))
}

pub(crate) async fn get_scores(State(state): State<Arc<AppState>>, AuthUser(claims): AuthUser) -> Json<Value> {
    let scores = state
        .db
        .user_by_id(claims.user_id)
        .map(|u| u.scores)
        .unwrap_or_default();
    Json(json!({ "scores": scores }))
}

// ── Fallback ──────────────────────────────────────────────────────────────

pub(crate) async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Endpoint not found",
            "availableEndpoints": ENDPOINTS,
        })),
    )
}
