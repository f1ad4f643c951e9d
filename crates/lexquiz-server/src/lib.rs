pub mod auth;
pub mod error;
pub mod routes;

use std::{any::Any, sync::Arc, time::Instant};

use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use lexquiz_core::{chat::ChatService, config::Config, db::Db, types::Quiz};
use lexquiz_domains::seed;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

// ── AppState ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<Db>,
    pub chat: ChatService,
    pub quizzes: Vec<Quiz>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: Arc<Db>, chat: ChatService, quizzes: Vec<Quiz>) -> Self {
        Self {
            config,
            db,
            chat,
            quizzes,
            start_time: Instant::now(),
        }
    }
}

/// A store holding the demo account and the starting leaderboard.
pub async fn seeded_db(config: &Config) -> Result<Db> {
    let db = Db::new(config.feedback_path());
    let hash = auth::hash_password_blocking(seed::DEMO_PASSWORD.to_string()).await?;
    db.seed_user(seed::demo_user(hash));
    db.seed_leaderboard(seed::demo_leaderboard());
    Ok(db)
}

// ── Router ────────────────────────────────────────────────────────────────

pub fn app(state: Arc<AppState>) -> Router {
    let production = state.config.is_production();
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        // Catalog
        .route("/api/health", get(routes::health))
        .route("/api/questions", get(routes::list_questions))
        .route("/api/quizzes", get(routes::list_quizzes))
        .route("/api/quizzes/:id", get(routes::get_quiz))
        .route("/api/leaderboard", get(routes::get_leaderboard))
        .route("/api/notes", get(routes::get_notes))
        // Submissions
        .route("/api/feedback", post(routes::post_feedback))
        .route("/api/chat", post(routes::post_chat))
        .route("/api/submit-quiz", post(routes::submit_guest_quiz))
        // Auth
        .route("/api/auth/register", post(routes::register))
        .route("/api/auth/login", post(routes::login))
        .route("/api/auth/profile", get(routes::get_profile))
        .route("/api/auth/submit-quiz", post(routes::submit_user_quiz))
        .route("/api/auth/scores", get(routes::get_scores))
        // Static files
        .nest_service("/public", public)
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(panic, production)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, production: bool) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".into());
    tracing::error!("handler panicked: {detail}");

    let body = if production {
        json!({ "message": "Something went wrong!" })
    } else {
        json!({ "message": "Something went wrong!", "error": detail })
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
