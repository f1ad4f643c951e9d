use std::{sync::Arc, time::Duration};

use lexquiz_agent::GeminiBackend;
use lexquiz_core::{chat::ChatService, config::Config, provider::ChatProvider};
use lexquiz_domains::{indian_law_knowledge_base, quiz::all_questions, quiz_bank};
use lexquiz_server::{app, seeded_db, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lexquiz_server=info,lexquiz_core=info,lexquiz_agent=info,tower_http=debug".into());
    // LOG_FORMAT=json for machine-readable output
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    let db = Arc::new(seeded_db(&config).await?);

    let knowledge = Arc::new(indian_law_knowledge_base());
    let mut chat = ChatService::new(knowledge)
        .with_timeout(Duration::from_secs(config.provider_timeout_s));
    match GeminiBackend::from_config(&config) {
        Some(backend) => {
            info!(model = backend.name(), "external chat provider enabled");
            chat = chat.with_provider(Arc::new(backend));
        },
        None => warn!("GEMINI_API_KEY not set; chat answers come from the local knowledge base only"),
    }

    let quizzes = quiz_bank();
    let question_count = all_questions(&quizzes).len();
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(Arc::clone(&config), Arc::clone(&db), chat, quizzes));

    let addr = format!("{}:{}", config.bind, config.port);
    info!(
        questions = question_count,
        users = db.user_count(),
        leaderboard_entries = db.leaderboard_len(),
        environment = %config.environment,
        public_dir = %config.public_dir,
        "Law Quiz backend ready"
    );
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
