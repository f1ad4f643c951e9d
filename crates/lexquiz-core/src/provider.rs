use async_trait::async_trait;
use thiserror::Error;

use crate::types::ChatTurn;

/// Why the external provider could not produce a reply.
///
/// Callers never surface these to end users; every variant routes the
/// request to the local knowledge base instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no external provider configured")]
    NotConfigured,
    #[error("invalid or missing provider API key: {0}")]
    InvalidCredential(String),
    #[error("provider quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("provider request timed out after {0}s")]
    Timeout(u64),
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("provider returned no text")]
    EmptyResponse,
}

/// An external text-generation service that can answer legal questions.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short identifier used in logs (e.g. the model name).
    fn name(&self) -> &str;

    /// Send `message` after replaying `history`; returns the generated text verbatim.
    async fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError>;
}
