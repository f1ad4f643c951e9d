use std::{sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::{
    format::format_response,
    knowledge::KnowledgeBase,
    provider::{ChatProvider, ProviderError},
    types::{ChatTurn, ProviderKind},
};

/// A chat answer and the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub provider: ProviderKind,
}

/// Answers chat messages: external provider first when configured, local
/// knowledge base otherwise or on any provider failure.
pub struct ChatService {
    knowledge: Arc<KnowledgeBase>,
    provider: Option<Arc<dyn ChatProvider>>,
    timeout: Duration,
}

impl ChatService {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge,
            provider: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Local-only answer: resolve against the knowledge base and format.
    pub fn answer_locally(&self, message: &str) -> String {
        format_response(self.knowledge.resolve(message))
    }

    /// Answer a message. Never fails: provider errors fall back to the local path.
    pub async fn respond(&self, message: &str, history: &[ChatTurn]) -> ChatReply {
        let Some(provider) = self.provider.as_deref() else {
            return self.local_reply(message);
        };
        match self.ask_provider(provider, message, history).await {
            Ok(text) => ChatReply {
                text,
                provider: ProviderKind::External,
            },
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "external provider failed, falling back to local knowledge base"
                );
                self.local_reply(message)
            },
        }
    }

    async fn ask_provider(
        &self,
        provider: &dyn ChatProvider,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<String, ProviderError> {
        info!(
            provider = provider.name(),
            history_len = history.len(),
            "forwarding chat message to external provider"
        );
        match tokio::time::timeout(self.timeout, provider.converse(message, history)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_secs())),
        }
    }

    fn local_reply(&self, message: &str) -> ChatReply {
        ChatReply {
            text: self.answer_locally(message),
            provider: ProviderKind::Local,
        }
    }
}
