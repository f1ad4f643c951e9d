use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use lexquiz_core::{
    chat::ChatService,
    format::{format_response, NO_MATCH_GUIDANCE},
    knowledge::{KeywordRule, KnowledgeBase},
    provider::{ChatProvider, ProviderError},
    ChatTurn, KnowledgeRecord, ProviderKind,
};
use tracing_test::traced_test;

fn kb() -> Arc<KnowledgeBase> {
    Arc::new(
        KnowledgeBase::new()
            .with_entry(
                "article 21",
                KnowledgeRecord {
                    topic: "Article 21".into(),
                    summary: Some("Right to life.".into()),
                    ..Default::default()
                },
            )
            .with_entry(
                "section 302",
                KnowledgeRecord {
                    topic: "Section 302".into(),
                    ..Default::default()
                },
            )
            .with_rule(KeywordRule::new(&["murder", "302"], "section 302")),
    )
}

enum Behaviour {
    Reply(&'static str),
    Fail(fn() -> ProviderError),
    Hang,
}

struct MockProvider {
    behaviour: Behaviour,
    calls: AtomicUsize,
    last_history: Mutex<Vec<ChatTurn>>,
}

impl MockProvider {
    fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last_history: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn converse(&self, _message: &str, history: &[ChatTurn]) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = history.to_vec();
        match &self.behaviour {
            Behaviour::Reply(text) => Ok(text.to_string()),
            Behaviour::Fail(make) => Err(make()),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("too late".into())
            },
        }
    }
}

#[tokio::test]
async fn without_provider_answers_locally() {
    let service = ChatService::new(kb());
    assert!(!service.has_provider());

    let reply = service.respond("Explain Article 21", &[]).await;
    assert_eq!(reply.provider, ProviderKind::Local);
    assert_eq!(reply.text, format_response(kb().resolve("Explain Article 21")));
    assert!(reply.text.contains("Right to life."));
}

#[tokio::test]
async fn unmatched_local_query_returns_guidance() {
    let service = ChatService::new(kb());
    let reply = service.respond("what is the capital of france", &[]).await;
    assert_eq!(reply.provider, ProviderKind::Local);
    assert_eq!(reply.text, NO_MATCH_GUIDANCE);
}

#[tokio::test]
async fn provider_success_is_returned_verbatim() {
    let provider = MockProvider::new(Behaviour::Reply("  external *answer*\n"));
    let service = ChatService::new(kb()).with_provider(provider.clone());

    let history = vec![ChatTurn::user("hi"), ChatTurn::assistant("hello")];
    let reply = service.respond("murder", &history).await;

    assert_eq!(reply.provider, ProviderKind::External);
    assert_eq!(reply.text, "  external *answer*\n");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*provider.last_history.lock().unwrap(), history);
}

#[tokio::test]
#[traced_test]
async fn provider_error_falls_back_to_local_and_is_logged() {
    let provider = MockProvider::new(Behaviour::Fail(|| ProviderError::QuotaExceeded("RESOURCE_EXHAUSTED".into())));
    let service = ChatService::new(kb()).with_provider(provider.clone());

    let reply = service.respond("ipc 302", &[]).await;

    assert_eq!(reply.provider, ProviderKind::Local);
    assert_eq!(reply.text, format_response(kb().resolve("ipc 302")));
    assert!(reply.text.contains("Section 302"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1, "no retries");
    assert!(logs_contain("falling back to local knowledge base"));
    assert!(logs_contain("quota exceeded"));
}

#[tokio::test]
async fn every_provider_error_kind_falls_back() {
    let failures: [fn() -> ProviderError; 5] = [
        || ProviderError::InvalidCredential("API key not valid".into()),
        || ProviderError::Transport("connection refused".into()),
        || ProviderError::Api {
            status: 500,
            message: "boom".into(),
        },
        || ProviderError::EmptyResponse,
        || ProviderError::NotConfigured,
    ];
    for make in failures {
        let service = ChatService::new(kb()).with_provider(MockProvider::new(Behaviour::Fail(make)));
        let reply = service.respond("article 21 please", &[]).await;
        assert_eq!(reply.provider, ProviderKind::Local);
        assert!(reply.text.contains("Article 21"));
    }
}

#[tokio::test]
async fn slow_provider_times_out_into_local_path() {
    let provider = MockProvider::new(Behaviour::Hang);
    let service = ChatService::new(kb())
        .with_provider(provider.clone())
        .with_timeout(Duration::from_millis(50));

    let reply = tokio::time::timeout(Duration::from_secs(5), service.respond("murder weapon", &[]))
        .await
        .expect("respond must not wait for the hung provider");

    assert_eq!(reply.provider, ProviderKind::Local);
    assert!(reply.text.contains("Section 302"));
}

#[tokio::test]
#[traced_test]
async fn not_configured_from_a_wired_provider_is_still_logged() {
    let provider = MockProvider::new(Behaviour::Fail(|| ProviderError::NotConfigured));
    let service = ChatService::new(kb()).with_provider(provider.clone());

    let reply = service.respond("article 21", &[]).await;

    assert_eq!(reply.provider, ProviderKind::Local);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert!(logs_contain("falling back to local knowledge base"));
    assert!(logs_contain("no external provider configured"));
}

#[tokio::test]
#[traced_test]
async fn missing_provider_answers_locally_without_warning() {
    let service = ChatService::new(kb());

    let reply = service.respond("article 21", &[]).await;

    assert_eq!(reply.provider, ProviderKind::Local);
    assert_eq!(reply.text, service.answer_locally("article 21"));
    assert!(!logs_contain("falling back to local knowledge base"));
}

#[test]
fn service_exposes_the_shared_knowledge_base() {
    let shared = kb();
    let service = ChatService::new(Arc::clone(&shared));

    assert_eq!(service.knowledge().len(), 2);
    assert_eq!(service.knowledge().rules(), shared.rules());
    assert_eq!(
        service.knowledge().rules()[0],
        KeywordRule::new(&["murder", "302"], "section 302")
    );
}
