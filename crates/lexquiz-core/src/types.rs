use serde::{Deserialize, Serialize};

// ── Knowledge base records ───────────────────────────────────────────────

/// A landmark judgment cited under a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkCase {
    pub name: String,
    pub year: u16,
    pub summary: String,
    pub significance: String,
}

/// Deep-dive block for a topic that is itself a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    pub year: u16,
    /// Bench composition, e.g. "13-judge bench (largest ever)".
    pub judges: String,
    pub chief_justice: Option<String>,
    pub key_points: Vec<String>,
    pub significance: String,
    pub verdict: Option<String>,
}

/// One entry of the legal knowledge base.
///
/// By convention a record is either case-list shaped (`cases`, maybe
/// `key_changes`) or deep-dive shaped (`details`), but nothing enforces it:
/// every optional field is rendered independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRecord {
    /// Display title.
    pub topic: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub cases: Vec<LandmarkCase>,
    pub key_points: Option<Vec<String>>,
    pub key_changes: Option<Vec<String>>,
    pub details: Option<CaseDetails>,
}

// ── Chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// A prior message of the conversation, replayed to the external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Which path produced a chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    External,
    Local,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Local => "local",
        }
    }
}

// ── Quiz ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub questions: Vec<Question>,
}

// ── Users & scores ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub quiz_id: i64,
    pub score: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// A registered account as held by the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// PHC-format argon2 hash.
    pub password_hash: String,
    pub scores: Vec<ScoreRecord>,
    pub created_at: String,
}

/// The shape of a user returned over the API (no credential material).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub scores: Vec<ScoreRecord>,
    pub created_at: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            scores: u.scores.clone(),
            created_at: u.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// `None` for guest submissions.
    pub user_id: Option<i64>,
    pub username: String,
    pub score: i64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub username: String,
    pub score: i64,
    pub date: String,
}

// ── Feedback ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Milliseconds since the epoch at submission time.
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    pub date: String,
}

// ── Notes catalog ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    pub notes: Vec<ResourceLink>,
    pub previous_qns: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub resources: Resources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemesterStatus {
    Active,
    ComingSoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: String,
    pub title: String,
    pub status: SemesterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Subject>>,
}
