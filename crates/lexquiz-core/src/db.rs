use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::types::{Feedback, LeaderboardEntry, RankedEntry, ScoreRecord, User};

/// Leaderboard entries kept after every submission.
pub const LEADERBOARD_CAPACITY: usize = 50;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    leaderboard: Vec<LeaderboardEntry>,
}

/// Process-local store for accounts and the leaderboard, plus the feedback
/// file. Nothing here survives a restart except `feedback.json`.
pub struct Db {
    tables: Mutex<Tables>,
    feedback_path: PathBuf,
}

/// Fields of a new account.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: String,
    pub created_at: String,
}

impl Db {
    pub fn new(feedback_path: impl Into<PathBuf>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            feedback_path: feedback_path.into(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn feedback_path(&self) -> &Path {
        &self.feedback_path
    }

    // ── Users ─────────────────────────────────────────────────────────────

    /// Register an account. Returns `None` if the email or username is taken.
    pub fn insert_user(&self, new: NewUser<'_>) -> Option<User> {
        let mut t = self.lock();
        if t
            .users
            .iter()
            .any(|u| u.email == new.email || u.username == new.username)
        {
            return None;
        }
        let user = User {
            id: t.users.len() as i64 + 1,
            username: new.username.to_string(),
            email: new.email.to_string(),
            password_hash: new.password_hash,
            scores: Vec::new(),
            created_at: new.created_at,
        };
        t.users.push(user.clone());
        Some(user)
    }

    /// Insert a fully-formed account (seed data). Skips duplicates.
    pub fn seed_user(&self, user: User) {
        let mut t = self.lock();
        if !t.users.iter().any(|u| u.id == user.id || u.email == user.email) {
            t.users.push(user);
        }
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.lock().users.iter().find(|u| u.email == email).cloned()
    }

    pub fn user_by_id(&self, id: i64) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Append a score to a user's history. Returns the updated history.
    pub fn add_user_score(&self, user_id: i64, score: ScoreRecord) -> Option<Vec<ScoreRecord>> {
        let mut t = self.lock();
        let user = t.users.iter_mut().find(|u| u.id == user_id)?;
        user.scores.push(score);
        Some(user.scores.clone())
    }

    // ── Leaderboard ───────────────────────────────────────────────────────

    /// Add an entry, re-sort by score (highest first, ties keep submission
    /// order) and trim to [`LEADERBOARD_CAPACITY`].
    ///
    /// Returns the 1-based rank of the first entry with the same username
    /// and score, or 0 if the entry was trimmed away.
    pub fn submit_score(&self, entry: LeaderboardEntry) -> usize {
        let mut t = self.lock();
        let (username, score) = (entry.username.clone(), entry.score);
        t.leaderboard.push(entry);
        t.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        t.leaderboard.truncate(LEADERBOARD_CAPACITY);
        t.leaderboard
            .iter()
            .position(|e| e.username == username && e.score == score)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Seed an entry without re-sorting.
    pub fn seed_leaderboard(&self, entries: impl IntoIterator<Item = LeaderboardEntry>) {
        self.lock().leaderboard.extend(entries);
    }

    pub fn top_entries(&self, limit: usize) -> Vec<RankedEntry> {
        self.lock()
            .leaderboard
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, e)| RankedEntry {
                rank: i + 1,
                username: e.username.clone(),
                score: e.score,
                date: e.date.clone(),
            })
            .collect()
    }

    pub fn leaderboard_len(&self) -> usize {
        self.lock().leaderboard.len()
    }

    // ── Feedback ──────────────────────────────────────────────────────────

    /// Append a feedback entry to the JSON array file.
    ///
    /// An unreadable or corrupt existing file is logged and replaced.
    pub fn save_feedback(&self, feedback: &Feedback) -> Result<()> {
        // serializes the read-modify-write of the file
        let _guard = self.lock();
        let path = &self.feedback_path;

        let mut all: Vec<Feedback> = match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                error!(path = %path.display(), "error reading feedback file: {e}");
                Vec::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                error!(path = %path.display(), "error reading feedback file: {e}");
                Vec::new()
            },
        };
        all.push(feedback.clone());

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating feedback directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&all)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(id = feedback.id, total = all.len(), "new feedback saved");
        Ok(())
    }

    pub fn list_feedback(&self) -> Result<Vec<Feedback>> {
        let _guard = self.lock();
        match std::fs::read_to_string(&self.feedback_path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
