//! Demo accounts and leaderboard rows loaded at startup.

use lexquiz_core::types::{LeaderboardEntry, ScoreRecord, User};

pub const DEMO_USERNAME: &str = "lawstudent";
pub const DEMO_EMAIL: &str = "student@example.com";
/// Plaintext for the demo account; hashed at startup.
pub const DEMO_PASSWORD: &str = "law123";

pub fn demo_user(password_hash: String) -> User {
    User {
        id: 1,
        username: DEMO_USERNAME.into(),
        email: DEMO_EMAIL.into(),
        password_hash,
        scores: vec![
            ScoreRecord {
                quiz_id: 1,
                score: 850,
                date: "2024-12-01".into(),
            },
            ScoreRecord {
                quiz_id: 1,
                score: 920,
                date: "2024-12-05".into(),
            },
        ],
        created_at: "2024-11-20".into(),
    }
}

pub fn demo_leaderboard() -> Vec<LeaderboardEntry> {
    [
        (1, DEMO_USERNAME, 920, "2024-12-05"),
        (2, "legalpro", 880, "2024-12-04"),
        (3, "constitution_expert", 780, "2024-12-03"),
    ]
    .into_iter()
    .map(|(id, name, score, date)| LeaderboardEntry {
        user_id: Some(id),
        username: name.into(),
        score,
        date: date.into(),
    })
    .collect()
}
