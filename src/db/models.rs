// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the engine. They're separate from
// the queries so the engine and output code can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Ordered genre tags. The '|'-delimited storage form never leaves the
    /// db layer — everything above it sees a proper list.
    pub genres: Vec<String>,
    pub description: String,
    /// Catalog rating on a 0-10 scale
    pub rating: f64,
    pub year: i32,
}

impl Movie {
    /// The text document the catalog index vectorizes: genre tags joined by
    /// spaces, then the free-text description.
    pub fn document(&self) -> String {
        format!("{} {}", self.genres.join(" "), self.description)
    }
}

/// One thing a user did with a movie. Append-only — repeated events for the
/// same (user, movie) pair all stay and count independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub kind: InteractionKind,
    /// Seconds of playback for watch events; 0 for likes and dislikes
    pub watch_seconds: u32,
    pub recorded_at: String,
}

/// A recorded search query. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEvent {
    pub id: i64,
    pub user_id: i64,
    pub query: String,
    pub recorded_at: String,
}

/// A registered viewer. Credentials live outside this tool's scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// The three interaction kinds the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Watch,
    Like,
    Dislike,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Watch => "watch",
            InteractionKind::Like => "like",
            InteractionKind::Dislike => "dislike",
        }
    }

    /// Parse the stored form. Unknown strings are rejected so a hand-edited
    /// row fails loudly instead of silently scoring as nothing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "watch" => Some(InteractionKind::Watch),
            "like" => Some(InteractionKind::Like),
            "dislike" => Some(InteractionKind::Dislike),
            _ => None,
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A movie annotated with how well it matches a user's genre profile.
/// Produced only by the hybrid ranker, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMovie {
    pub movie: Movie,
    /// 0-99 display score; None when the user has no taste signal yet
    pub match_score: Option<u8>,
    /// Human-readable justification; None when unscored
    pub match_reason: Option<String>,
}

/// One row of a user's viewing history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub movie: Movie,
    pub kind: InteractionKind,
    pub watch_seconds: u32,
    pub recorded_at: String,
}

/// Headline numbers for the status report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityTotals {
    pub users: i64,
    pub interactions: i64,
    pub searches: i64,
    pub watch_seconds: i64,
}

/// A recent search with the user who made it.
#[derive(Debug, Clone)]
pub struct RecentSearch {
    pub query: String,
    pub username: String,
    pub recorded_at: String,
}

/// A recent interaction with the user and movie resolved for display.
#[derive(Debug, Clone)]
pub struct RecentInteraction {
    pub kind: InteractionKind,
    pub title: String,
    pub username: String,
    pub recorded_at: String,
}
