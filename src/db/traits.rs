// Database trait — backend-agnostic async interface for all DB operations.
//
// The single implementor today is SqliteDatabase (wrapping rusqlite). The
// methods are async so a native-async backend can slot in behind the same
// interface later without touching callers.
//
// The trait mirrors the queries.rs function signatures, so callers hold an
// `Arc<dyn Database>` and never see a Connection.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{
    ActivityTotals, HistoryEntry, Interaction, InteractionKind, Movie, RecentInteraction,
    RecentSearch, SearchEvent, User,
};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Catalog ---

    /// The full catalog in id order — the snapshot the engine consumes.
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// Browse by rating, optionally filtered to a genre substring.
    async fn browse_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>>;

    /// Look up a single movie by id.
    async fn get_movie(&self, movie_id: i64) -> Result<Option<Movie>>;

    // --- Users ---

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    // --- Interaction events ---

    /// Append an interaction event and return its id.
    async fn record_interaction(
        &self,
        user_id: i64,
        movie_id: i64,
        kind: InteractionKind,
        watch_seconds: u32,
    ) -> Result<i64>;

    /// Every interaction event, in insertion order.
    async fn list_interactions(&self) -> Result<Vec<Interaction>>;

    /// One user's interaction events, in insertion order.
    async fn interactions_for_user(&self, user_id: i64) -> Result<Vec<Interaction>>;

    // --- Search events ---

    /// Append a search event and return its id.
    async fn record_search(&self, user_id: i64, query: &str) -> Result<i64>;

    /// Every search event, in insertion order.
    async fn list_searches(&self) -> Result<Vec<SearchEvent>>;

    /// One user's search events, in insertion order.
    async fn searches_for_user(&self, user_id: i64) -> Result<Vec<SearchEvent>>;

    // --- Activity views ---

    /// A user's interaction history with movie metadata, newest first.
    async fn user_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>>;

    /// Movies ranked by total interaction count.
    async fn trending(&self, limit: u32) -> Result<Vec<(Movie, i64)>>;

    // --- Status aggregates ---

    async fn activity_totals(&self) -> Result<ActivityTotals>;

    async fn recent_searches(&self, limit: u32) -> Result<Vec<RecentSearch>>;

    async fn recent_interactions(&self, limit: u32) -> Result<Vec<RecentInteraction>>;

    async fn top_watched_genres(&self, limit: usize) -> Result<Vec<(String, u32)>>;

    async fn last_activity_at(&self) -> Result<Option<String>>;
}
