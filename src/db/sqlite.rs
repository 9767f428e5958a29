// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// rusqlite's Connection is !Send, so it sits behind a tokio::sync::Mutex.
// Each trait method takes the lock, runs its synchronous query, and drops
// the guard before returning — the guard never crosses an .await point.
//
// The free functions in queries.rs stay synchronous so tests can exercise
// them against a Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{
    ActivityTotals, HistoryEntry, Interaction, InteractionKind, Movie, RecentInteraction,
    RecentSearch, SearchEvent, User,
};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        let conn = self.conn.lock().await;
        super::queries::list_movies(&conn)
    }

    async fn browse_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
        let conn = self.conn.lock().await;
        super::queries::browse_movies(&conn, genre)
    }

    async fn get_movie(&self, movie_id: i64) -> Result<Option<Movie>> {
        let conn = self.conn.lock().await;
        super::queries::get_movie(&conn, movie_id)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().await;
        super::queries::list_users(&conn)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, user_id)
    }

    async fn record_interaction(
        &self,
        user_id: i64,
        movie_id: i64,
        kind: InteractionKind,
        watch_seconds: u32,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_interaction(&conn, user_id, movie_id, kind, watch_seconds)
    }

    async fn list_interactions(&self) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().await;
        super::queries::list_interactions(&conn)
    }

    async fn interactions_for_user(&self, user_id: i64) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().await;
        super::queries::interactions_for_user(&conn, user_id)
    }

    async fn record_search(&self, user_id: i64, query: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_search(&conn, user_id, query)
    }

    async fn list_searches(&self) -> Result<Vec<SearchEvent>> {
        let conn = self.conn.lock().await;
        super::queries::list_searches(&conn)
    }

    async fn searches_for_user(&self, user_id: i64) -> Result<Vec<SearchEvent>> {
        let conn = self.conn.lock().await;
        super::queries::searches_for_user(&conn, user_id)
    }

    async fn user_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock().await;
        super::queries::user_history(&conn, user_id)
    }

    async fn trending(&self, limit: u32) -> Result<Vec<(Movie, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::trending(&conn, limit)
    }

    async fn activity_totals(&self) -> Result<ActivityTotals> {
        let conn = self.conn.lock().await;
        super::queries::activity_totals(&conn)
    }

    async fn recent_searches(&self, limit: u32) -> Result<Vec<RecentSearch>> {
        let conn = self.conn.lock().await;
        super::queries::recent_searches(&conn, limit)
    }

    async fn recent_interactions(&self, limit: u32) -> Result<Vec<RecentInteraction>> {
        let conn = self.conn.lock().await;
        super::queries::recent_interactions(&conn, limit)
    }

    async fn top_watched_genres(&self, limit: usize) -> Result<Vec<(String, u32)>> {
        let conn = self.conn.lock().await;
        super::queries::top_watched_genres(&conn, limit)
    }

    async fn last_activity_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_activity_at(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{create_tables, seed_demo_data};

    fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        seed_demo_data(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn trait_surface_round_trips() {
        let db = test_db();

        assert_eq!(db.list_movies().await.unwrap().len(), 20);
        assert_eq!(db.list_users().await.unwrap().len(), 4);

        let id = db
            .record_interaction(3, 15, InteractionKind::Like, 0)
            .await
            .unwrap();
        assert!(id > 0);

        let events = db.interactions_for_user(3).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, InteractionKind::Like);

        db.record_search(3, "animated fantasy").await.unwrap();
        let searches = db.searches_for_user(3).await.unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "animated fantasy");
    }

    #[tokio::test]
    async fn unknown_user_is_none_not_error() {
        let db = test_db();
        assert!(db.get_user(42).await.unwrap().is_none());
        assert!(db.interactions_for_user(42).await.unwrap().is_empty());
    }
}
