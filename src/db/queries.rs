// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.
// The '|'-delimited genre column is split here and nowhere else.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{
    ActivityTotals, HistoryEntry, Interaction, InteractionKind, Movie, RecentInteraction,
    RecentSearch, SearchEvent, User,
};

/// Split the stored '|'-delimited genre column into an ordered tag list.
fn split_genres(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    let genre: String = row.get(2)?;
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        genres: split_genres(&genre),
        description: row.get(3)?,
        rating: row.get(4)?,
        year: row.get(5)?,
    })
}

const MOVIE_COLUMNS: &str = "id, title, genre, description, rating, year";

// --- Catalog ---

/// The full catalog in id order — the snapshot the engine consumes.
/// A fixed order keeps tie-breaks in the ranking code deterministic.
pub fn list_movies(conn: &Connection) -> Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id"
    ))?;
    let rows = stmt.query_map([], movie_from_row)?;

    let mut movies = Vec::new();
    for row in rows {
        movies.push(row?);
    }
    Ok(movies)
}

/// Browse the catalog by rating, optionally filtered to a genre substring.
pub fn browse_movies(conn: &Connection, genre: Option<&str>) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();
    match genre {
        Some(g) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MOVIE_COLUMNS} FROM movies WHERE genre LIKE ?1 ORDER BY rating DESC"
            ))?;
            let rows = stmt.query_map(params![format!("%{g}%")], movie_from_row)?;
            for row in rows {
                movies.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY rating DESC"
            ))?;
            let rows = stmt.query_map([], movie_from_row)?;
            for row in rows {
                movies.push(row?);
            }
        }
    }
    Ok(movies)
}

pub fn get_movie(conn: &Connection, movie_id: i64) -> Result<Option<Movie>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"
    ))?;
    let movie = stmt
        .query_row(params![movie_id], movie_from_row)
        .optional()?;
    Ok(movie)
}

// --- Users ---

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, email FROM users ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
        })
    })?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, username, email FROM users WHERE id = ?1")?;
    let user = stmt
        .query_row(params![user_id], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
            })
        })
        .optional()?;
    Ok(user)
}

// --- Interaction events ---

/// Append an interaction event. Events are never updated in place — a second
/// watch of the same movie is a second row.
pub fn insert_interaction(
    conn: &Connection,
    user_id: i64,
    movie_id: i64,
    kind: InteractionKind,
    watch_seconds: u32,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO interactions (user_id, movie_id, kind, watch_seconds)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, movie_id, kind.as_str(), watch_seconds],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect_interactions(
    stmt: &mut rusqlite::Statement<'_>,
    bind: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Interaction>> {
    let rows = stmt.query_map(bind, |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, u32>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (id, user_id, movie_id, kind, watch_seconds, recorded_at) = row?;
        let kind = InteractionKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown interaction kind in row {id}: {kind}"))?;
        events.push(Interaction {
            id,
            user_id,
            movie_id,
            kind,
            watch_seconds,
            recorded_at,
        });
    }
    Ok(events)
}

/// Every interaction event, in insertion order.
pub fn list_interactions(conn: &Connection) -> Result<Vec<Interaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, movie_id, kind, watch_seconds, recorded_at
         FROM interactions ORDER BY id",
    )?;
    collect_interactions(&mut stmt, &[])
}

/// One user's interaction events, in insertion order.
pub fn interactions_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Interaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, movie_id, kind, watch_seconds, recorded_at
         FROM interactions WHERE user_id = ?1 ORDER BY id",
    )?;
    collect_interactions(&mut stmt, &[&user_id])
}

// --- Search events ---

pub fn insert_search(conn: &Connection, user_id: i64, query: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO search_history (user_id, query) VALUES (?1, ?2)",
        params![user_id, query],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect_searches(
    stmt: &mut rusqlite::Statement<'_>,
    bind: &[&dyn rusqlite::ToSql],
) -> Result<Vec<SearchEvent>> {
    let rows = stmt.query_map(bind, |row| {
        Ok(SearchEvent {
            id: row.get(0)?,
            user_id: row.get(1)?,
            query: row.get(2)?,
            recorded_at: row.get(3)?,
        })
    })?;

    let mut searches = Vec::new();
    for row in rows {
        searches.push(row?);
    }
    Ok(searches)
}

/// Every search event, in insertion order.
pub fn list_searches(conn: &Connection) -> Result<Vec<SearchEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, query, recorded_at FROM search_history ORDER BY id",
    )?;
    collect_searches(&mut stmt, &[])
}

/// One user's search events, in insertion order.
pub fn searches_for_user(conn: &Connection, user_id: i64) -> Result<Vec<SearchEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, query, recorded_at FROM search_history
         WHERE user_id = ?1 ORDER BY id",
    )?;
    collect_searches(&mut stmt, &[&user_id])
}

// --- Activity views ---

/// A user's interaction history joined with movie metadata, newest first.
pub fn user_history(conn: &Connection, user_id: i64) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.title, m.genre, m.description, m.rating, m.year,
                i.kind, i.watch_seconds, i.recorded_at
         FROM interactions i
         JOIN movies m ON i.movie_id = m.id
         WHERE i.user_id = ?1
         ORDER BY i.recorded_at DESC, i.id DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        let movie = movie_from_row(row)?;
        Ok((
            movie,
            row.get::<_, String>(6)?,
            row.get::<_, u32>(7)?,
            row.get::<_, String>(8)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (movie, kind, watch_seconds, recorded_at) = row?;
        let kind = InteractionKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown interaction kind: {kind}"))?;
        entries.push(HistoryEntry {
            movie,
            kind,
            watch_seconds,
            recorded_at,
        });
    }
    Ok(entries)
}

/// Movies ranked by total interaction count across all users.
pub fn trending(conn: &Connection, limit: u32) -> Result<Vec<(Movie, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.title, m.genre, m.description, m.rating, m.year,
                COUNT(i.id) AS interaction_count
         FROM movies m
         JOIN interactions i ON m.id = i.movie_id
         GROUP BY m.id
         ORDER BY interaction_count DESC, m.id
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        let movie = movie_from_row(row)?;
        Ok((movie, row.get::<_, i64>(6)?))
    })?;

    let mut ranked = Vec::new();
    for row in rows {
        ranked.push(row?);
    }
    Ok(ranked)
}

// --- Status aggregates ---

/// Headline counts for the status report.
pub fn activity_totals(conn: &Connection) -> Result<ActivityTotals> {
    let users = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let interactions = conn.query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))?;
    let searches = conn.query_row("SELECT COUNT(*) FROM search_history", [], |row| row.get(0))?;
    let watch_seconds = conn.query_row(
        "SELECT COALESCE(SUM(watch_seconds), 0) FROM interactions WHERE kind = 'watch'",
        [],
        |row| row.get(0),
    )?;

    Ok(ActivityTotals {
        users,
        interactions,
        searches,
        watch_seconds,
    })
}

/// The most recent search queries with usernames resolved.
pub fn recent_searches(conn: &Connection, limit: u32) -> Result<Vec<RecentSearch>> {
    let mut stmt = conn.prepare(
        "SELECT s.query, s.recorded_at, u.username
         FROM search_history s
         JOIN users u ON s.user_id = u.id
         ORDER BY s.recorded_at DESC, s.id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(RecentSearch {
            query: row.get(0)?,
            recorded_at: row.get(1)?,
            username: row.get(2)?,
        })
    })?;

    let mut searches = Vec::new();
    for row in rows {
        searches.push(row?);
    }
    Ok(searches)
}

/// The most recent interactions with usernames and titles resolved.
pub fn recent_interactions(conn: &Connection, limit: u32) -> Result<Vec<RecentInteraction>> {
    let mut stmt = conn.prepare(
        "SELECT i.kind, i.recorded_at, u.username, m.title
         FROM interactions i
         JOIN users u ON i.user_id = u.id
         JOIN movies m ON i.movie_id = m.id
         ORDER BY i.recorded_at DESC, i.id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut events = Vec::new();
    for row in rows {
        let (kind, recorded_at, username, title) = row?;
        let kind = InteractionKind::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown interaction kind: {kind}"))?;
        events.push(RecentInteraction {
            kind,
            title,
            username,
            recorded_at,
        });
    }
    Ok(events)
}

/// Genre tags ranked by how often they appear in watch events.
/// The genre column is split per movie, so a multi-genre watch counts
/// toward each of its tags.
pub fn top_watched_genres(conn: &Connection, limit: usize) -> Result<Vec<(String, u32)>> {
    let mut stmt = conn.prepare(
        "SELECT m.genre
         FROM interactions i
         JOIN movies m ON i.movie_id = m.id
         WHERE i.kind = 'watch'",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut counts: Vec<(String, u32)> = Vec::new();
    for row in rows {
        for genre in split_genres(&row?) {
            match counts.iter_mut().find(|(g, _)| *g == genre) {
                Some((_, c)) => *c += 1,
                None => counts.push((genre, 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts.truncate(limit);
    Ok(counts)
}

/// Timestamp of the most recent event of any kind.
pub fn last_activity_at(conn: &Connection) -> Result<Option<String>> {
    let latest = conn.query_row(
        "SELECT MAX(ts) FROM (
            SELECT recorded_at AS ts FROM interactions
            UNION ALL
            SELECT recorded_at FROM search_history
         )",
        [],
        |row| row.get::<_, Option<String>>(0),
    )?;
    Ok(latest)
}
