// Database schema — table creation and demo seed data.
//
// A `schema_version` table tracks which migrations have run; for now there
// is only the initial schema, created idempotently on every startup.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Registered viewers. No credentials — authentication is handled
        -- outside this tool.
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL
        );

        -- The movie catalog
        CREATE TABLE IF NOT EXISTS movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            genre TEXT NOT NULL,               -- '|'-delimited tag list, split at the storage boundary
            description TEXT NOT NULL DEFAULT '',
            rating REAL NOT NULL DEFAULT 0,    -- 0.0 to 10.0
            year INTEGER NOT NULL DEFAULT 0
        );

        -- Interaction events — append-only, never updated or deleted
        CREATE TABLE IF NOT EXISTS interactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            movie_id INTEGER NOT NULL,
            kind TEXT NOT NULL,                -- 'watch' / 'like' / 'dislike'
            watch_seconds INTEGER NOT NULL DEFAULT 0,
            recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Search queries — append-only; they feed the genre profile
        CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            query TEXT NOT NULL,
            recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for per-user event lookups
        CREATE INDEX IF NOT EXISTS idx_interactions_user
            ON interactions(user_id);

        -- Index for trending (count by movie)
        CREATE INDEX IF NOT EXISTS idx_interactions_movie
            ON interactions(movie_id);

        -- Index for per-user search lookups
        CREATE INDEX IF NOT EXISTS idx_searches_user
            ON search_history(user_id);
        ",
    )
    .context("Failed to create database tables")?;

    Ok(())
}

/// Count the number of user-created tables in the database.
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

// Demo catalog: title, '|'-delimited genres, description, rating, year.
const SEED_MOVIES: &[(&str, &str, &str, f64, i32)] = &[
    ("Inception", "Sci-Fi|Action", "A thief who steals corporate secrets through the use of dream-sharing technology.", 8.8, 2010),
    ("The Dark Knight", "Action|Crime", "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham.", 9.0, 2008),
    ("Interstellar", "Sci-Fi|Adventure", "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.", 8.6, 2014),
    ("Parasite", "Thriller|Drama", "Greed and class discrimination threaten the newly formed symbiotic relationship between the wealthy Park family and the destitute Kim clan.", 8.5, 2019),
    ("Avengers: Endgame", "Action|Sci-Fi", "After the devastating events of Infinity War, the universe is in ruins.", 8.4, 2019),
    ("The Matrix", "Sci-Fi|Action", "A computer hacker learns from mysterious rebels about the true nature of his reality.", 8.7, 1999),
    ("The Godfather", "Crime|Drama", "An organized crime dynasty's aging patriarch transfers control of his clandestine empire to his reluctant son.", 9.2, 1972),
    ("Pulp Fiction", "Crime|Drama", "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine.", 8.9, 1994),
    ("Spirited Away", "Animation|Fantasy", "During her family's move to the suburbs, a sullen 10-year-old girl wanders into a world ruled by gods, witches, and spirits.", 8.6, 2001),
    ("The Lion King", "Animation|Drama", "Lion prince Simba and his father are targeted by his bitter uncle, who wants to ascend the throne himself.", 8.5, 1994),
    ("Schindler's List", "History|Drama", "In German-occupied Poland during World War II, industrialist Oskar Schindler gradually becomes concerned for his Jewish workforce.", 8.9, 1993),
    ("Fight Club", "Drama", "An insomniac office worker and a devil-may-care soap maker form an underground fight club that evolves into something much, much more.", 8.8, 1999),
    ("Goodfellas", "Biography|Crime", "The story of Henry Hill and his life in the mob, covering his relationship with his wife Karen Hill and his mob partners Jimmy Conway and Tommy DeVito.", 8.7, 1990),
    ("Forrest Gump", "Drama|Romance", "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold from the perspective of an Alabama man with an IQ of 75.", 8.8, 1994),
    ("The Shawshank Redemption", "Drama", "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.", 9.3, 1994),
    ("Coco", "Animation|Fantasy", "Aspiring musician Miguel, confronted with his family's ancestral ban on music, enters the Land of the Dead to find his great-great-grandfather, a legendary singer.", 8.4, 2017),
    ("Dune", "Sci-Fi|Adventure", "Paul Atreides, a brilliant and gifted young man born into a great destiny beyond his understanding, must travel to the most dangerous planet in the universe.", 8.0, 2021),
    ("Spider-Man: Into the Spider-Verse", "Animation|Action", "Teen Miles Morales becomes the Spider-Man of his universe, and must join with five spider-powered individuals from other dimensions to stop a threat for all realities.", 8.4, 2018),
    ("Joker", "Crime|Drama", "In Gotham City, mentally troubled comedian Arthur Fleck is disregarded and mistreated by society. He then embarks on a downward spiral of revolution and bloody crime.", 8.4, 2019),
    ("Stranger Things", "Sci-Fi|Horror", "When a young boy disappears, his mother, a police chief and his friends must confront terrifying supernatural forces in order to get him back.", 8.7, 2016),
];

const SEED_USERS: &[(&str, &str)] = &[
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
    ("Dave", "dave@example.com"),
];

// Alice (user 1) leans Action/Sci-Fi; Bob (user 2) leans crime classics.
const SEED_INTERACTIONS: &[(i64, i64, &str, u32)] = &[
    (1, 1, "watch", 5400),
    (1, 1, "like", 0),
    (1, 2, "watch", 7200),
    (1, 2, "like", 0),
    (1, 3, "watch", 3600),
    (1, 4, "watch", 100), // started Parasite but stopped
    (1, 5, "watch", 9000),
    (1, 5, "like", 0),
    (2, 6, "watch", 6000),
    (2, 6, "like", 0),
    (2, 7, "watch", 8000),
];

const SEED_SEARCHES: &[(i64, &str)] = &[
    (1, "Sci-Fi movies"),
    (1, "Action movies"),
    (2, "Classic Mob movies"),
];

/// Seed the demo catalog, users, and activity history.
///
/// Only runs against an empty catalog, so calling `init` twice doesn't
/// duplicate rows.
pub fn seed_demo_data(conn: &Connection) -> Result<()> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(());
    }

    for (title, genre, description, rating, year) in SEED_MOVIES {
        conn.execute(
            "INSERT INTO movies (title, genre, description, rating, year)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![title, genre, description, rating, year],
        )?;
    }

    for (username, email) in SEED_USERS {
        conn.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2)",
            params![username, email],
        )?;
    }

    for (user_id, movie_id, kind, watch_seconds) in SEED_INTERACTIONS {
        conn.execute(
            "INSERT INTO interactions (user_id, movie_id, kind, watch_seconds)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, movie_id, kind, watch_seconds],
        )?;
    }

    for (user_id, query) in SEED_SEARCHES {
        conn.execute(
            "INSERT INTO search_history (user_id, query) VALUES (?1, ?2)",
            params![user_id, query],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        assert!(table_count(&conn).unwrap() >= 5);
    }

    #[test]
    fn seed_runs_once() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        seed_demo_data(&conn).unwrap();
        seed_demo_data(&conn).unwrap();

        let movies: i64 = conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(movies, 20);

        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(users, 4);
    }
}
