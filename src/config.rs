use std::env;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Everything
/// has a default — the tool works out of the box with a local database file.
pub struct Config {
    /// Path to the SQLite database file (MARQUEE_DB_PATH)
    pub db_path: String,
    /// How many results a plain `recommend` returns (MARQUEE_TOP_N)
    pub default_top_n: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let default_top_n = match env::var("MARQUEE_TOP_N") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("MARQUEE_TOP_N is not a number: {raw}"))?,
            Err(_) => 10,
        };

        Ok(Self {
            db_path: env::var("MARQUEE_DB_PATH").unwrap_or_else(|_| "./marquee.db".to_string()),
            default_top_n,
        })
    }
}
