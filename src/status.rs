// System status display — catalog size, activity totals, recent events.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;
use colored::Colorize;

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `marquee init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {db_path} ({file_size})");

    let movies = db.list_movies().await?;
    println!("Catalog: {} movies", movies.len());

    let totals = db.activity_totals().await?;
    println!(
        "Activity: {} users, {} interactions, {} searches, {:.1} minutes watched",
        totals.users,
        totals.interactions,
        totals.searches,
        totals.watch_seconds as f64 / 60.0,
    );

    match db.last_activity_at().await? {
        Some(ts) => println!("Last event: {} ({})", ts, humanize_age(&ts)),
        None => println!("Last event: none recorded yet"),
    }

    let top = db.top_watched_genres(5).await?;
    if !top.is_empty() {
        let joined = top
            .iter()
            .map(|(genre, count)| format!("{genre} ({count})"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Top watched genres: {joined}");
    }

    let searches = db.recent_searches(5).await?;
    if !searches.is_empty() {
        println!("\n{}", "Recent searches:".bold());
        for s in &searches {
            println!("  \"{}\" by {} ({})", s.query, s.username, s.recorded_at.dimmed());
        }
    }

    let events = db.recent_interactions(5).await?;
    if !events.is_empty() {
        println!("\n{}", "Recent interactions:".bold());
        for e in &events {
            println!(
                "  {} {} by {} ({})",
                e.kind,
                e.title,
                e.username,
                e.recorded_at.dimmed()
            );
        }
    }

    Ok(())
}

/// "N minutes ago" for a stored `datetime('now')` timestamp. Falls back to
/// the raw string when parsing fails.
fn humanize_age(timestamp: &str) -> String {
    let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") else {
        return timestamp.to_string();
    };

    let age = chrono::Utc::now().naive_utc() - parsed;
    if age.num_minutes() < 1 {
        "just now".to_string()
    } else if age.num_minutes() < 60 {
        format!("{} minutes ago", age.num_minutes())
    } else if age.num_hours() < 24 {
        format!("{} hours ago", age.num_hours())
    } else {
        format!("{} days ago", age.num_days())
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}
