// Colored terminal output for recommendation lists and activity views.
//
// All terminal-specific formatting lives here: colors, tables, alignment.
// The main.rs command handlers delegate here after fetching their data.

use colored::Colorize;

use super::truncate_chars;
use crate::db::models::{HistoryEntry, Movie, ScoredMovie};

/// Display the hybrid recommendation list.
pub fn display_recommendations(results: &[ScoredMovie]) {
    if results.is_empty() {
        println!("Nothing to recommend — the catalog is empty.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recommendations ({}) ===", results.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<36} {:>6}  {:>6}  {}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Match".dimmed(),
        "Rating".dimmed(),
        "Why".dimmed(),
    );
    println!("  {}", "-".repeat(88).dimmed());

    for (i, result) in results.iter().enumerate() {
        let match_str = match result.match_score {
            Some(score) => format!("{score}%"),
            None => "-".to_string(),
        };
        let colored_match = match result.match_score {
            Some(s) if s >= 70 => match_str.bright_green().to_string(),
            Some(s) if s >= 40 => match_str.bright_yellow().to_string(),
            Some(_) => match_str.normal().to_string(),
            None => match_str.dimmed().to_string(),
        };

        println!(
            "  {:>4}. {:<36} {:>6}  {:>6.1}  {}",
            i + 1,
            truncate_chars(&result.movie.title, 34),
            colored_match,
            result.movie.rating,
            result.match_reason.as_deref().unwrap_or("").dimmed(),
        );
    }
    println!();

    if results.iter().all(|r| r.match_score.is_none()) {
        println!(
            "  {}",
            "No taste profile yet — watch, like, or search to get personalized ranking.".dimmed()
        );
    }
}

/// Display a plain ranked movie list (similar / also-watched / catalog views).
pub fn display_movie_list(heading: &str, movies: &[Movie]) {
    if movies.is_empty() {
        println!("No results.");
        return;
    }

    println!("\n{}", format!("=== {heading} ===").bold());
    println!();

    for (i, movie) in movies.iter().enumerate() {
        println!(
            "  {:>2}. {:<36} {:>4}  {:>4.1}  {}",
            i + 1,
            truncate_chars(&movie.title, 34),
            movie.year,
            movie.rating,
            movie.genres.join(", ").dimmed(),
        );
    }
    println!();
}

/// Display trending movies with their interaction counts.
pub fn display_trending(ranked: &[(Movie, i64)]) {
    if ranked.is_empty() {
        println!("No interactions recorded yet — nothing is trending.");
        return;
    }

    println!("\n{}", "=== Trending ===".bold());
    println!();

    for (i, (movie, count)) in ranked.iter().enumerate() {
        let events = if *count == 1 { "event" } else { "events" };
        println!(
            "  {:>2}. {:<36} {:>4.1}  {}",
            i + 1,
            truncate_chars(&movie.title, 34),
            movie.rating,
            format!("{count} {events}").dimmed(),
        );
    }
    println!();
}

/// Display a user's interaction history, newest first.
pub fn display_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }

    println!(
        "\n{}",
        format!("=== History ({} events) ===", entries.len()).bold()
    );
    println!();

    for entry in entries {
        let detail = if entry.watch_seconds > 0 {
            format!("{} ({}s)", entry.kind, entry.watch_seconds)
        } else {
            entry.kind.to_string()
        };
        println!(
            "  {:<20} {:<36} {}",
            detail,
            truncate_chars(&entry.movie.title, 34),
            entry.recorded_at.dimmed(),
        );
    }
    println!();
}
