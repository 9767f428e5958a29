// Genre profile — what a user's history says about their tastes.
//
// Two signal sources accumulate into one map of genre tag -> score:
// interaction events (likes and meaningful watches) and search queries that
// mention a known genre by name. Dislikes are recorded but contribute
// nothing; watches of a minute or less are treated as noise.

use std::collections::HashMap;

use colored::Colorize;

use crate::db::models::{Interaction, InteractionKind, Movie, SearchEvent};

/// Scoring constants for profile accumulation.
pub struct ProfileWeights {
    /// Points a like awards to each of the movie's genres
    pub like_points: u32,
    /// Points per full minute watched
    pub watch_points_per_minute: u32,
    /// Cap on the points a single watch event can award
    pub watch_points_cap: u32,
    /// Points a search query awards to each genre it mentions
    pub search_match_points: u32,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            like_points: 10,
            watch_points_per_minute: 3,
            watch_points_cap: 30,
            search_match_points: 5,
        }
    }
}

/// A user's accumulated genre affinities at one point in time.
///
/// Genres with no signal are absent, never present with score zero, so
/// `is_empty` doubles as "no ranking signal available".
#[derive(Debug, Clone, Default)]
pub struct GenreProfile {
    scores: HashMap<String, u32>,
}

impl GenreProfile {
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Accumulated score for one genre; absent genres score zero.
    pub fn score(&self, genre: &str) -> u32 {
        self.scores.get(genre).copied().unwrap_or(0)
    }

    /// The highest accumulated score across all genres.
    pub fn max_score(&self) -> u32 {
        self.scores.values().copied().max().unwrap_or(0)
    }

    /// Genres ranked by score descending, names breaking ties.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .scores
            .iter()
            .map(|(genre, &score)| (genre.as_str(), score))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }

    /// Display the profile as a bar chart in the terminal, strongest first.
    pub fn display(&self) {
        if self.scores.is_empty() {
            println!("No taste signal yet — watch, like, or search for something first.");
            return;
        }

        println!("\n{}", "=== Genre Profile ===".bold());
        println!();

        let max = self.max_score().max(1);
        let bar_width: usize = 20;

        for (i, (genre, score)) in self.ranked().iter().enumerate() {
            let filled = (*score as usize * bar_width) / max as usize;
            let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled));

            let colored_bar = if score * 3 >= max * 2 {
                bar.bright_green()
            } else if score * 3 >= max {
                bar.bright_yellow()
            } else {
                bar.bright_blue()
            };

            println!("  {:>2}. {:<16} {} {}", i + 1, genre.bold(), colored_bar, score);
        }
        println!();
    }
}

/// Build a user's genre profile from their interaction and search history.
///
/// `interactions` and `searches` may be full snapshots — events belonging to
/// other users are ignored. `movies` supplies the genre tags both for event
/// resolution and for search matching; events referencing items no longer in
/// the catalog contribute nothing.
pub fn build_genre_profile(
    movies: &[Movie],
    interactions: &[Interaction],
    searches: &[SearchEvent],
    user_id: i64,
    weights: &ProfileWeights,
) -> GenreProfile {
    let by_id: HashMap<i64, &Movie> = movies.iter().map(|m| (m.id, m)).collect();
    let mut scores: HashMap<String, u32> = HashMap::new();

    // 1. Interaction events: each event's points go in full to every genre
    //    of the item, not divided among them
    for event in interactions.iter().filter(|i| i.user_id == user_id) {
        let Some(movie) = by_id.get(&event.movie_id) else {
            continue;
        };

        let points = match event.kind {
            InteractionKind::Like => weights.like_points,
            InteractionKind::Watch => watch_points(event.watch_seconds, weights),
            InteractionKind::Dislike => 0,
        };
        if points == 0 {
            continue;
        }

        for genre in &movie.genres {
            *scores.entry(genre.clone()).or_insert(0) += points;
        }
    }

    // 2. Search queries: every known genre named anywhere in the query text
    //    gets credit, word boundaries notwithstanding
    let mut known_genres: Vec<&String> = Vec::new();
    for movie in movies {
        for genre in &movie.genres {
            if !known_genres.contains(&genre) {
                known_genres.push(genre);
            }
        }
    }

    for search in searches.iter().filter(|s| s.user_id == user_id) {
        let query = search.query.to_lowercase();
        for &genre in &known_genres {
            if query.contains(&genre.to_lowercase()) {
                *scores.entry(genre.clone()).or_insert(0) += weights.search_match_points;
            }
        }
    }

    GenreProfile { scores }
}

/// Points for a single watch event: per-minute credit with a cap. Anything
/// up to a minute counts for nothing.
fn watch_points(watch_seconds: u32, weights: &ProfileWeights) -> u32 {
    if watch_seconds <= 60 {
        return 0;
    }
    let earned = watch_seconds * weights.watch_points_per_minute / 60;
    earned.min(weights.watch_points_cap)
}

/// The user's most-watched genres — a plain frequency count over watch and
/// like events, independent of the scored profile.
pub fn top_interests(
    movies: &[Movie],
    interactions: &[Interaction],
    user_id: i64,
    limit: usize,
) -> Vec<String> {
    let by_id: HashMap<i64, &Movie> = movies.iter().map(|m| (m.id, m)).collect();
    let mut counts: Vec<(String, u32)> = Vec::new();

    for event in interactions.iter().filter(|i| i.user_id == user_id) {
        if event.kind == InteractionKind::Dislike {
            continue;
        }
        let Some(movie) = by_id.get(&event.movie_id) else {
            continue;
        };
        for genre in &movie.genres {
            match counts.iter_mut().find(|(g, _)| g == genre) {
                Some((_, c)) => *c += 1,
                None => counts.push((genre.clone(), 1)),
            }
        }
    }

    // Stable sort: first-seen order breaks ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(g, _)| g).collect()
}
