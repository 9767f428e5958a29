// Hybrid ranking — turns raw history into a ranked, annotated list.
//
// Every call rebuilds the similarity model from the catalog snapshot it is
// handed, gathers content and collaborative candidates seeded from the
// user's strong-interest items, then re-ranks the pool against the genre
// profile. Freshness over throughput: no state survives between calls.

use std::collections::HashSet;

use tracing::info;

use crate::catalog::similarity::SimilarityModel;
use crate::db::models::{Interaction, InteractionKind, Movie, ScoredMovie, SearchEvent};
use crate::engine::collaborative;
use crate::engine::content;
use crate::engine::profile::{self, GenreProfile, ProfileWeights};

/// Pool sizes and thresholds for candidate gathering and scoring.
pub struct RankerConfig {
    /// Candidates requested from each of the content and collaborative sources
    pub source_pool: usize,
    /// Pool size the backfill step tops up to when both sources run dry
    pub backfill_pool: usize,
    /// Minimum pool size before backfill kicks in
    pub min_pool: usize,
    /// Pool size for users with no history at all
    pub cold_start_pool: usize,
    /// Watch duration (seconds) above which a watch counts as strong interest
    pub strong_watch_seconds: u32,
    /// Display ceiling for match scores. 99, never 100 — a match is never
    /// shown as certain, and the rating boost needs headroom.
    pub max_display_score: u8,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            source_pool: 15,
            backfill_pool: 20,
            min_pool: 10,
            cold_start_pool: 20,
            strong_watch_seconds: 300,
            max_display_score: 99,
        }
    }
}

/// Produce the final ranked list for a user.
///
/// `movies` is the full catalog snapshot; `interactions` and `searches` are
/// full event snapshots (events of other users feed the collaborative
/// signal). The similarity model is rebuilt here, at the top of the call,
/// so results never reflect a stale catalog.
pub fn recommend(
    movies: &[Movie],
    interactions: &[Interaction],
    searches: &[SearchEvent],
    user_id: i64,
    top_n: usize,
    config: &RankerConfig,
    weights: &ProfileWeights,
) -> Vec<ScoredMovie> {
    let model = SimilarityModel::build(movies);

    let user_events: Vec<&Interaction> = interactions
        .iter()
        .filter(|i| i.user_id == user_id)
        .collect();

    let pool = if user_events.is_empty() {
        info!(user = user_id, "Cold start, falling back to top-rated pool");
        top_rated(movies, config.cold_start_pool)
    } else {
        gather_pool(&model, movies, interactions, &user_events, user_id, config)
    };

    // The genre profile decides whether we can rank at all
    let profile = profile::build_genre_profile(movies, interactions, searches, user_id, weights);
    if profile.is_empty() {
        // No signal to rank on — hand back the pool as-is, unannotated
        return pool
            .into_iter()
            .take(top_n)
            .map(|movie| ScoredMovie {
                movie,
                match_score: None,
                match_reason: None,
            })
            .collect();
    }

    let mut scored: Vec<ScoredMovie> = pool
        .into_iter()
        .map(|movie| score_candidate(movie, &profile, config))
        .collect();

    // Stable sort keeps pool order among equal scores
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(top_n);

    info!(user = user_id, results = scored.len(), "Ranked recommendations");
    scored
}

/// Assemble the candidate pool for a user with history: content candidates
/// seeded from strong-interest items, collaborative candidates, then a
/// rating-ranked backfill if both sources come up short.
fn gather_pool(
    model: &SimilarityModel,
    movies: &[Movie],
    interactions: &[Interaction],
    user_events: &[&Interaction],
    user_id: i64,
    config: &RankerConfig,
) -> Vec<Movie> {
    let strong_interest: HashSet<i64> = user_events
        .iter()
        .filter(|i| {
            i.kind == InteractionKind::Like
                || (i.kind == InteractionKind::Watch
                    && i.watch_seconds > config.strong_watch_seconds)
        })
        .map(|i| i.movie_id)
        .collect();

    let content_recs = if strong_interest.is_empty() {
        // Nothing the user cared about enough to seed a similarity query
        Vec::new()
    } else {
        content::similar_to(model, movies, &strong_interest, config.source_pool)
    };

    let collab_recs = collaborative::also_watched(movies, interactions, user_id, config.source_pool);

    // Union, deduplicated by id; content candidates keep their position and
    // a later duplicate is discarded
    let mut seen = HashSet::new();
    let mut pool: Vec<Movie> = content_recs
        .into_iter()
        .chain(collab_recs)
        .filter(|m| seen.insert(m.id))
        .collect();

    if pool.len() < config.min_pool {
        let touched: HashSet<i64> = user_events.iter().map(|i| i.movie_id).collect();
        let fill = config.backfill_pool.saturating_sub(pool.len());
        pool.extend(
            top_rated(movies, movies.len())
                .into_iter()
                .filter(|m| !touched.contains(&m.id) && !seen.contains(&m.id))
                .take(fill),
        );
    }

    pool
}

/// Score one candidate against the profile and pick its display reason.
fn score_candidate(movie: Movie, profile: &GenreProfile, config: &RankerConfig) -> ScoredMovie {
    let max_score = profile.max_score().max(1);

    let raw: u32 = movie.genres.iter().map(|g| profile.score(g)).sum();

    // Normalize against the user's strongest genre, then nudge by catalog
    // rating, capping at the display ceiling
    let percent = (raw * 100 / max_score).min(100);
    let boosted = percent + movie.rating.floor() as u32;
    let final_score = boosted.min(u32::from(config.max_display_score)) as u8;

    let reason = match best_genre(&movie, profile) {
        Some(genre) => format!("Because you watch {genre}"),
        None => "Popular right now".to_string(),
    };

    ScoredMovie {
        movie,
        match_score: Some(final_score),
        match_reason: Some(reason),
    }
}

/// The genre among the movie's tags with the highest profile score, first
/// occurrence winning ties. None when every tag scores zero — the caller
/// shows a generic reason instead.
fn best_genre<'a>(movie: &'a Movie, profile: &GenreProfile) -> Option<&'a str> {
    let mut best: Option<(&str, u32)> = None;
    for genre in &movie.genres {
        let score = profile.score(genre);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((genre.as_str(), score)),
        }
    }
    best.filter(|&(_, score)| score > 0).map(|(genre, _)| genre)
}

/// The catalog's highest-rated items. Stable sort, so equal ratings keep
/// their catalog order.
fn top_rated(movies: &[Movie], limit: usize) -> Vec<Movie> {
    let mut ranked: Vec<Movie> = movies.to_vec();
    ranked.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}
