// Collaborative candidates — "viewers like you also watched".
//
// An item-neighborhood heuristic over raw co-occurrence counts: find the
// users who touched any of the target user's items, then count what else
// those users touched. There is no popularity normalization and no weighting
// by interaction strength — for a catalog this size the raw counts carry
// the signal, and the hybrid ranker re-scores everything against the genre
// profile anyway.

use std::collections::{HashMap, HashSet};

use crate::db::models::{Interaction, Movie};

/// Items that co-interacting users touched and the target user has not,
/// ranked by how many of their interactions landed on each item.
///
/// A user with no history gets an empty list — there is no collaborative
/// signal to work from, and the caller's other sources cover that case.
pub fn also_watched(
    movies: &[Movie],
    interactions: &[Interaction],
    user_id: i64,
    top_n: usize,
) -> Vec<Movie> {
    let touched: HashSet<i64> = interactions
        .iter()
        .filter(|i| i.user_id == user_id)
        .map(|i| i.movie_id)
        .collect();

    if touched.is_empty() {
        return Vec::new();
    }

    // Users who share at least one item with the target user
    let neighbors: HashSet<i64> = interactions
        .iter()
        .filter(|i| i.user_id != user_id && touched.contains(&i.movie_id))
        .map(|i| i.user_id)
        .collect();

    // Count the neighbors' events on items the target user hasn't touched
    let mut counts: HashMap<i64, u32> = HashMap::new();
    for event in interactions {
        if neighbors.contains(&event.user_id) && !touched.contains(&event.movie_id) {
            *counts.entry(event.movie_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(i64, u32)> = counts.into_iter().collect();
    // Ties broken by lower id so a fixed event history ranks deterministically
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let by_id: HashMap<i64, &Movie> = movies.iter().map(|m| (m.id, m)).collect();
    ranked
        .into_iter()
        .take(top_n)
        .filter_map(|(id, _)| by_id.get(&id).map(|&m| m.clone()))
        .collect()
}
