// Content-based candidates — rank the catalog by similarity to a seed set.
//
// Seed rows from the similarity matrix are summed element-wise, so a movie
// close to several seeds outranks one close to a single seed. Seeds
// themselves never appear in the output.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::catalog::similarity::SimilarityModel;
use crate::db::models::Movie;

/// Rank catalog items by aggregate similarity to the seed set.
///
/// `movies` must be the same snapshot `model` was built from. Seed ids
/// missing from the catalog are silently skipped. When no seed id is valid,
/// this falls back to an unordered random sample of `top_n` items — a
/// deliberate low-confidence answer, not an error.
pub fn similar_to(
    model: &SimilarityModel,
    movies: &[Movie],
    seed_ids: &HashSet<i64>,
    top_n: usize,
) -> Vec<Movie> {
    let seed_indices: Vec<usize> = seed_ids
        .iter()
        .filter_map(|&id| model.index_of(id))
        .collect();

    if seed_indices.is_empty() {
        debug!(seeds = seed_ids.len(), "No valid seeds, sampling the catalog");
        return movies
            .choose_multiple(&mut rand::rng(), top_n)
            .cloned()
            .collect();
    }

    // Element-wise sum of the seeds' similarity rows
    let mut aggregate = vec![0.0; model.len()];
    for &seed in &seed_indices {
        for (i, sim) in model.row(seed).iter().enumerate() {
            aggregate[i] += sim;
        }
    }

    let mut ranked: Vec<(usize, f64)> = aggregate.into_iter().enumerate().collect();
    // Stable sort: equal scores keep catalog order, so a fixed snapshot
    // always ranks the same way
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .filter(|&(i, _)| !seed_ids.contains(&movies[i].id))
        .take(top_n)
        .map(|(i, _)| movies[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, genres: &[&str], description: &str) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            description: description.to_string(),
            rating: 7.0,
            year: 2000,
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, &["Sci-Fi"], "dream heist inside layered dreams"),
            movie(2, &["Sci-Fi"], "dream simulation heist rebels"),
            movie(3, &["Sci-Fi"], "wormhole voyage beyond the stars"),
            movie(4, &["Crime"], "mob family empire succession"),
            movie(5, &["Crime"], "hitmen diner bandits intertwined"),
        ]
    }

    #[test]
    fn seeds_never_appear_in_output() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let seeds: HashSet<i64> = [1, 2].into_iter().collect();
        let results = similar_to(&model, &movies, &seeds, 5);
        assert!(results.iter().all(|m| !seeds.contains(&m.id)));
    }

    #[test]
    fn closest_movie_ranks_first() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let seeds: HashSet<i64> = [1].into_iter().collect();
        let results = similar_to(&model, &movies, &seeds, 2);
        // Movie 2 shares "dream" and "heist" with the seed
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn unknown_seeds_are_skipped_not_fatal() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let seeds: HashSet<i64> = [1, 999].into_iter().collect();
        let results = similar_to(&model, &movies, &seeds, 2);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn all_unknown_seeds_fall_back_to_a_sample() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let seeds: HashSet<i64> = [998, 999].into_iter().collect();
        let results = similar_to(&model, &movies, &seeds, 3);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn empty_seed_set_falls_back_too() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let results = similar_to(&model, &movies, &HashSet::new(), 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let model = SimilarityModel::build(&[]);
        let results = similar_to(&model, &[], &HashSet::new(), 5);
        assert!(results.is_empty());
    }

    #[test]
    fn top_n_truncates() {
        let movies = catalog();
        let model = SimilarityModel::build(&movies);
        let seeds: HashSet<i64> = [1].into_iter().collect();
        assert_eq!(similar_to(&model, &movies, &seeds, 2).len(), 2);
    }
}
