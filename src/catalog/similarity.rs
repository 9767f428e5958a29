// SimilarityModel — a catalog snapshot's dense item-to-item cosine matrix.
//
// Rebuilt from scratch at the top of every recommendation cycle. The O(N²)
// cost is the price of never serving results computed against a stale
// catalog; for the catalog sizes this tool targets, a rebuild is cheap.

use std::collections::HashMap;

use tracing::info;

use super::vectorize;
use crate::db::models::Movie;

/// Item-to-item similarity for one catalog snapshot.
///
/// Movies are addressed by dense index in catalog order, with an id lookup
/// on the side. The matrix is symmetric and `matrix[i][i]` is the maximum
/// of row i (1.0 for any movie with at least one indexed term).
pub struct SimilarityModel {
    ids: Vec<i64>,
    index_of: HashMap<i64, usize>,
    matrix: Vec<Vec<f64>>,
}

impl SimilarityModel {
    /// Build the model from a catalog snapshot.
    ///
    /// An empty catalog yields an empty model — callers handle zero
    /// candidates rather than treating it as an error.
    pub fn build(movies: &[Movie]) -> Self {
        let documents: Vec<String> = movies.iter().map(Movie::document).collect();
        let vectors = vectorize::vectorize(&documents);

        let n = movies.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let sim = vectors.cosine(i, j);
                matrix[i][j] = sim;
                // Mirror the upper triangle so symmetry is exact, not
                // merely within floating-point error
                matrix[j][i] = sim;
            }
        }

        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
        let index_of = ids.iter().enumerate().map(|(idx, &id)| (id, idx)).collect();

        info!(
            movies = n,
            terms = vectors.vocabulary_size(),
            "Built similarity model"
        );

        Self {
            ids,
            index_of,
            matrix,
        }
    }

    /// Number of movies in the snapshot this model was built from.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dense index of a movie id, if the id was in the snapshot.
    pub fn index_of(&self, movie_id: i64) -> Option<usize> {
        self.index_of.get(&movie_id).copied()
    }

    /// Full similarity row for the movie at `index`.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.matrix[index]
    }

    /// Similarity between two movies by id. None if either id is unknown.
    pub fn similarity(&self, a: i64, b: i64) -> Option<f64> {
        Some(self.matrix[self.index_of(a)?][self.index_of(b)?])
    }
}
