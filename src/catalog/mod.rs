// Catalog indexing — TF-IDF document vectors and the pairwise similarity model.
//
// The model is a value, not shared state: `SimilarityModel::build` takes a
// catalog snapshot and returns a self-contained matrix that callers thread
// through the ranking code. It is rebuilt wholesale on every recommendation
// cycle so results always reflect the latest catalog.

pub mod similarity;
pub mod vectorize;
