// TF-IDF document vectorization.
//
// Each movie becomes one document: its genre tags followed by its free-text
// description. Words that appear in every document get downweighted, while
// words distinctive to a few movies get boosted. Vectors are L2-normalized,
// so the dot product of two vectors IS their cosine similarity.
//
// Vocabulary indices are assigned in first-occurrence order and nothing here
// is randomized, so vectorizing the same documents twice yields identical
// vectors.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};

/// Sparse, L2-normalized TF-IDF vectors over a shared vocabulary.
pub struct DocumentVectors {
    /// One weight vector per input document: (term index, weight) pairs
    /// sorted by term index
    vectors: Vec<Vec<(usize, f64)>>,
    /// Number of distinct terms across the corpus
    vocabulary_size: usize,
}

/// Lowercase a text and split it into alphanumeric runs.
///
/// Single-character fragments are dropped — they're mostly debris from
/// contractions ("humanity's" -> "humanity", "s") and carry no signal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(str::to_string)
        .collect()
}

/// Vectorize a set of documents into TF-IDF weight vectors.
pub fn vectorize(documents: &[String]) -> DocumentVectors {
    let stopwords: HashSet<String> = get(LANGUAGE::English).into_iter().collect();

    // Tokenize everything up front, assigning vocabulary indices as terms
    // first appear
    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    let tokenized: Vec<Vec<usize>> = documents
        .iter()
        .map(|doc| {
            tokenize(doc)
                .into_iter()
                .filter(|t| !stopwords.contains(t))
                .map(|t| {
                    let next = vocabulary.len();
                    *vocabulary.entry(t).or_insert(next)
                })
                .collect()
        })
        .collect();

    let n_docs = documents.len();
    let n_terms = vocabulary.len();

    // Document frequency per term
    let mut doc_freq = vec![0u32; n_terms];
    for terms in &tokenized {
        let distinct: HashSet<usize> = terms.iter().copied().collect();
        for t in distinct {
            doc_freq[t] += 1;
        }
    }

    // Smoothed IDF: ln((1 + N) / (1 + df)) + 1. The smoothing keeps every
    // weight finite and nonzero, even for terms in every document.
    let idf: Vec<f64> = doc_freq
        .iter()
        .map(|&df| ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0)
        .collect();

    let vectors = tokenized
        .iter()
        .map(|terms| {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for &t in terms {
                *counts.entry(t).or_insert(0) += 1;
            }

            let mut weights: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(t, count)| (t, f64::from(count) * idf[t]))
                .collect();
            weights.sort_by_key(|&(t, _)| t);

            // L2 normalization so cosine reduces to a dot product
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut weights {
                    *w /= norm;
                }
            }
            weights
        })
        .collect();

    DocumentVectors {
        vectors,
        vocabulary_size: n_terms,
    }
}

impl DocumentVectors {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Cosine similarity between two documents by index.
    ///
    /// Vectors are already unit length, so this is a sparse dot product.
    /// A document with no terms left after stopword removal is a zero
    /// vector and scores 0.0 against everything, itself included.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        dot_sparse(&self.vectors[a], &self.vectors[b])
    }
}

fn dot_sparse(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
