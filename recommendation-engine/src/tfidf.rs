//! Term-frequency / inverse-document-frequency vectorization over interest
//! fingerprints. Vocabulary order is the sorted term order, idf uses the
//! smoothed form ln((1 + n) / (1 + df)) + 1 and vectors are l2-normalized,
//! so equal fingerprints always score cosine 1.0.

use std::collections::{BTreeMap, HashSet};

pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and document frequencies from the corpus.
    pub fn fit(documents: &[String]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let mut seen: HashSet<String> = HashSet::new();
            for token in tokenize(document) {
                if seen.insert(token.clone()) {
                    *document_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        let n = documents.len();
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term, index);
            idf.push(((1 + n) as f64 / (1 + df) as f64).ln() + 1.0);
        }
        Self { vocabulary, idf }
    }

    /// Maps a document onto the learned vocabulary. Terms outside the
    /// vocabulary are dropped; the result is l2-normalized unless empty.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.idf.len()];
        for token in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Lowercases and splits on non-alphanumeric characters; tokens shorter
/// than two characters are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(String::from)
        .collect()
}
