use crate::constants::ENGLISH_STOP_WORDS;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashSet};

/// TF-IDF weighting over a vocabulary learned from a corpus.
///
/// Tokens are lowercase runs of two or more word characters. Weights are raw
/// term counts times smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and every row
/// is L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<&'static str>,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Vectorizer that drops English stop words
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .map(|token| token.to_lowercase())
            .filter(|token| !self.stop_words.contains(token.as_str()))
            .collect()
    }

    /// Learn vocabulary and idf weights
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let unique: HashSet<String> = self.tokenize(document).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(Error::library(
                "empty vocabulary; the documents only contain stop words",
            ));
        }

        let n = documents.len() as f32;
        self.vocabulary = document_frequency
            .keys()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        self.idf = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        Ok(())
    }

    /// L2-normalized TF-IDF row for one document. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut row = vec![0.0f32; self.vocabulary.len()];
        for token in self.tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                row[index] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<Vec<f32>>> {
        self.fit(documents)?;
        Ok(documents.iter().map(|d| self.transform(d)).collect())
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Compute cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
