use crate::error::{Error, Result};

/// Unsupervised grouping of text documents
pub trait DocumentClusterer {
    /// Fit on `documents` and return one cluster id per document, in input order
    fn fit_predict(&self, documents: &[String]) -> Result<Vec<usize>>;
}

/// Supervised text classifier
pub trait CategoryClassifier {
    /// Train on parallel slices of texts and their categories
    fn fit(&mut self, texts: &[String], labels: &[String]) -> Result<()>;

    /// Predict the category of one text
    fn predict(&self, text: &str) -> Result<String>;

    /// Accuracy in [0, 1] on a labelled set
    fn score(&self, texts: &[String], labels: &[String]) -> Result<f32> {
        if texts.len() != labels.len() {
            return Err(Error::library(format!(
                "got {} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        if texts.is_empty() {
            return Ok(0.0);
        }

        let mut correct = 0usize;
        for (text, label) in texts.iter().zip(labels) {
            if &self.predict(text)? == label {
                correct += 1;
            }
        }
        Ok(correct as f32 / texts.len() as f32)
    }
}
