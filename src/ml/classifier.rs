use crate::config::TrainingExample;
use crate::error::{Error, Result};
use crate::ml::r#trait::CategoryClassifier;
use crate::ml::vectorizer::{cosine_similarity, TfidfVectorizer};

/// Classifies text by cosine similarity to the mean TF-IDF vector of each category
#[derive(Debug, Clone, Default)]
pub struct NearestCentroidClassifier {
    vectorizer: TfidfVectorizer,
    /// (category, centroid) in first-seen training order
    centroids: Vec<(String, Vec<f32>)>,
}

impl NearestCentroidClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories the model can predict, in training order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.centroids.iter().map(|(name, _)| name.as_str())
    }
}

impl CategoryClassifier for NearestCentroidClassifier {
    fn fit(&mut self, texts: &[String], labels: &[String]) -> Result<()> {
        if texts.len() != labels.len() {
            return Err(Error::library(format!(
                "got {} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        if texts.is_empty() {
            return Err(Error::library("cannot fit a classifier on an empty training set"));
        }

        let rows = self.vectorizer.fit_transform(texts)?;
        let dims = self.vectorizer.vocabulary_len();

        let mut sums: Vec<(String, Vec<f32>, usize)> = Vec::new();
        for (row, label) in rows.iter().zip(labels) {
            let position = match sums.iter().position(|(name, _, _)| name == label) {
                Some(position) => position,
                None => {
                    sums.push((label.clone(), vec![0.0; dims], 0));
                    sums.len() - 1
                }
            };
            let (_, sum, count) = &mut sums[position];
            for (acc, value) in sum.iter_mut().zip(row) {
                *acc += value;
            }
            *count += 1;
        }

        self.centroids = sums
            .into_iter()
            .map(|(name, mut sum, count)| {
                for value in &mut sum {
                    *value /= count as f32;
                }
                (name, sum)
            })
            .collect();

        Ok(())
    }

    fn predict(&self, text: &str) -> Result<String> {
        if self.centroids.is_empty() {
            return Err(Error::library("classifier has not been fitted"));
        }

        let row = self.vectorizer.transform(text);
        let mut best = &self.centroids[0];
        let mut best_similarity = cosine_similarity(&row, &best.1);
        for candidate in &self.centroids[1..] {
            let similarity = cosine_similarity(&row, &candidate.1);
            if similarity > best_similarity {
                best_similarity = similarity;
                best = candidate;
            }
        }
        Ok(best.0.clone())
    }
}

/// Hold out the last `ceil(n * test_fraction)` examples, always keeping one for training
pub fn train_test_split(
    examples: &[TrainingExample],
    test_fraction: f32,
) -> (&[TrainingExample], &[TrainingExample]) {
    let n = examples.len();
    let fraction = test_fraction.clamp(0.0, 1.0);
    let held_out = ((n as f32) * fraction).ceil() as usize;
    let held_out = held_out.min(n.saturating_sub(1));
    examples.split_at(n - held_out)
}

/// Split examples into parallel text and label vectors
pub fn unzip_examples(examples: &[TrainingExample]) -> (Vec<String>, Vec<String>) {
    examples
        .iter()
        .map(|e| (e.text.clone(), e.category.clone()))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_predict_nearest_category() {
        let mut classifier = NearestCentroidClassifier::new();
        classifier
            .fit(
                &strings(&["budget report", "holiday photo", "project plan", "beach video"]),
                &strings(&["Documents", "Images", "Documents", "Videos"]),
            )
            .unwrap();

        let categories: Vec<&str> = classifier.categories().collect();
        assert_eq!(categories, vec!["Documents", "Images", "Videos"]);
        assert_eq!(classifier.predict("quarterly budget").unwrap(), "Documents");
        assert_eq!(classifier.predict("photo of the holiday").unwrap(), "Images");
        assert_eq!(classifier.predict("a video at the beach").unwrap(), "Videos");
    }

    #[test]
    fn test_unknown_text_falls_back_to_first_category() {
        let mut classifier = NearestCentroidClassifier::new();
        classifier
            .fit(&strings(&["budget", "photo"]), &strings(&["Documents", "Images"]))
            .unwrap();
        assert_eq!(classifier.predict("completely unrelated").unwrap(), "Documents");
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let classifier = NearestCentroidClassifier::new();
        assert!(matches!(classifier.predict("anything"), Err(Error::Library(_))));
    }

    #[test]
    fn test_fit_rejects_mismatched_lengths() {
        let mut classifier = NearestCentroidClassifier::new();
        let result = classifier.fit(&strings(&["one", "two"]), &strings(&["A"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_score() {
        let mut classifier = NearestCentroidClassifier::new();
        classifier
            .fit(&strings(&["budget report", "holiday photo"]), &strings(&["Documents", "Images"]))
            .unwrap();
        let accuracy = classifier
            .score(
                &strings(&["budget", "photo", "budget"]),
                &strings(&["Documents", "Images", "Images"]),
            )
            .unwrap();
        assert!((accuracy - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_train_test_split_default_set() {
        let config = ClassifierConfig::default();
        let (train, test) = train_test_split(&config.training, 0.25);
        assert_eq!(train.len(), 3);
        assert_eq!(test.len(), 1);
        assert_eq!(test[0].text, "beach video");
    }

    #[test]
    fn test_train_test_split_keeps_one_for_training() {
        let config = ClassifierConfig::default();
        let (train, test) = train_test_split(&config.training[..1], 0.5);
        assert_eq!(train.len(), 1);
        assert!(test.is_empty());

        let (train, test) = train_test_split(&config.training, 0.0);
        assert_eq!(train.len(), 4);
        assert!(test.is_empty());
    }
}
