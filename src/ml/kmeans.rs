use crate::constants::KMEANS_RESTARTS;
use crate::error::{Error, Result};
use crate::ml::r#trait::DocumentClusterer;
use crate::ml::vectorizer::TfidfVectorizer;
use ndarray::Array2;
use std::collections::HashMap;

/// k-means over TF-IDF rows.
///
/// kentro picks its starting centroids at random, so each fit runs several
/// times and keeps the run with the lowest inertia. Labels are then renumbered
/// in order of first appearance, which makes the output independent of how
/// kentro happened to number its clusters.
pub struct KMeansClusterer {
    clusters: usize,
    iterations: usize,
}

impl KMeansClusterer {
    pub fn new(clusters: usize, iterations: usize) -> Self {
        Self {
            clusters: clusters.max(1),
            iterations: iterations.max(1),
        }
    }

    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// One kentro run; returns the centroids as plain rows
    fn train_once(&self, data: &Array2<f32>, dims: usize) -> Result<Vec<Vec<f32>>> {
        let mut kmeans = kentro::KMeans::new(self.clusters)
            .with_iterations(self.iterations)
            .with_euclidean(true);

        if kmeans.train(data.view(), None).is_err() {
            return Err(Error::library("k-means training failed"));
        }

        let centroids = kmeans
            .centroids()
            .ok_or_else(|| Error::library("k-means produced no centroids"))?;

        let n_centroids = centroids.shape()[0];
        Ok((0..n_centroids)
            .map(|i| (0..dims).map(|j| centroids[[i, j]]).collect())
            .collect())
    }
}

impl DocumentClusterer for KMeansClusterer {
    fn fit_predict(&self, documents: &[String]) -> Result<Vec<usize>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectorizer = TfidfVectorizer::english();
        let rows = vectorizer.fit_transform(documents)?;

        // Identical documents always share a cluster
        let (distinct, row_to_distinct) = distinct_rows(&rows);

        // Not enough distinct documents to split: each one is its own cluster
        if distinct.len() <= self.clusters {
            return Ok(row_to_distinct);
        }

        // Train on distinct rows so no two starting centroids coincide
        let dims = vectorizer.vocabulary_len();
        let flat: Vec<f32> = distinct.iter().flat_map(|row| row.iter().copied()).collect();
        let data = Array2::from_shape_vec((distinct.len(), dims), flat)
            .map_err(|e| Error::library(format!("failed to shape TF-IDF matrix: {}", e)))?;

        let mut best: Option<(f32, Vec<usize>)> = None;
        for _ in 0..KMEANS_RESTARTS {
            let centers = self.train_once(&data, dims)?;

            // Assign every document to its nearest centroid
            let mut inertia = 0.0;
            let labels: Vec<usize> = rows
                .iter()
                .map(|row| {
                    let (index, distance) = nearest_center(row, &centers);
                    inertia += distance;
                    index
                })
                .collect();

            if best.as_ref().map_or(true, |(lowest, _)| inertia < *lowest) {
                best = Some((inertia, labels));
            }
        }

        let (inertia, labels) = best.ok_or_else(|| Error::library("k-means did not run"))?;
        tracing::debug!(inertia, restarts = KMEANS_RESTARTS, "k-means finished");
        Ok(relabel_by_first_appearance(&labels))
    }
}

/// Unique rows in first-seen order, plus the unique index of every input row
fn distinct_rows(rows: &[Vec<f32>]) -> (Vec<&[f32]>, Vec<usize>) {
    let mut seen: HashMap<Vec<u32>, usize> = HashMap::new();
    let mut distinct: Vec<&[f32]> = Vec::new();
    let mut mapping = Vec::with_capacity(rows.len());

    for row in rows {
        let key: Vec<u32> = row.iter().map(|v| v.to_bits()).collect();
        let index = *seen.entry(key).or_insert_with(|| {
            distinct.push(row.as_slice());
            distinct.len() - 1
        });
        mapping.push(index);
    }

    (distinct, mapping)
}

/// Renumber labels so the first document is cluster 0, the next new one 1, ...
fn relabel_by_first_appearance(labels: &[usize]) -> Vec<usize> {
    let mut order: HashMap<usize, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            let next = order.len();
            *order.entry(*label).or_insert(next)
        })
        .collect()
}

/// Index of the closest center and the squared distance to it
fn nearest_center(row: &[f32], centers: &[Vec<f32>]) -> (usize, f32) {
    let mut best = 0;
    let mut best_distance = f32::MAX;
    for (index, center) in centers.iter().enumerate() {
        // Euclidean distance squared (no need for sqrt for comparison)
        let distance: f32 = row
            .iter()
            .zip(center)
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    (best, best_distance)
}
