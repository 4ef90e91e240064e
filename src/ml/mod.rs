pub mod classifier;
pub mod kmeans;
pub mod r#trait;
pub mod vectorizer;

pub use classifier::{train_test_split, unzip_examples, NearestCentroidClassifier};
pub use kmeans::KMeansClusterer;
pub use r#trait::{CategoryClassifier, DocumentClusterer};
pub use vectorizer::{cosine_similarity, TfidfVectorizer};
