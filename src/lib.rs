pub mod config;
pub mod constants;
pub mod error;
pub mod ml;
pub mod models;
pub mod ocr;
pub mod organizer;
pub mod utils;
pub mod workspace;

pub use config::Config;
pub use error::{Error, Result};
pub use ml::{CategoryClassifier, DocumentClusterer};
pub use models::{ActivityLog, Assignment, Label};
pub use ocr::TextRecognizer;
pub use workspace::{Prediction, Workspace};
