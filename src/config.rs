use crate::constants::{
    CLUSTER_FOLDER_PREFIX, DEFAULT_CATEGORIES, DEFAULT_CATEGORY, DEFAULT_CLUSTER_COUNT,
    DEFAULT_KMEANS_ITERATIONS, DEFAULT_OCR_LANGUAGE, DEFAULT_TEST_FRACTION, TRAINING_EXAMPLES,
    UNPACKED_FOLDER,
};
use crate::error::{Error, Result};
use crate::organizer::CategoryTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit settings file
pub const CONFIG_ENV_VAR: &str = "TIDYFS_CONFIG";

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub organizer: OrganizerConfig,
    pub categories: Vec<CategoryConfig>,
    pub cluster: ClusterConfig,
    pub classifier: ClassifierConfig,
    pub ocr: OcrConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    pub default_category: String,
    pub unpack_folder: String,
    pub skip_confirmation: bool,
    pub dry_run_default: bool,
}

/// One row of the category table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub clusters: usize,
    pub iterations: usize,
    pub folder_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub test_fraction: f32,
    pub training: Vec<TrainingExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub language: String,
    pub datapath: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first existing location, or return defaults.
    ///
    /// An explicit path must exist; the fallback locations are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }

        for path in Self::default_paths() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config/settings.toml")];
        if let Ok(home_config) = shellexpand::full("~/.config/tidyfs/settings.toml") {
            paths.push(PathBuf::from(home_config.as_ref()));
        }
        paths
    }

    /// Reject values the actions cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.cluster.clusters == 0 {
            return Err(Error::Config("cluster.clusters must be at least 1".to_string()));
        }
        if !(0.0..1.0).contains(&self.classifier.test_fraction) {
            return Err(Error::Config(format!(
                "classifier.test_fraction must be in [0, 1), got {}",
                self.classifier.test_fraction
            )));
        }
        if self.classifier.training.is_empty() {
            return Err(Error::Config("classifier.training must not be empty".to_string()));
        }
        check_folder_name("organizer.default_category", &self.organizer.default_category)?;
        check_folder_name("organizer.unpack_folder", &self.organizer.unpack_folder)?;
        for category in &self.categories {
            check_folder_name("categories.name", &category.name)?;
        }
        for example in &self.classifier.training {
            check_folder_name("classifier.training.category", &example.category)?;
        }
        // An empty prefix is allowed; folders are then named "0", "1", ...
        if !self.cluster.folder_prefix.is_empty() {
            check_folder_name("cluster.folder_prefix", &self.cluster.folder_prefix)?;
        }
        Ok(())
    }

    /// Build the ordered extension table used by the organize action
    pub fn category_table(&self) -> CategoryTable {
        let mut table = CategoryTable::new(&self.organizer.default_category);
        for category in &self.categories {
            table.push(&category.name, category.extensions.iter().map(String::as_str));
        }
        table
    }
}

/// Folder names from config become a single path component under the workspace
fn check_folder_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{} must not be empty", field)));
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(Error::Config(format!(
            "{} must be a plain folder name, got {:?}",
            field, value
        )));
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organizer: OrganizerConfig::default(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, extensions)| CategoryConfig {
                    name: name.to_string(),
                    extensions: extensions.iter().map(|e| e.to_string()).collect(),
                })
                .collect(),
            cluster: ClusterConfig::default(),
            classifier: ClassifierConfig::default(),
            ocr: OcrConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            unpack_folder: UNPACKED_FOLDER.to_string(),
            skip_confirmation: false,
            dry_run_default: false,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTER_COUNT,
            iterations: DEFAULT_KMEANS_ITERATIONS,
            folder_prefix: CLUSTER_FOLDER_PREFIX.to_string(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            training: TRAINING_EXAMPLES
                .iter()
                .map(|(text, category)| TrainingExample {
                    text: text.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            datapath: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
