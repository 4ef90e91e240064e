use crate::config::Config;
use crate::constants::TEXT_EXTENSION;
use crate::error::{Error, Result};
use crate::ml::{
    train_test_split, unzip_examples, CategoryClassifier, DocumentClusterer, KMeansClusterer,
    NearestCentroidClassifier,
};
use crate::models::{ActivityLog, Assignment, Label};
use crate::organizer::{
    plan_unpack, CategoryTable, Confirmation, FileMover, Outcome, PreviewTree, Prompt,
};
use crate::utils::{has_extension, list_files, lossy_file_name, read_text_lossy};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The folder selected for organizing, plus the settings every action reads
pub struct Workspace {
    root: PathBuf,
    config: Config,
    show_progress: bool,
}

/// Classifier output for the predict action
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Accuracy on the held-out training examples, `None` when nothing was held out
    pub accuracy: Option<f32>,
    pub assignments: Vec<Assignment>,
}

impl Workspace {
    /// Select `folder`; it must be an existing directory
    pub fn open<P: AsRef<Path>>(folder: P, config: Config) -> Result<Self> {
        let folder = folder.as_ref();
        if folder.as_os_str().is_empty() {
            return Err(Error::NotADirectory(folder.to_path_buf()));
        }
        let root = folder
            .canonicalize()
            .map_err(|_| Error::NotADirectory(folder.to_path_buf()))?;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        Ok(Self {
            root,
            config,
            show_progress: false,
        })
    }

    /// Show a progress bar while executing plans
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plan moving every top-level file into its extension category
    pub fn plan_organize(&self) -> Result<PreviewTree> {
        let table: CategoryTable = self.config.category_table();
        let mut preview = PreviewTree::new();

        for path in list_files(&self.root)? {
            let Some(file_name) = path.file_name() else {
                continue;
            };
            let category = table.classify(&file_name.to_string_lossy());
            let category_dir = self.root.join(category);
            if !category_dir.is_dir() {
                preview.add_directory(category_dir.clone());
            }
            preview.add_move(path.clone(), category_dir.join(file_name));
        }

        Ok(preview)
    }

    /// Plan flat copies of every nested file into the staging folder
    pub fn plan_unpack(&self) -> Result<PreviewTree> {
        plan_unpack(&self.root, &self.config.organizer.unpack_folder)
    }

    /// Top-level `.txt` files as (file name, content), sorted by name
    pub fn text_documents(&self) -> Result<Vec<(OsString, String)>> {
        let mut documents = Vec::new();
        for path in list_files(&self.root)? {
            if !has_extension(&lossy_file_name(&path), TEXT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name() {
                documents.push((file_name.to_os_string(), read_text_lossy(&path)?));
            }
        }
        Ok(documents)
    }

    /// Cluster the text files with the configured k-means settings
    pub fn cluster_assignments(&self) -> Result<Vec<Assignment>> {
        let clusterer = KMeansClusterer::new(
            self.config.cluster.clusters,
            self.config.cluster.iterations,
        );
        self.cluster_assignments_with(&clusterer)
    }

    pub fn cluster_assignments_with(
        &self,
        clusterer: &dyn DocumentClusterer,
    ) -> Result<Vec<Assignment>> {
        let documents = self.text_documents()?;
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let (names, contents): (Vec<OsString>, Vec<String>) = documents.into_iter().unzip();
        let labels = clusterer.fit_predict(&contents)?;
        if labels.len() != names.len() {
            return Err(Error::library(format!(
                "clusterer returned {} labels for {} documents",
                labels.len(),
                names.len()
            )));
        }

        Ok(names
            .into_iter()
            .zip(labels)
            .map(|(name, label)| Assignment::new(name, Label::Cluster(label)))
            .collect())
    }

    /// Train the category classifier on the configured examples and predict every text file
    pub fn predict_assignments(&self) -> Result<Prediction> {
        let mut classifier = NearestCentroidClassifier::new();
        self.predict_assignments_with(&mut classifier)
    }

    pub fn predict_assignments_with(
        &self,
        classifier: &mut dyn CategoryClassifier,
    ) -> Result<Prediction> {
        let settings = &self.config.classifier;
        let (train, test) = train_test_split(&settings.training, settings.test_fraction);

        let (train_texts, train_labels) = unzip_examples(train);
        classifier.fit(&train_texts, &train_labels)?;

        let accuracy = if test.is_empty() {
            None
        } else {
            let (test_texts, test_labels) = unzip_examples(test);
            Some(classifier.score(&test_texts, &test_labels)?)
        };

        let mut assignments = Vec::new();
        for (name, content) in self.text_documents()? {
            let category = classifier.predict(&content)?;
            assignments.push(Assignment::new(name, Label::Category(category)));
        }

        Ok(Prediction {
            accuracy,
            assignments,
        })
    }

    /// Plan moving each assigned file into the folder named by its label
    pub fn plan_assignments(&self, assignments: &[Assignment]) -> PreviewTree {
        let mut preview = PreviewTree::new();
        for assignment in assignments {
            let folder = self
                .root
                .join(assignment.label.folder_name(&self.config.cluster.folder_prefix));
            if !folder.is_dir() {
                preview.add_directory(folder.clone());
            }
            preview.add_move(
                self.root.join(assignment.os_name()),
                folder.join(assignment.os_name()),
            );
        }
        preview
    }

    /// Apply a plan inside this workspace
    pub async fn execute(&self, plan: &PreviewTree, dry_run: bool) -> Result<ActivityLog> {
        let mut mover = FileMover::new(&self.root)?;
        if self.show_progress && !dry_run {
            mover = mover.with_progress(progress_bar());
        }
        mover.execute(plan, dry_run).await
    }

    /// Show `plan` through `prompt` and execute it only on acceptance
    pub async fn execute_with_preview(
        &self,
        title: &str,
        plan: &PreviewTree,
        prompt: &dyn Prompt,
        dry_run: bool,
    ) -> Result<Outcome<ActivityLog>> {
        let confirmation = Confirmation::new(
            title,
            "The following actions will be executed if you accept:",
            plan.action_lines(&self.root),
            move || self.execute(plan, dry_run),
        );

        match confirmation.resolve(prompt)? {
            Outcome::Accepted(pending) => Ok(Outcome::Accepted(pending.await?)),
            Outcome::Declined => Ok(Outcome::Declined),
        }
    }
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
