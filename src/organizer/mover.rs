use crate::error::{Error, Result};
use crate::models::ActivityLog;
use crate::organizer::preview::{FileOperation, OperationKind, PreviewTree};
use indicatif::ProgressBar;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Applies planned moves and copies inside a single base directory.
///
/// A failure stops the batch; operations already applied are kept.
pub struct FileMover {
    base_path: PathBuf,
    progress: Option<ProgressBar>,
}

impl FileMover {
    /// Create a new FileMover for the given base directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref();
        let canonical = base_path
            .canonicalize()
            .map_err(|_| Error::NotADirectory(base_path.to_path_buf()))?;

        if !canonical.is_dir() {
            return Err(Error::NotADirectory(canonical));
        }

        Ok(Self {
            base_path: canonical,
            progress: None,
        })
    }

    /// Tick `progress` once per applied operation
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Validate a preview tree (dry-run): every path must stay under the base
    pub fn plan_moves(&self, preview: &PreviewTree) -> Result<PreviewTree> {
        for dir in &preview.directories_to_create {
            self.ensure_inside(dir)?;
        }

        for op in &preview.operations {
            self.ensure_inside(&op.source)?;
            self.ensure_inside(&op.destination)?;
        }

        Ok(preview.clone())
    }

    /// Paths are checked lexically: the part below the base may only hold plain names
    fn ensure_inside(&self, path: &Path) -> Result<()> {
        let relative = path
            .strip_prefix(&self.base_path)
            .map_err(|_| Error::OutsideWorkspace(path.to_path_buf()))?;

        if relative.components().all(|c| matches!(c, Component::Normal(_))) {
            Ok(())
        } else {
            Err(Error::OutsideWorkspace(path.to_path_buf()))
        }
    }

    /// Execute the planned operations in order
    pub async fn execute(&self, preview: &PreviewTree, dry_run: bool) -> Result<ActivityLog> {
        self.plan_moves(preview)?;
        let mut log = ActivityLog::new();

        if dry_run {
            log.info(format!(
                "Dry run: {} operation(s) planned, nothing changed",
                preview.operations.len()
            ));
            return Ok(log);
        }

        // Create directories first
        for dir in &preview.directories_to_create {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::io(dir, e))?;
        }

        if let Some(pb) = &self.progress {
            pb.set_length(preview.operations.len() as u64);
        }

        for op in &preview.operations {
            if let Err(e) = self.apply(op, &mut log).await {
                log.error(format!("Stopped after error: {}", e));
                if let Some(pb) = &self.progress {
                    pb.abandon();
                }
                return Err(e);
            }
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        Ok(log)
    }

    async fn apply(&self, op: &FileOperation, log: &mut ActivityLog) -> Result<()> {
        // Ensure destination directory exists
        if let Some(parent) = op.destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }

        let dest_dir = op.destination.parent().unwrap_or(&self.base_path);
        match op.kind {
            OperationKind::Move => {
                move_file(&op.source, &op.destination).await?;
                log.info(format!(
                    "Moved {} to {}",
                    op.source.display(),
                    dest_dir.display()
                ));
            }
            OperationKind::Copy => {
                fs::copy(&op.source, &op.destination)
                    .await
                    .map_err(|e| Error::io(&op.source, e))?;
                let file_name = op
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let source_dir = op.source.parent().unwrap_or(&self.base_path);
                log.info(format!(
                    "Copied {} from {} to {}",
                    file_name,
                    source_dir.display(),
                    dest_dir.display()
                ));
            }
        }
        Ok(())
    }

    /// Move one file into `<base>/<category>/`, creating the folder if needed
    pub async fn move_into_category(
        &self,
        source: &Path,
        category: &str,
        log: &mut ActivityLog,
    ) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| Error::OutsideWorkspace(source.to_path_buf()))?;
        let mut preview = PreviewTree::new();
        let category_dir = self.base_path.join(category);
        let destination = category_dir.join(file_name);
        preview.add_directory(category_dir);
        preview.add_move(source.to_path_buf(), destination.clone());

        self.plan_moves(&preview)?;
        for op in &preview.operations {
            self.apply(op, log).await?;
        }
        Ok(destination)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Rename, falling back to copy + remove when rename is refused (e.g. across devices)
async fn move_file(source: &Path, destination: &Path) -> Result<()> {
    match fs::rename(source, destination).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !fs::try_exists(source).await.unwrap_or(false) {
                return Err(Error::io(source, rename_err));
            }
            tracing::debug!(
                source = %source.display(),
                error = %rename_err,
                "rename failed, falling back to copy"
            );
            fs::copy(source, destination)
                .await
                .map_err(|copy_err| Error::io(destination, copy_err))?;
            fs::remove_file(source)
                .await
                .map_err(|e| Error::io(source, e))
        }
    }
}
