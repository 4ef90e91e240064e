use crate::error::{Error, Result};
use crate::organizer::preview::PreviewTree;
use crate::utils::{compute_file_hash, numbered_file_name};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Plan flat copies of every file under `base` into `base/<staging_name>`.
///
/// The staging folder itself is never walked. A file whose content already sits
/// at the destination (or is already planned there) is skipped; a different
/// file with the same name gets a numbered name.
pub fn plan_unpack(base: &Path, staging_name: &str) -> Result<PreviewTree> {
    let staging = base.join(staging_name);
    let mut preview = PreviewTree::new();
    // destination -> content hash of what will be there
    let mut planned: HashMap<PathBuf, String> = HashMap::new();
    let mut skipped = 0usize;

    if !staging.is_dir() {
        preview.add_directory(staging.clone());
    }

    let walker = WalkDir::new(base)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != staging.as_path());

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base).to_path_buf();
            Error::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.path();
        let hash = compute_file_hash(source)?;
        let file_name = entry.file_name().to_string_lossy().into_owned();

        match free_destination(&staging, &file_name, &hash, &planned)? {
            Some(destination) => {
                planned.insert(destination.clone(), hash);
                preview.add_copy(source.to_path_buf(), destination);
            }
            None => {
                tracing::debug!(file = %source.display(), "already staged, skipping");
                skipped += 1;
            }
        }
    }

    tracing::debug!(
        copies = preview.operations.len(),
        skipped,
        "unpack planned"
    );
    Ok(preview)
}

/// First destination name that is free, or `None` if identical content is already there
fn free_destination(
    staging: &Path,
    file_name: &str,
    hash: &str,
    planned: &HashMap<PathBuf, String>,
) -> Result<Option<PathBuf>> {
    let mut attempt = 0usize;
    loop {
        let candidate_name = if attempt == 0 {
            file_name.to_string()
        } else {
            numbered_file_name(file_name, attempt)
        };
        let candidate = staging.join(&candidate_name);

        let occupant_hash = match planned.get(&candidate) {
            Some(existing) => Some(existing.clone()),
            None if candidate.is_file() => Some(compute_file_hash(&candidate)?),
            None if candidate.exists() => Some(String::new()),
            None => None,
        };

        match occupant_hash {
            None => return Ok(Some(candidate)),
            Some(existing) if existing == hash => return Ok(None),
            Some(_) => attempt += 1,
        }
    }
}
