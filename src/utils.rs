use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Compute Blake3 hash of file contents
pub fn compute_file_hash(file_path: &Path) -> Result<String> {
    let mut file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| Error::io(file_path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Get file extension from path (without the dot)
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Case-insensitive `name.ends_with(".ext")`
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    let name = file_name.to_lowercase();
    let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());
    name.ends_with(&suffix)
}

/// Regular files directly inside `dir`, sorted by name
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read a file as text, replacing invalid UTF-8 sequences
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Final path component for display and matching, with invalid UTF-8 replaced
pub fn lossy_file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
}

/// `name (n).ext` for the n-th collision on `file_name`
pub fn numbered_file_name(file_name: &str, n: usize) -> String {
    let path = Path::new(file_name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) {
        (Some(stem), Some(ext)) => format!("{} ({}).{}", stem, n, ext),
        _ => format!("{} ({})", file_name, n),
    }
}
