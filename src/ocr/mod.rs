pub mod r#trait;

#[cfg(feature = "ocr")]
pub mod tesseract;

#[cfg(feature = "ocr")]
pub use self::tesseract::TesseractRecognizer;

use crate::constants::OCR_IMAGE_EXTENSIONS;
use crate::error::{Error, Result};
use crate::utils::get_extension;
use std::path::Path;

pub use r#trait::TextRecognizer;

/// Check that `path` is an existing file in one of the supported image formats
pub fn ensure_image(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "image not found"),
        ));
    }

    match get_extension(path) {
        Some(ext) if OCR_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::library(format!(
            "unsupported image type: {} (expected one of {})",
            path.display(),
            OCR_IMAGE_EXTENSIONS.join(", ")
        ))),
    }
}

#[cfg(not(feature = "ocr"))]
pub struct TesseractRecognizer;

#[cfg(not(feature = "ocr"))]
impl TesseractRecognizer {
    pub fn new<S: Into<String>>(_language: S) -> Self {
        Self
    }

    pub fn from_config(_config: &crate::config::OcrConfig) -> Self {
        Self
    }

    pub fn is_available(&self) -> bool {
        false
    }
}

#[cfg(not(feature = "ocr"))]
#[async_trait::async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize_text(&self, image: &Path) -> Result<String> {
        ensure_image(image)?;
        Err(Error::library(
            "OCR support is not compiled in. Rebuild with --features ocr to use Tesseract.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_image_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ensure_image(&temp_dir.path().join("scan.png"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_ensure_image_rejects_other_types() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();
        assert!(matches!(ensure_image(&path), Err(Error::Library(_))));
    }

    #[test]
    fn test_ensure_image_accepts_uppercase_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("SCAN.TIFF");
        std::fs::write(&path, [0u8; 4]).unwrap();
        assert!(ensure_image(&path).is_ok());
    }

    #[cfg(not(feature = "ocr"))]
    #[tokio::test]
    async fn test_stub_recognizer_reports_missing_feature() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.png");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let recognizer = TesseractRecognizer::new("eng");
        assert!(!recognizer.is_available());
        let err = recognizer.recognize_text(&path).await.unwrap_err();
        assert!(err.to_string().contains("--features ocr"));
    }
}
