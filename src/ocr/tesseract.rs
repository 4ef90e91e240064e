use crate::config::OcrConfig;
use crate::error::{Error, Result};
use crate::ocr::{ensure_image, TextRecognizer};
use std::path::Path;
use ::tesseract::Tesseract;

/// OCR through the system Tesseract/Leptonica libraries
pub struct TesseractRecognizer {
    language: String,
    datapath: Option<String>,
}

impl TesseractRecognizer {
    pub fn new<S: Into<String>>(language: S) -> Self {
        Self {
            language: language.into(),
            datapath: None,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            language: config.language.clone(),
            datapath: config.datapath.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str())).is_ok()
    }
}

#[async_trait::async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize_text(&self, image: &Path) -> Result<String> {
        ensure_image(image)?;

        let path = image
            .to_str()
            .ok_or_else(|| {
                Error::library(format!("image path is not valid UTF-8: {}", image.display()))
            })?
            .to_string();
        let language = self.language.clone();
        let datapath = self.datapath.clone();

        tokio::task::spawn_blocking(move || -> Result<String> {
            let tesseract = Tesseract::new(datapath.as_deref(), Some(language.as_str()))
                .map_err(|e| Error::library(format!("Failed to initialize Tesseract: {}", e)))?;
            let mut tesseract = tesseract
                .set_image(&path)
                .map_err(|e| Error::library(format!("Failed to load image {}: {}", path, e)))?;
            let text = tesseract
                .get_text()
                .map_err(|e| Error::library(format!("Failed to extract text: {}", e)))?;
            Ok(text.trim().to_string())
        })
        .await
        .map_err(|e| Error::library(format!("OCR task failed: {}", e)))?
    }
}
