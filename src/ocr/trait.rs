use crate::error::Result;
use std::path::Path;

/// Trait for OCR backends that read text out of an image file
#[async_trait::async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in `image`, trimmed of surrounding whitespace
    async fn recognize_text(&self, image: &Path) -> Result<String>;
}
