#[cfg(test)]
#[path = "image_file_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: &str, media_type: &str, bytes: Vec<u8>) -> ImageFile {
        return ImageFile {
            name: name.to_string(),
            media_type: media_type.to_string(),
            bytes,
        };
    }

    /// Reads a file from disk, guessing its media type from the extension.
    /// Unknown extensions become `application/octet-stream` and are rejected
    /// later by the image check rather than here.
    pub async fn from_path(file_path: &path::Path) -> Result<ImageFile> {
        let bytes = fs::read(file_path).await?;
        let name = file_path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_default();
        let media_type = mime_guess::from_path(file_path).first_or_octet_stream();

        return Ok(ImageFile::new(&name, media_type.essence_str(), bytes));
    }

    pub fn is_image(&self) -> bool {
        return self.media_type.starts_with("image/");
    }
}
