//! Image ingestion: uploaded picture in, embeddable JPEG data URI out.
//!
//! Uploads are checked synchronously (size, media type) and then decoded,
//! scaled down to the configured width and re-encoded on tokio's blocking
//! pool. The stored result is a self-contained `data:image/jpeg;base64,...`
//! string, so journal records never point at files outside the store.

use super::config::ImageConfig;
use super::error::{IngestError, ValidationError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type reported for the file, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: &str, media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            media_type: media_type.to_string(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        Ok(Self {
            file_name,
            media_type: media_type_for_path(path).to_string(),
            bytes,
        })
    }
}

pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Output size for an image of `width` x `height`: unchanged when it already
/// fits, otherwise `max_width` wide with the height scaled and rounded.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (f64::from(height) * f64::from(max_width) / f64::from(width)).round();
    (max_width, (scaled as u32).max(1))
}

#[derive(Debug, Clone)]
pub struct ImageIngestor {
    config: ImageConfig,
}

impl ImageIngestor {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Cheap checks done before any decoding work is scheduled.
    pub fn check(&self, upload: &ImageUpload) -> Result<(), ValidationError> {
        if upload.bytes.len() > self.config.max_upload_bytes {
            return Err(ValidationError::FileTooLarge {
                size: upload.bytes.len(),
                max: self.config.max_upload_bytes,
            });
        }
        if !upload.media_type.starts_with("image/") {
            return Err(ValidationError::InvalidFileType(upload.media_type.clone()));
        }
        Ok(())
    }

    /// Decodes, scales and re-encodes on the calling thread.
    pub fn process(&self, bytes: &[u8]) -> Result<EmbeddedImage, IngestError> {
        let decoded = image::load_from_memory(bytes).map_err(IngestError::Decode)?;
        let (width, height) = decoded.dimensions();
        let (target_width, target_height) = target_dimensions(width, height, self.config.max_width);

        let scaled = if (target_width, target_height) == (width, height) {
            decoded
        } else {
            decoded.resize_exact(target_width, target_height, FilterType::Triangle)
        };

        let mut jpeg = Vec::new();
        let quality = self.config.jpeg_quality.clamp(1, 100);
        scaled
            .to_rgb8()
            .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
            .map_err(IngestError::Encode)?;

        debug!(width, height, target_width, target_height, jpeg_bytes = jpeg.len(), "image re-encoded");

        Ok(EmbeddedImage {
            data_url: format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&jpeg)),
            width: target_width,
            height: target_height,
        })
    }

    pub async fn ingest(&self, upload: ImageUpload) -> Result<EmbeddedImage, IngestError> {
        self.spawn(upload)?.await.map_err(|_| IngestError::Cancelled)?
    }

    fn spawn(&self, upload: ImageUpload) -> Result<JoinHandle<Result<EmbeddedImage, IngestError>>, ValidationError> {
        self.check(&upload)?;
        let ingestor = self.clone();
        Ok(tokio::task::spawn_blocking(move || ingestor.process(&upload.bytes)))
    }
}

/// The image picked in one form.
///
/// At most one ingestion is pending. Selecting another file supersedes the
/// previous one, and dropping the selection discards whatever is still in
/// flight, so a late result can never land in the wrong form.
#[derive(Debug)]
pub struct ImageSelection {
    ingestor: ImageIngestor,
    pending: Option<JoinHandle<Result<EmbeddedImage, IngestError>>>,
}

impl ImageSelection {
    pub fn new(ingestor: ImageIngestor) -> Self {
        Self { ingestor, pending: None }
    }

    /// Starts processing `upload`. A rejected upload leaves the current selection in place.
    pub fn select(&mut self, upload: ImageUpload) -> Result<(), ValidationError> {
        let handle = self.ingestor.spawn(upload)?;
        if let Some(previous) = self.pending.replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    pub fn is_processing(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn has_selection(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Waits for the current selection. `None` when nothing is selected.
    pub async fn finish(&mut self) -> Option<Result<EmbeddedImage, IngestError>> {
        let handle = self.pending.take()?;
        Some(handle.await.unwrap_or(Err(IngestError::Cancelled)))
    }
}

impl Drop for ImageSelection {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dimensions() {
        assert_eq!(target_dimensions(2000, 1000, 800), (800, 400));
        assert_eq!(target_dimensions(400, 300, 800), (400, 300));
        assert_eq!(target_dimensions(800, 600, 800), (800, 600));
        assert_eq!(target_dimensions(1000, 333, 800), (800, 266));
        assert_eq!(target_dimensions(10000, 1, 800), (800, 1));
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("tank.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("tank.webp")), "image/webp");
        assert_eq!(media_type_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(media_type_for_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_check_rejects_before_processing() {
        let ingestor = ImageIngestor::new(ImageConfig::default());

        let huge = ImageUpload::new("big.png", "image/png", vec![0; 15 * 1024 * 1024]);
        assert!(matches!(ingestor.check(&huge), Err(ValidationError::FileTooLarge { .. })));

        let text = ImageUpload::new("notes.txt", "text/plain", b"hello".to_vec());
        assert_eq!(ingestor.check(&text), Err(ValidationError::InvalidFileType("text/plain".to_string())));

        let fine = ImageUpload::new("tank.png", "image/png", vec![0; 16]);
        assert!(ingestor.check(&fine).is_ok());
    }
}
