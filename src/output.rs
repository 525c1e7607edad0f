//! Download path resolution, saving, and JPEG normalization.

use std::path::{Path, PathBuf};

use crate::error::{AppError, ServiceError};
use crate::ports::image_generator::{ImageData, IMAGE_MIME_TYPE};

/// File name offered for the downloaded thumbnail.
pub const DOWNLOAD_FILENAME: &str = "ai-thumbnail.jpg";

/// Resolve the download path: explicit flag, then config default, then [`DOWNLOAD_FILENAME`].
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, configured: Option<&str>) -> PathBuf {
    PathBuf::from(explicit.or(configured).unwrap_or(DOWNLOAD_FILENAME))
}

/// Decode the payload and write it to `output_path`.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64 or the file cannot be written.
pub fn save_image(image: &ImageData, output_path: &Path) -> Result<(), AppError> {
    let bytes = image.decode()?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, bytes)?;
    Ok(())
}

/// Turn a base64 payload of any supported MIME type into JPEG [`ImageData`].
///
/// JPEG payloads pass through untouched; anything else is decoded and re-encoded.
///
/// # Errors
///
/// Returns an error if the payload cannot be decoded or converted.
pub fn normalize_to_jpeg(payload: String, mime_type: &str) -> Result<ImageData, ServiceError> {
    if mime_type.eq_ignore_ascii_case(IMAGE_MIME_TYPE) || mime_type.is_empty() {
        return Ok(ImageData::from_base64(payload));
    }

    tracing::debug!(mime_type, "transcoding generated image to JPEG");
    let raw = ImageData::from_base64(payload)
        .decode()
        .map_err(|e| ServiceError::MalformedResponse(format!("Failed to decode base64: {e}")))?;
    let img = image::load_from_memory(&raw)
        .map_err(|e| ServiceError::MalformedResponse(format!("Failed to decode image: {e}")))?;

    // JPEG has no alpha channel.
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img.to_rgb8())
        .write_to(&mut buf, image::ImageFormat::Jpeg)
        .map_err(|e| ServiceError::MalformedResponse(format!("Failed to encode JPEG: {e}")))?;
    Ok(ImageData::encode(&buf.into_inner()))
}
