//! Image decoding with content-based format detection.

use image::RgbaImage;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Decode an image file into an RGBA pixel buffer.
///
/// Decoding is CPU-bound, so it runs on the blocking thread pool. Format is
/// detected from file content, not the extension, so a misnamed file still
/// decodes.
pub async fn decode_file(path: &Path) -> PipelineResult<RgbaImage> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || decode_sync(&owned))
        .await
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Task join error: {}", e),
        })?
}

/// Synchronous decode (runs in spawn_blocking).
pub(crate) fn decode_sync(path: &Path) -> PipelineResult<RgbaImage> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;

    let image = reader.decode().map_err(|e| PipelineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(image.to_rgba8())
}
