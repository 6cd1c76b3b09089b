//! Image encoding and persistence for the save stage.

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Create the output directory if it does not exist. Idempotent.
pub fn ensure_output_dir(dir: &Path) -> PipelineResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::OutputDir {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })
}

/// Destination path for a source file: `dir/<base name of source>`.
pub fn output_path(dir: &Path, source: &Path) -> PathBuf {
    dir.join(source.file_name().unwrap_or(source.as_os_str()))
}

/// Encode a pixel buffer and write it to `dest`, replacing any existing file.
///
/// The encoder follows the destination extension; anything unrecognized falls
/// back to JPEG. JPEG has no alpha channel, so RGBA flattens to RGB there.
pub fn write_image(image: &RgbaImage, dest: &Path, jpeg_quality: u8) -> PipelineResult<()> {
    let persist = |e: &dyn std::fmt::Display| PipelineError::Persist {
        path: dest.to_path_buf(),
        message: e.to_string(),
    };

    let format = ImageFormat::from_path(dest).unwrap_or(ImageFormat::Jpeg);
    let file = File::create(dest).map_err(|e| persist(&e))?;
    let mut writer = BufWriter::new(file);

    match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut writer)
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| persist(&e))?;
        }
        _ => {
            let rgb: RgbImage = image.convert();
            JpegEncoder::new_with_quality(&mut writer, jpeg_quality)
                .encode_image(&rgb)
                .map_err(|e| persist(&e))?;
        }
    }

    writer.flush().map_err(|e| persist(&e))
}
