//! PNG export of the finished mosaic

use crate::io::error::{MosaicError, Result, file_system_error};
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::info;

/// Encode the mosaic canvas as a PNG file
///
/// Missing parent directories are created first.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to `output_path`
pub fn export_mosaic_as_png(canvas: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    info!(
        path = %output_path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "Writing mosaic"
    );

    canvas
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
