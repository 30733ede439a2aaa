//! Tile decoding and size normalization

use crate::io::error::{MosaicError, Result};
use image::imageops::{self, FilterType};
use image::{ImageError, ImageReader, RgbaImage};
use std::path::Path;
use tracing::debug;

/// Decode a tile from disk into an RGBA buffer
///
/// The format is guessed from the file contents rather than its extension.
///
/// # Errors
///
/// Returns `TileDecode` carrying `path` if the file cannot be opened, its
/// format is not recognised, or its contents fail to decode
pub fn load_tile(path: &Path) -> Result<RgbaImage> {
    let decode_error = |source: ImageError| MosaicError::TileDecode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_error(ImageError::IoError(e)))?;

    Ok(reader.decode().map_err(decode_error)?.to_rgba8())
}

/// Bring a decoded tile up to `tile_size` if it is undersized
///
/// Tiles at least `tile_size` wide are returned untouched, even when larger;
/// narrower tiles are resampled to exactly `tile_size` square with Lanczos.
pub fn normalize_tile(tile: RgbaImage, tile_size: u32) -> RgbaImage {
    if tile.width() >= tile_size {
        return tile;
    }

    debug!(
        width = tile.width(),
        height = tile.height(),
        tile_size,
        "Upsampling undersized tile"
    );
    imageops::resize(&tile, tile_size, tile_size, FilterType::Lanczos3)
}

/// Decode a tile and normalize it to `tile_size`
///
/// # Errors
///
/// Returns `TileDecode` if the tile cannot be decoded
pub fn load_normalized_tile(path: &Path, tile_size: u32) -> Result<RgbaImage> {
    load_tile(path).map(|tile| normalize_tile(tile, tile_size))
}
