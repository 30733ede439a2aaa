//! Stitches coordinate-named square tiles into a single mosaic image
//!
//! Tile file names carry their grid position. The grid extent is inferred
//! from the largest coordinates present, neighbouring tiles are overlapped by
//! an amount scaled to the output tile size, and undersized tiles are
//! upsampled before being drawn.

#![forbid(unsafe_code)]

/// Command-line surface, configuration, errors and output handling
pub mod io;
/// Tile naming, grid sizing, overlap and compositing
pub mod mosaic;

pub use io::error::{MosaicError, Result};
pub use mosaic::{GridPoint, MosaicRun, OverlapConfig, compose_mosaic};
