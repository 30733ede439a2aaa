//! Overlap trimming between neighbouring tiles
//!
//! Tiles are rendered with a border that duplicates their neighbours' edges.
//! The border was measured at a reference resolution, so when tiles are
//! exported smaller the overlap shrinks in proportion.

use crate::io::configuration::{REFERENCE_OVERLAP, REFERENCE_TILE_SIZE};
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Reference resolution the tile overlap was measured at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapConfig {
    reference_size: u32,
    reference_overlap: u32,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            reference_size: REFERENCE_TILE_SIZE,
            reference_overlap: REFERENCE_OVERLAP,
        }
    }
}

impl OverlapConfig {
    /// Create a config from a reference tile size and its overlap in pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `reference_size` is zero
    pub fn new(reference_size: u32, reference_overlap: u32) -> Result<Self> {
        if reference_size == 0 {
            return Err(invalid_parameter(
                "reference_size",
                &reference_size,
                &"must be positive",
            ));
        }
        Ok(Self {
            reference_size,
            reference_overlap,
        })
    }

    /// Config for tiles rendered without any overlap
    pub const fn without_overlap() -> Self {
        Self {
            reference_size: REFERENCE_TILE_SIZE,
            reference_overlap: 0,
        }
    }

    /// Tile side length the overlap was measured at
    pub const fn reference_size(&self) -> u32 {
        self.reference_size
    }

    /// Overlap in pixels at the reference size
    pub const fn reference_overlap(&self) -> u32 {
        self.reference_overlap
    }

    /// Overlap in pixels for tiles of `tile_size`, truncated
    ///
    /// Equivalent to `overlap / (reference_size / tile_size)` evaluated on
    /// exact rationals. Tile sizes above the reference size scale the overlap
    /// up as well.
    pub fn overlap_for(&self, tile_size: u32) -> u32 {
        let scaled = u64::from(self.reference_overlap) * u64::from(tile_size)
            / u64::from(self.reference_size.max(1));
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// Placement geometry shared by every tile in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Side length each tile is normalized to
    pub tile_size: u32,
    /// Pixels trimmed from the stride between neighbouring tiles
    pub overlap: u32,
    /// Distance in pixels between the origins of neighbouring tiles
    pub stride: u32,
}

impl Placement {
    /// Compute the overlap and stride for `tile_size`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileSize` if `tile_size` is zero or the overlap is at
    /// least as large as the tile, leaving no positive stride
    pub fn new(tile_size: u32, config: &OverlapConfig) -> Result<Self> {
        if tile_size == 0 {
            return Err(MosaicError::InvalidTileSize {
                tile_size,
                overlap: 0,
            });
        }

        let overlap = config.overlap_for(tile_size);
        match tile_size.checked_sub(overlap) {
            Some(stride) if stride > 0 => Ok(Self {
                tile_size,
                overlap,
                stride,
            }),
            _ => Err(MosaicError::InvalidTileSize { tile_size, overlap }),
        }
    }

    /// Top-left canvas pixel of the tile at `(column, row)`
    pub const fn origin(&self, column: u32, row: u32) -> (u64, u64) {
        (
            column as u64 * self.stride as u64,
            row as u64 * self.stride as u64,
        )
    }
}
