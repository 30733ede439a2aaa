//! Mosaic composition: places every normalized tile onto a single canvas
//!
//! A run moves forward through sizing, overlap computation and one
//! normalize-then-draw step per tile. Tiles are drawn in file name order and
//! each draw overwrites whatever an earlier tile left in the overlap band, so
//! the order is part of the output and never parallelised.

use crate::io::error::{MosaicError, Result};
use crate::mosaic::grid::{GridExtent, infer_grid_extent};
use crate::mosaic::naming::{GridPoint, tile_point_from_path};
use crate::mosaic::normalize::load_normalized_tile;
use crate::mosaic::overlap::{OverlapConfig, Placement};
use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, trace, warn};

const BYTES_PER_PIXEL: u64 = 4;

/// Transient state of a single compositing invocation
///
/// Construct with [`MosaicRun::new`], optionally step through tiles with
/// [`MosaicRun::draw_next`], then take the canvas with [`MosaicRun::finish`].
#[derive(Debug)]
pub struct MosaicRun {
    tiles: Vec<PathBuf>,
    extent: GridExtent,
    placement: Placement,
    canvas: RgbaImage,
    next_tile: usize,
}

impl MosaicRun {
    /// Size the grid, compute the overlap and allocate a transparent canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `paths` is empty (`EmptyTileSet`)
    /// - any tile name does not follow the naming convention (`MalformedTileName`)
    /// - the tile size leaves no positive stride (`InvalidTileSize`)
    /// - the canvas dimensions overflow (`CanvasTooLarge`)
    #[instrument(skip_all, fields(tile_size = tile_size, tile_count = paths.len()))]
    pub fn new<P: AsRef<Path>>(
        paths: &[P],
        tile_size: u32,
        config: &OverlapConfig,
    ) -> Result<Self> {
        let tiles = sorted_tiles(paths);
        let extent = infer_grid_extent(&tiles)?;
        let placement = Placement::new(tile_size, config)?;
        let (width, height) = canvas_dimensions(&extent, &placement)?;

        let missing = extent.missing_cells();
        if !missing.is_empty() {
            warn!(
                missing = missing.len(),
                first_missing = %missing.first().map(ToString::to_string).unwrap_or_default(),
                "Grid has cells without a tile, leaving them transparent"
            );
        }

        info!(
            columns = extent.columns,
            rows = extent.rows,
            overlap = placement.overlap,
            stride = placement.stride,
            width,
            height,
            "Allocating mosaic canvas"
        );

        Ok(Self {
            tiles,
            extent,
            placement,
            canvas: RgbaImage::new(width, height),
            next_tile: 0,
        })
    }

    /// Decode, normalize and draw the next tile in sort order
    ///
    /// Returns the grid cell that was drawn, or `None` once every tile has
    /// been placed.
    ///
    /// # Errors
    ///
    /// Returns `MalformedTileName` or `TileDecode` for the tile being drawn.
    /// The failing tile is not skipped, so a failed run can never complete.
    pub fn draw_next(&mut self) -> Result<Option<GridPoint>> {
        let Some(path) = self.tiles.get(self.next_tile) else {
            return Ok(None);
        };

        let point = tile_point_from_path(path)?;
        let tile = load_normalized_tile(path, self.placement.tile_size)?;
        let origin = self.placement.origin(point.column, point.row);

        trace!(
            tile = %path.display(),
            %point,
            x = origin.0,
            y = origin.1,
            "Drawing tile"
        );
        draw_tile(&mut self.canvas, &tile, origin);

        self.next_tile += 1;
        Ok(Some(point))
    }

    /// Draw any remaining tiles and hand over the finished canvas
    ///
    /// # Errors
    ///
    /// Returns the first error raised while drawing the remaining tiles; the
    /// partially drawn canvas is dropped
    pub fn finish(mut self) -> Result<RgbaImage> {
        while self.draw_next()?.is_some() {}
        debug!(tiles = self.tiles.len(), "Mosaic complete");
        Ok(self.canvas)
    }

    /// Tile paths in the order they are drawn
    pub fn tiles(&self) -> &[PathBuf] {
        &self.tiles
    }

    /// Number of tiles not yet drawn
    pub const fn remaining(&self) -> usize {
        self.tiles.len().saturating_sub(self.next_tile)
    }

    /// Inferred grid extent
    pub const fn extent(&self) -> &GridExtent {
        &self.extent
    }

    /// Tile size, overlap and stride of this run
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Canvas width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }
}

/// Composite every tile into one mosaic canvas
///
/// # Errors
///
/// Returns the first error encountered; no partial canvas is returned
pub fn compose_mosaic<P: AsRef<Path>>(
    paths: &[P],
    tile_size: u32,
    config: &OverlapConfig,
) -> Result<RgbaImage> {
    MosaicRun::new(paths, tile_size, config)?.finish()
}

/// Copy `tile` onto `canvas` at `origin`, replacing existing pixels
///
/// Pixels that fall outside the canvas are clipped.
pub fn draw_tile(canvas: &mut RgbaImage, tile: &RgbaImage, origin: (u64, u64)) {
    let x = i64::try_from(origin.0).unwrap_or(i64::MAX);
    let y = i64::try_from(origin.1).unwrap_or(i64::MAX);
    imageops::replace(canvas, tile, x, y);
}

// Name order matches (row, column) order for the fixed naming scheme
fn sorted_tiles<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut tiles: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    tiles.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    tiles
}

fn canvas_dimensions(extent: &GridExtent, placement: &Placement) -> Result<(u32, u32)> {
    let stride = u64::from(placement.stride);
    let width = u64::from(extent.columns) * stride;
    let height = u64::from(extent.rows) * stride;
    let too_large = || MosaicError::CanvasTooLarge { width, height };

    let bytes = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(too_large)?;
    if isize::try_from(bytes).is_err() {
        return Err(too_large());
    }

    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(too_large()),
    }
}
