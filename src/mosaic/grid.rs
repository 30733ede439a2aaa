//! Grid extent inference from sparse tile coordinates

use crate::io::error::{MosaicError, Result};
use crate::mosaic::naming::{GridPoint, tile_point_from_path};
use ndarray::Array2;
use std::path::Path;

/// Column and row extent of a mosaic along with which cells have a tile
///
/// The extent is driven by the largest coordinates seen, so cells inside it
/// without a tile are gaps that stay transparent in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridExtent {
    /// Number of tile columns (largest column index + 1)
    pub columns: u32,
    /// Number of tile rows (largest row index + 1)
    pub rows: u32,
    /// Occupied cells, indexed by `[row, column]`
    occupancy: Array2<bool>,
}

impl GridExtent {
    /// Build an extent from already parsed grid points
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if no points are given
    pub fn from_points(points: &[GridPoint]) -> Result<Self> {
        let max_columns = points.iter().map(|p| p.column).max();
        let max_rows = points.iter().map(|p| p.row).max();

        let (Some(max_column), Some(max_row)) = (max_columns, max_rows) else {
            return Err(MosaicError::EmptyTileSet);
        };

        let columns = max_column + 1;
        let rows = max_row + 1;
        let mut occupancy = Array2::from_elem((rows as usize, columns as usize), false);
        for point in points {
            if let Some(cell) = occupancy.get_mut([point.row as usize, point.column as usize]) {
                *cell = true;
            }
        }

        Ok(Self {
            columns,
            rows,
            occupancy,
        })
    }

    /// Whether a tile was supplied for the given cell
    pub fn is_occupied(&self, point: GridPoint) -> bool {
        self.occupancy
            .get([point.row as usize, point.column as usize])
            .copied()
            .unwrap_or(false)
    }

    /// Number of distinct cells that have a tile
    pub fn tile_count(&self) -> usize {
        self.occupancy.iter().filter(|&&occupied| occupied).count()
    }

    /// Cells inside the extent without a tile, in row-major order
    pub fn missing_cells(&self) -> Vec<GridPoint> {
        self.occupancy
            .indexed_iter()
            .filter(|&(_, &occupied)| !occupied)
            .map(|((row, column), _)| GridPoint::new(column as u32, row as u32))
            .collect()
    }
}

/// Infer the mosaic extent from the names of every tile path
///
/// Every name is parsed up front so a single malformed name fails the whole
/// set before any tile is decoded.
///
/// # Errors
///
/// Returns `EmptyTileSet` if `paths` is empty, or `MalformedTileName` for the
/// first path whose base name does not follow the naming convention
pub fn infer_grid_extent<P: AsRef<Path>>(paths: &[P]) -> Result<GridExtent> {
    if paths.is_empty() {
        return Err(MosaicError::EmptyTileSet);
    }

    let points = paths
        .iter()
        .map(|path| tile_point_from_path(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    GridExtent::from_points(&points)
}
