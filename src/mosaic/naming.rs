//! Grid coordinates encoded in tile file names
//!
//! Tiles are named `<prefix>_<ROW>_<COL>_<suffix>.<ext>` where both
//! coordinates are zero-padded three digit decimals, e.g. `S_004_017_lco.png`.
//! This module is the only place that naming convention is interpreted.

use crate::io::error::{MosaicError, Result};
use std::fmt;
use std::path::Path;

/// Number of digits in each coordinate group
pub const COORDINATE_DIGITS: usize = 3;

const SEPARATOR: char = '_';

/// Zero-based grid cell of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    /// Column index (horizontal position)
    pub column: u32,
    /// Row index (vertical position)
    pub row: u32,
}

impl GridPoint {
    /// Create a grid point from column and row indices
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridPoint {
    /// Renders the point in the `ROW_COL` form used by tile names
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}{SEPARATOR}{:0width$}",
            self.row,
            self.column,
            width = COORDINATE_DIGITS
        )
    }
}

fn is_coordinate_group(segment: &str) -> bool {
    segment.len() == COORDINATE_DIGITS && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the grid position out of a bare tile file name
///
/// Exactly two coordinate groups must be present, adjacent to each other,
/// with a non-empty prefix before them and a non-empty suffix after them.
///
/// # Errors
///
/// Returns `MalformedTileName` if the name has no extension, the wrong number
/// of coordinate groups, or groups that are not surrounded by prefix and suffix
pub fn parse_tile_name(name: &str) -> Result<GridPoint> {
    let malformed = || MosaicError::MalformedTileName { path: name.into() };

    let (stem, extension) = name.rsplit_once('.').ok_or_else(malformed)?;
    if stem.is_empty() || extension.is_empty() {
        return Err(malformed());
    }

    let segments: Vec<&str> = stem.split(SEPARATOR).collect();
    let groups: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| is_coordinate_group(segment))
        .map(|(index, _)| index)
        .collect();

    let [row_index, column_index] = groups.as_slice() else {
        return Err(malformed());
    };
    let (row_index, column_index) = (*row_index, *column_index);

    let has_prefix = segments
        .get(..row_index)
        .is_some_and(|prefix| prefix.iter().any(|s| !s.is_empty()));
    let has_suffix = segments
        .get(column_index + 1..)
        .is_some_and(|suffix| suffix.iter().any(|s| !s.is_empty()));
    if column_index != row_index + 1 || !has_prefix || !has_suffix {
        return Err(malformed());
    }

    let parse_group = |index: usize| -> Result<u32> {
        segments
            .get(index)
            .and_then(|segment| segment.parse::<u32>().ok())
            .ok_or_else(malformed)
    };

    Ok(GridPoint {
        column: parse_group(column_index)?,
        row: parse_group(row_index)?,
    })
}

/// Parse the grid position from the base name of a tile path
///
/// # Errors
///
/// Returns `MalformedTileName` carrying the full path if the base name is
/// missing, not valid UTF-8, or does not follow the naming convention
pub fn tile_point_from_path(path: &Path) -> Result<GridPoint> {
    let malformed = || MosaicError::MalformedTileName {
        path: path.to_path_buf(),
    };

    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(malformed)?;

    // Report the full path rather than the bare name
    parse_tile_name(name).ok().ok_or_else(malformed)
}

