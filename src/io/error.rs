//! Error types for mosaic composition and its surrounding file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// No tiles were supplied, so there is nothing to composite
    EmptyTileSet,

    /// Tile file name does not follow `<prefix>_<ROW>_<COL>_<suffix>.<ext>`
    MalformedTileName {
        /// Path of the offending tile
        path: PathBuf,
    },

    /// Tile bytes could not be read or decoded as a raster image
    TileDecode {
        /// Path of the offending tile
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Tile size combined with its overlap leaves no positive placement stride
    InvalidTileSize {
        /// Requested tile side length
        tile_size: u32,
        /// Overlap derived for that tile size
        overlap: u32,
    },

    /// Canvas dimensions cannot be represented or allocated
    CanvasTooLarge {
        /// Requested canvas width in pixels
        width: u64,
        /// Requested canvas height in pixels
        height: u64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode the finished mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTileSet => write!(f, "No tiles supplied, nothing to composite"),
            Self::MalformedTileName { path } => {
                write!(
                    f,
                    "Malformed tile name '{}' (expected <prefix>_<ROW>_<COL>_<suffix>.<ext>)",
                    path.display()
                )
            }
            Self::TileDecode { path, source } => {
                write!(f, "Failed to decode tile '{}': {source}", path.display())
            }
            Self::InvalidTileSize { tile_size, overlap } => {
                write!(
                    f,
                    "Tile size {tile_size} with overlap {overlap} leaves no positive placement stride"
                )
            }
            Self::CanvasTooLarge { width, height } => {
                write!(f, "Canvas of {width}x{height} pixels cannot be allocated")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation it came from
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
