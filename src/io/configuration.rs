//! Compositing constants and runtime configuration defaults

// Overlap at the resolution the tiles were originally rendered at
/// Side length of a tile at the reference render resolution
pub const REFERENCE_TILE_SIZE: u32 = 512;
/// Overlap in pixels between neighbouring tiles at the reference resolution
pub const REFERENCE_OVERLAP: u32 = 16;

/// Default side length tiles are normalized to
pub const DEFAULT_TILE_SIZE: u32 = 128;

// Canvas memory grows quadratically with tile size
/// Largest tile size accepted from the command line
pub const MAX_TILE_SIZE: u32 = 8192;

/// File extensions collected when the target is a directory
pub const TILE_EXTENSIONS: &[&str] = &["png"];

// Output settings
/// Suffix added to the target name to form the default output file name
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of the encoded mosaic
pub const OUTPUT_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Log filter used when `RUST_LOG` is unset and no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "info";
