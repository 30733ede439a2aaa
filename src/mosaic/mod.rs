//! Tile mosaic compositing
//!
//! This module contains the compositing pipeline:
//! - Grid coordinates parsed from tile file names
//! - Grid extent inference from sparse coordinates
//! - Overlap and stride computation
//! - Tile decoding and normalization
//! - Canvas composition

/// Canvas allocation and sequential tile drawing
pub mod compositor;
/// Grid extent inference and occupancy tracking
pub mod grid;
/// Tile file name coordinate parsing
pub mod naming;
/// Tile decoding and upsampling
pub mod normalize;
/// Overlap scaling and placement stride
pub mod overlap;

pub use compositor::{MosaicRun, compose_mosaic};
pub use grid::GridExtent;
pub use naming::GridPoint;
pub use overlap::{OverlapConfig, Placement};
