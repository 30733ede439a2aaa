//! Command-line surface, configuration, errors and output handling

/// Argument parsing and tile collection
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Mosaic PNG export
pub mod image;
/// Structured logging setup
pub mod logging;
/// Progress display for tile drawing
pub mod progress;
