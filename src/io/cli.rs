//! Command-line interface for stitching a directory of tiles into a mosaic

use crate::io::configuration::{
    DEFAULT_TILE_SIZE, MAX_TILE_SIZE, OUTPUT_EXTENSION, OUTPUT_SUFFIX, REFERENCE_OVERLAP,
    REFERENCE_TILE_SIZE, TILE_EXTENSIONS,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::export_mosaic_as_png;
use crate::io::progress::ProgressManager;
use crate::mosaic::naming::tile_point_from_path;
use crate::mosaic::{MosaicRun, OverlapConfig};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Stitch coordinate-named tiles into a single mosaic image"
)]
/// Command-line arguments for the mosaic tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile directories or individual tile files
    #[arg(value_name = "TARGET", required = true)]
    pub targets: Vec<PathBuf>,

    /// Side length every tile is normalized to
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub size: u32,

    /// Output PNG file (defaults to <TARGET>_mosaic.png beside the first target)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tile size at which the reference overlap was measured
    #[arg(long, default_value_t = REFERENCE_TILE_SIZE)]
    pub reference_size: u32,

    /// Overlap in pixels between neighbouring tiles at the reference size
    #[arg(long, default_value_t = REFERENCE_OVERLAP)]
    pub reference_overlap: u32,

    /// Leave an existing output file untouched and skip the run
    #[arg(short, long)]
    pub no_overwrite: bool,

    /// Skip collected files whose names carry no grid coordinates
    #[arg(long)]
    pub skip_unnamed: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the requested tile size against the accepted range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the size is zero or above `MAX_TILE_SIZE`
    pub fn tile_size(&self) -> Result<u32> {
        if self.size == 0 || self.size > MAX_TILE_SIZE {
            return Err(invalid_parameter(
                "size",
                &self.size,
                &format!("must be between 1 and {MAX_TILE_SIZE}"),
            ));
        }
        Ok(self.size)
    }

    /// Build the overlap configuration from the reference arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the reference size is zero
    pub fn overlap_config(&self) -> Result<OverlapConfig> {
        OverlapConfig::new(self.reference_size, self.reference_overlap)
    }
}

/// Collects tiles, drives a mosaic run and writes the result
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a new processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Stitch all collected tiles and write the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, tile collection, compositing
    /// or export fails
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path();

        if self.cli.no_overwrite && output_path.exists() {
            info!(path = %output_path.display(), "Output exists, skipping");
            return Ok(());
        }

        let tile_size = self.cli.tile_size()?;
        let config = self.cli.overlap_config()?;
        let tiles = self.collect_tiles(&output_path)?;
        info!(tiles = tiles.len(), tile_size, "Collected tiles");

        let mut run = MosaicRun::new(&tiles, tile_size, &config)?;
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(run.remaining(), &Self::display_name(&output_path))
        } else {
            ProgressManager::hidden(run.remaining())
        };

        loop {
            match run.draw_next() {
                Ok(Some(point)) => progress.tile_drawn(point),
                Ok(None) => break,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }
        }

        let canvas = run.finish()?;
        progress.finish(start_time.elapsed());

        export_mosaic_as_png(&canvas, &output_path)
    }

    /// Gather tile paths from every target, sorted
    ///
    /// Directories contribute their files with a supported raster extension;
    /// files named directly are always included. `output_path` is never
    /// collected so a previous mosaic is not mistaken for a tile.
    ///
    /// # Errors
    ///
    /// Returns an error if a target does not exist or a directory cannot be read
    pub fn collect_tiles(&self, output_path: &Path) -> Result<Vec<PathBuf>> {
        let existing_output = std::fs::canonicalize(output_path).ok();
        let mut tiles = Vec::new();

        for target in &self.cli.targets {
            if target.is_file() {
                tiles.push(target.clone());
            } else if target.is_dir() {
                let entries = std::fs::read_dir(target)
                    .map_err(|e| file_system_error(target, "read directory", e))?;
                for entry in entries {
                    let path = entry
                        .map_err(|e| file_system_error(target, "read directory entry", e))?
                        .path();
                    if path.is_file()
                        && has_tile_extension(&path)
                        && !is_same_file(&path, existing_output.as_deref())
                    {
                        tiles.push(path);
                    }
                }
            } else {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a tile file or directory",
                ));
            }
        }

        if self.cli.skip_unnamed {
            tiles.retain(|path| {
                let named = tile_point_from_path(path).is_ok();
                if !named {
                    warn!(path = %path.display(), "Skipping file without grid coordinates");
                }
                named
            });
        }

        tiles.sort();
        Ok(tiles)
    }

    /// Output path from the arguments, or derived from the first target
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.cli.output {
            return output.clone();
        }

        let first = self.cli.targets.first().map_or_else(|| Path::new("."), PathBuf::as_path);
        let stem = if first.is_dir() {
            first.file_name()
        } else {
            first.file_stem()
        };
        let stem = stem.map_or_else(|| String::from("tiles"), |s| s.to_string_lossy().into_owned());
        let output_name = format!("{stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}");

        match first.parent() {
            Some(parent) => parent.join(output_name),
            None => PathBuf::from(output_name),
        }
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

fn has_tile_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TILE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn is_same_file(path: &Path, other: Option<&Path>) -> bool {
    other.is_some_and(|other| std::fs::canonicalize(path).is_ok_and(|p| p == other))
}
