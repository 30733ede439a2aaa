//! CLI entry point for stitching tiles into a mosaic

use clap::Parser;
use tilestitch::io::cli::{Cli, MosaicProcessor};
use tilestitch::io::logging::init_logging;

fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let processor = MosaicProcessor::new(cli);
    processor.process()
}
