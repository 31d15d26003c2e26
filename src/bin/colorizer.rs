//! PNG Colorizer CLI Tool
//!
//! Command-line interface for flattening transparent PNGs onto generated
//! background colors.

use png_colorizer::cli;

fn main() -> anyhow::Result<()> {
    cli::main()
}
