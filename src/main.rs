//! CLI entry point for greedy texture synthesis

use clap::Parser;
use retexture::io::cli::{Cli, FileProcessor, init_tracing};

fn main() -> retexture::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
