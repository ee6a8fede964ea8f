//! node2dot command-line interface.
//!
pub mod options;
pub mod pipeline;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use tracing::info;

use node2dot_error::{Error, Result};

pub use options::{Cli, Node2DotOptions, parse_args};
pub use pipeline::{Summary, convert};

pub const PROGNAME: &str = "node2dot";

/// Main entry point: open input and output, then convert.
pub fn run_main(opts: &Node2DotOptions) -> Result<Summary> {
    opts.parse
        .validate()
        .map_err(|e| e.with_operation("cli::run_main"))?;

    let input: Box<dyn BufRead> = match &opts.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                Error::from(e)
                    .with_operation("cli::open_input")
                    .with_context("path", path.display().to_string())
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut output: Box<dyn Write> = match &opts.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::from(e)
                    .with_operation("cli::create_output")
                    .with_context("path", path.display().to_string())
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let mut stderr = io::stderr();
    let summary = convert(opts, input, &mut output, Some(&mut stderr as &mut dyn Write))?;

    if let Some(path) = &opts.output {
        info!(path = %path.display(), "output written");
    }
    Ok(summary)
}
