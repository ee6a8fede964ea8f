//! Command-line options.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;

use node2dot_core::{DEFAULT_CAPACITY, DEFAULT_TOKEN_CAPACITY, ParseConfig, UnmatchedClose};
use node2dot_dot::RenderConfig;
use node2dot_error::{Error, Result};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "node2dot",
    about = "Convert a PostgreSQL node tree dump into Graphviz DOT",
    long_about = "Convert a PostgreSQL node tree dump into Graphviz DOT.\n\n\
                  Reads the dump from stdin (or --input), writes the graph to \
                  stdout (or --output):\n\n    node2dot [options] <filein >fileout",
    version
)]
pub struct Cli {
    /// Do not print elements whose value is false or empty (<>)
    #[arg(long = "skip-empty", default_value_t = false)]
    pub skip_empty: bool,

    /// Do not print nodes whose name contains NODENAME
    #[arg(long = "skip-node", value_name = "NODENAME")]
    pub skip_node: Option<String>,

    /// Color nodes by their name (QUERY, RTE, TARGETENTRY, RELOPTINFO)
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Fail on a closing bracket that has no matching open bracket
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Maximum number of nodes, attributes or edges per node, and nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Maximum length of a single name or value, in bytes
    #[arg(long = "token-capacity", value_name = "BYTES", default_value_t = DEFAULT_TOKEN_CAPACITY)]
    pub token_capacity: usize,

    /// Seed for edge colors (reproducible output)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Print the parsed node tree to stderr
    #[arg(long = "print-tree", default_value_t = false)]
    pub print_tree: bool,

    /// Read the dump from FILE instead of stdin
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the graph to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Parse command-line arguments.
///
/// Returns `Ok(None)` when help or version text was printed and there is
/// nothing left to do.
pub fn parse_args<I, T>(args: I) -> Result<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            let _ = err.print();
            Ok(None)
        }
        Err(err) => {
            let rendered = err.to_string();
            let summary = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            Err(Error::invalid_argument(summary)
                .with_operation("cli::parse_args")
                .set_source(err))
        }
    }
}

/// Everything the pipeline needs, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct Node2DotOptions {
    pub parse: ParseConfig,
    pub render: RenderConfig,
    pub print_tree: bool,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl From<Cli> for Node2DotOptions {
    fn from(cli: Cli) -> Self {
        let unmatched_close = if cli.strict {
            UnmatchedClose::Fail
        } else {
            UnmatchedClose::Ignore
        };
        Self {
            parse: ParseConfig::new()
                .with_skip_empty(cli.skip_empty)
                .with_color(cli.color)
                .with_unmatched_close(unmatched_close)
                .with_capacity(cli.capacity)
                .with_token_capacity(cli.token_capacity),
            render: RenderConfig::new()
                .with_skip_node(cli.skip_node)
                .with_seed(cli.seed),
            print_tree: cli.print_tree,
            input: cli.input,
            output: cli.output,
        }
    }
}

impl Node2DotOptions {
    /// One line per enabled mode, as announced on stderr at startup.
    pub fn announcements(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.parse.skip_empty {
            lines.push("skip empty elements".to_string());
        }
        if self.parse.color {
            lines.push("color output".to_string());
        }
        if let Some(skip) = &self.render.skip_node {
            lines.push(format!("skip node named:{skip}"));
        }
        if self.parse.unmatched_close == UnmatchedClose::Fail {
            lines.push("strict bracket matching".to_string());
        }
        lines
    }
}
