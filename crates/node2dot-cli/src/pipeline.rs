//! Conversion pipeline: header → parse → body → footer.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::info;

use node2dot_core::{parse_reader, render_tree};
use node2dot_dot::{Renderer, render_footer, render_header};
use node2dot_error::Result;

use crate::Node2DotOptions;

/// What a finished conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub nodes: usize,
    pub edges: usize,
}

/// Convert one dump.
///
/// The header is written before any input is read; labels and edges follow
/// once the whole input has been parsed. If `diagnostics` is given and tree
/// printing is enabled, the tree outline goes there.
pub fn convert<R, W>(
    opts: &Node2DotOptions,
    input: R,
    output: &mut W,
    diagnostics: Option<&mut dyn Write>,
) -> Result<Summary>
where
    R: BufRead,
    W: Write + ?Sized,
{
    output.write_all(render_header().as_bytes())?;

    let parse_start = Instant::now();
    let tree = parse_reader(input, &opts.parse)
        .map_err(|e| e.with_operation("pipeline::convert"))?;
    let summary = Summary {
        nodes: tree.len(),
        edges: tree.edge_count(),
    };
    info!(
        nodes = summary.nodes,
        edges = summary.edges,
        "Parsing: {:.2}s",
        parse_start.elapsed().as_secs_f64()
    );

    if opts.print_tree {
        if let Some(diag) = diagnostics {
            diag.write_all(render_tree(&tree).as_bytes())?;
        }
    }

    let render_start = Instant::now();
    let mut renderer = Renderer::new(opts.render.clone());
    output.write_all(renderer.render_body(&tree).as_bytes())?;
    output.write_all(render_footer().as_bytes())?;
    output.flush()?;
    info!(
        "Graph rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    Ok(summary)
}
