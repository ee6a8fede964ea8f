//! Node tree to DOT: fixed prologue, one table label per visible node, one
//! port-to-port edge per recorded nesting, fixed epilogue.
use std::fmt::Write;

use tracing::debug;

use node2dot_core::{Node, NodeTree, TITLE_SLOT};

use crate::dot::{DotBuilder, escape_html, first_line};
use crate::palette::EdgePalette;

const GRAPH_NAME: &str = "Query";
const CANVAS_SIZE: &str = "100000,100000";
const TITLE_FONT: &str = "verdana";
const ROW_FONT: &str = "arial";
const CELL_ATTRS: &str = r#"border="1" align="center" valign="middle""#;

#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Hide nodes whose name contains this substring
    pub skip_node: Option<String>,

    /// Fixed edge-color seed; clock-seeded when unset
    pub seed: Option<u64>,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty name is dropped instead of hiding every node.
    pub fn with_skip_node(mut self, name: Option<String>) -> Self {
        self.skip_node = name.filter(|s| !s.is_empty());
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Port name of a table row.
pub fn port(slot: u32) -> String {
    format!("f{slot}")
}

/// DOT id of a node.
pub fn node_ref(node: &Node) -> String {
    format!("node{}", node.id())
}

/// Graph declaration and defaults, emitted before any input is read.
pub fn render_header() -> String {
    let mut dot = DotBuilder::new(GRAPH_NAME);
    write_prologue(&mut dot);
    dot.into_string()
}

pub fn render_footer() -> String {
    "}\n".to_string()
}

fn write_prologue(dot: &mut DotBuilder) {
    dot.attr("size", CANVAS_SIZE)
        .attr("rankdir", "LR")
        .node_style("shape=none");
}

/// HTML-like table label: the name in a bold title row, then one row per
/// attribute, each row addressable by its slot port.
pub fn table_label(node: &Node) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        r#"<table border="0" cellspacing="0" color="{}">"#,
        node.color()
    );
    let _ = writeln!(html, "  <tr>");
    let _ = writeln!(html, r#"    <td port="{}" {}>"#, port(TITLE_SLOT), CELL_ATTRS);
    let _ = writeln!(
        html,
        r#"      <b><font face="{}">{}</font></b>"#,
        TITLE_FONT,
        escape_html(first_line(node.name()))
    );
    let _ = writeln!(html, "    </td>");
    let _ = writeln!(html, "  </tr>");
    for attr in node.attributes() {
        let _ = writeln!(
            html,
            r#"  <tr><td port="{}" {}><font face="{}">{}</font></td></tr>"#,
            port(attr.slot),
            CELL_ATTRS,
            ROW_FONT,
            escape_html(first_line(&attr.text))
        );
    }
    html.push_str("</table>");
    html
}

/// Renders trees with one edge palette for its whole lifetime.
///
/// Every emitted edge draws the next palette color, so a second `render` on
/// the same renderer continues the color sequence instead of repeating it.
pub struct Renderer {
    config: RenderConfig,
    palette: EdgePalette,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let palette = match config.seed {
            Some(seed) => EdgePalette::seeded(seed),
            None => EdgePalette::from_time(),
        };
        Self { config, palette }
    }

    /// Whether a node gets a label and may be the source of edges.
    pub fn is_visible(&self, node: &Node) -> bool {
        if node.name().is_empty() {
            return false;
        }
        match &self.config.skip_node {
            Some(skip) => !node.name().contains(skip.as_str()),
            None => true,
        }
    }

    /// Labels and edges, without the graph frame.
    pub fn render_body(&mut self, tree: &NodeTree) -> String {
        let mut dot = DotBuilder::fragment(1);
        self.write_body(&mut dot, tree);
        dot.into_string()
    }

    /// The whole document.
    pub fn render(&mut self, tree: &NodeTree) -> String {
        let mut dot = DotBuilder::new(GRAPH_NAME);
        write_prologue(&mut dot);
        self.write_body(&mut dot, tree);
        dot.build()
    }

    fn write_body(&mut self, dot: &mut DotBuilder, tree: &NodeTree) {
        let visible: Vec<&Node> = tree.iter().filter(|node| self.is_visible(node)).collect();
        for node in &visible {
            dot.html_node(&node_ref(node), &table_label(node));
        }

        let mut edges = 0usize;
        for node in &visible {
            for edge in node.edges() {
                // Hidden children still receive their inbound edge.
                let Some(child) = tree.get(edge.child) else {
                    continue;
                };
                let from = format!("{}:{}", node_ref(node), port(edge.parent_slot));
                let to = format!("{}:{}", node_ref(child), port(TITLE_SLOT));
                let color = self.palette.next_color();
                dot.edge_with_attrs(&from, &to, &[("color", color), ("style", "bold")]);
                edges += 1;
            }
        }
        debug!(labels = visible.len(), edges, "rendered body");
    }
}
