//! DOT format utilities for graph rendering.

use std::fmt::Write;

/// Escape special characters for quoted DOT attribute values.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape text placed inside an HTML-like label.
///
/// `<`, `>` and `"` never reach this point (the sanitizer rewrites them),
/// so only entity starts need care.
pub fn escape_html(input: &str) -> String {
    input.replace('&', "&amp;")
}

/// Text up to the first line break.
pub fn first_line(input: &str) -> &str {
    input.split(['\n', '\r']).next().unwrap_or("")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    /// Create a builder for statements inside an already opened graph.
    pub fn fragment(indent: usize) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent,
        }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "node [{attrs}];");
        self
    }

    /// Add a node whose label is an HTML-like table.
    ///
    /// Continuation lines of `html` are indented one level deeper than the
    /// node statement.
    pub fn html_node(&mut self, id: &str, html: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{id} [label=<");
        for (i, line) in html.lines().enumerate() {
            if i > 0 {
                self.output.push('\n');
                write_indent(&mut self.output, self.indent + 1);
            }
            self.output.push_str(line);
        }
        self.output.push_str(">];\n");
        self
    }

    /// Add an edge with attributes.
    pub fn edge_with_attrs(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{from} -> {to} [");
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{key}=\"{value}\"");
        }
        self.output.push_str("];\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }

    /// Return the statements written so far without closing the graph.
    pub fn into_string(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        assert_eq!(escape_label("a\"b\n"), "a\\\"b\\n");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(first_line("abc \n def"), "abc ");
        assert_eq!(first_line("abc\r\n"), "abc");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_builder_statements() {
        let mut dot = DotBuilder::new("G");
        dot.attr("rankdir", "LR")
            .node_style("shape=none")
            .html_node("n0", "<table>\n<tr></tr>\n</table>")
            .edge_with_attrs("n0:f1", "n1:f0", &[("color", "red"), ("style", "bold")]);
        let expected = "\
digraph G {
  rankdir=\"LR\";
  node [shape=none];
  n0 [label=<<table>
    <tr></tr>
    </table>>];
  n0:f1 -> n1:f0 [color=\"red\", style=\"bold\"];
}
";
        assert_eq!(dot.build(), expected);
    }

    #[test]
    fn test_fragment_has_no_frame() {
        let mut dot = DotBuilder::fragment(1);
        dot.node_style("shape=none");
        assert_eq!(dot.into_string(), "  node [shape=none];\n");
    }
}
