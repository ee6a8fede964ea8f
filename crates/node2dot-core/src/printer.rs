//! Debug outline of a parsed tree.
//!
//! ```text
//! (QUERY #0
//!   :1 commandType 1
//!   :2 rtable
//!   (RTE #1 <- :2
//!     :1 alias
//!   )
//! )
//! ```
use std::fmt::Write;

use crate::tree::{Node, NodeId, NodeTree};

const INDENT_WIDTH: usize = 2;
/// Deeper levels are printed at this indentation so output stays linear.
const MAX_INDENT_DEPTH: usize = 32;

enum Step<'t> {
    Enter {
        node: &'t Node,
        via_slot: Option<u32>,
        depth: usize,
    },
    Row {
        slot: u32,
        text: &'t str,
        depth: usize,
    },
    Leave {
        depth: usize,
    },
}

/// Render every top-level tree as an indented outline.
pub fn render_tree(tree: &NodeTree) -> String {
    let mut children: Vec<Vec<(u32, NodeId)>> = vec![Vec::new(); tree.len()];
    let mut is_child = vec![false; tree.len()];
    for node in tree.iter() {
        for edge in node.edges() {
            children[node.id().index()].push((edge.parent_slot, edge.child));
            is_child[edge.child.index()] = true;
        }
    }

    let mut out = String::new();
    let mut work = Vec::new();
    for root in tree.iter().filter(|node| !is_child[node.id().index()]) {
        work.push(Step::Enter {
            node: root,
            via_slot: None,
            depth: 0,
        });
        while let Some(step) = work.pop() {
            match step {
                Step::Enter {
                    node,
                    via_slot,
                    depth,
                } => {
                    let _ = write!(
                        out,
                        "{}({} #{}",
                        pad(depth),
                        first_line(node.name()).trim(),
                        node.id()
                    );
                    if let Some(slot) = via_slot {
                        let _ = write!(out, " <- :{}", slot);
                    }
                    out.push('\n');
                    work.push(Step::Leave { depth });
                    let start = work.len();
                    schedule(&mut work, tree, node, &children[node.id().index()], depth);
                    // Popped last-in first-out, so flip them into outline order.
                    work[start..].reverse();
                }
                Step::Row { slot, text, depth } => {
                    let _ = writeln!(
                        out,
                        "{}:{} {}",
                        pad(depth + 1),
                        slot,
                        first_line(text).trim()
                    );
                }
                Step::Leave { depth } => {
                    let _ = writeln!(out, "{})", pad(depth));
                }
            }
        }
    }
    out
}

/// Queue the rows and children of `node` in outline order.
fn schedule<'t>(
    work: &mut Vec<Step<'t>>,
    tree: &'t NodeTree,
    node: &'t Node,
    children: &[(u32, NodeId)],
    depth: usize,
) {
    // Children hang off the slot that was active when they opened, so they
    // come right after that attribute (or before any attribute for slot 0).
    let mut pending = children.iter().peekable();
    let mut enter_upto = |work: &mut Vec<Step<'t>>, slot: u32| {
        while let Some((child_slot, child)) = pending.next_if(|(s, _)| *s <= slot) {
            if let Some(child_node) = tree.get(*child) {
                work.push(Step::Enter {
                    node: child_node,
                    via_slot: Some(*child_slot),
                    depth: depth + 1,
                });
            }
        }
    };

    enter_upto(work, 0);
    for attr in node.attributes() {
        work.push(Step::Row {
            slot: attr.slot,
            text: &attr.text,
            depth,
        });
        enter_upto(work, attr.slot);
    }
    enter_upto(work, u32::MAX);
}

fn pad(depth: usize) -> String {
    " ".repeat(depth.min(MAX_INDENT_DEPTH) * INDENT_WIDTH)
}

fn first_line(text: &str) -> &str {
    text.split(['\n', '\r']).next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseConfig, parse_str};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outline() {
        let tree = parse_str(
            "{QUERY\n :commandType 1\n :rtable ({RTE :alias x}) :jointree {FROMEXPR}}\n{VAR}",
            &ParseConfig::default(),
        )
        .unwrap();
        let expected = "\
(QUERY #0
  :1 commandType 1
  :2 rtable
  (RTE #1 <- :2
    :1 alias x
  )
  :3 jointree
  (FROMEXPR #2 <- :3
  )
)
(VAR #3
)
";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 100_000;
        let input = format!("{}{}", "{N :".repeat(depth), "}".repeat(depth));
        let config = ParseConfig::new().with_capacity(depth);
        let tree = parse_str(&input, &config).unwrap();

        let outline = render_tree(&tree);
        assert_eq!(outline.lines().count(), 3 * depth);
        assert!(outline.starts_with("(N #0\n  :1 \n  (N #1 <- :1\n    :1 \n"));
        assert!(outline.ends_with(")\n)\n"));

        let widest = outline.lines().map(|line| line.len() - line.trim_start().len()).max();
        assert_eq!(widest, Some(MAX_INDENT_DEPTH * INDENT_WIDTH));
    }
}
