//! Tree builder: drives the scanner and sanitizer to build a [`NodeTree`].
//!
//! The builder keeps an explicit cursor (active node, active slot counter)
//! instead of global state. Opening a node saves the cursor on the nesting
//! stack and starts a fresh one; closing restores the saved cursor.
use std::io::BufRead;

use tracing::{debug, warn};

use node2dot_error::{Error, Result};

use crate::config::{ParseConfig, UnmatchedClose};
use crate::sanitize::Sanitizer;
use crate::scanner::{Event, ScanMode, Scanner};
use crate::stack::{Frame, NestingStack};
use crate::tree::{Edge, NodeColor, NodeTree};

pub struct TreeBuilder<R> {
    scanner: Scanner<R>,
    sanitizer: Sanitizer,
    stack: NestingStack,
    tree: NodeTree,
    cursor: Frame,
    color: bool,
    unmatched_close: UnmatchedClose,
}

impl<R: BufRead> TreeBuilder<R> {
    pub fn new(reader: R, config: &ParseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scanner: Scanner::new(reader, config.token_capacity),
            sanitizer: Sanitizer::new(config.skip_empty),
            stack: NestingStack::with_capacity(config.capacity),
            tree: NodeTree::with_capacity(config.capacity),
            cursor: Frame::TOP_LEVEL,
            color: config.color,
            unmatched_close: config.unmatched_close,
        })
    }

    /// Current (active node, active slot) pair.
    pub fn cursor(&self) -> Frame {
        self.cursor
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Process the next structural event. Returns `false` at end of input.
    pub fn step(&mut self) -> Result<bool> {
        let Some(event) = self.scanner.next_event()? else {
            return Ok(false);
        };
        match event {
            Event::Open => self.open_node()?,
            Event::Close => self.close_node()?,
            Event::Colon => self.add_attribute()?,
        }
        Ok(true)
    }

    /// Consume the whole input and hand back the finished tree.
    pub fn build(mut self) -> Result<NodeTree> {
        while self.step()? {}

        if !self.stack.is_empty() {
            warn!(
                depth = self.stack.depth(),
                offset = self.scanner.offset(),
                "input ended with unclosed nodes"
            );
        }
        debug!(
            nodes = self.tree.len(),
            edges = self.tree.edge_count(),
            "tree built"
        );
        Ok(self.tree)
    }

    fn open_node(&mut self) -> Result<()> {
        self.scanner.set_mode(ScanMode::InNode);
        let raw = self
            .scanner
            .next_token()
            .map_err(|e| e.with_operation("builder::open_node"))?;
        // A suppressed name still allocates the node; it just stays hidden.
        let name = self.sanitizer.clean(&raw).unwrap_or_default();
        let color = NodeColor::for_name(&name, self.color);
        let id = self.tree.add_node(name, color)?;

        if let Some(parent) = self.cursor.node {
            self.tree.add_edge(Edge {
                parent,
                parent_slot: self.cursor.slot,
                child: id,
            })?;
        }

        self.stack.push(self.cursor)?;
        self.cursor = Frame::enter(id);
        debug!(id = id.as_u32(), depth = self.stack.depth(), "open node");
        Ok(())
    }

    fn close_node(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(saved) => {
                debug!(depth = self.stack.depth(), "close node");
                self.cursor = saved;
                if self.stack.is_empty() {
                    self.scanner.set_mode(ScanMode::Seeking);
                }
                Ok(())
            }
            None => {
                let offset = self.scanner.offset().saturating_sub(1);
                match self.unmatched_close {
                    UnmatchedClose::Ignore => {
                        debug!(offset, "not in a node, skipping closing bracket");
                        Ok(())
                    }
                    UnmatchedClose::Fail => {
                        Err(Error::unmatched_close(offset).with_operation("builder::close_node"))
                    }
                }
            }
        }
    }

    fn add_attribute(&mut self) -> Result<()> {
        let raw = self
            .scanner
            .next_token()
            .map_err(|e| e.with_operation("builder::add_attribute"))?;
        let Some(node) = self.cursor.node else {
            return Ok(());
        };
        let Some(text) = self.sanitizer.clean(&raw) else {
            // Suppressed values do not consume a slot.
            return Ok(());
        };
        let slot = self.cursor.slot + 1;
        self.tree.add_attribute(node, slot, text)?;
        self.cursor.slot = slot;
        Ok(())
    }
}

/// Parse a whole reader into a tree.
pub fn parse_reader<R: BufRead>(reader: R, config: &ParseConfig) -> Result<NodeTree> {
    TreeBuilder::new(reader, config)?.build()
}

/// Parse an in-memory dump into a tree.
pub fn parse_str(input: &str, config: &ParseConfig) -> Result<NodeTree> {
    parse_reader(input.as_bytes(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Attribute, NodeId};
    use node2dot_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> NodeTree {
        parse_str(input, &ParseConfig::default()).unwrap()
    }

    fn texts(tree: &NodeTree, id: u32) -> Vec<(u32, String)> {
        tree.get(NodeId(id))
            .unwrap()
            .attributes()
            .iter()
            .map(|Attribute { slot, text }| (*slot, text.clone()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tree = parse("");
        assert!(tree.is_empty());
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn test_nested_child_hangs_off_current_slot() {
        let tree = parse("{A:{B}}");
        assert_eq!(tree.len(), 2);
        assert_eq!(texts(&tree, 0), vec![(1, String::new())]);
        assert_eq!(
            tree.get(NodeId(0)).unwrap().edges(),
            &[Edge {
                parent: NodeId(0),
                parent_slot: 1,
                child: NodeId(1),
            }]
        );
    }

    #[test]
    fn test_attributes_in_slot_order() {
        let tree = parse("{QUERY :commandType 1 :querySource 0 :canSetTag true}");
        assert_eq!(tree.get(NodeId(0)).unwrap().name(), "QUERY ");
        assert_eq!(
            texts(&tree, 0),
            vec![
                (1, "commandType 1 ".to_string()),
                (2, "querySource 0 ".to_string()),
                (3, "canSetTag true".to_string()),
            ]
        );
    }

    #[test]
    fn test_attributes_resume_after_child() {
        let tree = parse("{A :x 1 :child {B :y 2} :z 3}");
        assert_eq!(
            texts(&tree, 0),
            vec![
                (1, "x 1 ".to_string()),
                (2, "child ".to_string()),
                (3, "z 3".to_string()),
            ]
        );
        assert_eq!(tree.get(NodeId(0)).unwrap().edges()[0].parent_slot, 2);
        assert_eq!(texts(&tree, 1), vec![(1, "y 2".to_string())]);
    }

    #[test]
    fn test_list_of_children_share_slot() {
        let tree = parse("{A :list ({B} {C}) :after 1}");
        let edges = tree.get(NodeId(0)).unwrap().edges();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.parent_slot == 1));
        assert_eq!(texts(&tree, 0)[1], (2, "after 1".to_string()));
    }

    #[test]
    fn test_suppressed_attribute_keeps_slots_dense() {
        let config = ParseConfig::new().with_skip_empty(true);
        let tree = parse_str("{A :a false :b 1 :alias <> :c 2}", &config).unwrap();
        assert_eq!(
            texts(&tree, 0),
            vec![(1, "b 1 ".to_string()), (2, "c 2".to_string())]
        );
    }

    #[test]
    fn test_suppressed_name_gives_empty_node() {
        let config = ParseConfig::new().with_skip_empty(true);
        let tree = parse_str("{false :x}", &config).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(NodeId(0)).unwrap().name(), "");
    }

    #[test]
    fn test_noise_between_trees() {
        let tree = parse("LOG: first\n{A :x}\nLOG: second : } \n{B :y}\n");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.edge_count(), 0);
        assert_eq!(tree.get(NodeId(1)).unwrap().name(), "B ");
    }

    #[test]
    fn test_unmatched_close_policy() {
        let tree = parse("}{A}}");
        assert_eq!(tree.len(), 1);

        let config = ParseConfig::new().with_unmatched_close(UnmatchedClose::Fail);
        let err = parse_str("{A}}", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmatchedClose);
        assert_eq!(err.context_value("offset"), Some("3"));
    }

    #[test]
    fn test_eof_mid_token_is_error() {
        let err = parse_str("{A :x", &ParseConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(err.operation(), "builder::add_attribute");

        let err = parse_str("{", &ParseConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(err.operation(), "builder::open_node");
    }

    #[test]
    fn test_unclosed_at_eof_is_tolerated() {
        let tree = parse("{A :x {B}\n");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_capacity_exceeded() {
        let config = ParseConfig::new().with_capacity(2);
        let err = parse_str("{A}{B}{C}", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(err.context_value("table"), Some("node"));

        let err = parse_str("{A :1 :2 :3}", &config).unwrap_err();
        assert_eq!(err.context_value("table"), Some("attribute"));
    }

    #[test]
    fn test_color_mode() {
        let config = ParseConfig::new().with_color(true);
        let tree = parse_str("{QUERY :rtable {RTE}}", &config).unwrap();
        assert_eq!(tree.get(NodeId(0)).unwrap().color(), NodeColor::Red);
        assert_eq!(tree.get(NodeId(1)).unwrap().color(), NodeColor::Blue);
    }

    #[test]
    fn test_nested_chain_restores_top_level() {
        for n in [1usize, 2, 5, 32] {
            let input = format!("{}{}", "{N :".repeat(n), "}".repeat(n));
            let mut builder = TreeBuilder::new(input.as_bytes(), &ParseConfig::default()).unwrap();
            while builder.step().unwrap() {}
            assert_eq!(builder.cursor(), Frame::TOP_LEVEL, "n = {n}");
            assert_eq!(builder.depth(), 0);
            assert_eq!(builder.tree().len(), n);
        }
    }
}
