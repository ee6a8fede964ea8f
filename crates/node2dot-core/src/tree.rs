//! Node arena: every bracketed group of the input, addressed by a dense id.
use strum_macros::{Display, IntoStaticStr};

use node2dot_error::{Error, Result};

/// Slot of the title row. Attribute slots start right after it.
pub const TITLE_SLOT: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Label color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum NodeColor {
    #[default]
    Black,
    Red,
    Blue,
    Orange,
    Green,
}

impl NodeColor {
    /// Name heuristics used in color mode, checked in order.
    const HEURISTICS: [(&'static str, NodeColor); 4] = [
        ("QUERY", NodeColor::Red),
        ("RTE", NodeColor::Blue),
        ("TARGETENTRY", NodeColor::Orange),
        ("RELOPTINFO", NodeColor::Green),
    ];

    /// Pick the color for a node called `name`.
    ///
    /// Without color mode every node is black. With it, the first heuristic
    /// whose substring occurs in the name wins.
    pub fn for_name(name: &str, color_mode: bool) -> Self {
        if !color_mode {
            return NodeColor::Black;
        }
        Self::HEURISTICS
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|(_, color)| *color)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// One `:`-introduced value of a node, in the row given by `slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub slot: u32,
    pub text: String,
}

/// "Attribute `parent_slot` of `parent` is the nested node `child`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub parent: NodeId,
    pub parent_slot: u32,
    pub child: NodeId,
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    color: NodeColor,
    attributes: Vec<Attribute>,
    edges: Vec<Edge>,
}

impl Node {
    fn new(id: NodeId, name: String, color: NodeColor) -> Self {
        Self {
            id,
            name,
            color,
            attributes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Sanitized name, exactly as scanned (line breaks included).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> NodeColor {
        self.color
    }

    /// Attributes in slot order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Outgoing edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Slot number of the most recently stored attribute, or the title slot.
    pub fn last_slot(&self) -> u32 {
        self.attributes
            .last()
            .map(|attr| attr.slot)
            .unwrap_or(TITLE_SLOT)
    }
}

/// Arena of all parsed nodes with a fixed upper bound on every table.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
    capacity: usize,
}

impl NodeTree {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Parent of `child`, if some edge points at it.
    pub fn parent_of(&self, child: NodeId) -> Option<NodeId> {
        self.nodes
            .iter()
            .flat_map(|node| node.edges.iter())
            .find(|edge| edge.child == child)
            .map(|edge| edge.parent)
    }

    /// Allocate the next node. Ids are handed out densely from zero.
    pub fn add_node(&mut self, name: String, color: NodeColor) -> Result<NodeId> {
        if self.nodes.len() >= self.capacity {
            return Err(Error::capacity_exceeded("node", self.capacity)
                .with_operation("tree::add_node"));
        }
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, name, color));
        Ok(id)
    }

    /// Store `text` in row `slot` of `node`.
    pub fn add_attribute(&mut self, node: NodeId, slot: u32, text: String) -> Result<()> {
        let capacity = self.capacity;
        let node = self.node_mut(node, "tree::add_attribute")?;
        if node.attributes.len() >= capacity {
            return Err(Error::capacity_exceeded("attribute", capacity)
                .with_operation("tree::add_attribute")
                .with_context("node", node.id.to_string()));
        }
        debug_assert!(slot > node.last_slot(), "attribute slots must increase");
        node.attributes.push(Attribute { slot, text });
        Ok(())
    }

    /// Record an edge on its parent node.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let capacity = self.capacity;
        let node = self.node_mut(edge.parent, "tree::add_edge")?;
        if node.edges.len() >= capacity {
            return Err(Error::capacity_exceeded("edge", capacity)
                .with_operation("tree::add_edge")
                .with_context("node", node.id.to_string()));
        }
        node.edges.push(edge);
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId, operation: &'static str) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or_else(|| {
            Error::unexpected(format!("node {} does not exist", id)).with_operation(operation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node2dot_error::ErrorKind;

    #[test]
    fn test_ids_are_dense() {
        let mut tree = NodeTree::with_capacity(8);
        let a = tree.add_node("A".into(), NodeColor::Black).unwrap();
        let b = tree.add_node("B".into(), NodeColor::Black).unwrap();
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(b).unwrap().name(), "B");
    }

    #[test]
    fn test_node_capacity() {
        let mut tree = NodeTree::with_capacity(1);
        tree.add_node("A".into(), NodeColor::Black).unwrap();
        let err = tree.add_node("B".into(), NodeColor::Black).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(err.context_value("table"), Some("node"));
    }

    #[test]
    fn test_attribute_and_edge_capacity() {
        let mut tree = NodeTree::with_capacity(2);
        let a = tree.add_node("A".into(), NodeColor::Black).unwrap();
        let b = tree.add_node("B".into(), NodeColor::Black).unwrap();
        tree.add_attribute(a, 1, "x".into()).unwrap();
        tree.add_attribute(a, 2, "y".into()).unwrap();
        let err = tree.add_attribute(a, 3, "z".into()).unwrap_err();
        assert_eq!(err.context_value("table"), Some("attribute"));

        let edge = Edge {
            parent: a,
            parent_slot: 2,
            child: b,
        };
        tree.add_edge(edge).unwrap();
        tree.add_edge(edge).unwrap();
        let err = tree.add_edge(edge).unwrap_err();
        assert_eq!(err.context_value("table"), Some("edge"));
        assert_eq!(tree.edge_count(), 2);
        assert_eq!(tree.parent_of(b), Some(a));
        assert_eq!(tree.parent_of(a), None);
    }

    #[test]
    fn test_color_heuristics() {
        assert_eq!(NodeColor::for_name("QUERY", false), NodeColor::Black);
        assert_eq!(NodeColor::for_name("QUERY", true), NodeColor::Red);
        assert_eq!(NodeColor::for_name("RTE ", true), NodeColor::Blue);
        assert_eq!(NodeColor::for_name("TARGETENTRY", true), NodeColor::Orange);
        assert_eq!(NodeColor::for_name("RELOPTINFO", true), NodeColor::Green);
        assert_eq!(NodeColor::for_name("VAR", true), NodeColor::Black);
        assert_eq!(NodeColor::Orange.to_string(), "orange");
        assert_eq!(NodeColor::Green.as_str(), "green");
    }
}
