//! Parsing of nested `{ NAME :attr ... }` node dumps into a [`NodeTree`].
//!
//! - [`scanner`]: byte scanner with delimiter pushback and seeking mode
//! - [`sanitize`]: label-safe token cleanup and skip-empty suppression
//! - [`stack`]: bounded nesting stack of (node, slot) frames
//! - [`builder`]: the parse loop
//! - [`tree`]: node arena, attributes and edges
//! - [`printer`]: indented debug outline
pub mod builder;
pub mod config;
pub mod printer;
pub mod sanitize;
pub mod scanner;
pub mod stack;
pub mod tree;

pub use builder::{TreeBuilder, parse_reader, parse_str};
pub use config::{DEFAULT_CAPACITY, DEFAULT_TOKEN_CAPACITY, ParseConfig, UnmatchedClose};
pub use node2dot_error::{Error, ErrorKind, Result};
pub use printer::render_tree;
pub use sanitize::Sanitizer;
pub use scanner::{Event, ScanMode, Scanner};
pub use stack::{Frame, NestingStack};
pub use tree::{Attribute, Edge, Node, NodeColor, NodeId, NodeTree, TITLE_SLOT};
