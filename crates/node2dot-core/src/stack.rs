//! Nesting stack: saved (active node, active slot) pairs across `{ ... }`.

use node2dot_error::{Error, Result};

use crate::tree::{NodeId, TITLE_SLOT};

/// Parser position: the node that receives attributes and the slot counter
/// of the last attribute stored on it.
///
/// At top level there is no active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub node: Option<NodeId>,
    pub slot: u32,
}

impl Frame {
    pub const TOP_LEVEL: Frame = Frame {
        node: None,
        slot: TITLE_SLOT,
    };

    /// Fresh frame for a node that was just opened.
    pub fn enter(node: NodeId) -> Self {
        Self {
            node: Some(node),
            slot: TITLE_SLOT,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::TOP_LEVEL
    }
}

/// Bounded LIFO of frames. Each push saves a whole frame, so the node and
/// its slot counter can never be restored out of step.
#[derive(Debug, Clone)]
pub struct NestingStack {
    frames: Vec<Frame>,
    capacity: usize,
}

impl NestingStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            capacity,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if self.frames.len() >= self.capacity {
            return Err(Error::capacity_exceeded("nesting", self.capacity)
                .with_operation("stack::push"));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the innermost saved frame; `None` at depth zero.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }
}
