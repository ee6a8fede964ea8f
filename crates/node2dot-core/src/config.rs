//! Parser configuration.

use node2dot_error::{Error, Result};

/// Bound shared by the node table, per-node attribute and edge lists, and
/// the nesting stack.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Longest accepted token, in bytes.
pub const DEFAULT_TOKEN_CAPACITY: usize = 1024;

/// What to do with a `}` seen while no node is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedClose {
    /// Skip it and keep seeking for the next `{`.
    #[default]
    Ignore,
    /// Stop with an `UnmatchedClose` error.
    Fail,
}

/// Settings for turning a dump into a [`NodeTree`](crate::NodeTree).
///
/// Use the builder methods to customize behavior; the defaults reproduce the
/// tolerant behavior of the classic tool.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Drop attribute tokens containing `false` or `--`
    pub skip_empty: bool,

    /// Derive node colors from their names
    pub color: bool,

    /// Policy for closing brackets at depth zero
    pub unmatched_close: UnmatchedClose,

    /// Bound on nodes, attributes per node, edges per node, nesting depth
    pub capacity: usize,

    /// Bound on a single token's length in bytes
    pub token_capacity: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            skip_empty: false,
            color: false,
            unmatched_close: UnmatchedClose::Ignore,
            capacity: DEFAULT_CAPACITY,
            token_capacity: DEFAULT_TOKEN_CAPACITY,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_empty(mut self, enabled: bool) -> Self {
        self.skip_empty = enabled;
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn with_unmatched_close(mut self, policy: UnmatchedClose) -> Self {
        self.unmatched_close = policy;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_token_capacity(mut self, capacity: usize) -> Self {
        self.token_capacity = capacity;
        self
    }

    /// Reject settings under which nothing could ever be parsed.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::config_invalid("capacity must be > 0"));
        }
        if self.capacity > u32::MAX as usize {
            return Err(Error::config_invalid("capacity must fit in 32 bits"));
        }
        if self.token_capacity == 0 {
            return Err(Error::config_invalid("token capacity must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node2dot_error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ParseConfig::default();
        assert!(!config.skip_empty);
        assert!(!config.color);
        assert_eq!(config.unmatched_close, UnmatchedClose::Ignore);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = ParseConfig::new().with_capacity(0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = ParseConfig::new()
            .with_token_capacity(0)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
