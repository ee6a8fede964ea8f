//! Error kinds for node2dot operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// The CLI matches on the kind to pick its exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration value (zero capacity, ...)
    ConfigInvalid,

    /// Unknown or malformed command-line option
    InvalidArgument,

    // =========================================================================
    // Parse errors
    // =========================================================================
    /// Input ended in the middle of a token
    UnexpectedEof,

    /// A closing bracket appeared while no node was open
    UnmatchedClose,

    // =========================================================================
    // Resource errors
    // =========================================================================
    /// A bounded table (nodes, attributes, edges, nesting, token) is full
    CapacityExceeded,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// Reading input or writing output failed
    IoFailed,

    /// Encoding error (invalid UTF-8, etc.)
    EncodingError,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
