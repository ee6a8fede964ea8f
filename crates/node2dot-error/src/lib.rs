//! # node2dot-error
//!
//! Unified error handling for node2dot.
//!
//! - **ErrorKind**: what went wrong (e.g., UnexpectedEof, CapacityExceeded)
//! - **Error Context**: where it went wrong (operation, byte offset, table)
//! - **Error Source**: the wrapped underlying error, when there is one
//!
//! ## Usage
//!
//! ```rust
//! use node2dot_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::UnexpectedEof, "input ended inside a token")
//!         .with_operation("scanner::next_token")
//!         .with_context("offset", "42"))
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using node2dot Error
pub type Result<T> = std::result::Result<T, Error>;
