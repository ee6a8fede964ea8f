//! Byte scanner over the dump with one byte of pushback.
//!
//! The grammar only has three significant bytes: `{` opens a node, `}`
//! closes it and `:` introduces an attribute. Everything else is either
//! token text or, outside of any node, noise to skip.
use std::io::{BufRead, ErrorKind as IoErrorKind};

use node2dot_error::{Error, Result};

const OPEN: u8 = b'{';
const CLOSE: u8 = b'}';
const COLON: u8 = b':';

fn is_delimiter(byte: u8) -> bool {
    matches!(byte, OPEN | CLOSE | COLON)
}

/// A structural byte, as seen by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Open,
    Close,
    Colon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Depth zero: discard input until the next `{`.
    #[default]
    Seeking,
    /// Inside a node: bytes between tokens are skipped, delimiters reported.
    InNode,
}

pub struct Scanner<R> {
    reader: R,
    pushback: Option<u8>,
    mode: ScanMode,
    offset: u64,
    token_capacity: usize,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R, token_capacity: usize) -> Self {
        Self {
            reader,
            pushback: None,
            mode: ScanMode::Seeking,
            offset: 0,
            token_capacity,
        }
    }

    pub fn set_mode(&mut self, mode: ScanMode) {
        self.mode = mode;
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Next structural event, or `None` at end of input.
    ///
    /// End of input between tokens is normal termination in both modes.
    /// While seeking, `:` is noise but `}` is still reported so the caller
    /// can apply its unmatched-close policy.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        while let Some(byte) = self.read_byte()? {
            let event = match (self.mode, byte) {
                (_, OPEN) => Event::Open,
                (_, CLOSE) => Event::Close,
                (ScanMode::InNode, COLON) => Event::Colon,
                _ => continue,
            };
            return Ok(Some(event));
        }
        Ok(None)
    }

    /// Read raw token text up to the next delimiter.
    ///
    /// The delimiter stays in the stream for the following `next_event`.
    /// Line breaks are kept; invalid UTF-8 is replaced lossily.
    pub fn next_token(&mut self) -> Result<String> {
        let start = self.offset;
        let mut bytes = Vec::new();
        loop {
            match self.read_byte()? {
                None => {
                    return Err(Error::unexpected_eof("input ended inside a token")
                        .with_operation("scanner::next_token")
                        .with_context("offset", start.to_string()));
                }
                Some(byte) if is_delimiter(byte) => {
                    self.unread(byte);
                    break;
                }
                Some(byte) => {
                    if bytes.len() >= self.token_capacity {
                        return Err(Error::capacity_exceeded("token", self.token_capacity)
                            .with_operation("scanner::next_token")
                            .with_context("offset", start.to_string()));
                    }
                    bytes.push(byte);
                }
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            self.offset += 1;
            return Ok(Some(byte));
        }
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == IoErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(Error::from(err)
                        .with_operation("scanner::read")
                        .with_context("offset", self.offset.to_string()));
                }
            };
            if byte.is_some() {
                self.reader.consume(1);
                self.offset += 1;
            }
            return Ok(byte);
        }
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "only one byte of pushback");
        self.pushback = Some(byte);
        self.offset -= 1;
    }
}
