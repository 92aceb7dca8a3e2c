//! Parse error types.

use std::fmt;

use magc_util::ErrorCode;
use thiserror::Error;

/// A failure reported by the tokenizer or the parser.
///
/// Carries everything the driver needs for a report: the error code, the
/// position, the offending line's text, and (for syntax errors from a
/// single-expectation state) what would have been legal instead.
#[derive(Debug, Clone, Error)]
pub struct ParseError {
    /// Which error occurred
    pub code: ErrorCode,
    /// Line number (1-based)
    pub lineno: u32,
    /// Byte offset of the error within the line (0-based)
    pub offset: usize,
    /// The offending source line, when available
    pub text: Option<String>,
    /// Name of the single expected token or production, when known
    pub expected: Option<Box<str>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at line {}, column {}",
            self.code,
            self.code.name(),
            self.lineno,
            self.offset + 1
        )
    }
}

/// Error raised inside [`Parser::add_token`](crate::Parser::add_token)
/// when no arc matches and the state does not accept.
#[derive(Debug, Clone, Error)]
#[error("syntax error at line {lineno}")]
pub struct SyntaxError {
    /// Line of the offending token
    pub lineno: u32,
    /// Column of the offending token (-1 when unknown)
    pub col_offset: i32,
    /// Name of the single expected label, when the state had exactly one
    pub expected: Option<Box<str>>,
}
