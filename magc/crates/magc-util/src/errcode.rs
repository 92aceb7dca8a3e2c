//! Pipeline-wide error codes.
//!
//! Every phase reports failures through the same closed set of codes: the
//! tokenizer stores one in its `done` field, the parser carries one on its
//! error value, and the driver maps any of them to exit code 1.

use thiserror::Error;

/// The error taxonomy shared by the tokenizer, parser and driver.
///
/// `Ok` and `Eof` are not failures: `Ok` is the resting state and `Eof`
/// marks clean end of input. Everything else halts the pipeline at the
/// first occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorCode {
    /// No error
    #[error("no error")]
    Ok,
    /// End of input reached cleanly
    #[error("end of input")]
    Eof,
    /// Unterminated single-quoted string, or EOF right after a backslash
    #[error("end of line inside string literal")]
    Eols,
    /// Unterminated triple-quoted string
    #[error("end of file inside triple-quoted string literal")]
    Eofs,
    /// Malformed numeric literal
    #[error("malformed numeric literal")]
    Token,
    /// Inconsistent mixing of tabs and spaces with the tab guard enabled
    #[error("inconsistent use of tabs and spaces in indentation")]
    TabSpace,
    /// Indentation nested past the fixed stack limit
    #[error("too many levels of indentation")]
    TooDeep,
    /// Dedent to a column that matches no enclosing indentation level
    #[error("unindent does not match any outer indentation level")]
    Dedent,
    /// Backslash not immediately followed by a newline
    #[error("unexpected character after line continuation backslash")]
    LineCont,
    /// Invalid UTF-8 encountered while tokenizing
    #[error("source is not valid UTF-8")]
    Decode,
    /// The parser could not match the incoming token
    #[error("invalid syntax")]
    Syntax,
    /// Allocation failure (fatal)
    #[error("out of memory")]
    NoMem,
}

impl ErrorCode {
    /// The conventional `E_*` name for this code, as shown in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Ok => "E_OK",
            ErrorCode::Eof => "E_EOF",
            ErrorCode::Eols => "E_EOLS",
            ErrorCode::Eofs => "E_EOFS",
            ErrorCode::Token => "E_TOKEN",
            ErrorCode::TabSpace => "E_TABSPACE",
            ErrorCode::TooDeep => "E_TOODEEP",
            ErrorCode::Dedent => "E_DEDENT",
            ErrorCode::LineCont => "E_LINECONT",
            ErrorCode::Decode => "E_DECODE",
            ErrorCode::Syntax => "E_SYNTAX",
            ErrorCode::NoMem => "E_NOMEM",
        }
    }

    /// True for the two non-failure codes.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, ErrorCode::Ok | ErrorCode::Eof)
    }
}
