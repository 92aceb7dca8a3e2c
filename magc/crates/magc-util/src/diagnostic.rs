//! Diagnostic rendering - user-facing error reports.
//!
//! The driver turns an [`ErrorCode`](crate::ErrorCode) plus location into
//! a [`Diagnostic`] and prints it to stderr. A report names the error, the
//! line and column, and shows the offending source line with a caret
//! marker beneath the column:
//!
//! ```text
//! error: invalid syntax (E_SYNTAX)
//!   --> line 3, column 9
//!    3 | x = (a ⊕
//!      |         ^
//! ```

use std::fmt;

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that stops the pipeline
    Error,
    /// A warning that does not stop the pipeline
    Warning,
    /// Additional information about a diagnostic
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A source line shown inside a diagnostic, with a caret column.
///
/// Columns are zero-based byte offsets into the line. Tabs in the line are
/// replayed as tabs in the caret row so the marker lines up however the
/// terminal expands them.
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    /// The source line content, without its trailing newline
    pub line: String,
    /// Line number (1-based)
    pub line_number: u32,
    /// Caret column (0-based byte offset), or `None` when unknown
    pub column: Option<usize>,
}

impl SourceSnippet {
    /// Create a snippet for `line_number` with a caret at `column`.
    pub fn new(line: impl Into<String>, line_number: u32, column: Option<usize>) -> Self {
        Self {
            line: line.into(),
            line_number,
            column,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gutter = self.line_number.to_string();
        writeln!(f, " {} | {}", gutter, self.line)?;
        if let Some(col) = self.column {
            write!(f, " {} | ", " ".repeat(gutter.len()))?;
            for byte in self.line.as_bytes().iter().take(col) {
                // Replay tabs so the caret survives tab expansion.
                f.write_str(if *byte == b'\t' { "\t" } else { " " })?;
            }
            writeln!(f, "^")?;
        }
        Ok(())
    }
}

/// A renderable diagnostic message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Main message
    pub message: String,
    /// Line/column header, if a location is known
    pub location: Option<(u32, usize)>,
    /// Source snippet with caret, if the offending line is available
    pub snippet: Option<SourceSnippet>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            location: None,
            snippet: None,
        }
    }

    /// Attach a line/column location (line 1-based, column 0-based).
    pub fn at(mut self, line: u32, column: usize) -> Self {
        self.location = Some((line, column));
        self
    }

    /// Attach the offending source line.
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippet = Some(snippet);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.level, self.message)?;
        if let Some((line, column)) = self.location {
            writeln!(f, "  --> line {}, column {}", line, column + 1)?;
        }
        if let Some(snippet) = &self.snippet {
            snippet.render(f)?;
        }
        Ok(())
    }
}
