//! Tokenizer module.
//!
//! This module organizes the tokenizer into focused components:
//! - `mod` - the `Tokenizer` state machine, character fetch/backup,
//!   indentation tracking and token dispatch
//! - `number` - numeric literal lexing
//! - `string` - string literal lexing (single and triple quoted)
//!
//! The tokenizer is line-buffered: `buf <= cur <= inp <= end`, where
//! `inp` is pushed forward one physical line at a time. Indentation is
//! measured at the beginning of each logical line and surfaces as INDENT
//! and DEDENT tokens, drained from `pendin` before anything else on the
//! line. Inside open parentheses (`level > 0`) both indentation and
//! NEWLINE tokens are suppressed.

mod number;
mod string;

use magc_util::{ErrorCode, Span};

use crate::decode::{decode, is_continuation};
use crate::token::{one_char, three_chars, two_chars, TokenType};
use crate::unicode::{is_digit, is_ident_continue, is_ident_start};

/// Maximum indentation stack depth.
pub const MAXINDENT: usize = 100;

/// Tab stops for the primary indentation column.
pub const TABSIZE: i32 = 8;

/// Sentinel for end of input, distinct from every code point.
pub(crate) const EOF_CH: u32 = u32::MAX;

const SPACE: u32 = b' ' as u32;
const TAB: u32 = b'\t' as u32;
const NL: u32 = b'\n' as u32;
const HASH: u32 = b'#' as u32;
const BACKSLASH: u32 = b'\\' as u32;
const SQUOTE: u32 = b'\'' as u32;
const DQUOTE: u32 = b'"' as u32;

/// A lexed token: its type plus, when it has text, its byte span.
///
/// INDENT, DEDENT, ENDMARKER and error tokens carry no span; the parser
/// records column -1 for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token type
    pub ty: TokenType,
    /// Byte span of the token text, when it has any
    pub span: Option<Span>,
}

/// Tokenizer state for one input buffer.
///
/// All state lives for the duration of one file; nothing is shared
/// between files.
pub struct Tokenizer<'src> {
    src: &'src [u8],
    /// Start of the current line (kept at the start of the first line of
    /// a continuation while a token is in flight)
    buf: usize,
    /// Next byte to read
    cur: usize,
    /// End of the currently loaded line
    inp: usize,
    /// Start of the current token, when one is in flight
    start: Option<usize>,
    /// E_OK normally, E_EOF at end of input, otherwise the first error
    done: ErrorCode,
    /// Current indentation stack index
    indent: usize,
    /// Stack of indentation columns
    indstack: [i32; MAXINDENT],
    /// Parallel stack of alternate columns (tab guard)
    altindstack: [i32; MAXINDENT],
    /// At beginning of a logical line
    atbol: bool,
    /// Pending INDENTs (> 0) or DEDENTs (< 0)
    pendin: i32,
    /// Current line number (1-based once the first line is loaded)
    lineno: u32,
    /// `()` `[]` `{}` nesting level
    level: i32,
    /// Report tab/space inconsistency as E_TABSPACE
    alterror: bool,
    /// A UTF-8 decode made no progress
    decoding_erred: bool,
    /// Inside a continuation (backslash or multi-line string)
    cont_line: bool,
    /// Byte offset of the start of the current line
    line_start: usize,
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer over a complete source buffer.
    pub fn new(src: &'src [u8]) -> Self {
        Self {
            src,
            buf: 0,
            cur: 0,
            inp: 0,
            start: None,
            done: ErrorCode::Ok,
            indent: 0,
            indstack: [0; MAXINDENT],
            altindstack: [0; MAXINDENT],
            atbol: true,
            pendin: 0,
            lineno: 0,
            level: 0,
            alterror: false,
            decoding_erred: false,
            cont_line: false,
            line_start: 0,
        }
    }

    /// Enable or disable the tab/space consistency guard.
    ///
    /// Off by default; when on, indentation whose width depends on the
    /// tab size raises [`ErrorCode::TabSpace`].
    pub fn set_tab_guard(&mut self, on: bool) {
        self.alterror = on;
    }

    /// The tokenizer's status code: `Ok` while healthy, `Eof` after the
    /// input is exhausted, otherwise the first error.
    pub fn done(&self) -> ErrorCode {
        self.done
    }

    /// Current line number (1-based).
    pub fn lineno(&self) -> u32 {
        self.lineno
    }

    /// Byte offset of the start of the current line.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Byte offset of the read cursor.
    pub fn offset(&self) -> usize {
        self.cur
    }

    /// The text of the current line, without its trailing newline.
    pub fn line_text(&self) -> &'src [u8] {
        let mut end = self.inp;
        if end > self.line_start && self.src[end - 1] == b'\n' {
            end -= 1;
        }
        &self.src[self.line_start..end]
    }

    /// Whether the tokenizer is inside a continuation line.
    pub fn cont_line(&self) -> bool {
        self.cont_line
    }

    /// Fetch the next code point, loading the next physical line when the
    /// current one is exhausted. Returns [`EOF_CH`] at end of input or
    /// after any error.
    fn next_char(&mut self) -> u32 {
        loop {
            if self.cur != self.inp {
                if self.decoding_erred {
                    return EOF_CH;
                }
                let at = self.cur;
                let (next, c) = decode(self.src, self.cur);
                if next == at {
                    self.decoding_erred = true;
                    return EOF_CH;
                }
                self.cur = next;
                return c;
            }

            if self.done != ErrorCode::Ok {
                return EOF_CH;
            }

            // Push `inp` to just past the next newline (or to the end of
            // the buffer for a final unterminated line).
            let end = match self.src[self.inp..].iter().position(|&b| b == b'\n') {
                Some(i) => self.inp + i + 1,
                None => self.src.len(),
            };
            if end == self.inp {
                self.done = ErrorCode::Eof;
                return EOF_CH;
            }
            if self.start.is_none() {
                self.buf = self.cur;
            }
            self.line_start = self.cur;
            self.lineno += 1;
            self.inp = end;
        }
    }

    /// Back up one code point, using the continuation-byte mask to find
    /// the lead byte.
    fn backup(&mut self, c: u32) {
        if c == EOF_CH {
            return;
        }
        loop {
            assert!(self.cur > 0, "tok_backup: beginning of buffer");
            self.cur -= 1;
            if !is_continuation(self.src[self.cur]) {
                break;
            }
        }
        assert!(self.cur >= self.buf, "tok_backup: beginning of buffer");
    }

    fn span_token(&self, ty: TokenType) -> Token {
        let start = self.start.unwrap_or(self.cur);
        Token {
            ty,
            span: Some(Span::new(start, self.cur)),
        }
    }

    fn bare_token(&self, ty: TokenType) -> Token {
        Token { ty, span: None }
    }

    fn error_token(&mut self, code: ErrorCode) -> Token {
        self.done = code;
        self.bare_token(TokenType::ErrorToken)
    }

    fn indent_error(&mut self) -> bool {
        if self.alterror {
            self.done = ErrorCode::TabSpace;
            self.cur = self.inp;
            return true;
        }
        false
    }

    /// Produce the next token.
    ///
    /// Returns ENDMARKER forever once the input is exhausted and all
    /// dedents have drained, and ERRORTOKEN (with [`Self::done`] set) on
    /// any lexical error.
    pub fn next_token(&mut self) -> Token {
        let tok = self.next_token_inner();
        if self.decoding_erred {
            self.done = ErrorCode::Decode;
            return self.bare_token(TokenType::ErrorToken);
        }
        tok
    }

    fn next_token_inner(&mut self) -> Token {
        'nextline: loop {
            self.start = None;
            let mut blankline = false;

            // Measure indentation at the beginning of a line.
            if self.atbol {
                let mut col: i32 = 0;
                let mut altcol: i32 = 0;
                self.atbol = false;
                let mut c;
                loop {
                    c = self.next_char();
                    if c == SPACE {
                        col += 1;
                        altcol += 1;
                    } else if c == TAB {
                        col = (col / TABSIZE + 1) * TABSIZE;
                        // The alternate column treats a tab as one column
                        // so that tab/space divergence is observable.
                        altcol += 1;
                    } else {
                        break;
                    }
                }
                self.backup(c);
                if c == HASH || c == NL {
                    blankline = true;
                }
                if !blankline && self.level == 0 {
                    if col == self.indstack[self.indent] {
                        // No change
                        if altcol != self.altindstack[self.indent] && self.indent_error() {
                            return self.bare_token(TokenType::ErrorToken);
                        }
                    } else if col > self.indstack[self.indent] {
                        // Indent -- always one
                        if self.indent + 1 >= MAXINDENT {
                            self.done = ErrorCode::TooDeep;
                            self.cur = self.inp;
                            return self.bare_token(TokenType::ErrorToken);
                        }
                        if altcol <= self.altindstack[self.indent] && self.indent_error() {
                            return self.bare_token(TokenType::ErrorToken);
                        }
                        self.pendin += 1;
                        self.indent += 1;
                        self.indstack[self.indent] = col;
                        self.altindstack[self.indent] = altcol;
                    } else {
                        // Dedent -- any number, must be consistent
                        while self.indent > 0 && col < self.indstack[self.indent] {
                            self.pendin -= 1;
                            self.indent -= 1;
                        }
                        if col != self.indstack[self.indent] {
                            self.done = ErrorCode::Dedent;
                            self.cur = self.inp;
                            return self.bare_token(TokenType::ErrorToken);
                        }
                        if altcol != self.altindstack[self.indent] && self.indent_error() {
                            return self.bare_token(TokenType::ErrorToken);
                        }
                    }
                }
            }

            self.start = Some(self.cur);

            // Drain pending indents/dedents before anything else.
            if self.pendin != 0 {
                if self.pendin < 0 {
                    self.pendin += 1;
                    return self.bare_token(TokenType::Dedent);
                } else {
                    self.pendin -= 1;
                    return self.bare_token(TokenType::Indent);
                }
            }

            'again: loop {
                self.start = None;

                // Skip spaces, remembering where the token starts.
                let mut c;
                loop {
                    self.start = Some(self.cur);
                    c = self.next_char();
                    if c != SPACE && c != TAB {
                        break;
                    }
                }

                // Skip comment
                if c == HASH {
                    while c != EOF_CH && c != NL {
                        c = self.next_char();
                    }
                }

                // Check for EOF and errors now
                if c == EOF_CH {
                    return if self.done == ErrorCode::Eof {
                        if self.indent != 0 {
                            // Close open suites: a synthesized NEWLINE now,
                            // then the dedents on subsequent calls.
                            self.pendin = -(self.indent as i32);
                            self.indent = 0;
                            self.bare_token(TokenType::Newline)
                        } else {
                            self.bare_token(TokenType::Endmarker)
                        }
                    } else {
                        self.bare_token(TokenType::ErrorToken)
                    };
                }

                // Identifier or string prefix
                if is_ident_start(c) {
                    match c as u8 {
                        b'b' | b'B' => {
                            c = self.next_char();
                            if c == b'r' as u32 || c == b'R' as u32 {
                                c = self.next_char();
                            }
                            if c == SQUOTE || c == DQUOTE {
                                return self.lex_string(c);
                            }
                        }
                        b'r' | b'R' => {
                            c = self.next_char();
                            if c == SQUOTE || c == DQUOTE {
                                return self.lex_string(c);
                            }
                        }
                        b'u' | b'U' => {
                            c = self.next_char();
                            if c == b'r' as u32 || c == b'R' as u32 {
                                c = self.next_char();
                            }
                            if c == SQUOTE || c == DQUOTE {
                                return self.lex_string(c);
                            }
                        }
                        _ => {}
                    }
                    while c != EOF_CH && is_ident_continue(c) {
                        c = self.next_char();
                    }
                    self.backup(c);
                    return self.span_token(TokenType::Name);
                }

                // Newline
                if c == NL {
                    self.atbol = true;
                    if blankline || self.level > 0 {
                        continue 'nextline;
                    }
                    self.cont_line = false;
                    let start = self.start.unwrap_or(self.cur);
                    // Leave the '\n' out of the token span.
                    return Token {
                        ty: TokenType::Newline,
                        span: Some(Span::new(start, self.cur - 1)),
                    };
                }

                // Period or number starting with a period?
                if c == b'.' as u32 {
                    let c2 = self.next_char();
                    if is_digit(c2) {
                        return self.lex_fraction();
                    }
                    self.backup(c2);
                    return self.span_token(TokenType::Dot);
                }

                // Number
                if is_digit(c) {
                    return self.lex_number(c);
                }

                // String
                if c == SQUOTE || c == DQUOTE {
                    return self.lex_string(c);
                }

                // Line continuation
                if c == BACKSLASH {
                    let c2 = self.next_char();
                    if c2 != NL {
                        self.done = ErrorCode::LineCont;
                        self.cur = self.inp;
                        return self.bare_token(TokenType::ErrorToken);
                    }
                    self.cont_line = true;
                    continue 'again;
                }

                // Two- and three-character operators, longest match first.
                {
                    let c2 = self.next_char();
                    let ty2 = two_chars(c, c2);
                    if ty2 != TokenType::Op {
                        let c3 = self.next_char();
                        let ty3 = three_chars(c, c2, c3);
                        let ty = if ty3 != TokenType::Op {
                            ty3
                        } else {
                            self.backup(c3);
                            ty2
                        };
                        return self.span_token(ty);
                    }
                    self.backup(c2);
                }

                // Keep track of parentheses nesting level
                match c {
                    0x28 | 0x5B | 0x7B => self.level += 1,
                    0x29 | 0x5D | 0x7D => self.level -= 1,
                    _ => {}
                }

                return self.span_token(one_char(c));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<(TokenType, String)> {
        let bytes = src.as_bytes();
        let mut tok = Tokenizer::new(bytes);
        let mut out = Vec::new();
        loop {
            let t = tok.next_token();
            let text = t
                .span
                .map(|s| String::from_utf8_lossy(s.text(bytes)).into_owned())
                .unwrap_or_default();
            let ty = t.ty;
            out.push((ty, text));
            if ty == TokenType::Endmarker || ty == TokenType::ErrorToken {
                return out;
            }
        }
    }

    fn types(src: &str) -> Vec<TokenType> {
        tokens(src).into_iter().map(|(ty, _)| ty).collect()
    }

    #[test]
    fn test_simple_assignment() {
        let toks = tokens("x = 1\n");
        assert_eq!(
            toks,
            vec![
                (TokenType::Name, "x".to_string()),
                (TokenType::Equal, "=".to_string()),
                (TokenType::Number, "1".to_string()),
                (TokenType::Newline, "".to_string()),
                (TokenType::Endmarker, "".to_string()),
            ]
        );
    }

    #[test]
    fn test_extra_ops() {
        let toks = tokens("a ⊕ b ⊗ c\n");
        let tys: Vec<_> = toks.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            tys,
            vec![
                TokenType::Name,
                TokenType::CircledPlus,
                TokenType::Name,
                TokenType::CircledTimes,
                TokenType::Name,
                TokenType::Newline,
                TokenType::Endmarker,
            ]
        );
        assert_eq!(toks[1].1, "⊕");
        assert_eq!(toks[3].1, "⊗");
    }

    #[test]
    fn test_compound_extra_ops() {
        assert_eq!(
            types("a ⊕= b\n"),
            vec![
                TokenType::Name,
                TokenType::CircledPlusEqual,
                TokenType::Name,
                TokenType::Newline,
                TokenType::Endmarker,
            ]
        );
        assert_eq!(types("a ⊗= b\n")[1], TokenType::CircledTimesEqual);
    }

    #[test]
    fn test_indent_dedent_balanced() {
        let src = "if x:\n    y = 1\n    if z:\n        w = 2\nq = 3\n";
        let tys = types(src);
        let indents = tys.iter().filter(|t| **t == TokenType::Indent).count();
        let dedents = tys.iter().filter(|t| **t == TokenType::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(indents, dedents);
        assert_eq!(*tys.last().unwrap(), TokenType::Endmarker);
    }

    #[test]
    fn test_dedents_flush_at_eof_without_trailing_newline() {
        let tys = types("if x:\n    pass");
        assert_eq!(
            tys,
            vec![
                TokenType::Name,
                TokenType::Name,
                TokenType::Colon,
                TokenType::Newline,
                TokenType::Indent,
                TokenType::Name,
                TokenType::Newline,
                TokenType::Dedent,
                TokenType::Endmarker,
            ]
        );
    }

    #[test]
    fn test_blank_lines_emit_nothing() {
        let tys = types("x = 1\n\n   \n# comment line\ny = 2\n");
        let newlines = tys.iter().filter(|t| **t == TokenType::Newline).count();
        assert_eq!(newlines, 2);
        assert!(!tys.contains(&TokenType::Indent));
    }

    #[test]
    fn test_newline_suppressed_inside_parens() {
        let tys = types("x = (1 +\n     2)\n");
        let newlines = tys.iter().filter(|t| **t == TokenType::Newline).count();
        assert_eq!(newlines, 1);
        assert!(!tys.contains(&TokenType::Indent));
    }

    #[test]
    fn test_comment_rides_on_newline_span() {
        let toks = tokens("x = 1  # note\n");
        let newline = toks.iter().find(|(t, _)| *t == TokenType::Newline).unwrap();
        assert_eq!(newline.1, "# note");
    }

    #[test]
    fn test_line_continuation() {
        let tys = types("x = 1 + \\\n    2\n");
        assert_eq!(
            tys,
            vec![
                TokenType::Name,
                TokenType::Equal,
                TokenType::Number,
                TokenType::Plus,
                TokenType::Number,
                TokenType::Newline,
                TokenType::Endmarker,
            ]
        );
    }

    #[test]
    fn test_bad_line_continuation() {
        let mut tok = Tokenizer::new(b"x = \\y\n");
        loop {
            let t = tok.next_token();
            if t.ty == TokenType::ErrorToken {
                break;
            }
            assert_ne!(t.ty, TokenType::Endmarker);
        }
        assert_eq!(tok.done(), ErrorCode::LineCont);
    }

    #[test]
    fn test_dedent_mismatch() {
        let mut tok = Tokenizer::new(b"if x:\n        a = 1\n    b = 2\n");
        loop {
            let t = tok.next_token();
            if t.ty == TokenType::ErrorToken {
                break;
            }
            assert_ne!(t.ty, TokenType::Endmarker);
        }
        assert_eq!(tok.done(), ErrorCode::Dedent);
    }

    #[test]
    fn test_too_deep() {
        let mut src = String::new();
        for depth in 0..MAXINDENT + 1 {
            src.push_str(&" ".repeat(depth));
            src.push_str("if x:\n");
        }
        let mut tok = Tokenizer::new(src.as_bytes());
        loop {
            let t = tok.next_token();
            if t.ty == TokenType::ErrorToken {
                break;
            }
            assert_ne!(t.ty, TokenType::Endmarker);
        }
        assert_eq!(tok.done(), ErrorCode::TooDeep);
    }

    #[test]
    fn test_tab_guard() {
        // Two-space indent, then a tab indent that only differs under
        // the alternate measurement.
        let src = b"if x:\n        a = 1\n\tb = 2\n";
        let mut tok = Tokenizer::new(src);
        tok.set_tab_guard(true);
        loop {
            let t = tok.next_token();
            if t.ty == TokenType::ErrorToken {
                break;
            }
            assert_ne!(t.ty, TokenType::Endmarker);
        }
        assert_eq!(tok.done(), ErrorCode::TabSpace);
    }

    #[test]
    fn test_tab_guard_off_by_default() {
        let src = b"if x:\n        a = 1\n\tb = 2\n";
        let tys = {
            let bytes = src;
            let mut tok = Tokenizer::new(bytes);
            let mut out = Vec::new();
            loop {
                let t = tok.next_token();
                out.push(t.ty);
                if t.ty == TokenType::Endmarker || t.ty == TokenType::ErrorToken {
                    break;
                }
            }
            out
        };
        assert_eq!(*tys.last().unwrap(), TokenType::Endmarker);
    }

    #[test]
    fn test_decode_error() {
        let mut tok = Tokenizer::new(&[b'x', b' ', 0x80, b'\n']);
        loop {
            let t = tok.next_token();
            if t.ty == TokenType::ErrorToken {
                break;
            }
            assert_ne!(t.ty, TokenType::Endmarker);
        }
        assert_eq!(tok.done(), ErrorCode::Decode);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(types(""), vec![TokenType::Endmarker]);
    }

    #[test]
    fn test_backquote_and_misc_punctuation() {
        let tys = types("`x`, {1: 2}; y[0]\n");
        assert!(tys.contains(&TokenType::Backquote));
        assert!(tys.contains(&TokenType::Lbrace));
        assert!(tys.contains(&TokenType::Semi));
        assert!(tys.contains(&TokenType::Lsqb));
    }

    #[test]
    fn test_maximal_munch_operators() {
        assert_eq!(types("a <<= b\n")[1], TokenType::LeftShiftEqual);
        assert_eq!(types("a << b\n")[1], TokenType::LeftShift);
        assert_eq!(types("a **= b\n")[1], TokenType::DoubleStarEqual);
        assert_eq!(types("a //= b\n")[1], TokenType::DoubleSlashEqual);
        assert_eq!(types("a <> b\n")[1], TokenType::NotEqual);
    }

    #[test]
    fn test_unknown_op_token() {
        let toks = tokens("a ? b\n");
        assert_eq!(toks[1].0, TokenType::Op);
    }

    #[test]
    fn test_lineno_tracking() {
        let mut tok = Tokenizer::new(b"a\nb\nc\n");
        tok.next_token();
        assert_eq!(tok.lineno(), 1);
        tok.next_token(); // NEWLINE
        tok.next_token(); // b
        assert_eq!(tok.lineno(), 2);
    }
}
