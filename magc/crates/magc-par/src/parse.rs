//! The tokenizer-to-parser driving loop.
//!
//! [`parse_source`] owns the per-file pipeline front half: it pulls
//! tokens one at a time, attaches line/column information, and feeds the
//! parser until the tree is complete or the first error surfaces. On
//! failure the partial tree is discarded and a [`ParseError`] carries
//! the error code, position and offending line back to the caller.

use magc_lex::{TokenType, Tokenizer};
use magc_util::{ErrorCode, Span};

use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::node::Node;
use crate::parser::{ParseStep, Parser};

/// Parse a whole source buffer against `grammar`'s start production.
///
/// The returned tree's leaf spans index into `src`.
pub fn parse_source(src: &[u8], grammar: &Grammar) -> Result<Node, ParseError> {
    parse_start(src, grammar, grammar.start())
}

/// Parse a whole source buffer against an explicit start production.
pub fn parse_start(src: &[u8], grammar: &Grammar, start: u16) -> Result<Node, ParseError> {
    let mut tok = Tokenizer::new(src);
    let mut parser = Parser::new(grammar, start);

    loop {
        let token = tok.next_token();
        if token.ty == TokenType::ErrorToken {
            return Err(error_from_tokenizer(&tok));
        }

        let (span, col_offset) = match token.span {
            Some(span) => {
                let col = if span.start >= tok.line_start() {
                    (span.start - tok.line_start()) as i32
                } else {
                    -1
                };
                (span, col)
            }
            None => (Span::point(tok.offset()), -1),
        };

        let step = parser.add_token(
            token.ty.id(),
            span.text(src),
            span,
            tok.lineno(),
            col_offset,
        );
        match step {
            Ok(ParseStep::InProgress) => {}
            Ok(ParseStep::Done(tree)) => return Ok(tree),
            Err(err) => {
                return Err(ParseError {
                    code: ErrorCode::Syntax,
                    lineno: err.lineno,
                    offset: err.col_offset.max(0) as usize,
                    text: Some(String::from_utf8_lossy(tok.line_text()).into_owned()),
                    expected: err.expected,
                });
            }
        }
    }
}

fn error_from_tokenizer(tok: &Tokenizer<'_>) -> ParseError {
    ParseError {
        code: tok.done(),
        lineno: tok.lineno(),
        offset: tok.offset().saturating_sub(tok.line_start()),
        text: Some(String::from_utf8_lossy(tok.line_text()).into_owned()),
        expected: None,
    }
}
