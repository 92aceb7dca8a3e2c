//! String literal lexing.
//!
//! Handles single- and triple-quoted strings with either quote
//! character, optionally reached through a `b`/`r`/`u` prefix (the
//! dispatcher consumes the prefix before calling in here). A backslash
//! always escapes the following character, including a newline for
//! continuation inside single-quoted strings. Triple-quoted strings may
//! contain raw newlines; single-quoted ones may not.

use magc_util::ErrorCode;

use super::{Token, Tokenizer, EOF_CH, NL};
use crate::token::TokenType;

const BACKSLASH: u32 = b'\\' as u32;

impl<'src> Tokenizer<'src> {
    /// Lex a string whose opening quote (in `quote`) was just consumed.
    ///
    /// The token span runs from the first prefix character through the
    /// closing quote.
    pub(super) fn lex_string(&mut self, quote: u32) -> Token {
        let tok_start = self.start.unwrap_or(self.cur);
        // Byte distance from token start to just past a second quote
        // character; used to spot the `""`-so-far point where a triple
        // opener is decided.
        let quote2 = self.cur - tok_start + 1;
        let mut triple = false;
        let mut tripcount = 0u32;

        loop {
            let c = self.next_char();
            if c == NL {
                if !triple {
                    self.backup(c);
                    return self.error_token(ErrorCode::Eols);
                }
                tripcount = 0;
                self.cont_line = true;
            } else if c == EOF_CH {
                let code = if triple {
                    ErrorCode::Eofs
                } else {
                    ErrorCode::Eols
                };
                self.cur = self.inp;
                return self.error_token(code);
            } else if c == quote {
                tripcount += 1;
                if self.cur - tok_start == quote2 {
                    // Exactly two quote characters so far: peek for the
                    // third that opens a triple string.
                    let c2 = self.next_char();
                    if c2 == quote {
                        triple = true;
                        tripcount = 0;
                        continue;
                    }
                    self.backup(c2);
                }
                if !triple || tripcount == 3 {
                    break;
                }
            } else if c == BACKSLASH {
                tripcount = 0;
                let c2 = self.next_char();
                if c2 == EOF_CH {
                    self.cur = self.inp;
                    return self.error_token(ErrorCode::Eols);
                }
            } else {
                tripcount = 0;
            }
        }

        self.span_token(TokenType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magc_util::ErrorCode;

    fn lex_first(src: &[u8]) -> (TokenType, Option<String>, ErrorCode) {
        let mut tok = Tokenizer::new(src);
        let t = tok.next_token();
        let text = t
            .span
            .map(|s| String::from_utf8_lossy(s.text(src)).into_owned());
        (t.ty, text, tok.done())
    }

    fn string_text(src: &[u8]) -> String {
        let (ty, text, _) = lex_first(src);
        assert_eq!(ty, TokenType::String);
        text.unwrap()
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(string_text(b"'abc'\n"), "'abc'");
        assert_eq!(string_text(b"\"abc\"\n"), "\"abc\"");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(string_text(b"''\n"), "''");
        assert_eq!(string_text(b"\"\"\n"), "\"\"");
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(string_text(b"'a\\'b'\n"), "'a\\'b'");
    }

    #[test]
    fn test_triple_quoted_single_token() {
        assert_eq!(
            string_text(b"'''line one\nline two'''\n"),
            "'''line one\nline two'''"
        );
    }

    #[test]
    fn test_triple_quoted_with_embedded_quotes() {
        assert_eq!(string_text(b"'''a''b'''\n"), "'''a''b'''");
    }

    #[test]
    fn test_prefixed_strings() {
        assert_eq!(string_text(b"r'raw'\n"), "r'raw'");
        assert_eq!(string_text(b"b\"bytes\"\n"), "b\"bytes\"");
        assert_eq!(string_text(b"ur'both'\n"), "ur'both'");
        assert_eq!(string_text(b"BR'loud'\n"), "BR'loud'");
    }

    #[test]
    fn test_prefixed_triple() {
        assert_eq!(string_text(b"r'''a\nb'''\n"), "r'''a\nb'''");
    }

    #[test]
    fn test_unterminated_single_is_eols() {
        let (ty, _, done) = lex_first(b"'abc\n");
        assert_eq!(ty, TokenType::ErrorToken);
        assert_eq!(done, ErrorCode::Eols);
    }

    #[test]
    fn test_unterminated_single_at_eof_is_eols() {
        let (ty, _, done) = lex_first(b"'abc");
        assert_eq!(ty, TokenType::ErrorToken);
        assert_eq!(done, ErrorCode::Eols);
    }

    #[test]
    fn test_unterminated_triple_is_eofs() {
        let (ty, _, done) = lex_first(b"'''abc\ndef\n");
        assert_eq!(ty, TokenType::ErrorToken);
        assert_eq!(done, ErrorCode::Eofs);
    }

    #[test]
    fn test_backslash_newline_continues_single_string() {
        assert_eq!(string_text(b"'a\\\nb'\n"), "'a\\\nb'");
    }

    #[test]
    fn test_non_ascii_content() {
        let src = "'⊕ stays put'\n".as_bytes();
        assert_eq!(string_text(src), "'⊕ stays put'");
    }
}
