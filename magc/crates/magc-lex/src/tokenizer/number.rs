//! Numeric literal lexing.
//!
//! Recognized forms: decimal, `0x`/`0X` hex, `0o`/`0O` octal, `0b`/`0B`
//! binary, bare `0`-prefixed octal, fractions, exponents with optional
//! sign, trailing `l`/`L`, and the imaginary suffix `j`/`J`. A bare
//! exponent letter with no digits after it is rewound and the number
//! terminates cleanly; other malformed forms produce ERRORTOKEN with
//! `E_TOKEN`.

use magc_util::ErrorCode;

use super::{Token, Tokenizer};
use crate::token::TokenType;
use crate::unicode::{is_binary_digit, is_digit, is_hex_digit, is_octal_digit};

impl<'src> Tokenizer<'src> {
    /// Lex a number whose first (already consumed) character is `first`.
    pub(super) fn lex_number(&mut self, first: u32) -> Token {
        let mut c;
        if first == b'0' as u32 {
            // Hex, octal or binary -- maybe.
            c = self.next_char();
            if c == b'.' as u32 {
                return self.lex_fraction();
            }
            if c == b'j' as u32 || c == b'J' as u32 {
                return self.lex_imaginary();
            }
            if c == b'x' as u32 || c == b'X' as u32 {
                c = self.next_char();
                if !is_hex_digit(c) {
                    self.backup(c);
                    return self.error_token(ErrorCode::Token);
                }
                while is_hex_digit(c) {
                    c = self.next_char();
                }
            } else if c == b'o' as u32 || c == b'O' as u32 {
                c = self.next_char();
                if !is_octal_digit(c) {
                    self.backup(c);
                    return self.error_token(ErrorCode::Token);
                }
                while is_octal_digit(c) {
                    c = self.next_char();
                }
            } else if c == b'b' as u32 || c == b'B' as u32 {
                c = self.next_char();
                if !is_binary_digit(c) {
                    self.backup(c);
                    return self.error_token(ErrorCode::Token);
                }
                while is_binary_digit(c) {
                    c = self.next_char();
                }
            } else {
                // Bare-zero octal; decimal digits past 7 are only legal
                // if a fraction or exponent follows.
                let mut found_decimal = false;
                while is_octal_digit(c) {
                    c = self.next_char();
                }
                if is_digit(c) {
                    found_decimal = true;
                    while is_digit(c) {
                        c = self.next_char();
                    }
                }
                if c == b'.' as u32 {
                    return self.lex_fraction();
                }
                if c == b'e' as u32 || c == b'E' as u32 {
                    return self.lex_exponent(c);
                }
                if c == b'j' as u32 || c == b'J' as u32 {
                    return self.lex_imaginary();
                }
                if found_decimal {
                    self.backup(c);
                    return self.error_token(ErrorCode::Token);
                }
            }
            if c == b'l' as u32 || c == b'L' as u32 {
                c = self.next_char();
            }
        } else {
            // Decimal
            c = first;
            while is_digit(c) {
                c = self.next_char();
            }
            if c == b'l' as u32 || c == b'L' as u32 {
                c = self.next_char();
            } else {
                if c == b'.' as u32 {
                    return self.lex_fraction();
                }
                if c == b'e' as u32 || c == b'E' as u32 {
                    return self.lex_exponent(c);
                }
                if c == b'j' as u32 || c == b'J' as u32 {
                    return self.lex_imaginary();
                }
            }
        }
        self.backup(c);
        self.span_token(TokenType::Number)
    }

    /// Lex the digits after a decimal point, then any exponent and
    /// imaginary suffix.
    pub(super) fn lex_fraction(&mut self) -> Token {
        let mut c = self.next_char();
        while is_digit(c) {
            c = self.next_char();
        }
        if c == b'e' as u32 || c == b'E' as u32 {
            return self.lex_exponent(c);
        }
        if c == b'j' as u32 || c == b'J' as u32 {
            return self.lex_imaginary();
        }
        self.backup(c);
        self.span_token(TokenType::Number)
    }

    /// Lex an exponent part whose `e`/`E` is in `e`.
    ///
    /// An `e` followed by neither digits nor a sign is not part of the
    /// number: both characters are rewound and the number ends cleanly.
    fn lex_exponent(&mut self, e: u32) -> Token {
        let mut c = self.next_char();
        if c == b'+' as u32 || c == b'-' as u32 {
            c = self.next_char();
            if !is_digit(c) {
                self.backup(c);
                return self.error_token(ErrorCode::Token);
            }
        } else if !is_digit(c) {
            self.backup(c);
            self.backup(e);
            return self.span_token(TokenType::Number);
        }
        while is_digit(c) {
            c = self.next_char();
        }
        if c == b'j' as u32 || c == b'J' as u32 {
            return self.lex_imaginary();
        }
        self.backup(c);
        self.span_token(TokenType::Number)
    }

    /// Consume past an imaginary suffix (already read) and finish.
    fn lex_imaginary(&mut self) -> Token {
        let c = self.next_char();
        self.backup(c);
        self.span_token(TokenType::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magc_util::ErrorCode;

    fn lex_one(src: &str) -> (TokenType, String, ErrorCode) {
        let bytes = src.as_bytes();
        let mut tok = Tokenizer::new(bytes);
        let t = tok.next_token();
        let text = t
            .span
            .map(|s| String::from_utf8_lossy(s.text(bytes)).into_owned())
            .unwrap_or_default();
        (t.ty, text, tok.done())
    }

    fn number(src: &str) -> String {
        let (ty, text, _) = lex_one(src);
        assert_eq!(ty, TokenType::Number, "lexing {:?}", src);
        text
    }

    fn bad_number(src: &str) {
        let (ty, _, done) = lex_one(src);
        assert_eq!(ty, TokenType::ErrorToken, "lexing {:?}", src);
        assert_eq!(done, ErrorCode::Token);
    }

    #[test]
    fn test_decimal() {
        assert_eq!(number("42\n"), "42");
        assert_eq!(number("0\n"), "0");
        assert_eq!(number("123456 \n"), "123456");
    }

    #[test]
    fn test_hex() {
        assert_eq!(number("0xFF\n"), "0xFF");
        assert_eq!(number("0Xdead\n"), "0Xdead");
    }

    #[test]
    fn test_octal() {
        assert_eq!(number("0o777\n"), "0o777");
        assert_eq!(number("0755\n"), "0755");
    }

    #[test]
    fn test_binary() {
        assert_eq!(number("0b1010\n"), "0b1010");
    }

    #[test]
    fn test_long_suffix() {
        assert_eq!(number("42L\n"), "42L");
        assert_eq!(number("0xFFl\n"), "0xFFl");
    }

    #[test]
    fn test_floats() {
        assert_eq!(number("3.14\n"), "3.14");
        assert_eq!(number("1.\n"), "1.");
        assert_eq!(number(".5\n"), ".5");
        assert_eq!(number("1e10\n"), "1e10");
        assert_eq!(number("2.5e-3\n"), "2.5e-3");
        assert_eq!(number("1E+9\n"), "1E+9");
    }

    #[test]
    fn test_imaginary() {
        assert_eq!(number("3j\n"), "3j");
        assert_eq!(number("2.5J\n"), "2.5J");
        assert_eq!(number("0j\n"), "0j");
        assert_eq!(number("1e3j\n"), "1e3j");
    }

    #[test]
    fn test_bare_exponent_rewinds() {
        // "1e" is NUMBER "1" followed by NAME "e".
        let bytes = b"1e\n";
        let mut tok = Tokenizer::new(bytes);
        let first = tok.next_token();
        assert_eq!(first.ty, TokenType::Number);
        assert_eq!(first.span.unwrap().text(bytes), b"1");
        let second = tok.next_token();
        assert_eq!(second.ty, TokenType::Name);
        assert_eq!(second.span.unwrap().text(bytes), b"e");
    }

    #[test]
    fn test_malformed_numbers() {
        bad_number("0x\n");
        bad_number("0o8\n");
        bad_number("0b2\n");
        bad_number("1e+\n");
        bad_number("089\n");
    }

    #[test]
    fn test_octal_with_decimal_digits_and_fraction() {
        // "089.5" is a float, not a malformed octal.
        assert_eq!(number("089.5\n"), "089.5");
        assert_eq!(number("09e2\n"), "09e2");
    }
}
