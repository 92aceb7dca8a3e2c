//! Edge-case tests for the tokenizer as a whole.

#![cfg(test)]

use magc_util::ErrorCode;
use proptest::prelude::*;

use crate::token::TokenType;
use crate::tokenizer::Tokenizer;

fn all_types(src: &[u8]) -> (Vec<TokenType>, ErrorCode) {
    let mut tok = Tokenizer::new(src);
    let mut out = Vec::new();
    loop {
        let t = tok.next_token();
        out.push(t.ty);
        if t.ty == TokenType::Endmarker || t.ty == TokenType::ErrorToken {
            return (out, tok.done());
        }
    }
}

#[test]
fn test_only_comments_and_blanks() {
    let (tys, done) = all_types(b"# one\n\n# two\n   \n");
    assert_eq!(tys, vec![TokenType::Endmarker]);
    assert_eq!(done, ErrorCode::Eof);
}

#[test]
fn test_extra_op_in_comment_is_text() {
    let (tys, _) = all_types("# ⊕ ⊗\nx = 1\n".as_bytes());
    assert!(!tys.contains(&TokenType::CircledPlus));
    assert!(!tys.contains(&TokenType::CircledTimes));
}

#[test]
fn test_extra_op_in_string_is_text() {
    let (tys, _) = all_types("s = '⊕'\n".as_bytes());
    assert!(!tys.contains(&TokenType::CircledPlus));
    assert!(tys.contains(&TokenType::String));
}

#[test]
fn test_nested_brackets_track_level() {
    let (tys, done) = all_types(b"x = [({},\n      [])]\n");
    assert_eq!(done, ErrorCode::Eof);
    assert_eq!(
        tys.iter().filter(|t| **t == TokenType::Newline).count(),
        1
    );
}

#[test]
fn test_semicolons_and_multiple_statements() {
    let (tys, _) = all_types(b"a = 1; b = 2\n");
    assert_eq!(tys.iter().filter(|t| **t == TokenType::Semi).count(), 1);
}

#[test]
fn test_deep_but_legal_indentation() {
    let mut src = String::new();
    for depth in 0..30 {
        src.push_str(&" ".repeat(depth));
        src.push_str("if x:\n");
    }
    src.push_str(&" ".repeat(30));
    src.push_str("pass\n");
    let (tys, done) = all_types(src.as_bytes());
    assert_eq!(done, ErrorCode::Eof);
    let indents = tys.iter().filter(|t| **t == TokenType::Indent).count();
    let dedents = tys.iter().filter(|t| **t == TokenType::Dedent).count();
    assert_eq!(indents, 30);
    assert_eq!(indents, dedents);
}

#[test]
fn test_tabs_as_indentation() {
    let (tys, done) = all_types(b"if x:\n\tpass\n");
    assert_eq!(done, ErrorCode::Eof);
    assert!(tys.contains(&TokenType::Indent));
}

#[test]
fn test_carriage_return_is_not_whitespace() {
    // CRLF line endings are not part of the dialect; the CR surfaces as
    // an unknown OP token rather than being silently eaten.
    let (tys, _) = all_types(b"x = 1\r\n");
    assert!(tys.contains(&TokenType::Op));
}

#[test]
fn test_dot_alone_vs_leading_fraction() {
    let (tys, _) = all_types(b"a.b\n");
    assert!(tys.contains(&TokenType::Dot));
    let (tys, _) = all_types(b".25\n");
    assert!(tys.contains(&TokenType::Number));
    assert!(!tys.contains(&TokenType::Dot));
}

proptest! {
    /// Any ASCII identifier lexes to a single NAME covering all of it.
    #[test]
    fn prop_identifier_roundtrip(name in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
        let src = format!("{}\n", name);
        let bytes = src.as_bytes();
        let mut tok = Tokenizer::new(bytes);
        let t = tok.next_token();
        prop_assert_eq!(t.ty, TokenType::Name);
        prop_assert_eq!(t.span.unwrap().text(bytes), name.as_bytes());
    }

    /// INDENT and DEDENT balance for well-formed nests of any depth.
    #[test]
    fn prop_indent_dedent_balance(depth in 1usize..20) {
        let mut src = String::new();
        for d in 0..depth {
            src.push_str(&"    ".repeat(d));
            src.push_str("if x:\n");
        }
        src.push_str(&"    ".repeat(depth));
        src.push_str("pass\n");
        let (tys, done) = all_types(src.as_bytes());
        prop_assert_eq!(done, ErrorCode::Eof);
        let indents = tys.iter().filter(|t| **t == TokenType::Indent).count();
        let dedents = tys.iter().filter(|t| **t == TokenType::Dedent).count();
        prop_assert_eq!(indents, depth);
        prop_assert_eq!(indents, dedents);
    }
}
