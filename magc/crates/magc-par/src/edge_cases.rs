//! Edge-case tests for the parser against the dialect grammar.

#![cfg(test)]

use magc_util::ErrorCode;

use crate::dialect;
use crate::parse::parse_source;

#[test]
fn test_empty_input_parses() {
    let g = dialect::grammar();
    let tree = parse_source(b"", &g).unwrap();
    assert_eq!(tree.ty, dialect::nt::FILE_INPUT);
    assert_eq!(tree.num_children(), 1);
}

#[test]
fn test_blank_and_comment_only_input() {
    let g = dialect::grammar();
    assert!(parse_source(b"\n\n# nothing here\n\n", &g).is_ok());
}

#[test]
fn test_missing_trailing_newline() {
    let g = dialect::grammar();
    assert!(parse_source(b"x = 1", &g).is_ok());
    assert!(parse_source(b"if x:\n    pass", &g).is_ok());
}

#[test]
fn test_tokenizer_error_carries_code() {
    let g = dialect::grammar();
    let err = parse_source(b"x = 'unterminated\n", &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Eols);
    assert_eq!(err.lineno, 1);
    assert!(err.text.is_some());
}

#[test]
fn test_dedent_error_carries_code() {
    let g = dialect::grammar();
    let err = parse_source(b"if x:\n        a = 1\n    b = 2\n", &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Dedent);
    assert_eq!(err.lineno, 3);
}

#[test]
fn test_malformed_number_is_token_error() {
    let g = dialect::grammar();
    let err = parse_source(b"x = 0x\n", &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Token);
}

#[test]
fn test_syntax_error_offending_line() {
    let g = dialect::grammar();
    let err = parse_source(b"x = 1\ny = = 2\n", &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Syntax);
    assert_eq!(err.lineno, 2);
    assert_eq!(err.text.as_deref(), Some("y = = 2"));
}

#[test]
fn test_statement_after_error_is_not_reached() {
    // First error wins; the parse halts there.
    let g = dialect::grammar();
    let err = parse_source(b"y = = 1\nz = 0x\n", &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Syntax);
    assert_eq!(err.lineno, 1);
}

#[test]
fn test_triple_quoted_string_statement() {
    let g = dialect::grammar();
    let src = b"s = '''line one\nline two'''\nx = 1\n";
    assert!(parse_source(src, &g).is_ok());
}

#[test]
fn test_continuation_line_single_statement() {
    let g = dialect::grammar();
    let src = b"total = a + \\\n    b\n";
    assert!(parse_source(src, &g).is_ok());
}

#[test]
fn test_nested_function_definitions() {
    let g = dialect::grammar();
    let src = b"def outer(a):\n    def inner(b):\n        return b\n    return inner\n";
    assert!(parse_source(src, &g).is_ok());
}

#[test]
fn test_extra_op_outside_expression_is_syntax_error() {
    let g = dialect::grammar();
    // An extra-op with no left operand has nowhere to go.
    let err = parse_source("\u{2295} a\n".as_bytes(), &g).unwrap_err();
    assert_eq!(err.code, ErrorCode::Syntax);
}

#[test]
fn test_nominally_invalid_augmented_target_is_accepted() {
    // No validation of the assignment target: this parses because the
    // compound operators live at the arithmetic precedence levels.
    let g = dialect::grammar();
    assert!(parse_source("f(x) \u{2295}= y\n".as_bytes(), &g).is_ok());
    assert!(parse_source("1 \u{2297}= 2\n".as_bytes(), &g).is_ok());
}
