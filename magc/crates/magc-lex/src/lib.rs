//! magc-lex - Lexical analysis for the extended dialect.
//!
//! This crate turns a raw byte buffer into the token stream the parser
//! consumes. The language is indentation-based, so the tokenizer is more
//! than a scanner: it measures leading whitespace per logical line and
//! synthesizes INDENT/DEDENT tokens, suppresses newlines inside brackets,
//! and tracks enough position state to report precise errors.
//!
//! Components:
//!
//! - [`decode`] - lenient UTF-8 decoding over the byte cursor
//! - [`token`] - the closed token-type enumeration with stable ids, the
//!   token-name table, and the 1/2/3-code-point operator recognizers
//! - [`tokenizer`] - the line-buffered tokenizer itself
//!
//! The extended operators `⊕` (U+2295) and `⊗` (U+2297), together with
//! `⊕=` and `⊗=`, are ordinary tokens here; they occupy a contiguous id
//! range so downstream phases can index the replacement table with
//! `ty - EXTRA_OP_OFFSET`. They are the only non-ASCII code points with
//! lexical meaning; any other non-ASCII text must sit inside strings or
//! comments.

pub mod decode;
pub mod token;
pub mod tokenizer;
pub mod unicode;

mod edge_cases;

pub use token::{is_extra_op, TokenType, EXTRA_OP_OFFSET, N_TOKENS, TOKEN_NAMES};
pub use tokenizer::{Token, Tokenizer, MAXINDENT, TABSIZE};
