//! magc-par - Grammar runtime and LL(1) parser for the extended dialect.
//!
//! The parser half of the pipeline, in three layers:
//!
//! - [`grammar`] / [`translate`] - the grammar representation (one DFA
//!   per production, arcs over a shared label list), the builder the
//!   generated tables drive, and the one-time label translation plus
//!   first-set computation.
//! - [`parser`] / [`parse`] - the table-driven parser and the loop that
//!   feeds it tokens, producing a concrete parse tree ([`node`]).
//! - [`dialect`] - the precompiled grammar tables for the extended
//!   dialect, with the nonterminal id constants downstream phases match
//!   on (`atom`, `arith_expr`, `term`).
//!
//! Grammars are passed explicitly to [`Parser::new`] and
//! [`parse_source`]; there is no process-wide grammar state, so tests
//! can run alternate grammars side by side.

pub mod dialect;
pub mod grammar;
pub mod node;
pub mod parse;
pub mod parser;

mod error;
mod translate;

mod edge_cases;

pub use error::{ParseError, SyntaxError};
pub use grammar::{Dfa, Grammar, GrammarArc, GrammarBuilder, Label, State, NT_OFFSET};
pub use node::Node;
pub use parse::{parse_source, parse_start};
pub use parser::{ParseStep, Parser};
