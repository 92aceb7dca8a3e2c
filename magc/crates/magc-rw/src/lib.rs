//! magc-rw - The rewriting back half of the pipeline.
//!
//! Takes a parse tree from `magc-par` and produces the base-dialect
//! image of the source: every `⊕`/`⊗`/`⊕=`/`⊗=` site is replaced by its
//! method-call encoding, and every byte outside those sites is copied
//! through untouched.
//!
//! Two passes over the tree:
//!
//! - [`plan`] computes the exact output length up front, so emission
//!   writes into one right-sized buffer;
//! - [`emit`] walks the tree with a source cursor and writes the image.
//!
//! The planned length doubles as a correctness check: [`magicate`]
//! asserts the emitted length against it.

pub mod emit;
pub mod plan;

mod tests;

use magc_lex::EXTRA_OP_OFFSET;
use magc_par::{Grammar, Node, ParseError};

/// Replacement text per extra-op, indexed by `ty - EXTRA_OP_OFFSET`.
///
/// The leading `)` closes the receiver, the trailing `(` opens the
/// argument; the matching parens come from the emitter.
pub const REPLACEMENTS: [&str; 4] = [
    ").___oplus___(",
    ").___otimes___(",
    ").___ioplus___(",
    ").___iotimes___(",
];

/// The replacement text for extra-op token type `ty`.
#[inline]
pub fn replacement(ty: u16) -> &'static str {
    REPLACEMENTS[(ty - EXTRA_OP_OFFSET) as usize]
}

/// Rewrite `src` into the base dialect.
///
/// Parses the whole buffer, plans the output length, emits, and checks
/// the two agree. The returned bytes are exactly the input except at
/// extra-op sites.
pub fn magicate(src: &[u8], grammar: &Grammar) -> Result<Vec<u8>, ParseError> {
    let tree = magc_par::parse_source(src, grammar)?;
    Ok(rewrite_tree(src, &tree))
}

/// Rewrite `src` given an already-parsed tree.
pub fn rewrite_tree(src: &[u8], tree: &Node) -> Vec<u8> {
    let planned = plan::output_len(src.len(), tree);
    let out = emit::emit(src, tree, planned);
    assert_eq!(
        out.len(),
        planned,
        "emitted length diverged from planned length"
    );
    out
}
