//! Emission: writing the rewritten image.
//!
//! The emitter walks the tree with a `source` cursor into the input and
//! appends to the output buffer:
//!
//! - a leaf with text copies everything from the cursor through its span
//!   end, so inter-token bytes (whitespace, comments, newlines) ride
//!   along with the next leaf;
//! - `atom` children that are LPAR/RPAR copy through their span
//!   verbatim, keeping literal parenthesization untouched;
//! - `arith_expr`/`term` nodes holding k extra-ops flush the pending
//!   bytes up to their left edge, then open k `(` - nesting the call
//!   receivers so a left-to-right chain associates left;
//! - each extra-op child emits its replacement text, skips the cursor to
//!   the right operand's left edge (consuming the operator and its
//!   adjacent whitespace), recurses into the operand, and closes with
//!   `)`.
//!
//! A final flush copies the input tail after the last leaf.

use magc_lex::{is_extra_op, TokenType};
use magc_par::dialect::nt;
use magc_par::Node;

use crate::replacement;

/// Emit the image of `src` under `tree` into a buffer pre-sized to
/// `planned` bytes.
pub fn emit(src: &[u8], tree: &Node, planned: usize) -> Vec<u8> {
    let mut emitter = Emitter {
        src,
        out: Vec::with_capacity(planned),
        source: 0,
    };
    emitter.walk(tree);
    emitter.copy_through(src.len());
    emitter.out
}

struct Emitter<'a> {
    src: &'a [u8],
    out: Vec<u8>,
    source: usize,
}

impl<'a> Emitter<'a> {
    /// Copy input bytes from the cursor up to `end` (exclusive).
    fn copy_through(&mut self, end: usize) {
        debug_assert!(self.source <= end);
        self.out.extend_from_slice(&self.src[self.source..end]);
        self.source = end;
    }

    fn walk(&mut self, node: &Node) {
        if node.is_leaf() {
            if !node.span.is_empty() {
                self.copy_through(node.span.end);
            }
            return;
        }

        match node.ty {
            nt::ATOM => {
                for child in &node.children {
                    let ty = child.ty;
                    if ty == TokenType::Lpar.id() || ty == TokenType::Rpar.id() {
                        self.copy_through(child.span.end);
                    } else {
                        self.walk(child);
                    }
                }
            }
            nt::ARITH_EXPR | nt::TERM => {
                let children = &node.children;
                let ops = children.iter().filter(|c| is_extra_op(c.ty)).count();
                if ops > 0 {
                    // One opening paren per site, ahead of the whole
                    // expression; each gets closed by its site in turn,
                    // which is what makes the chain left-associative.
                    self.copy_through(node.left_edge());
                    for _ in 0..ops {
                        self.out.push(b'(');
                    }
                }
                let mut i = 0;
                while i < children.len() {
                    let child = &children[i];
                    if is_extra_op(child.ty) {
                        self.out
                            .extend_from_slice(replacement(child.ty).as_bytes());
                        let operand = &children[i + 1];
                        // The operator and its surrounding whitespace are
                        // the site; nothing of them is copied.
                        self.source = operand.left_edge();
                        self.walk(operand);
                        self.out.push(b')');
                        i += 2;
                    } else {
                        self.walk(child);
                        i += 1;
                    }
                }
            }
            _ => {
                for child in &node.children {
                    self.walk(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan;
    use magc_par::dialect;
    use magc_par::parse_source;

    fn image(src: &str) -> String {
        let g = dialect::grammar();
        let tree = parse_source(src.as_bytes(), &g).unwrap();
        let planned = plan::output_len(src.len(), &tree);
        let out = emit(src.as_bytes(), &tree, planned);
        assert_eq!(out.len(), planned, "plan/emit divergence for {src:?}");
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_identity_without_sites() {
        for src in [
            "x = 1\n",
            "if a:\n    b = c + d  # keep\n",
            "s = '\u{2295} in a string'\n",
            "",
        ] {
            assert_eq!(image(src), src);
        }
    }

    #[test]
    fn test_existing_parens_copied_verbatim() {
        assert_eq!(image("x = (a + b) * c\n"), "x = (a + b) * c\n");
        assert_eq!(image("y = ((a))\n"), "y = ((a))\n");
    }

    #[test]
    fn test_single_oplus() {
        assert_eq!(image("x = a \u{2295} b\n"), "x = (a).___oplus___(b)\n");
    }

    #[test]
    fn test_operands_with_trailers() {
        assert_eq!(
            image("x = f(y) \u{2295} a[i]\n"),
            "x = (f(y)).___oplus___(a[i])\n"
        );
    }

    #[test]
    fn test_parenthesized_operand() {
        assert_eq!(
            image("x = (a \u{2295} b) * c\n"),
            "x = ((a).___oplus___(b)) * c\n"
        );
    }

    #[test]
    fn test_mixed_base_and_extra_in_term() {
        assert_eq!(
            image("x = a * b \u{2297} c\n"),
            "x = (a * b).___otimes___(c)\n"
        );
    }
}
