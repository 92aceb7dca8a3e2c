//! Length planning: the exact size delta between preimage and image.
//!
//! The extended operators are only ever children of `arith_expr` and
//! `term`, so the walk only does real work there. Each operator site
//! replaces the bytes between its operands (whitespace, the operator,
//! whitespace) with the replacement text, and adds one `(`/`)` pair for
//! the call grouping:
//!
//! ```text
//! delta = 2 + len(replacement) - (right_operand.start - left_operand.end)
//! ```
//!
//! summed over every site in the tree.

use magc_lex::is_extra_op;
use magc_par::dialect::nt;
use magc_par::Node;

use crate::replacement;

/// Planned output length for rewriting `tree` over an input of
/// `input_len` bytes.
pub fn output_len(input_len: usize, tree: &Node) -> usize {
    let total = input_len as isize + delta(tree);
    debug_assert!(total >= 0);
    total as usize
}

/// Size delta contributed by `node` and its descendants.
pub fn delta(node: &Node) -> isize {
    match node.ty {
        nt::ARITH_EXPR | nt::TERM => {
            let children = &node.children;
            let mut sum = 0isize;
            let mut i = 0;
            while i < children.len() {
                let child = &children[i];
                if is_extra_op(child.ty) {
                    let gap = children[i + 1].left_edge() - children[i - 1].right_edge();
                    sum += 2 + replacement(child.ty).len() as isize - gap as isize;
                    sum += delta(&children[i + 1]);
                    i += 2;
                } else {
                    sum += delta(child);
                    i += 1;
                }
            }
            sum
        }
        _ => node.children.iter().map(delta).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magc_par::dialect;
    use magc_par::parse_source;

    fn planned(src: &str) -> usize {
        let g = dialect::grammar();
        let tree = parse_source(src.as_bytes(), &g).unwrap();
        output_len(src.len(), &tree)
    }

    #[test]
    fn test_clean_input_has_zero_delta() {
        for src in ["x = 1\n", "if a:\n    b = c + d\n", "# ⊕ in comment\n"] {
            assert_eq!(planned(src), src.len(), "src: {src}");
        }
    }

    #[test]
    fn test_single_site() {
        // "x = a ⊕ b\n" -> "x = (a).___oplus___(b)\n"
        assert_eq!(planned("x = a \u{2295} b\n"), "x = (a).___oplus___(b)\n".len());
    }

    #[test]
    fn test_two_sites_left_assoc() {
        assert_eq!(
            planned("z = a \u{2295} b \u{2295} c\n"),
            "z = ((a).___oplus___(b)).___oplus___(c)\n".len()
        );
    }

    #[test]
    fn test_mixed_precedence() {
        assert_eq!(
            planned("z = a \u{2295} b \u{2297} c\n"),
            "z = (a).___oplus___((b).___otimes___(c))\n".len()
        );
    }

    #[test]
    fn test_augmented_site() {
        assert_eq!(planned("a \u{2295}= b\n"), "(a).___ioplus___(b)\n".len());
        assert_eq!(planned("a \u{2297}= b\n"), "(a).___iotimes___(b)\n".len());
    }

    #[test]
    fn test_no_whitespace_site() {
        assert_eq!(planned("x = a\u{2295}b\n"), "x = (a).___oplus___(b)\n".len());
    }
}
