//! End-to-end rewriting tests over the dialect grammar.

#![cfg(test)]

use magc_lex::is_extra_op;
use magc_par::{dialect, parse_source, Node};

use crate::{magicate, replacement};

fn image(src: &str) -> String {
    let g = dialect::grammar();
    let out = magicate(src.as_bytes(), &g).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_scenario_table() {
    let cases = [
        ("x = a \u{2295} b\n", "x = (a).___oplus___(b)\n"),
        ("y = a \u{2297} b\n", "y = (a).___otimes___(b)\n"),
        (
            "z = a \u{2295} b \u{2295} c\n",
            "z = ((a).___oplus___(b)).___oplus___(c)\n",
        ),
        (
            "z = a \u{2295} b \u{2297} c\n",
            "z = (a).___oplus___((b).___otimes___(c))\n",
        ),
        ("a \u{2295}= b\n", "(a).___ioplus___(b)\n"),
        ("# \u{2295}\nx = 1\n", "# \u{2295}\nx = 1\n"),
    ];
    for (input, expected) in cases {
        assert_eq!(image(input), expected, "input: {input:?}");
    }
}

#[test]
fn test_identity_on_clean_program() {
    let src = "\
# a small program with no extended operators
def total(items):
    acc = 0
    for item in items:
        acc = acc + item * 2
    return acc

s = '''text
with \u{2295} inside'''
if s:
    print total([1, 2, 3])  # trailing comment
";
    assert_eq!(image(src), src);
}

#[test]
fn test_compound_forms() {
    assert_eq!(image("a \u{2297}= b\n"), "(a).___iotimes___(b)\n");
    assert_eq!(
        image("x[0] \u{2295}= f(y)\n"),
        "(x[0]).___ioplus___(f(y))\n"
    );
}

#[test]
fn test_four_chain_left_assoc() {
    assert_eq!(
        image("r = a \u{2295} b \u{2295} c \u{2295} d\n"),
        "r = (((a).___oplus___(b)).___oplus___(c)).___oplus___(d)\n"
    );
}

#[test]
fn test_sites_inside_statements() {
    assert_eq!(
        image("if a \u{2295} b:\n    c = d \u{2297} e\n"),
        "if (a).___oplus___(b):\n    c = (d).___otimes___(e)\n"
    );
    assert_eq!(
        image("return a \u{2295} b\n"),
        "return (a).___oplus___(b)\n"
    );
}

#[test]
fn test_mixed_with_base_operators() {
    assert_eq!(
        image("v = a + b \u{2295} c\n"),
        "v = (a + b).___oplus___(c)\n"
    );
    assert_eq!(
        image("v = a \u{2295} b + c\n"),
        "v = (a).___oplus___(b) + c\n"
    );
}

#[test]
fn test_multiple_statements_and_lines() {
    let src = "a = x \u{2295} y\nb = 1\nc = p \u{2297} q\n";
    let expected = "a = (x).___oplus___(y)\nb = 1\nc = (p).___otimes___(q)\n";
    assert_eq!(image(src), expected);
}

#[test]
fn test_comments_and_spacing_preserved_outside_sites() {
    let src = "m = a \u{2295} b  # note \u{2297}\n\nn  =  2\n";
    let expected = "m = (a).___oplus___(b)  # note \u{2297}\n\nn  =  2\n";
    assert_eq!(image(src), expected);
}

/// Length identity: output length equals input length plus the summed
/// per-site deltas, where a site spans from the end of the left operand
/// to the start of the right one.
#[test]
fn test_length_identity() {
    let sources = [
        "x = a \u{2295} b\n",
        "z = a \u{2295} b \u{2297} c\n",
        "a \u{2295}= b\n",
        "q = (a \u{2295} b) \u{2297} (c \u{2295} d)\n",
    ];
    let g = dialect::grammar();
    for src in sources {
        let tree = parse_source(src.as_bytes(), &g).unwrap();
        let mut delta = 0isize;
        sum_site_deltas(&tree, &mut delta);
        let out = magicate(src.as_bytes(), &g).unwrap();
        assert_eq!(
            out.len() as isize,
            src.len() as isize + delta,
            "src: {src:?}"
        );
    }
}

fn sum_site_deltas(node: &Node, delta: &mut isize) {
    let children = &node.children;
    let mut i = 0;
    while i < children.len() {
        let child = &children[i];
        if is_extra_op(child.ty) {
            let site = children[i + 1].left_edge() - children[i - 1].right_edge();
            *delta += 2 + replacement(child.ty).len() as isize - site as isize;
        }
        sum_site_deltas(child, delta);
        i += 1;
    }
}

/// Every output byte is a copied input byte, an inserted paren, or a
/// byte of replacement text.
#[test]
fn test_output_is_input_plus_replacements() {
    let src = "z = a \u{2295} b \u{2297} c\n";
    let out = image(src);
    let mut stripped = out.clone();
    for repl in crate::REPLACEMENTS {
        stripped = stripped.replace(repl, "\u{0}");
    }
    let kept: String = stripped
        .chars()
        .filter(|c| *c != '(' && *c != ')' && *c != '\u{0}')
        .collect();
    // What remains is input text in input order.
    let mut rest = src;
    for c in kept.chars() {
        let found = rest.find(c).expect("output byte not from input");
        rest = &rest[found + c.len_utf8()..];
    }
}

#[test]
fn test_rewrite_errors_propagate() {
    let g = dialect::grammar();
    assert!(magicate(b"x = (\n", &g).is_err());
    assert!(magicate(b"x = 'open\n", &g).is_err());
}
