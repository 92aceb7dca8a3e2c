//! Label translation: resolving raw grammar labels exactly once.
//!
//! The generator writes labels as either bare names (productions or
//! token names) or quoted literals (keywords and operator spellings).
//! Translation rewrites each into its runtime form:
//!
//! - `Name` labels are matched first against DFA names (becoming
//!   nonterminals), then against the token-name table (becoming plain
//!   terminals). Labels matching neither are logged and left in place;
//!   they can never match a token.
//! - `Literal` labels whose second byte is a letter or `_` encode a
//!   keyword: they become NAME terminals restricted to the spelling
//!   between the quotes.
//! - Other `Literal` labels encode punctuation or an operator: the bytes
//!   between the quotes are decoded to 1-3 code points and pushed
//!   through the operator recognizers. An OP result means the spelling
//!   is unknown to the lexer and is logged.
//!
//! Index 0 is the reserved EMPTY label and is never touched.

use magc_lex::decode::decode;
use magc_lex::token::{one_char, three_chars, two_chars, TokenType};
use magc_lex::TOKEN_NAMES;
use magc_util::FxHashMap;

use crate::grammar::{Grammar, Label};

/// Resolve every raw label in `grammar`. Runs once, from
/// [`Grammar::prepare`].
pub(crate) fn translate_labels(grammar: &mut Grammar) {
    let dfa_types: FxHashMap<Box<str>, u16> = grammar
        .dfas()
        .iter()
        .map(|dfa| (dfa.name.clone(), dfa.ty))
        .collect();

    let labels = grammar.labels_mut();
    for index in 1..labels.len() {
        if let Some(translated) = translate_one(&labels[index], &dfa_types) {
            labels[index] = translated;
        }
    }
}

fn translate_one(label: &Label, dfa_types: &FxHashMap<Box<str>, u16>) -> Option<Label> {
    match label {
        Label::Name(text) => {
            if let Some(&ty) = dfa_types.get(text.as_ref()) {
                return Some(Label::Nonterminal(ty));
            }
            if let Some(ty) = TOKEN_NAMES.iter().position(|name| *name == text.as_ref()) {
                return Some(Label::Terminal {
                    ty: ty as u16,
                    keyword: None,
                });
            }
            tracing::warn!(label = %text, "cannot translate NAME label");
            None
        }
        Label::Literal(text) => {
            let bytes = text.as_bytes();
            if bytes.len() < 3 {
                tracing::warn!(label = %text, "cannot translate STRING label");
                return None;
            }
            if bytes[1].is_ascii_alphabetic() || bytes[1] == b'_' {
                // Keywords stay within the ASCII character set.
                let inner = &text[1..text.len() - 1];
                return Some(Label::Terminal {
                    ty: TokenType::Name.id(),
                    keyword: Some(inner.into()),
                });
            }
            let inner = &bytes[1..bytes.len() - 1];
            let mut points = [0u32; 3];
            let mut count = 0usize;
            let mut pos = 0usize;
            while pos < inner.len() {
                let (next, point) = decode(inner, pos);
                if next == pos || count == points.len() {
                    tracing::warn!(label = %text, "cannot translate STRING label");
                    return None;
                }
                points[count] = point;
                count += 1;
                pos = next;
            }
            let ty = match count {
                1 => one_char(points[0]),
                2 => two_chars(points[0], points[1]),
                3 => three_chars(points[0], points[1], points[2]),
                _ => TokenType::Op,
            };
            if ty == TokenType::Op {
                tracing::warn!(label = %text, "unknown OP label");
                return None;
            }
            Some(Label::Terminal {
                ty: ty.id(),
                keyword: None,
            })
        }
        // Already translated, or EMPTY.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, NT_OFFSET};

    fn sample() -> Grammar {
        let mut b = GrammarBuilder::new(NT_OFFSET);
        let outer = b.add_dfa(NT_OFFSET, "outer");
        let s0 = b.add_state(outer);
        let s1 = b.add_state(outer);
        b.add_arc(outer, s0, s1, "inner");
        b.add_arc(outer, s0, s1, "NEWLINE");
        b.add_arc(outer, s0, s1, "'while'");
        b.add_arc(outer, s0, s1, "'⊕'");
        b.add_arc(outer, s0, s1, "'⊕='");
        b.add_arc(outer, s0, s1, "'<<='");
        b.mark_accept(outer, s1);
        let inner = b.add_dfa(NT_OFFSET + 1, "inner");
        let t0 = b.add_state(inner);
        let t1 = b.add_state(inner);
        b.add_arc(inner, t0, t1, "NAME");
        b.mark_accept(inner, t1);
        b.build()
    }

    fn translated_labels(g: &mut Grammar) -> Vec<Label> {
        translate_labels(g);
        g.labels().to_vec()
    }

    #[test]
    fn test_name_label_resolves_to_nonterminal_first() {
        let mut g = sample();
        let labels = translated_labels(&mut g);
        assert!(labels.contains(&Label::Nonterminal(NT_OFFSET + 1)));
    }

    #[test]
    fn test_name_label_falls_back_to_token_names() {
        let mut g = sample();
        let labels = translated_labels(&mut g);
        assert!(labels.contains(&Label::Terminal {
            ty: TokenType::Newline.id(),
            keyword: None
        }));
    }

    #[test]
    fn test_keyword_literal() {
        let mut g = sample();
        let labels = translated_labels(&mut g);
        assert!(labels.contains(&Label::Terminal {
            ty: TokenType::Name.id(),
            keyword: Some("while".into())
        }));
    }

    #[test]
    fn test_extended_operator_literals() {
        let mut g = sample();
        let labels = translated_labels(&mut g);
        assert!(labels.contains(&Label::Terminal {
            ty: TokenType::CircledPlus.id(),
            keyword: None
        }));
        assert!(labels.contains(&Label::Terminal {
            ty: TokenType::CircledPlusEqual.id(),
            keyword: None
        }));
        assert!(labels.contains(&Label::Terminal {
            ty: TokenType::LeftShiftEqual.id(),
            keyword: None
        }));
    }

    #[test]
    fn test_everything_translated() {
        let mut g = sample();
        let labels = translated_labels(&mut g);
        assert!(labels.iter().all(Label::is_translated));
    }
}
