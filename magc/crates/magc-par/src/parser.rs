//! The LL(1) table-driven parser.
//!
//! Parsing state is a stack of frames, one per production currently
//! being recognized: the production's DFA, the current state within it,
//! and the parse-tree node under construction. One token is fed in at a
//! time through [`Parser::add_token`]:
//!
//! 1. Terminal arcs match on token type, and on exact text for keyword
//!    labels. A match shifts: the token becomes a leaf of the top
//!    frame's node and the frame advances along the arc.
//! 2. A nonterminal arc whose first set holds the classified token
//!    pushes a new frame for the sub-DFA and retries the token there.
//! 3. With no matching arc, an accepting state pops (the finished node
//!    is attached to its parent) and the token is retried one level up;
//!    a non-accepting state is a syntax error.
//!
//! After a shift, frames sitting in accepting states with no outgoing
//! arcs are popped eagerly; when the last frame pops, the parse is done
//! and the completed tree is handed back.

use magc_util::Span;

use crate::error::SyntaxError;
use crate::grammar::{Grammar, Label};
use crate::node::Node;

/// Outcome of feeding one token.
#[derive(Debug)]
pub enum ParseStep {
    /// The token was consumed; more input is expected.
    InProgress,
    /// The start production is complete; here is its tree.
    Done(Node),
}

struct Frame {
    dfa: usize,
    state: usize,
    node: Node,
}

enum Decision {
    Shift(usize),
    Push { nt: u16, return_state: usize },
    Pop,
    Error { expected: Option<Box<str>> },
}

/// Parser state for one source file.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    stack: Vec<Frame>,
}

impl<'g> Parser<'g> {
    /// Create a parser for `start`, which must be a nonterminal of
    /// `grammar`. The grammar must already be prepared.
    pub fn new(grammar: &'g Grammar, start: u16) -> Self {
        assert!(grammar.is_ready(), "grammar not prepared");
        let dfa = grammar.dfa_index(start);
        let initial = grammar.dfas()[dfa].initial;
        Self {
            grammar,
            stack: vec![Frame {
                dfa,
                state: initial,
                node: Node::interior(start, 0, -1),
            }],
        }
    }

    /// Feed one token. `text` is the token's source bytes (empty for
    /// synthesized tokens); `span`, `lineno` and `col_offset` are
    /// recorded on the leaf.
    pub fn add_token(
        &mut self,
        ty: u16,
        text: &[u8],
        span: Span,
        lineno: u32,
        col_offset: i32,
    ) -> Result<ParseStep, SyntaxError> {
        let classified = self.grammar.classify(ty, text);

        loop {
            let decision = self.decide(ty, text, classified);
            match decision {
                Decision::Shift(target) => {
                    let leaf = Node::leaf(ty, span, lineno, col_offset);
                    if let Some(top) = self.stack.last_mut() {
                        top.node.children.push(leaf);
                        top.state = target;
                    }
                    // Pop every frame that can neither continue nor
                    // consume more input.
                    while self.top_is_finished() {
                        if let Some(done) = self.pop_frame() {
                            return Ok(ParseStep::Done(done));
                        }
                    }
                    return Ok(ParseStep::InProgress);
                }
                Decision::Push { nt, return_state } => {
                    let dfa = self.grammar.dfa_index(nt);
                    let initial = self.grammar.dfas()[dfa].initial;
                    if let Some(top) = self.stack.last_mut() {
                        top.state = return_state;
                    }
                    self.stack.push(Frame {
                        dfa,
                        state: initial,
                        node: Node::interior(nt, lineno, col_offset),
                    });
                    // Retry the same token against the sub-DFA.
                }
                Decision::Pop => {
                    if let Some(done) = self.pop_frame() {
                        return Ok(ParseStep::Done(done));
                    }
                    // Retry the token one level up.
                }
                Decision::Error { expected } => {
                    return Err(SyntaxError {
                        lineno,
                        col_offset,
                        expected,
                    });
                }
            }
        }
    }

    fn decide(&self, ty: u16, text: &[u8], classified: Option<usize>) -> Decision {
        let Some(frame) = self.stack.last() else {
            panic!("token fed to a completed parser");
        };
        let dfa = &self.grammar.dfas()[frame.dfa];
        let state = &dfa.states[frame.state];

        for arc in &state.arcs {
            match &self.grammar.labels()[arc.label] {
                Label::Terminal { ty: t, keyword } if *t == ty => match keyword {
                    Some(kw) if kw.as_bytes() != text => continue,
                    _ => return Decision::Shift(arc.target),
                },
                Label::Nonterminal(nt) => {
                    if let Some(classified) = classified {
                        if self.grammar.find_dfa(*nt).first.contains(&classified) {
                            return Decision::Push {
                                nt: *nt,
                                return_state: arc.target,
                            };
                        }
                    }
                }
                _ => {}
            }
        }

        if state.accept {
            Decision::Pop
        } else {
            let expected = if state.arcs.len() == 1 {
                Some(self.grammar.label_name(state.arcs[0].label))
            } else {
                None
            };
            Decision::Error { expected }
        }
    }

    /// True when the top frame's state accepts and has no arcs left to
    /// take.
    fn top_is_finished(&self) -> bool {
        match self.stack.last() {
            Some(frame) => {
                let state = &self.grammar.dfas()[frame.dfa].states[frame.state];
                state.accept && state.arcs.is_empty()
            }
            None => false,
        }
    }

    /// Pop the top frame, attaching its node to the parent. Returns the
    /// completed tree when the last frame pops.
    fn pop_frame(&mut self) -> Option<Node> {
        let frame = self.stack.pop()?;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.node.children.push(frame.node);
                None
            }
            None => Some(frame.node),
        }
    }

    /// Current stack depth, mostly for tests.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, NT_OFFSET};
    use magc_lex::TokenType;

    /// pair: NAME '=' NAME NEWLINE ENDMARKER
    fn pair_grammar() -> Grammar {
        let mut b = GrammarBuilder::new(NT_OFFSET);
        let d = b.add_dfa(NT_OFFSET, "pair");
        let states: Vec<usize> = (0..6).map(|_| b.add_state(d)).collect();
        b.add_arc(d, states[0], states[1], "NAME");
        b.add_arc(d, states[1], states[2], "'='");
        b.add_arc(d, states[2], states[3], "NAME");
        b.add_arc(d, states[3], states[4], "NEWLINE");
        b.add_arc(d, states[4], states[5], "ENDMARKER");
        b.mark_accept(d, states[5]);
        let mut g = b.build();
        g.prepare();
        g
    }

    fn leaf_span() -> Span {
        Span::DUMMY
    }

    #[test]
    fn test_complete_parse() {
        let g = pair_grammar();
        let mut p = Parser::new(&g, NT_OFFSET);
        let toks: [(u16, &[u8]); 4] = [
            (TokenType::Name.id(), b"a"),
            (TokenType::Equal.id(), b"="),
            (TokenType::Name.id(), b"b"),
            (TokenType::Newline.id(), b""),
        ];
        for (ty, text) in toks {
            match p.add_token(ty, text, leaf_span(), 1, 0) {
                Ok(ParseStep::InProgress) => {}
                other => panic!("unexpected step: {:?}", other),
            }
        }
        match p.add_token(TokenType::Endmarker.id(), b"", leaf_span(), 1, -1) {
            Ok(ParseStep::Done(tree)) => {
                assert_eq!(tree.ty, NT_OFFSET);
                assert_eq!(tree.num_children(), 5);
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_reports_expected() {
        let g = pair_grammar();
        let mut p = Parser::new(&g, NT_OFFSET);
        p.add_token(TokenType::Name.id(), b"a", leaf_span(), 1, 0)
            .unwrap();
        let err = p
            .add_token(TokenType::Plus.id(), b"+", leaf_span(), 1, 2)
            .unwrap_err();
        assert_eq!(err.lineno, 1);
        assert_eq!(err.col_offset, 2);
        // The literal label was translated to the EQUAL terminal.
        assert_eq!(err.expected.as_deref(), Some("EQUAL"));
    }

    #[test]
    fn test_error_on_first_token() {
        let g = pair_grammar();
        let mut p = Parser::new(&g, NT_OFFSET);
        let err = p
            .add_token(TokenType::Number.id(), b"1", leaf_span(), 1, 0)
            .unwrap_err();
        assert_eq!(err.lineno, 1);
    }
}
