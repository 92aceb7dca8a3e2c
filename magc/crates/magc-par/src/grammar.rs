//! Grammar runtime: DFAs, states, arcs, labels.
//!
//! A grammar is a graph of one DFA per nonterminal. State arcs carry
//! label indices into the grammar's shared label list; a label is either
//! a terminal (optionally restricted to one keyword spelling) or a
//! nonterminal. Grammars arrive from the generator with *raw* labels -
//! names and quoted literals - which [`Grammar::prepare`] resolves once
//! (see [`translate`](crate::translate)), after which the whole structure
//! is read-only.
//!
//! First sets are stored per DFA as sets of label indices rather than
//! bare token types. That keeps keywords distinct from plain NAMEs: a
//! NAME token classifies to its keyword's label when the grammar knows
//! the spelling, so `if` does not look like the start of an expression.

use magc_lex::{TokenType, N_TOKENS, TOKEN_NAMES};
use magc_util::{FxHashMap, FxHashSet};

use indexmap::IndexSet;

/// The smallest nonterminal type id; token types are strictly below it.
pub const NT_OFFSET: u16 = 256;

/// A grammar label: what an arc can match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    /// The reserved index-0 label; matches nothing.
    Empty,
    /// A terminal. With `keyword` set, only a NAME token with exactly
    /// that text matches.
    Terminal {
        /// Token type id
        ty: u16,
        /// Required token text, for keyword labels
        keyword: Option<Box<str>>,
    },
    /// A nonterminal, by type id (>= [`NT_OFFSET`]).
    Nonterminal(u16),
    /// Untranslated: a bare name, to be resolved against DFA names and
    /// then the token-name table.
    Name(Box<str>),
    /// Untranslated: a quoted literal from the grammar source, either a
    /// keyword or a punctuation/operator spelling.
    Literal(Box<str>),
}

impl Label {
    /// True once the label no longer needs translation.
    pub fn is_translated(&self) -> bool {
        !matches!(self, Label::Name(_) | Label::Literal(_))
    }
}

/// A transition: on `label`, move to state `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrammarArc {
    /// Index into the grammar's label list
    pub label: usize,
    /// Destination state index within the same DFA
    pub target: usize,
}

/// One DFA state.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Outgoing arcs, in grammar order
    pub arcs: Vec<GrammarArc>,
    /// Whether the production may end in this state
    pub accept: bool,
}

/// The DFA for one nonterminal.
#[derive(Clone, Debug)]
pub struct Dfa {
    /// Nonterminal type id (>= [`NT_OFFSET`])
    pub ty: u16,
    /// Production name, e.g. `arith_expr`
    pub name: Box<str>,
    /// States; index 0 exists for every DFA
    pub states: Vec<State>,
    /// Initial state index
    pub initial: usize,
    /// First set as label indices, computed by [`Grammar::prepare`]
    pub first: FxHashSet<usize>,
}

/// An immutable grammar, after one-time preparation.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: u16,
    dfas: Vec<Dfa>,
    labels: Vec<Label>,
    /// label index of the plain terminal for each token type
    token_labels: Vec<Option<usize>>,
    /// label index for each keyword spelling
    keyword_labels: FxHashMap<Box<str>, usize>,
    ready: bool,
}

impl Grammar {
    /// The start nonterminal's type id.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// All DFAs, in nonterminal id order.
    pub fn dfas(&self) -> &[Dfa] {
        &self.dfas
    }

    /// The shared label list.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// True once [`Grammar::prepare`] has run.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Index of the DFA for nonterminal `ty` (O(1)).
    #[inline]
    pub fn dfa_index(&self, ty: u16) -> usize {
        (ty - NT_OFFSET) as usize
    }

    /// The DFA for nonterminal `ty` (O(1)).
    #[inline]
    pub fn find_dfa(&self, ty: u16) -> &Dfa {
        let dfa = &self.dfas[self.dfa_index(ty)];
        debug_assert_eq!(dfa.ty, ty);
        dfa
    }

    /// One-time preparation: resolve raw labels, build the token
    /// classification tables, and compute first sets. Idempotent in
    /// effect but intended to run exactly once, before the first parse.
    pub fn prepare(&mut self) {
        crate::translate::translate_labels(self);
        self.build_classifier();
        self.compute_first_sets();
        self.ready = true;
    }

    /// Classify an incoming token to the label index it matches for
    /// first-set purposes. Keyword spellings win over the plain NAME
    /// label; tokens the grammar never mentions classify to `None`.
    pub fn classify(&self, ty: u16, text: &[u8]) -> Option<usize> {
        if ty == TokenType::Name.id() {
            if let Ok(text) = std::str::from_utf8(text) {
                if let Some(&index) = self.keyword_labels.get(text) {
                    return Some(index);
                }
            }
        }
        self.token_labels.get(ty as usize).copied().flatten()
    }

    /// Human-readable name for a label, for diagnostics.
    pub fn label_name(&self, index: usize) -> Box<str> {
        match &self.labels[index] {
            Label::Empty => "EMPTY".into(),
            Label::Terminal {
                keyword: Some(kw), ..
            } => format!("'{}'", kw).into_boxed_str(),
            Label::Terminal { ty, keyword: None } => TOKEN_NAMES
                .get(*ty as usize)
                .copied()
                .unwrap_or("<unknown>")
                .into(),
            Label::Nonterminal(ty) => self.find_dfa(*ty).name.clone(),
            Label::Name(text) | Label::Literal(text) => text.clone(),
        }
    }

    pub(crate) fn labels_mut(&mut self) -> &mut Vec<Label> {
        &mut self.labels
    }

    fn build_classifier(&mut self) {
        let mut token_labels = vec![None; N_TOKENS as usize];
        let mut keyword_labels = FxHashMap::default();
        for (index, label) in self.labels.iter().enumerate() {
            match label {
                Label::Terminal {
                    keyword: Some(kw), ..
                } => {
                    keyword_labels.entry(kw.clone()).or_insert(index);
                }
                Label::Terminal { ty, keyword: None } => {
                    let slot = &mut token_labels[*ty as usize];
                    if slot.is_none() {
                        *slot = Some(index);
                    }
                }
                _ => {}
            }
        }
        self.token_labels = token_labels;
        self.keyword_labels = keyword_labels;
    }

    /// Fixpoint computation of first sets over label indices.
    fn compute_first_sets(&mut self) {
        loop {
            let mut pending: Vec<(usize, Vec<usize>)> = Vec::new();
            for (index, dfa) in self.dfas.iter().enumerate() {
                let mut additions = Vec::new();
                for arc in &dfa.states[dfa.initial].arcs {
                    match &self.labels[arc.label] {
                        Label::Terminal { .. } => {
                            if !dfa.first.contains(&arc.label) {
                                additions.push(arc.label);
                            }
                        }
                        Label::Nonterminal(ty) => {
                            let sub = &self.dfas[(*ty - NT_OFFSET) as usize];
                            for &label in &sub.first {
                                if !dfa.first.contains(&label) {
                                    additions.push(label);
                                }
                            }
                        }
                        Label::Empty | Label::Name(_) | Label::Literal(_) => {}
                    }
                }
                if !additions.is_empty() {
                    pending.push((index, additions));
                }
            }
            if pending.is_empty() {
                break;
            }
            for (index, additions) in pending {
                for label in additions {
                    self.dfas[index].first.insert(label);
                }
            }
        }
    }
}

/// Builder used by generated grammar tables.
///
/// Mirrors the generator's output interface: add DFAs, states and arcs;
/// labels are interned and deduplicated, and index 0 is always the
/// reserved EMPTY label. All `add_*` methods return plain indices.
pub struct GrammarBuilder {
    start: u16,
    dfas: Vec<Dfa>,
    labels: IndexSet<LabelKey>,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct LabelKey {
    literal: bool,
    text: Box<str>,
}

impl GrammarBuilder {
    /// Create a builder for a grammar starting at nonterminal `start`.
    pub fn new(start: u16) -> Self {
        let mut labels = IndexSet::new();
        labels.insert(LabelKey {
            literal: false,
            text: "EMPTY".into(),
        });
        Self {
            start,
            dfas: Vec::new(),
            labels,
        }
    }

    /// Add the DFA for nonterminal `ty`; returns its index.
    ///
    /// DFAs must be added in nonterminal id order so that
    /// `find_dfa` stays a direct index.
    pub fn add_dfa(&mut self, ty: u16, name: &str) -> usize {
        debug_assert_eq!(
            self.dfas.len(),
            (ty - NT_OFFSET) as usize,
            "dfa {} added out of id order",
            name
        );
        self.dfas.push(Dfa {
            ty,
            name: name.into(),
            states: Vec::new(),
            initial: 0,
            first: FxHashSet::default(),
        });
        self.dfas.len() - 1
    }

    /// Add a state to DFA `dfa`; returns the new state's index.
    pub fn add_state(&mut self, dfa: usize) -> usize {
        let states = &mut self.dfas[dfa].states;
        states.push(State::default());
        states.len() - 1
    }

    /// Mark `state` in DFA `dfa` as accepting.
    pub fn mark_accept(&mut self, dfa: usize, state: usize) {
        self.dfas[dfa].states[state].accept = true;
    }

    /// Add an arc `from -> to` on `label`.
    ///
    /// A label starting with `'` is a quoted literal (keyword or
    /// operator spelling); anything else is a name, resolved at
    /// translation time against DFA names and then token names.
    pub fn add_arc(&mut self, dfa: usize, from: usize, to: usize, label: &str) {
        let label = self.intern_label(label);
        let states = &mut self.dfas[dfa].states;
        assert!(from < states.len() && to < states.len());
        states[from].arcs.push(GrammarArc { label, target: to });
    }

    fn intern_label(&mut self, text: &str) -> usize {
        let key = LabelKey {
            literal: text.starts_with('\''),
            text: text.into(),
        };
        self.labels.insert_full(key).0
    }

    /// Freeze the builder into a grammar with raw labels. The result
    /// still needs [`Grammar::prepare`] before parsing.
    pub fn build(self) -> Grammar {
        let labels = self
            .labels
            .into_iter()
            .enumerate()
            .map(|(index, key)| {
                if index == 0 {
                    Label::Empty
                } else if key.literal {
                    Label::Literal(key.text)
                } else {
                    Label::Name(key.text)
                }
            })
            .collect();
        Grammar {
            start: self.start,
            dfas: self.dfas,
            labels,
            token_labels: Vec::new(),
            keyword_labels: FxHashMap::default(),
            ready: false,
        }
    }
}
