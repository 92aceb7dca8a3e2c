//! Precompiled grammar tables for the extended dialect.
//!
//! This module is the runtime image of the grammar artifact: the DFAs
//! the generator tool emits for the indentation-based dialect, written
//! out as builder calls over raw labels. [`grammar`] loads the tables
//! and runs the one-time preparation (label translation + first sets),
//! handing back a grammar ready for the parser.
//!
//! The two extended binary operators live at the arithmetic precedence
//! levels: `⊕` (and its compound form `⊕=`) in `arith_expr`, `⊗` (and
//! `⊗=`) in `term`, so `⊗` binds tighter. Hosting the compound forms
//! here rather than in `augassign` is what makes `arith_expr` and
//! `term` the only productions where any of the four can appear - and
//! it is also why no check exists that the left-hand side of `⊕=` is
//! assignable.

use crate::grammar::{Grammar, GrammarBuilder};

/// Nonterminal type ids, contiguous from [`NT_OFFSET`](crate::NT_OFFSET)
/// in declaration order.
pub mod nt {
    pub const FILE_INPUT: u16 = 256;
    pub const STMT: u16 = 257;
    pub const SIMPLE_STMT: u16 = 258;
    pub const SMALL_STMT: u16 = 259;
    pub const EXPR_STMT: u16 = 260;
    pub const AUGASSIGN: u16 = 261;
    pub const PRINT_STMT: u16 = 262;
    pub const DEL_STMT: u16 = 263;
    pub const PASS_STMT: u16 = 264;
    pub const FLOW_STMT: u16 = 265;
    pub const BREAK_STMT: u16 = 266;
    pub const CONTINUE_STMT: u16 = 267;
    pub const RETURN_STMT: u16 = 268;
    pub const GLOBAL_STMT: u16 = 269;
    pub const COMPOUND_STMT: u16 = 270;
    pub const IF_STMT: u16 = 271;
    pub const WHILE_STMT: u16 = 272;
    pub const FOR_STMT: u16 = 273;
    pub const FUNCDEF: u16 = 274;
    pub const PARAMETERS: u16 = 275;
    pub const VARARGSLIST: u16 = 276;
    pub const SUITE: u16 = 277;
    pub const TEST: u16 = 278;
    pub const OR_TEST: u16 = 279;
    pub const AND_TEST: u16 = 280;
    pub const NOT_TEST: u16 = 281;
    pub const COMPARISON: u16 = 282;
    pub const COMP_OP: u16 = 283;
    pub const EXPR: u16 = 284;
    pub const XOR_EXPR: u16 = 285;
    pub const AND_EXPR: u16 = 286;
    pub const SHIFT_EXPR: u16 = 287;
    pub const ARITH_EXPR: u16 = 288;
    pub const TERM: u16 = 289;
    pub const FACTOR: u16 = 290;
    pub const POWER: u16 = 291;
    pub const ATOM: u16 = 292;
    pub const TRAILER: u16 = 293;
    pub const SUBSCRIPTLIST: u16 = 294;
    pub const SUBSCRIPT: u16 = 295;
    pub const TESTLIST: u16 = 296;
    pub const EXPRLIST: u16 = 297;
    pub const DICTMAKER: u16 = 298;
}

/// Build and prepare the dialect grammar.
pub fn grammar() -> Grammar {
    let mut g = tables();
    g.prepare();
    g
}

/// The raw tables, before label translation. Exposed separately so
/// tests can exercise preparation itself.
pub fn tables() -> Grammar {
    let mut b = GrammarBuilder::new(nt::FILE_INPUT);

    // file_input: (NEWLINE | stmt)* ENDMARKER
    {
        let d = b.add_dfa(nt::FILE_INPUT, "file_input");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s0, "NEWLINE");
        b.add_arc(d, s0, s0, "stmt");
        b.add_arc(d, s0, s1, "ENDMARKER");
        b.mark_accept(d, s1);
    }

    // stmt: simple_stmt | compound_stmt
    {
        let d = b.add_dfa(nt::STMT, "stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "simple_stmt");
        b.add_arc(d, s0, s1, "compound_stmt");
        b.mark_accept(d, s1);
    }

    // simple_stmt: small_stmt (';' small_stmt)* [';'] NEWLINE
    {
        let d = b.add_dfa(nt::SIMPLE_STMT, "simple_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "small_stmt");
        b.add_arc(d, s1, s2, "';'");
        b.add_arc(d, s1, s3, "NEWLINE");
        b.add_arc(d, s2, s1, "small_stmt");
        b.add_arc(d, s2, s3, "NEWLINE");
        b.mark_accept(d, s3);
    }

    // small_stmt: expr_stmt | print_stmt | del_stmt | pass_stmt
    //           | flow_stmt | global_stmt
    {
        let d = b.add_dfa(nt::SMALL_STMT, "small_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        for sub in [
            "expr_stmt",
            "print_stmt",
            "del_stmt",
            "pass_stmt",
            "flow_stmt",
            "global_stmt",
        ] {
            b.add_arc(d, s0, s1, sub);
        }
        b.mark_accept(d, s1);
    }

    // expr_stmt: testlist (augassign testlist | ('=' testlist)*)
    {
        let d = b.add_dfa(nt::EXPR_STMT, "expr_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        b.add_arc(d, s0, s1, "testlist");
        b.add_arc(d, s1, s2, "augassign");
        b.add_arc(d, s1, s3, "'='");
        b.add_arc(d, s2, s4, "testlist");
        b.add_arc(d, s3, s5, "testlist");
        b.add_arc(d, s5, s3, "'='");
        b.mark_accept(d, s1);
        b.mark_accept(d, s4);
        b.mark_accept(d, s5);
    }

    // augassign: '+=' | '-=' | '*=' | '/=' | '%=' | '&=' | '|=' | '^='
    //          | '<<=' | '>>=' | '**=' | '//='
    {
        let d = b.add_dfa(nt::AUGASSIGN, "augassign");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        for op in [
            "'+='", "'-='", "'*='", "'/='", "'%='", "'&='", "'|='", "'^='", "'<<='", "'>>='",
            "'**='", "'//='",
        ] {
            b.add_arc(d, s0, s1, op);
        }
        b.mark_accept(d, s1);
    }

    // print_stmt: 'print' [test (',' test)* [',']]
    {
        let d = b.add_dfa(nt::PRINT_STMT, "print_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "'print'");
        b.add_arc(d, s1, s2, "test");
        b.add_arc(d, s2, s3, "','");
        b.add_arc(d, s3, s2, "test");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
        b.mark_accept(d, s3);
    }

    // del_stmt: 'del' exprlist
    {
        let d = b.add_dfa(nt::DEL_STMT, "del_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "'del'");
        b.add_arc(d, s1, s2, "exprlist");
        b.mark_accept(d, s2);
    }

    // pass_stmt: 'pass'
    {
        let d = b.add_dfa(nt::PASS_STMT, "pass_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "'pass'");
        b.mark_accept(d, s1);
    }

    // flow_stmt: break_stmt | continue_stmt | return_stmt
    {
        let d = b.add_dfa(nt::FLOW_STMT, "flow_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "break_stmt");
        b.add_arc(d, s0, s1, "continue_stmt");
        b.add_arc(d, s0, s1, "return_stmt");
        b.mark_accept(d, s1);
    }

    // break_stmt: 'break'
    {
        let d = b.add_dfa(nt::BREAK_STMT, "break_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "'break'");
        b.mark_accept(d, s1);
    }

    // continue_stmt: 'continue'
    {
        let d = b.add_dfa(nt::CONTINUE_STMT, "continue_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "'continue'");
        b.mark_accept(d, s1);
    }

    // return_stmt: 'return' [testlist]
    {
        let d = b.add_dfa(nt::RETURN_STMT, "return_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "'return'");
        b.add_arc(d, s1, s2, "testlist");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
    }

    // global_stmt: 'global' NAME (',' NAME)*
    {
        let d = b.add_dfa(nt::GLOBAL_STMT, "global_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "'global'");
        b.add_arc(d, s1, s2, "NAME");
        b.add_arc(d, s2, s3, "','");
        b.add_arc(d, s3, s2, "NAME");
        b.mark_accept(d, s2);
    }

    // compound_stmt: if_stmt | while_stmt | for_stmt | funcdef
    {
        let d = b.add_dfa(nt::COMPOUND_STMT, "compound_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        b.add_arc(d, s0, s1, "if_stmt");
        b.add_arc(d, s0, s1, "while_stmt");
        b.add_arc(d, s0, s1, "for_stmt");
        b.add_arc(d, s0, s1, "funcdef");
        b.mark_accept(d, s1);
    }

    // if_stmt: 'if' test ':' suite ('elif' test ':' suite)*
    //          ['else' ':' suite]
    {
        let d = b.add_dfa(nt::IF_STMT, "if_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        let s6 = b.add_state(d);
        let s7 = b.add_state(d);
        b.add_arc(d, s0, s1, "'if'");
        b.add_arc(d, s1, s2, "test");
        b.add_arc(d, s2, s3, "':'");
        b.add_arc(d, s3, s4, "suite");
        b.add_arc(d, s4, s1, "'elif'");
        b.add_arc(d, s4, s5, "'else'");
        b.add_arc(d, s5, s6, "':'");
        b.add_arc(d, s6, s7, "suite");
        b.mark_accept(d, s4);
        b.mark_accept(d, s7);
    }

    // while_stmt: 'while' test ':' suite ['else' ':' suite]
    {
        let d = b.add_dfa(nt::WHILE_STMT, "while_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        let s6 = b.add_state(d);
        let s7 = b.add_state(d);
        b.add_arc(d, s0, s1, "'while'");
        b.add_arc(d, s1, s2, "test");
        b.add_arc(d, s2, s3, "':'");
        b.add_arc(d, s3, s4, "suite");
        b.add_arc(d, s4, s5, "'else'");
        b.add_arc(d, s5, s6, "':'");
        b.add_arc(d, s6, s7, "suite");
        b.mark_accept(d, s4);
        b.mark_accept(d, s7);
    }

    // for_stmt: 'for' exprlist 'in' testlist ':' suite ['else' ':' suite]
    {
        let d = b.add_dfa(nt::FOR_STMT, "for_stmt");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        let s6 = b.add_state(d);
        let s7 = b.add_state(d);
        let s8 = b.add_state(d);
        let s9 = b.add_state(d);
        b.add_arc(d, s0, s1, "'for'");
        b.add_arc(d, s1, s2, "exprlist");
        b.add_arc(d, s2, s3, "'in'");
        b.add_arc(d, s3, s4, "testlist");
        b.add_arc(d, s4, s5, "':'");
        b.add_arc(d, s5, s6, "suite");
        b.add_arc(d, s6, s7, "'else'");
        b.add_arc(d, s7, s8, "':'");
        b.add_arc(d, s8, s9, "suite");
        b.mark_accept(d, s6);
        b.mark_accept(d, s9);
    }

    // funcdef: 'def' NAME parameters ':' suite
    {
        let d = b.add_dfa(nt::FUNCDEF, "funcdef");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        b.add_arc(d, s0, s1, "'def'");
        b.add_arc(d, s1, s2, "NAME");
        b.add_arc(d, s2, s3, "parameters");
        b.add_arc(d, s3, s4, "':'");
        b.add_arc(d, s4, s5, "suite");
        b.mark_accept(d, s5);
    }

    // parameters: '(' [varargslist] ')'
    {
        let d = b.add_dfa(nt::PARAMETERS, "parameters");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "'('");
        b.add_arc(d, s1, s2, "')'");
        b.add_arc(d, s1, s3, "varargslist");
        b.add_arc(d, s3, s2, "')'");
        b.mark_accept(d, s2);
    }

    // varargslist: NAME (',' NAME)* [',']
    {
        let d = b.add_dfa(nt::VARARGSLIST, "varargslist");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "NAME");
        b.add_arc(d, s1, s2, "','");
        b.add_arc(d, s2, s1, "NAME");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
    }

    // suite: simple_stmt | NEWLINE INDENT stmt+ DEDENT
    {
        let d = b.add_dfa(nt::SUITE, "suite");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        b.add_arc(d, s0, s1, "simple_stmt");
        b.add_arc(d, s0, s2, "NEWLINE");
        b.add_arc(d, s2, s3, "INDENT");
        b.add_arc(d, s3, s4, "stmt");
        b.add_arc(d, s4, s4, "stmt");
        b.add_arc(d, s4, s1, "DEDENT");
        b.mark_accept(d, s1);
    }

    // test: or_test ['if' or_test 'else' test]
    {
        let d = b.add_dfa(nt::TEST, "test");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        b.add_arc(d, s0, s1, "or_test");
        b.add_arc(d, s1, s2, "'if'");
        b.add_arc(d, s2, s3, "or_test");
        b.add_arc(d, s3, s4, "'else'");
        b.add_arc(d, s4, s5, "test");
        b.mark_accept(d, s1);
        b.mark_accept(d, s5);
    }

    // or_test: and_test ('or' and_test)*
    {
        let d = b.add_dfa(nt::OR_TEST, "or_test");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "and_test");
        b.add_arc(d, s1, s2, "'or'");
        b.add_arc(d, s2, s1, "and_test");
        b.mark_accept(d, s1);
    }

    // and_test: not_test ('and' not_test)*
    {
        let d = b.add_dfa(nt::AND_TEST, "and_test");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "not_test");
        b.add_arc(d, s1, s2, "'and'");
        b.add_arc(d, s2, s1, "not_test");
        b.mark_accept(d, s1);
    }

    // not_test: 'not' not_test | comparison
    {
        let d = b.add_dfa(nt::NOT_TEST, "not_test");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "'not'");
        b.add_arc(d, s0, s2, "comparison");
        b.add_arc(d, s1, s2, "not_test");
        b.mark_accept(d, s2);
    }

    // comparison: expr (comp_op expr)*
    {
        let d = b.add_dfa(nt::COMPARISON, "comparison");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "expr");
        b.add_arc(d, s1, s2, "comp_op");
        b.add_arc(d, s2, s1, "expr");
        b.mark_accept(d, s1);
    }

    // comp_op: '<'|'>'|'=='|'>='|'<='|'<>'|'!='|'in'|'not' 'in'
    //        | 'is'|'is' 'not'
    {
        let d = b.add_dfa(nt::COMP_OP, "comp_op");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        for op in ["'<'", "'>'", "'=='", "'>='", "'<='", "'<>'", "'!='", "'in'"] {
            b.add_arc(d, s0, s1, op);
        }
        b.add_arc(d, s0, s2, "'not'");
        b.add_arc(d, s0, s3, "'is'");
        b.add_arc(d, s2, s1, "'in'");
        b.add_arc(d, s3, s1, "'not'");
        b.mark_accept(d, s1);
        b.mark_accept(d, s3);
    }

    // expr: xor_expr ('|' xor_expr)*
    {
        let d = b.add_dfa(nt::EXPR, "expr");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "xor_expr");
        b.add_arc(d, s1, s2, "'|'");
        b.add_arc(d, s2, s1, "xor_expr");
        b.mark_accept(d, s1);
    }

    // xor_expr: and_expr ('^' and_expr)*
    {
        let d = b.add_dfa(nt::XOR_EXPR, "xor_expr");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "and_expr");
        b.add_arc(d, s1, s2, "'^'");
        b.add_arc(d, s2, s1, "and_expr");
        b.mark_accept(d, s1);
    }

    // and_expr: shift_expr ('&' shift_expr)*
    {
        let d = b.add_dfa(nt::AND_EXPR, "and_expr");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "shift_expr");
        b.add_arc(d, s1, s2, "'&'");
        b.add_arc(d, s2, s1, "shift_expr");
        b.mark_accept(d, s1);
    }

    // shift_expr: arith_expr (('<<'|'>>') arith_expr)*
    {
        let d = b.add_dfa(nt::SHIFT_EXPR, "shift_expr");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "arith_expr");
        b.add_arc(d, s1, s2, "'<<'");
        b.add_arc(d, s1, s2, "'>>'");
        b.add_arc(d, s2, s1, "arith_expr");
        b.mark_accept(d, s1);
    }

    // arith_expr: term (('+'|'-'|'⊕'|'⊕=') term)*
    {
        let d = b.add_dfa(nt::ARITH_EXPR, "arith_expr");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "term");
        b.add_arc(d, s1, s2, "'+'");
        b.add_arc(d, s1, s2, "'-'");
        b.add_arc(d, s1, s2, "'\u{2295}'");
        b.add_arc(d, s1, s2, "'\u{2295}='");
        b.add_arc(d, s2, s1, "term");
        b.mark_accept(d, s1);
    }

    // term: factor (('*'|'/'|'%'|'//'|'⊗'|'⊗=') factor)*
    {
        let d = b.add_dfa(nt::TERM, "term");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "factor");
        b.add_arc(d, s1, s2, "'*'");
        b.add_arc(d, s1, s2, "'/'");
        b.add_arc(d, s1, s2, "'%'");
        b.add_arc(d, s1, s2, "'//'");
        b.add_arc(d, s1, s2, "'\u{2297}'");
        b.add_arc(d, s1, s2, "'\u{2297}='");
        b.add_arc(d, s2, s1, "factor");
        b.mark_accept(d, s1);
    }

    // factor: ('+'|'-'|'~') factor | power
    {
        let d = b.add_dfa(nt::FACTOR, "factor");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "'+'");
        b.add_arc(d, s0, s1, "'-'");
        b.add_arc(d, s0, s1, "'~'");
        b.add_arc(d, s0, s2, "power");
        b.add_arc(d, s1, s2, "factor");
        b.mark_accept(d, s2);
    }

    // power: atom trailer* ['**' factor]
    {
        let d = b.add_dfa(nt::POWER, "power");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "atom");
        b.add_arc(d, s1, s1, "trailer");
        b.add_arc(d, s1, s2, "'**'");
        b.add_arc(d, s2, s3, "factor");
        b.mark_accept(d, s1);
        b.mark_accept(d, s3);
    }

    // atom: '(' [testlist] ')' | '[' [testlist] ']' | '{' [dictmaker] '}'
    //     | '`' testlist '`' | NAME | NUMBER | STRING+
    {
        let d = b.add_dfa(nt::ATOM, "atom");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        let s6 = b.add_state(d);
        let s7 = b.add_state(d);
        let s8 = b.add_state(d);
        let s9 = b.add_state(d);
        let s10 = b.add_state(d);
        b.add_arc(d, s0, s1, "'('");
        b.add_arc(d, s0, s2, "'['");
        b.add_arc(d, s0, s3, "'{'");
        b.add_arc(d, s0, s4, "'`'");
        b.add_arc(d, s0, s5, "NAME");
        b.add_arc(d, s0, s5, "NUMBER");
        b.add_arc(d, s0, s6, "STRING");
        b.add_arc(d, s1, s7, "testlist");
        b.add_arc(d, s1, s5, "')'");
        b.add_arc(d, s7, s5, "')'");
        b.add_arc(d, s2, s8, "testlist");
        b.add_arc(d, s2, s5, "']'");
        b.add_arc(d, s8, s5, "']'");
        b.add_arc(d, s3, s9, "dictmaker");
        b.add_arc(d, s3, s5, "'}'");
        b.add_arc(d, s9, s5, "'}'");
        b.add_arc(d, s4, s10, "testlist");
        b.add_arc(d, s10, s5, "'`'");
        b.add_arc(d, s6, s6, "STRING");
        b.mark_accept(d, s5);
        b.mark_accept(d, s6);
    }

    // trailer: '(' [testlist] ')' | '[' subscriptlist ']' | '.' NAME
    {
        let d = b.add_dfa(nt::TRAILER, "trailer");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        let s5 = b.add_state(d);
        let s6 = b.add_state(d);
        b.add_arc(d, s0, s1, "'('");
        b.add_arc(d, s0, s2, "'['");
        b.add_arc(d, s0, s3, "'.'");
        b.add_arc(d, s1, s4, "')'");
        b.add_arc(d, s1, s5, "testlist");
        b.add_arc(d, s5, s4, "')'");
        b.add_arc(d, s2, s6, "subscriptlist");
        b.add_arc(d, s6, s4, "']'");
        b.add_arc(d, s3, s4, "NAME");
        b.mark_accept(d, s4);
    }

    // subscriptlist: subscript (',' subscript)* [',']
    {
        let d = b.add_dfa(nt::SUBSCRIPTLIST, "subscriptlist");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "subscript");
        b.add_arc(d, s1, s2, "','");
        b.add_arc(d, s2, s1, "subscript");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
    }

    // subscript: test | [test] ':' [test]
    {
        let d = b.add_dfa(nt::SUBSCRIPT, "subscript");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        b.add_arc(d, s0, s1, "test");
        b.add_arc(d, s0, s2, "':'");
        b.add_arc(d, s1, s2, "':'");
        b.add_arc(d, s2, s3, "test");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
        b.mark_accept(d, s3);
    }

    // testlist: test (',' test)* [',']
    {
        let d = b.add_dfa(nt::TESTLIST, "testlist");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "test");
        b.add_arc(d, s1, s2, "','");
        b.add_arc(d, s2, s1, "test");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
    }

    // exprlist: expr (',' expr)* [',']
    {
        let d = b.add_dfa(nt::EXPRLIST, "exprlist");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        b.add_arc(d, s0, s1, "expr");
        b.add_arc(d, s1, s2, "','");
        b.add_arc(d, s2, s1, "expr");
        b.mark_accept(d, s1);
        b.mark_accept(d, s2);
    }

    // dictmaker: test ':' test (',' test ':' test)* [',']
    {
        let d = b.add_dfa(nt::DICTMAKER, "dictmaker");
        let s0 = b.add_state(d);
        let s1 = b.add_state(d);
        let s2 = b.add_state(d);
        let s3 = b.add_state(d);
        let s4 = b.add_state(d);
        b.add_arc(d, s0, s1, "test");
        b.add_arc(d, s1, s2, "':'");
        b.add_arc(d, s2, s3, "test");
        b.add_arc(d, s3, s4, "','");
        b.add_arc(d, s4, s1, "test");
        b.mark_accept(d, s3);
        b.mark_accept(d, s4);
    }

    b.build()
}
