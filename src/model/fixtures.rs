// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::edge::StepEdge;
use super::graph::{ReductionGraph, Terminal};
use super::ids::TermId;
use super::term::{SourceSpan, Term};

pub(crate) fn tid(value: &str) -> TermId {
    TermId::new(value).expect("term id")
}

fn term(id: &str, label: &str, span: Option<SourceSpan>) -> Term {
    Term::new(tid(id), label, span)
}

fn edge(from: &str, to: &str, label: &str) -> StepEdge {
    StepEdge::new(tid(from), tid(to), label)
}

pub(crate) const CALL_CHAIN_PROGRAM: &str = "let inc n = n + 1;;\nlet main = inc (1 + 1) * 2;;";

/// `inc (1 + 1) * 2` evaluated to `6`.
///
/// Main chain: `r -> a -> b (call) -> c (return) -> d`. The left operand `l0` has its own
/// chain `l0 -> l1 -> l2 (call) -> l3 (return)` whose members are the subterms of the main
/// chain states; `t` is the shared right operand.
pub(crate) fn call_chain_graph() -> ReductionGraph {
    let root_span = Some(SourceSpan::new(2, 12, 2, 26));
    let lhs_span = Some(SourceSpan::new(2, 12, 2, 22));
    let arg_span = Some(SourceSpan::new(2, 17, 2, 21));
    let body_span = Some(SourceSpan::new(1, 13, 1, 17));

    let terms = vec![
        term("r", "inc <b>(1 + 1)</b> * 2", root_span),
        term("a", "<b>inc 2</b> * 2", root_span),
        term("b", "<b>(2 + 1)</b> * 2", root_span),
        term("c", "<b>3 * 2</b>", root_span),
        term("d", "6", root_span),
        term("l0", "inc <b>(1 + 1)</b>", lhs_span),
        term("l1", "<b>inc 2</b>", lhs_span),
        term("l2", "<b>2 + 1</b>", body_span),
        term("l3", "3", lhs_span),
        term("s0", "<b>1 + 1</b>", arg_span),
        term("s1", "2", arg_span),
        term("t", "2", Some(SourceSpan::new(2, 26, 2, 26))),
    ];

    let edges = vec![
        edge("r", "l0", "SubTerm"),
        edge("r", "t", "SubTerm"),
        edge("a", "l1", "SubTerm"),
        edge("a", "t", "SubTerm"),
        edge("b", "l2", "SubTerm"),
        edge("b", "t", "SubTerm"),
        edge("c", "l3", "SubTerm"),
        edge("c", "t", "SubTerm"),
        edge("l0", "s0", "SubTerm"),
        edge("l1", "s1", "SubTerm"),
        edge("r", "a", "StepsTo"),
        edge("a", "b", "StepsTo CallStep"),
        edge("b", "c", "StepsTo ReturnStep"),
        edge("c", "d", "StepsTo"),
        edge("l0", "l1", "StepsTo"),
        edge("l1", "l2", "StepsTo CallStep"),
        edge("l2", "l3", "StepsTo ReturnStep"),
        edge("s0", "s1", "StepsTo"),
    ];

    ReductionGraph::new(terms, edges, tid("r"), Terminal::Value(tid("d")))
        .expect("call chain fixture is well-formed")
}

pub(crate) const STUCK_PROGRAM: &str = "let f x = x + true;;\nlet main = f 1;;";

/// `f 1` stepping into a body that adds an int to a bool.
pub(crate) fn stuck_graph() -> ReductionGraph {
    let terms = vec![
        term("r", "<b>f 1</b>", Some(SourceSpan::new(2, 12, 2, 14))),
        term("x", "<b>1 + true</b>", Some(SourceSpan::new(1, 11, 1, 18))),
        term("x.l", "1", Some(SourceSpan::new(1, 11, 1, 11))),
        term("x.r", "true", Some(SourceSpan::new(1, 15, 1, 18))),
    ];
    let edges = vec![
        edge("x", "x.l", "SubTerm"),
        edge("x", "x.r", "SubTerm"),
        edge("r", "x", "StepsTo CallStep"),
    ];

    ReductionGraph::new(
        terms,
        edges,
        tid("r"),
        Terminal::Stuck { term: tid("x"), reason: "expected int but got bool".to_owned() },
    )
    .expect("stuck fixture is well-formed")
}

/// `f 1 + g 2`: two subterms that both enter a call.
///
/// Main chain: `r -> a (call f) -> b (return) -> c (call g) -> e (return) -> v`.
pub(crate) fn two_calls_graph() -> ReductionGraph {
    let terms = vec![
        term("r", "f 1 + g 2", None),
        term("a", "(1 + 1) + g 2", None),
        term("b", "2 + g 2", None),
        term("c", "2 + (2 * 2)", None),
        term("e", "2 + 4", None),
        term("v", "6", None),
        term("p", "f 1", None),
        term("p1", "1 + 1", None),
        term("p2", "2", None),
        term("q", "g 2", None),
        term("q1", "2 * 2", None),
        term("q2", "4", None),
    ];
    let edges = vec![
        edge("r", "p", "SubTerm"),
        edge("r", "q", "SubTerm"),
        edge("a", "p1", "SubTerm"),
        edge("a", "q", "SubTerm"),
        edge("b", "p2", "SubTerm"),
        edge("b", "q", "SubTerm"),
        edge("c", "p2", "SubTerm"),
        edge("c", "q1", "SubTerm"),
        edge("e", "p2", "SubTerm"),
        edge("e", "q2", "SubTerm"),
        edge("r", "a", "StepsTo CallStep"),
        edge("a", "b", "StepsTo ReturnStep"),
        edge("b", "c", "StepsTo CallStep"),
        edge("c", "e", "StepsTo ReturnStep"),
        edge("e", "v", "StepsTo"),
        edge("p", "p1", "StepsTo CallStep"),
        edge("p1", "p2", "StepsTo ReturnStep"),
        edge("q", "q1", "StepsTo CallStep"),
        edge("q1", "q2", "StepsTo ReturnStep"),
    ];

    ReductionGraph::new(terms, edges, tid("r"), Terminal::Value(tid("v")))
        .expect("two calls fixture is well-formed")
}

/// A program that is already a value: root and terminal coincide.
pub(crate) fn value_only_graph() -> ReductionGraph {
    let terms = vec![term("r", "42", None)];
    ReductionGraph::new(terms, Vec::new(), tid("r"), Terminal::Value(tid("r")))
        .expect("value fixture is well-formed")
}

/// A straight chain `t0 -> t1 -> ... -> t{len}` with a call/return pair every `frame` steps.
pub(crate) fn long_chain_graph(len: usize, frame: usize) -> ReductionGraph {
    let frame = frame.max(2);
    let terms =
        (0..=len).map(|idx| term(&format!("t{idx}"), &format!("term {idx}"), None)).collect();
    let edges = (0..len)
        .map(|idx| {
            let label = match idx % frame {
                0 => "StepsTo CallStep",
                1 => "StepsTo ReturnStep",
                _ => "StepsTo",
            };
            edge(&format!("t{idx}"), &format!("t{}", idx + 1), label)
        })
        .collect();

    ReductionGraph::new(terms, edges, tid("t0"), Terminal::Value(tid(&format!("t{len}"))))
        .expect("long chain fixture is well-formed")
}
