// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Walks along the deterministic `StepsTo` relation.
//!
//! The evaluator emits at most one step edge per term; when that is violated the first edge in
//! input order wins. Walks are bounded by the edge count so a malformed cyclic graph cannot hang
//! the UI.

use tracing::warn;

use super::index::GraphIndex;
use crate::model::{StepEdge, TermId};

/// The step edges leading from `from` to `to`.
///
/// Empty when `to` is not reachable by stepping from `from` (including `from == to`).
pub fn find_path<'a>(index: &'a GraphIndex, from: &TermId, to: &TermId) -> Vec<&'a StepEdge> {
    let mut path = Vec::new();
    let mut current = from;

    for _ in 0..=index.edges().len() {
        let Some(edge) = index.step_edge(current) else {
            return Vec::new();
        };
        path.push(edge);
        if edge.to_id() == to {
            return path;
        }
        current = edge.to_id();
    }

    warn!(%from, %to, "step chain does not terminate; treating path as unreachable");
    Vec::new()
}

/// Terms visited by `path`: the first source followed by every target.
pub fn path_nodes<'a>(path: &[&'a StepEdge]) -> Vec<&'a TermId> {
    let Some(first) = path.first() else {
        return Vec::new();
    };
    std::iter::once(first.from_id()).chain(path.iter().map(|edge| edge.to_id())).collect()
}

/// Follows the step chain from `id` to its end: a value or a stuck term.
pub fn crunch<'a>(index: &'a GraphIndex, id: &'a TermId) -> &'a TermId {
    let mut current = id;
    for _ in 0..=index.edges().len() {
        match index.next_step(current) {
            Some(next) => current = next,
            None => return current,
        }
    }

    warn!(%id, "step chain does not terminate; stopping at the walk bound");
    current
}

/// The immediate subterm of `from` that is reduced by the first step towards `to`.
///
/// A subterm qualifies when its own next step is a subterm of `from`'s successor. With several
/// candidates the first in source order wins.
pub fn next_immediate_subterm<'a>(
    index: &'a GraphIndex,
    from: &TermId,
    to: &TermId,
) -> Option<&'a TermId> {
    let path = find_path(index, from, to);
    let successor = path.first()?.to_id();

    index.subterms(from).find(|sub| {
        index
            .next_step(sub)
            .is_some_and(|next| index.parents(next).any(|parent| parent == successor))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{crunch, find_path, next_immediate_subterm, path_nodes};
    use crate::model::fixtures::{call_chain_graph, long_chain_graph, tid, two_calls_graph};
    use crate::model::{EdgeTag, ReductionGraph, StepEdge, Term, Terminal};
    use crate::query::GraphIndex;

    #[test]
    fn find_path_collects_edges_in_order() {
        let index = GraphIndex::new(call_chain_graph());
        let path = find_path(&index, &tid("r"), &tid("d"));
        let hops = path
            .iter()
            .map(|edge| (edge.from_id().as_str(), edge.to_id().as_str()))
            .collect::<Vec<_>>();
        assert_eq!(hops, vec![("r", "a"), ("a", "b"), ("b", "c"), ("c", "d")]);
        assert!(path[1].has(EdgeTag::CallStep));
        assert!(path[2].has(EdgeTag::ReturnStep));
    }

    #[rstest]
    #[case("d", "r")]
    #[case("r", "r")]
    #[case("r", "l3")]
    #[case("ghost", "d")]
    fn find_path_is_empty_when_unreachable(#[case] from: &str, #[case] to: &str) {
        let index = GraphIndex::new(call_chain_graph());
        assert!(find_path(&index, &tid(from), &tid(to)).is_empty());
    }

    #[test]
    fn path_nodes_lists_every_visited_term() {
        let index = GraphIndex::new(call_chain_graph());
        let path = find_path(&index, &tid("a"), &tid("d"));
        let nodes = path_nodes(&path).into_iter().map(|id| id.as_str()).collect::<Vec<_>>();
        assert_eq!(nodes, vec!["a", "b", "c", "d"]);
        assert!(path_nodes(&[]).is_empty());
    }

    #[test]
    fn path_is_reconstructed_identically_from_predecessors() {
        let index = GraphIndex::new(long_chain_graph(40, 5));
        let forward = find_path(&index, &tid("t3"), &tid("t31"));

        let mut backward = Vec::new();
        let mut current = tid("t31");
        while current != tid("t3") {
            let edge = index.incoming(&current, EdgeTag::StepsTo).next().expect("predecessor");
            backward.push(edge);
            current = edge.from_id().clone();
        }
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn crunch_ends_at_a_term_without_step() {
        let index = GraphIndex::new(long_chain_graph(25, 4));
        for term in index.terms() {
            let end = crunch(&index, term.id());
            assert!(index.next_step(end).is_none());
            assert_eq!(end, &tid("t25"));
        }
    }

    #[test]
    fn crunch_of_a_subterm_reaches_its_value() {
        let index = GraphIndex::new(call_chain_graph());
        assert_eq!(crunch(&index, &tid("l0")), &tid("l3"));
        assert_eq!(crunch(&index, &tid("t")), &tid("t"));
    }

    #[test]
    fn walks_stop_on_cyclic_input() {
        let graph = ReductionGraph::new(
            vec![Term::new(tid("x"), "x", None), Term::new(tid("y"), "y", None)],
            vec![
                StepEdge::new(tid("x"), tid("y"), "StepsTo"),
                StepEdge::new(tid("y"), tid("x"), "StepsTo"),
            ],
            tid("x"),
            Terminal::Value(tid("y")),
        )
        .expect("graph");
        let index = GraphIndex::new(graph);

        assert!(find_path(&index, &tid("x"), &tid("ghost")).is_empty());
        let _ = crunch(&index, &tid("x"));
    }

    #[test]
    fn next_immediate_subterm_finds_the_reduced_operand() {
        let index = GraphIndex::new(call_chain_graph());
        assert_eq!(next_immediate_subterm(&index, &tid("r"), &tid("d")), Some(&tid("l0")));
        assert_eq!(next_immediate_subterm(&index, &tid("a"), &tid("d")), Some(&tid("l1")));
        assert_eq!(next_immediate_subterm(&index, &tid("d"), &tid("d")), None);
    }

    #[test]
    fn next_immediate_subterm_prefers_the_first_operand() {
        let index = GraphIndex::new(two_calls_graph());
        assert_eq!(next_immediate_subterm(&index, &tid("r"), &tid("v")), Some(&tid("p")));
        assert_eq!(next_immediate_subterm(&index, &tid("b"), &tid("v")), Some(&tid("q")));
    }
}
