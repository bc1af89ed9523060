// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::model::{EdgeTag, ReductionGraph, StepEdge, Term, TermId, Terminal};

type EdgeList = SmallVec<[usize; 4]>;

/// Immutable indexed view over a [`ReductionGraph`].
///
/// Adjacency lists keep edges in input order, so "first matching edge" queries agree with the
/// order the evaluator emitted them in. Unknown ids answer with empty results.
#[derive(Debug, Clone)]
pub struct GraphIndex {
    graph: ReductionGraph,
    term_by_id: HashMap<TermId, usize>,
    outgoing: Vec<EdgeList>,
    incoming: Vec<EdgeList>,
}

impl GraphIndex {
    pub fn new(graph: ReductionGraph) -> Self {
        let term_by_id = graph
            .terms()
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.id().clone(), idx))
            .collect::<HashMap<_, _>>();

        let mut outgoing = vec![EdgeList::new(); graph.terms().len()];
        let mut incoming = vec![EdgeList::new(); graph.terms().len()];
        for (edge_idx, edge) in graph.edges().iter().enumerate() {
            // Endpoints were validated by `ReductionGraph::new`.
            if let Some(&from) = term_by_id.get(edge.from_id()) {
                outgoing[from].push(edge_idx);
            }
            if let Some(&to) = term_by_id.get(edge.to_id()) {
                incoming[to].push(edge_idx);
            }
        }

        Self { graph, term_by_id, outgoing, incoming }
    }

    pub fn graph(&self) -> &ReductionGraph {
        &self.graph
    }

    pub fn root(&self) -> &TermId {
        self.graph.root()
    }

    pub fn terminal(&self) -> &Terminal {
        self.graph.terminal()
    }

    pub fn terms(&self) -> &[Term] {
        self.graph.terms()
    }

    pub fn edges(&self) -> &[StepEdge] {
        self.graph.edges()
    }

    pub fn term(&self, id: &TermId) -> Option<&Term> {
        self.term_by_id.get(id).map(|&idx| &self.graph.terms()[idx])
    }

    pub fn contains(&self, id: &TermId) -> bool {
        self.term_by_id.contains_key(id)
    }

    /// Edges leaving `id` that carry `tag`, in input order.
    pub fn outgoing<'a>(
        &'a self,
        id: &TermId,
        tag: EdgeTag,
    ) -> impl Iterator<Item = &'a StepEdge> + 'a {
        self.adjacent(&self.outgoing, id, tag)
    }

    /// Edges entering `id` that carry `tag`, in input order.
    pub fn incoming<'a>(
        &'a self,
        id: &TermId,
        tag: EdgeTag,
    ) -> impl Iterator<Item = &'a StepEdge> + 'a {
        self.adjacent(&self.incoming, id, tag)
    }

    fn adjacent<'a>(
        &'a self,
        lists: &'a [EdgeList],
        id: &TermId,
        tag: EdgeTag,
    ) -> impl Iterator<Item = &'a StepEdge> + 'a {
        let list = self.term_by_id.get(id).map(|&idx| lists[idx].as_slice()).unwrap_or(&[]);
        list.iter()
            .map(move |&edge_idx| &self.graph.edges()[edge_idx])
            .filter(move |edge| edge.has(tag))
    }

    /// The step edge leaving `id`; `None` for values and stuck terms.
    pub fn step_edge(&self, id: &TermId) -> Option<&StepEdge> {
        self.outgoing(id, EdgeTag::StepsTo).next()
    }

    /// The term `id` reduces to in one step.
    pub fn next_step(&self, id: &TermId) -> Option<&TermId> {
        self.step_edge(id).map(StepEdge::to_id)
    }

    /// Immediate subterms of `id`.
    pub fn subterms<'a>(&'a self, id: &TermId) -> impl Iterator<Item = &'a TermId> + 'a {
        self.outgoing(id, EdgeTag::SubTerm).map(StepEdge::to_id)
    }

    /// Terms that have `id` as an immediate subterm.
    pub fn parents<'a>(&'a self, id: &TermId) -> impl Iterator<Item = &'a TermId> + 'a {
        self.incoming(id, EdgeTag::SubTerm).map(StepEdge::from_id)
    }

    /// Whether the full graph reduces `from` to `to` in a single step.
    pub fn has_step(&self, from: &TermId, to: &TermId) -> bool {
        self.outgoing(from, EdgeTag::StepsTo).any(|edge| edge.to_id() == to)
    }

    /// Whether any edge, whatever its tags, leads from `from` to `to`.
    pub fn has_edge(&self, from: &TermId, to: &TermId) -> bool {
        let list = self.term_by_id.get(from).map(|&idx| self.outgoing[idx].as_slice());
        list.unwrap_or(&[]).iter().any(|&edge_idx| self.graph.edges()[edge_idx].to_id() == to)
    }
}
