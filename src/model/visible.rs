// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The displayed subgraph and its undo history.
//!
//! Every mutation records an [`UndoDiff`]; popping a diff restores the exact node and edge sets
//! that existed before the mutation. Nodes only ever become visible through an insertion, and
//! only stop being visible through the undo of that insertion or a reset.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::ids::TermId;
use crate::query::GraphIndex;

/// Display weight of a visible edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeWeight {
    /// The full graph steps directly between the endpoints.
    Single,
    /// A collapsed path of several steps.
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisibleEdge {
    pub from: TermId,
    pub to: TermId,
    pub weight: EdgeWeight,
}

impl VisibleEdge {
    /// An edge between two terms, thin when the full graph has a direct step between them.
    pub fn between(index: &GraphIndex, from: TermId, to: TermId) -> Self {
        let weight =
            if index.has_step(&from, &to) { EdgeWeight::Single } else { EdgeWeight::Multi };
        Self { from, to, weight }
    }

    /// A detached edge, thin when the full graph links the endpoints directly by any edge.
    pub fn detached(index: &GraphIndex, from: TermId, to: TermId) -> Self {
        let weight =
            if index.has_edge(&from, &to) { EdgeWeight::Single } else { EdgeWeight::Multi };
        Self { from, to, weight }
    }

    pub fn is_collapsed(&self) -> bool {
        self.weight == EdgeWeight::Multi
    }
}

/// What one mutation changed; applying it in reverse undoes the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoDiff {
    pub nodes_added: Vec<TermId>,
    pub edges_added: Vec<VisibleEdge>,
    pub edge_removed: Option<VisibleEdge>,
}

/// A maximal run of visible edges, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleChain<'a> {
    pub head: &'a TermId,
    pub links: Vec<&'a VisibleEdge>,
}

impl<'a> VisibleChain<'a> {
    pub fn nodes(&self) -> impl Iterator<Item = &'a TermId> + '_ {
        std::iter::once(self.head).chain(self.links.iter().copied().map(|edge| &edge.to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleGraph {
    root: TermId,
    nodes: BTreeSet<TermId>,
    edges: BTreeSet<VisibleEdge>,
    initial_nodes: BTreeSet<TermId>,
    initial_edges: BTreeSet<VisibleEdge>,
    history: Vec<UndoDiff>,
}

impl VisibleGraph {
    /// The initial view: root and terminal joined by one edge, or the root alone when evaluation
    /// started at a value.
    pub fn new(index: &GraphIndex) -> Self {
        let root = index.root().clone();
        let terminal = index.terminal().term_id().clone();

        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();
        nodes.insert(root.clone());
        if terminal != root {
            nodes.insert(terminal.clone());
            edges.insert(VisibleEdge::between(index, root.clone(), terminal));
        }

        Self {
            root,
            initial_nodes: nodes.clone(),
            initial_edges: edges.clone(),
            nodes,
            edges,
            history: Vec::new(),
        }
    }

    pub fn root(&self) -> &TermId {
        &self.root
    }

    pub fn nodes(&self) -> &BTreeSet<TermId> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<VisibleEdge> {
        &self.edges
    }

    pub fn contains(&self, id: &TermId) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, edge: &VisibleEdge) -> bool {
        self.edges.contains(edge)
    }

    pub fn outgoing<'a>(&'a self, id: &'a TermId) -> impl Iterator<Item = &'a VisibleEdge> + 'a {
        self.edges.iter().filter(move |edge| &edge.from == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a TermId) -> impl Iterator<Item = &'a VisibleEdge> + 'a {
        self.edges.iter().filter(move |edge| &edge.to == id)
    }

    /// The node's only outgoing edge; `None` when it has zero or several.
    pub fn sole_outgoing(&self, id: &TermId) -> Option<&VisibleEdge> {
        sole(self.edges.iter().filter(|edge| &edge.from == id))
    }

    /// The node's only incoming edge; `None` when it has zero or several.
    pub fn sole_incoming(&self, id: &TermId) -> Option<&VisibleEdge> {
        sole(self.edges.iter().filter(|edge| &edge.to == id))
    }

    pub fn history(&self) -> &[UndoDiff] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Reveals `node` by splitting `replacing` into `replacing.from -> node -> replacing.to`.
    pub fn insert_node(
        &mut self,
        index: &GraphIndex,
        node: &TermId,
        replacing: &VisibleEdge,
    ) -> Result<UndoDiff, VisibleError> {
        self.ensure_hidden(index, node)?;
        if !self.edges.contains(replacing) {
            return Err(VisibleError::MissingEdge {
                from: replacing.from.clone(),
                to: replacing.to.clone(),
            });
        }

        let head = VisibleEdge::between(index, replacing.from.clone(), node.clone());
        let tail = VisibleEdge::between(index, node.clone(), replacing.to.clone());

        self.edges.remove(replacing);
        self.nodes.insert(node.clone());
        self.edges.insert(head.clone());
        self.edges.insert(tail.clone());

        let diff = UndoDiff {
            nodes_added: vec![node.clone()],
            edges_added: vec![head, tail],
            edge_removed: Some(replacing.clone()),
        };
        self.history.push(diff.clone());
        Ok(diff)
    }

    /// Reveals a detached `subterm -> value` pair. Nothing is removed.
    pub fn insert_pair(
        &mut self,
        index: &GraphIndex,
        subterm: &TermId,
        value: &TermId,
    ) -> Result<UndoDiff, VisibleError> {
        if subterm == value {
            return Err(VisibleError::DegeneratePair { term_id: subterm.clone() });
        }
        self.ensure_hidden(index, subterm)?;
        self.ensure_hidden(index, value)?;

        let edge = VisibleEdge::detached(index, subterm.clone(), value.clone());
        self.nodes.insert(subterm.clone());
        self.nodes.insert(value.clone());
        self.edges.insert(edge.clone());

        let diff = UndoDiff {
            nodes_added: vec![subterm.clone(), value.clone()],
            edges_added: vec![edge],
            edge_removed: None,
        };
        self.history.push(diff.clone());
        Ok(diff)
    }

    /// Reverses the most recent mutation. `None` (and no change) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<UndoDiff> {
        let diff = self.history.pop()?;
        for edge in &diff.edges_added {
            self.edges.remove(edge);
        }
        for node in &diff.nodes_added {
            self.nodes.remove(node);
        }
        if let Some(edge) = &diff.edge_removed {
            self.edges.insert(edge.clone());
        }
        Some(diff)
    }

    /// Restores the initial view and forgets all history.
    pub fn reset(&mut self) {
        self.nodes = self.initial_nodes.clone();
        self.edges = self.initial_edges.clone();
        self.history.clear();
    }

    /// Chains in display order: the root chain first, then detached chains in the order their
    /// heads were revealed.
    pub fn chains(&self) -> Vec<VisibleChain<'_>> {
        let mut heads = Vec::new();
        if let Some(root) = self.nodes.get(&self.root) {
            heads.push(root);
        }
        for diff in &self.history {
            for node in &diff.nodes_added {
                if let Some(node) = self.nodes.get(node) {
                    if node != &self.root && self.incoming(node).next().is_none() {
                        heads.push(node);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        let mut chains = Vec::with_capacity(heads.len());
        for head in heads {
            if !seen.insert(head) {
                continue;
            }
            let mut links = Vec::new();
            let mut current = head;
            while let Some(edge) = self.outgoing(current).next() {
                if !seen.insert(&edge.to) {
                    break;
                }
                links.push(edge);
                current = &edge.to;
            }
            chains.push(VisibleChain { head, links });
        }
        chains
    }

    fn ensure_hidden(&self, index: &GraphIndex, node: &TermId) -> Result<(), VisibleError> {
        if !index.contains(node) {
            return Err(VisibleError::UnknownTerm { term_id: node.clone() });
        }
        if self.nodes.contains(node) {
            return Err(VisibleError::AlreadyVisible { term_id: node.clone() });
        }
        Ok(())
    }
}

fn sole<T>(mut iter: impl Iterator<Item = T>) -> Option<T> {
    let first = iter.next()?;
    iter.next().is_none().then_some(first)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleError {
    UnknownTerm { term_id: TermId },
    AlreadyVisible { term_id: TermId },
    MissingEdge { from: TermId, to: TermId },
    DegeneratePair { term_id: TermId },
}

impl fmt::Display for VisibleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTerm { term_id } => write!(f, "term {term_id} is not in the graph"),
            Self::AlreadyVisible { term_id } => write!(f, "term {term_id} is already visible"),
            Self::MissingEdge { from, to } => write!(f, "no visible edge {from} -> {to}"),
            Self::DegeneratePair { term_id } => {
                write!(f, "term {term_id} cannot be paired with itself")
            }
        }
    }
}

impl std::error::Error for VisibleError {}
