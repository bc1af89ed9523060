// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;

use super::edge::StepEdge;
use super::ids::TermId;
use super::term::Term;

/// How evaluation of the checked function ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// Evaluation reached a value.
    Value(TermId),
    /// Evaluation got stuck at `term` (a runtime type error).
    Stuck { term: TermId, reason: String },
}

impl Terminal {
    pub fn term_id(&self) -> &TermId {
        match self {
            Self::Value(term) => term,
            Self::Stuck { term, .. } => term,
        }
    }

    pub fn is_stuck(&self) -> bool {
        matches!(self, Self::Stuck { .. })
    }
}

/// The complete node/edge set of one evaluator response. Read-only for a session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionGraph {
    terms: Vec<Term>,
    edges: Vec<StepEdge>,
    root: TermId,
    terminal: Terminal,
}

impl ReductionGraph {
    pub fn new(
        terms: Vec<Term>,
        edges: Vec<StepEdge>,
        root: TermId,
        terminal: Terminal,
    ) -> Result<Self, GraphError> {
        let mut known = HashSet::with_capacity(terms.len());
        for term in &terms {
            if !known.insert(term.id().clone()) {
                return Err(GraphError::DuplicateTerm { term_id: term.id().clone() });
            }
        }

        if !known.contains(&root) {
            return Err(GraphError::UnknownRoot { term_id: root });
        }
        if !known.contains(terminal.term_id()) {
            return Err(GraphError::UnknownTerminal { term_id: terminal.term_id().clone() });
        }
        for edge in &edges {
            for endpoint in [edge.from_id(), edge.to_id()] {
                if !known.contains(endpoint) {
                    return Err(GraphError::UnknownEndpoint {
                        from: edge.from_id().clone(),
                        to: edge.to_id().clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        Ok(Self { terms, edges, root, terminal })
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn edges(&self) -> &[StepEdge] {
        &self.edges
    }

    pub fn root(&self) -> &TermId {
        &self.root
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    DuplicateTerm { term_id: TermId },
    UnknownRoot { term_id: TermId },
    UnknownTerminal { term_id: TermId },
    UnknownEndpoint { from: TermId, to: TermId, missing: TermId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTerm { term_id } => write!(f, "duplicate term id {term_id}"),
            Self::UnknownRoot { term_id } => write!(f, "root term {term_id} is not in the graph"),
            Self::UnknownTerminal { term_id } => {
                write!(f, "final term {term_id} is not in the graph")
            }
            Self::UnknownEndpoint { from, to, missing } => {
                write!(f, "edge {from} -> {to} references unknown term {missing}")
            }
        }
    }
}

impl std::error::Error for GraphError {}
