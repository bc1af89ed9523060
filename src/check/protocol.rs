// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire format of the evaluator's `/check` endpoint.
//!
//! The request is a form with the program text (`prog`) and the function to evaluate (`var`).
//! The response is JSON discriminated by its `result` field.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::annotate::Annotation;
use crate::model::{
    GraphError, IdError, ReductionGraph, SourceSpan, StepEdge, Term, TermId, Terminal,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub prog: String,
    #[serde(rename = "var")]
    pub function: String,
}

/// Term id as sent by the evaluator: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl WireId {
    pub fn to_term_id(&self) -> Result<TermId, IdError> {
        match self {
            Self::Number(value) => Ok(TermId::from_number(*value)),
            Self::Text(value) => TermId::new(value),
        }
    }
}

impl From<&str> for WireId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<u64> for WireId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSpan {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl From<WireSpan> for SourceSpan {
    fn from(span: WireSpan) -> Self {
        SourceSpan::new(span.start_line, span.start_col, span.end_line, span.end_col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNode {
    pub id: WireId,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<WireSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEdge {
    pub from: WireId,
    pub to: WireId,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum CheckResponse {
    Value {
        nodes: Vec<WireNode>,
        edges: Vec<WireEdge>,
        root: WireId,
        value: WireId,
    },
    Stuck {
        nodes: Vec<WireNode>,
        edges: Vec<WireEdge>,
        root: WireId,
        /// Stuck term id; some evaluator builds only send `bad`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stuck: Option<WireId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bad: Option<WireId>,
        #[serde(default)]
        reason: String,
    },
    Timeout {
        /// Description of the input that timed out.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root: Option<serde_json::Value>,
    },
    ParseError {
        error: String,
    },
}

/// A decoded response in model terms.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Evaluation produced a graph; `annotations` holds the stuck error, if any.
    Evaluated { graph: ReductionGraph, annotations: Vec<Annotation> },
    TimedOut { input: String },
    ParseError { annotation: Annotation, message: String },
}

impl CheckResponse {
    pub fn result_tag(&self) -> &'static str {
        match self {
            Self::Value { .. } => "value",
            Self::Stuck { .. } => "stuck",
            Self::Timeout { .. } => "timeout",
            Self::ParseError { .. } => "parse-error",
        }
    }

    pub fn into_outcome(self) -> Result<CheckOutcome, ProtocolError> {
        match self {
            Self::Value { nodes, edges, root, value } => {
                let terminal = Terminal::Value(value.to_term_id()?);
                let graph = build_graph(nodes, edges, &root, terminal)?;
                Ok(CheckOutcome::Evaluated { graph, annotations: Vec::new() })
            }
            Self::Stuck { nodes, edges, root, stuck, bad, reason } => {
                let stuck = stuck.or(bad).ok_or(ProtocolError::MissingStuckTerm)?;
                let term = stuck.to_term_id()?;
                let terminal = Terminal::Stuck { term: term.clone(), reason: reason.clone() };
                let graph = build_graph(nodes, edges, &root, terminal)?;

                let span = graph.terms().iter().find(|t| t.id() == &term).and_then(Term::span);
                let annotations = match span {
                    Some(span) => vec![Annotation::stuck(span, reason)],
                    None => {
                        warn!(stuck = %term, "stuck term has no source span; no annotation");
                        Vec::new()
                    }
                };
                Ok(CheckOutcome::Evaluated { graph, annotations })
            }
            Self::Timeout { root } => {
                let input = match root {
                    Some(serde_json::Value::String(text)) => text,
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                Ok(CheckOutcome::TimedOut { input })
            }
            Self::ParseError { error } => {
                let annotation = Annotation::parse_error(&error);
                Ok(CheckOutcome::ParseError { annotation, message: error })
            }
        }
    }
}

fn build_graph(
    nodes: Vec<WireNode>,
    edges: Vec<WireEdge>,
    root: &WireId,
    terminal: Terminal,
) -> Result<ReductionGraph, ProtocolError> {
    let terms = nodes
        .into_iter()
        .map(|node| -> Result<Term, IdError> {
            Ok(Term::new(node.id.to_term_id()?, node.label, node.span.map(Into::into)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let edges = edges
        .into_iter()
        .map(|edge| -> Result<StepEdge, IdError> {
            Ok(StepEdge::new(edge.from.to_term_id()?, edge.to.to_term_id()?, edge.label))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReductionGraph::new(terms, edges, root.to_term_id()?, terminal)?)
}

/// The response parsed but does not describe a usable graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    InvalidId(IdError),
    Graph(GraphError),
    MissingStuckTerm,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "invalid term id: {err}"),
            Self::Graph(err) => write!(f, "inconsistent reduction graph: {err}"),
            Self::MissingStuckTerm => f.write_str("stuck response does not name the stuck term"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            Self::Graph(err) => Some(err),
            Self::MissingStuckTerm => None,
        }
    }
}

impl From<IdError> for ProtocolError {
    fn from(err: IdError) -> Self {
        Self::InvalidId(err)
    }
}

impl From<GraphError> for ProtocolError {
    fn from(err: GraphError) -> Self {
        Self::Graph(err)
    }
}
