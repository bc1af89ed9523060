// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A check yields one immutable [`ReductionGraph`]; a [`DebugSession`] wraps it together with the
//! [`VisibleGraph`] the user expands step by step.

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod session;
pub mod term;
pub mod visible;

pub use edge::{EdgeTag, EdgeTags, StepEdge};
pub use graph::{GraphError, ReductionGraph, Terminal};
pub use ids::{CheckId, Id, IdError, TermId};
pub use session::DebugSession;
pub use term::{SourcePos, SourceRange, SourceSpan, Term};
pub use visible::{EdgeWeight, UndoDiff, VisibleChain, VisibleEdge, VisibleError, VisibleGraph};
