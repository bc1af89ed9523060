// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation actions over the visible graph.
//!
//! Planning is a pure function of the full graph, the visible graph and the selected node; it
//! arms at most one target per action kind. Applying an armed target mutates the visible graph
//! and yields the [`UndoDiff`] that reverses it.

use std::fmt;

use crate::model::{TermId, UndoDiff, VisibleEdge, VisibleError, VisibleGraph};
use crate::query::GraphIndex;

mod plan;

pub use plan::{
    plan_jump_backward, plan_jump_forward, plan_step_backward, plan_step_forward, plan_step_into,
    plan_step_over,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    StepForward,
    StepBackward,
    JumpForward,
    JumpBackward,
    StepInto,
    StepOver,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::StepForward,
        ActionKind::StepBackward,
        ActionKind::JumpForward,
        ActionKind::JumpBackward,
        ActionKind::StepInto,
        ActionKind::StepOver,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StepForward => "step-forward",
            Self::StepBackward => "step-backward",
            Self::JumpForward => "jump-forward",
            Self::JumpBackward => "jump-backward",
            Self::StepInto => "step-into",
            Self::StepOver => "step-over",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::StepForward => "Step forward",
            Self::StepBackward => "Step backward",
            Self::JumpForward => "Jump forward",
            Self::JumpBackward => "Jump backward",
            Self::StepInto => "Step into",
            Self::StepOver => "Step over",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reveal `destination` by splitting the visible edge `replacing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    pub destination: TermId,
    pub replacing: VisibleEdge,
}

/// Reveal a detached `subterm -> value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIntoTarget {
    pub subterm: TermId,
    pub value: TermId,
}

/// The armed targets for one selection. Rebuilt from scratch on every selection change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTargets {
    pub step_forward: Option<ActionTarget>,
    pub step_backward: Option<ActionTarget>,
    pub jump_forward: Option<ActionTarget>,
    pub jump_backward: Option<ActionTarget>,
    pub step_into: Option<StepIntoTarget>,
    pub step_over: Option<ActionTarget>,
}

impl ActionTargets {
    pub fn is_armed(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::StepInto => self.step_into.is_some(),
            _ => self.insertion(kind).is_some(),
        }
    }

    pub fn armed(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|kind| self.is_armed(*kind))
    }

    pub fn is_empty(&self) -> bool {
        self.armed().next().is_none()
    }

    /// The node the action would reveal (the subterm for step-into).
    pub fn destination(&self, kind: ActionKind) -> Option<&TermId> {
        match kind {
            ActionKind::StepInto => self.step_into.as_ref().map(|target| &target.subterm),
            _ => self.insertion(kind).map(|target| &target.destination),
        }
    }

    /// The edge-splitting target for `kind`; always `None` for step-into.
    pub fn insertion(&self, kind: ActionKind) -> Option<&ActionTarget> {
        match kind {
            ActionKind::StepForward => self.step_forward.as_ref(),
            ActionKind::StepBackward => self.step_backward.as_ref(),
            ActionKind::JumpForward => self.jump_forward.as_ref(),
            ActionKind::JumpBackward => self.jump_backward.as_ref(),
            ActionKind::StepOver => self.step_over.as_ref(),
            ActionKind::StepInto => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Computes every action available from `selected`.
///
/// Read-only over both graphs. A selected node that is not visible arms nothing.
pub fn plan_actions(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> ActionTargets {
    if !visible.contains(selected) {
        return ActionTargets::default();
    }

    ActionTargets {
        step_forward: plan_step_forward(index, visible, selected),
        step_backward: plan_step_backward(index, visible, selected),
        jump_forward: plan_jump_forward(index, visible, selected),
        jump_backward: plan_jump_backward(index, visible, selected),
        step_into: plan_step_into(index, visible, selected),
        step_over: plan_step_over(index, visible, selected),
    }
}

/// Applies the armed target for `kind` to `visible`.
pub fn apply_action(
    index: &GraphIndex,
    visible: &mut VisibleGraph,
    targets: &ActionTargets,
    kind: ActionKind,
) -> Result<UndoDiff, NavError> {
    let diff = match kind {
        ActionKind::StepInto => {
            let target = targets.step_into.as_ref().ok_or(NavError::NotArmed { kind })?;
            visible.insert_pair(index, &target.subterm, &target.value)?
        }
        _ => {
            let target = targets.insertion(kind).ok_or(NavError::NotArmed { kind })?;
            visible.insert_node(index, &target.destination, &target.replacing)?
        }
    };
    Ok(diff)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    NothingSelected,
    NotVisible { term_id: TermId },
    NotArmed { kind: ActionKind },
    Visible(VisibleError),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingSelected => f.write_str("no term is selected"),
            Self::NotVisible { term_id } => write!(f, "term {term_id} is not visible"),
            Self::NotArmed { kind } => write!(f, "{kind} is not available from the selection"),
            Self::Visible(err) => write!(f, "visible graph rejected the change: {err}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Visible(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VisibleError> for NavError {
    fn from(err: VisibleError) -> Self {
        Self::Visible(err)
    }
}

#[cfg(test)]
mod tests;
