// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, info};

use super::graph::{ReductionGraph, Terminal};
use super::ids::{CheckId, TermId};
use super::term::SourceRange;
use super::visible::{UndoDiff, VisibleGraph};
use crate::ops::{apply_action, plan_actions, ActionKind, ActionTargets, NavError};
use crate::query::GraphIndex;

/// Navigation state for one successful check.
///
/// Created from an evaluator response and replaced wholesale by the next one. Owns the immutable
/// index, the visible graph, the current selection and the targets armed for it.
#[derive(Debug, Clone)]
pub struct DebugSession {
    check_id: CheckId,
    index: GraphIndex,
    visible: VisibleGraph,
    selected: Option<TermId>,
    targets: ActionTargets,
    highlight: Option<SourceRange>,
}

impl DebugSession {
    pub fn new(graph: ReductionGraph) -> Self {
        Self::with_check_id(CheckId::generate(), graph)
    }

    pub fn with_check_id(check_id: CheckId, graph: ReductionGraph) -> Self {
        let index = GraphIndex::new(graph);
        let visible = VisibleGraph::new(&index);
        info!(
            check_id = %check_id,
            terms = index.terms().len(),
            edges = index.edges().len(),
            stuck = index.terminal().is_stuck(),
            "session started"
        );
        Self {
            check_id,
            index,
            visible,
            selected: None,
            targets: ActionTargets::default(),
            highlight: None,
        }
    }

    pub fn check_id(&self) -> &CheckId {
        &self.check_id
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn visible(&self) -> &VisibleGraph {
        &self.visible
    }

    pub fn terminal(&self) -> &Terminal {
        self.index.terminal()
    }

    pub fn selected(&self) -> Option<&TermId> {
        self.selected.as_ref()
    }

    pub fn targets(&self) -> &ActionTargets {
        &self.targets
    }

    /// Zero-based source range of the selected term, if it has a span.
    pub fn highlight(&self) -> Option<SourceRange> {
        self.highlight
    }

    pub fn can_undo(&self) -> bool {
        self.visible.can_undo()
    }

    /// Selects a visible term and arms every action available from it.
    pub fn select(&mut self, id: &TermId) -> Result<&ActionTargets, NavError> {
        self.clear_selection();
        if !self.visible.contains(id) {
            return Err(NavError::NotVisible { term_id: id.clone() });
        }

        self.targets = plan_actions(&self.index, &self.visible, id);
        self.highlight =
            self.index.term(id).and_then(|term| term.span()).map(|span| span.to_range());
        self.selected = Some(id.clone());
        debug!(
            check_id = %self.check_id,
            node = %id,
            armed = ?self.targets.armed().collect::<Vec<_>>(),
            "selected"
        );
        Ok(&self.targets)
    }

    pub fn deselect(&mut self) {
        self.clear_selection();
    }

    /// Applies the armed target for `kind`, then drops the selection.
    pub fn perform(&mut self, kind: ActionKind) -> Result<UndoDiff, NavError> {
        let selected = self.selected.clone().ok_or(NavError::NothingSelected)?;
        let diff = apply_action(&self.index, &mut self.visible, &self.targets, kind)?;
        info!(
            check_id = %self.check_id,
            action = %kind,
            node = %selected,
            revealed = ?diff.nodes_added,
            "navigation"
        );
        self.clear_selection();
        Ok(diff)
    }

    /// Reverses the last action. A no-op on an empty history.
    pub fn undo(&mut self) -> Option<UndoDiff> {
        let diff = self.visible.undo()?;
        info!(check_id = %self.check_id, hidden = ?diff.nodes_added, "undo");
        self.clear_selection();
        Some(diff)
    }

    pub fn reset(&mut self) {
        self.visible.reset();
        self.clear_selection();
        info!(check_id = %self.check_id, "reset");
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.targets.clear();
        self.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::DebugSession;
    use crate::model::fixtures::{call_chain_graph, tid};
    use crate::model::{SourcePos, TermId};
    use crate::ops::{ActionKind, NavError};

    #[test]
    fn select_arms_targets_and_highlights_the_span() {
        let mut session = DebugSession::new(call_chain_graph());
        let targets = session.select(&tid("r")).expect("select");
        assert!(targets.is_armed(ActionKind::StepForward));

        let highlight = session.highlight().expect("root has a span");
        assert_eq!(highlight.from, SourcePos { line: 1, ch: 11 });
        assert_eq!(highlight.to, SourcePos { line: 1, ch: 26 });
        assert_eq!(session.selected(), Some(&tid("r")));
    }

    #[test]
    fn selecting_a_hidden_term_clears_everything() {
        let mut session = DebugSession::new(call_chain_graph());
        session.select(&tid("r")).expect("select");

        let err = session.select(&tid("b")).unwrap_err();
        assert_eq!(err, NavError::NotVisible { term_id: tid("b") });
        assert!(session.selected().is_none());
        assert!(session.targets().is_empty());
        assert!(session.highlight().is_none());
    }

    #[test]
    fn perform_requires_a_selection_and_clears_it_afterwards() {
        let mut session = DebugSession::new(call_chain_graph());
        let err = session.perform(ActionKind::StepForward).unwrap_err();
        assert_eq!(err, NavError::NothingSelected);

        session.select(&tid("r")).expect("select");
        session.perform(ActionKind::StepForward).expect("step forward");

        assert!(session.visible().contains(&tid("a")));
        assert!(session.selected().is_none());
        assert!(session.targets().is_empty());
        assert!(session.highlight().is_none());
        assert!(session.can_undo());
    }

    #[test]
    fn disarmed_action_is_rejected() {
        let mut session = DebugSession::new(call_chain_graph());
        session.select(&tid("r")).expect("select");
        let err = session.perform(ActionKind::StepBackward).unwrap_err();
        assert_eq!(err, NavError::NotArmed { kind: ActionKind::StepBackward });
    }

    #[test]
    fn walk_every_action_then_undo_all() {
        let mut session = DebugSession::new(call_chain_graph());
        let initial = session.visible().clone();

        let steps: [(&str, ActionKind); 4] = [
            ("r", ActionKind::StepOver),
            ("r", ActionKind::JumpForward),
            ("a", ActionKind::StepInto),
            ("a", ActionKind::StepForward),
        ];
        for (node, kind) in steps {
            session.select(&TermId::new(node).expect("id")).expect("select");
            session.perform(kind).expect("perform");
        }
        assert_eq!(session.visible().history().len(), 4);

        while session.undo().is_some() {}
        assert_eq!(session.visible(), &initial);
        assert!(session.undo().is_none());
    }

    #[test]
    fn reset_forgets_history() {
        let mut session = DebugSession::new(call_chain_graph());
        session.select(&tid("d")).expect("select");
        session.perform(ActionKind::StepBackward).expect("step backward");

        session.reset();
        assert!(!session.can_undo());
        assert!(!session.visible().contains(&tid("c")));
    }
}
