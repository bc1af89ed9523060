// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// One rule per action. Each rule reads the selected node's sole outgoing (or incoming) visible
// edge, expands it into its full step path and decides which hidden node to reveal.

use super::{ActionTarget, StepIntoTarget};
use crate::model::{EdgeTag, TermId, VisibleGraph};
use crate::query::{crunch, find_path, next_immediate_subterm, path_nodes, GraphIndex};

/// The selected node's own successor.
pub fn plan_step_forward(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<ActionTarget> {
    let next = index.next_step(selected)?;
    if visible.contains(next) {
        return None;
    }
    let replacing = visible.sole_outgoing(selected)?;
    Some(ActionTarget { destination: next.clone(), replacing: replacing.clone() })
}

/// The predecessor of the selected node along its incoming collapsed edge.
pub fn plan_step_backward(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<ActionTarget> {
    let replacing = visible.sole_incoming(selected)?;
    let path = find_path(index, &replacing.from, &replacing.to);
    if path.len() <= 2 {
        return None;
    }
    let last = path.last()?;
    Some(ActionTarget { destination: last.from_id().clone(), replacing: replacing.clone() })
}

/// The next call frame boundary after the selected node.
///
/// A return as the very first hop is taken directly; otherwise the scan stops at the first call
/// (landing before it) or return (landing after it), and gives up once it meets a visible node.
pub fn plan_jump_forward(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<ActionTarget> {
    let replacing = visible.sole_outgoing(selected)?;
    let path = find_path(index, &replacing.from, &replacing.to);
    if path.len() <= 1 {
        return None;
    }

    let destination = if path[0].has(EdgeTag::ReturnStep) {
        path[0].to_id()
    } else {
        let mut found = None;
        for hop in &path[1..] {
            if visible.contains(hop.to_id()) {
                return None;
            }
            if hop.has(EdgeTag::CallStep) {
                found = Some(hop.from_id());
                break;
            }
            if hop.has(EdgeTag::ReturnStep) {
                found = Some(hop.to_id());
                break;
            }
        }
        found?
    };

    Some(ActionTarget { destination: destination.clone(), replacing: replacing.clone() })
}

/// The entry of the nearest call before the selected node.
pub fn plan_jump_backward(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<ActionTarget> {
    let replacing = visible.sole_incoming(selected)?;
    let path = find_path(index, &replacing.from, &replacing.to);
    let (_, earlier) = path.split_last()?;

    for hop in earlier.iter().rev() {
        if visible.contains(hop.from_id()) {
            return None;
        }
        if hop.has(EdgeTag::CallStep) {
            return Some(ActionTarget {
                destination: hop.from_id().clone(),
                replacing: replacing.clone(),
            });
        }
    }
    None
}

/// The first subterm that enters a call, paired with the value it evaluates to.
///
/// With several such subterms the first in source order wins.
pub fn plan_step_into(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<StepIntoTarget> {
    let subterm = index.subterms(selected).find(|sub| {
        index
            .outgoing(sub, EdgeTag::StepsTo)
            .any(|edge| edge.has(EdgeTag::CallStep))
    })?;
    let value = crunch(index, subterm);
    if value == subterm || visible.contains(subterm) || visible.contains(value) {
        return None;
    }
    Some(StepIntoTarget { subterm: subterm.clone(), value: value.clone() })
}

/// The first state after the subterm being reduced has finished evaluating.
///
/// Only the first reducing subterm is considered when several sit at a call.
pub fn plan_step_over(
    index: &GraphIndex,
    visible: &VisibleGraph,
    selected: &TermId,
) -> Option<ActionTarget> {
    let replacing = visible.sole_outgoing(selected)?;
    let path = find_path(index, &replacing.from, &replacing.to);
    let nodes = path_nodes(&path);

    let subterm = next_immediate_subterm(index, &replacing.from, &replacing.to)?;
    let reduced = crunch(index, subterm);
    let destination = nodes.into_iter().find(|node| index.parents(reduced).any(|p| &p == node))?;
    if visible.contains(destination) {
        return None;
    }
    Some(ActionTarget { destination: destination.clone(), replacing: replacing.clone() })
}
