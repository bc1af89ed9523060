// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::text::{single_line, text_len, truncate_with_ellipsis};
use crate::model::{DebugSession, EdgeWeight, TermId, Terminal, VisibleEdge};
use crate::query::{find_path, GraphIndex};

const SELECTED_MARKER: &str = "▶ ";
const UNSELECTED_MARKER: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainRenderOptions {
    /// Maximum characters per line, marker included; `0` disables truncation.
    pub max_width: usize,
    pub show_ids: bool,
}

/// Rendered chain text plus the line each visible term landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRender {
    pub text: String,
    pub node_rows: BTreeMap<TermId, usize>,
    /// Visible terms in display order (for keyboard navigation).
    pub order: Vec<TermId>,
}

pub fn render_chain(session: &DebugSession) -> String {
    render_chain_annotated(session, ChainRenderOptions::default()).text
}

/// One line per visible term, with a connector line between consecutive terms.
///
/// Single steps draw `│`; collapsed edges draw `┃` with the number of hidden steps. Detached
/// step-into chains follow the root chain, separated by a blank line.
pub fn render_chain_annotated(session: &DebugSession, options: ChainRenderOptions) -> ChainRender {
    let index = session.index();
    let mut lines = Vec::<String>::new();
    let mut node_rows = BTreeMap::new();
    let mut order = Vec::new();

    for (chain_idx, chain) in session.visible().chains().iter().enumerate() {
        if chain_idx > 0 {
            lines.push(String::new());
        }
        for (node_idx, node) in chain.nodes().enumerate() {
            if node_idx > 0 {
                lines.push(connector_line(index, chain.links[node_idx - 1]));
            }
            node_rows.insert(node.clone(), lines.len());
            order.push(node.clone());
            lines.push(node_line(session, node, options));
        }
    }

    ChainRender { text: lines.join("\n"), node_rows, order }
}

fn node_line(session: &DebugSession, node: &TermId, options: ChainRenderOptions) -> String {
    let marker =
        if session.selected() == Some(node) { SELECTED_MARKER } else { UNSELECTED_MARKER };

    let mut label = session
        .index()
        .term(node)
        .map(|term| single_line(&term.plain_label()))
        .unwrap_or_default();
    if options.show_ids {
        label = format!("[{node}] {label}");
    }
    match session.terminal() {
        Terminal::Value(term) if term == node => label.push_str("  ✓"),
        Terminal::Stuck { term, .. } if term == node => label.push_str("  ✗ stuck"),
        _ => {}
    }

    if options.max_width == 0 {
        return format!("{marker}{label}");
    }
    let room = options.max_width.saturating_sub(text_len(marker));
    format!("{marker}{}", truncate_with_ellipsis(&label, room))
}

fn connector_line(index: &GraphIndex, edge: &VisibleEdge) -> String {
    match edge.weight {
        EdgeWeight::Single => format!("{UNSELECTED_MARKER}│"),
        EdgeWeight::Multi => {
            let hops = find_path(index, &edge.from, &edge.to).len();
            if hops == 0 {
                format!("{UNSELECTED_MARKER}┃ …")
            } else {
                format!("{UNSELECTED_MARKER}┃ {hops} steps")
            }
        }
    }
}
