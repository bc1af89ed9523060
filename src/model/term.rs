// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::TermId;

/// Source range of a term, as reported by the evaluator.
///
/// Lines and columns are 1-based; the column range is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl SourceSpan {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self { start_line, start_col, end_line, end_col }
    }

    /// Editor range for this span: zero-based start, end column kept as-is.
    pub fn to_range(self) -> SourceRange {
        SourceRange {
            from: SourcePos {
                line: self.start_line.saturating_sub(1),
                ch: self.start_col.saturating_sub(1),
            },
            to: SourcePos { line: self.end_line.saturating_sub(1), ch: self.end_col },
        }
    }
}

/// Zero-based editor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePos {
    pub line: u32,
    pub ch: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub from: SourcePos,
    pub to: SourcePos,
}

impl SourceRange {
    /// Whether the character at `(line, ch)` falls inside the range.
    pub fn contains(&self, line: u32, ch: u32) -> bool {
        let pos = SourcePos { line, ch };
        pos >= self.from && pos < self.to
    }
}

/// A program state in the reduction graph. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    id: TermId,
    label: String,
    span: Option<SourceSpan>,
}

impl Term {
    pub fn new(id: TermId, label: impl Into<String>, span: Option<SourceSpan>) -> Self {
        Self { id, label: label.into(), span }
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    /// Raw label as sent by the evaluator (may contain `<b>` markup for the redex).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// Label with markup tags removed and the basic entities decoded.
    pub fn plain_label(&self) -> String {
        strip_markup(&self.label)
    }
}

pub(crate) fn strip_markup(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_tag = false;
    let mut chars = label.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            // A bare `<` is an operator in program text; only `<x` or `</` opens a tag.
            '<' if !in_tag
                && chars.peek().is_some_and(|next| next.is_ascii_alphabetic() || *next == '/') =>
            {
                in_tag = true
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(ch),
        }
    }

    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
