// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{SourcePos, SourceRange, SourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
        }
    }
}

/// A message attached to a zero-based source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub range: SourceRange,
    pub message: String,
    pub severity: Severity,
}

impl Annotation {
    pub fn error(range: SourceRange, message: impl Into<String>) -> Self {
        Self { range, message: message.into(), severity: Severity::Error }
    }

    /// The stuck term's span, start shifted to zero-based, end column kept exclusive.
    pub fn stuck(span: SourceSpan, reason: impl Into<String>) -> Self {
        Self::error(span.to_range(), reason)
    }

    /// One character at the position named in a parser message ("line N", "column M").
    ///
    /// Falls back to the first character of the program when either number is missing.
    pub fn parse_error(message: &str) -> Self {
        let (line, column) = error_position(message).unwrap_or((1, 1));
        let line = line.saturating_sub(1);
        let range = SourceRange {
            from: SourcePos { line, ch: column.saturating_sub(1) },
            to: SourcePos { line, ch: column.max(1) },
        };
        Self::error(range, "Parse error")
    }
}

fn line_regex() -> Option<&'static Regex> {
    static LINE: OnceLock<Option<Regex>> = OnceLock::new();
    LINE.get_or_init(|| Regex::new(r"line (\d+)").ok()).as_ref()
}

fn column_regex() -> Option<&'static Regex> {
    static COLUMN: OnceLock<Option<Regex>> = OnceLock::new();
    COLUMN.get_or_init(|| Regex::new(r"column (\d+)").ok()).as_ref()
}

/// 1-based `(line, column)` embedded in a parser message.
pub fn error_position(message: &str) -> Option<(u32, u32)> {
    let capture =
        |regex: &Regex| -> Option<u32> { regex.captures(message)?.get(1)?.as_str().parse().ok() };
    Some((capture(line_regex()?)?, capture(column_regex()?)?))
}
