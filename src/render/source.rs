// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::check::Annotation;
use crate::model::SourceRange;

/// How a run of source characters should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMark {
    Plain,
    /// Inside the selected term's span.
    Highlight,
    /// Inside an error annotation.
    Annotated,
}

/// A maximal run of characters on one line sharing the same mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegment {
    pub text: String,
    pub mark: SourceMark,
}

/// Splits source line `line_no` (zero-based) into marked segments.
///
/// Annotations take precedence over the selection highlight.
pub fn source_segments(
    line_no: u32,
    line: &str,
    highlight: Option<SourceRange>,
    annotations: &[Annotation],
) -> Vec<SourceSegment> {
    let mut segments = Vec::<SourceSegment>::new();
    for (ch_idx, ch) in line.chars().enumerate() {
        let ch_no = u32::try_from(ch_idx).unwrap_or(u32::MAX);
        let mark = if annotations.iter().any(|a| a.range.contains(line_no, ch_no)) {
            SourceMark::Annotated
        } else if highlight.is_some_and(|range| range.contains(line_no, ch_no)) {
            SourceMark::Highlight
        } else {
            SourceMark::Plain
        };

        match segments.last_mut() {
            Some(last) if last.mark == mark => last.text.push(ch),
            _ => segments.push(SourceSegment { text: ch.to_string(), mark }),
        }
    }
    segments
}

/// Annotation messages that start on line `line_no`, for the gutter.
pub fn line_messages(line_no: u32, annotations: &[Annotation]) -> Vec<&str> {
    annotations
        .iter()
        .filter(|annotation| annotation.range.from.line == line_no)
        .map(|annotation| annotation.message.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{line_messages, source_segments, SourceMark, SourceSegment};
    use crate::check::Annotation;
    use crate::model::SourceSpan;

    fn seg(text: &str, mark: SourceMark) -> SourceSegment {
        SourceSegment { text: text.to_owned(), mark }
    }

    #[test]
    fn highlight_splits_the_line() {
        let highlight = Some(SourceSpan::new(2, 12, 2, 14).to_range());
        let segments = source_segments(1, "let main = f 1;;", highlight, &[]);
        assert_eq!(
            segments,
            vec![
                seg("let main = ", SourceMark::Plain),
                seg("f 1", SourceMark::Highlight),
                seg(";;", SourceMark::Plain),
            ]
        );
    }

    #[test]
    fn annotations_win_over_highlight() {
        let annotation = Annotation::stuck(SourceSpan::new(1, 5, 1, 6), "bad");
        let highlight = Some(SourceSpan::new(1, 1, 1, 9).to_range());
        let annotations = std::slice::from_ref(&annotation);
        let segments = source_segments(0, "abcdefghij", highlight, annotations);
        assert_eq!(
            segments,
            vec![
                seg("abcd", SourceMark::Highlight),
                seg("ef", SourceMark::Annotated),
                seg("ghi", SourceMark::Highlight),
                seg("j", SourceMark::Plain),
            ]
        );
        assert_eq!(line_messages(0, annotations), vec!["bad"]);
    }

    #[test]
    fn multi_line_span_covers_whole_middle_lines() {
        let highlight = Some(SourceSpan::new(1, 3, 3, 2).to_range());
        let segments = source_segments(1, "xyz", highlight, &[]);
        assert_eq!(segments, vec![seg("xyz", SourceMark::Highlight)]);
    }
}
