// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::TermId;

/// Recognized edge tags. Labels on the wire are space-separated tag words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeTag {
    /// `from` is a compound term and `to` one of its immediate subterms.
    SubTerm,
    /// `from` reduces to `to` in one small step.
    StepsTo,
    /// A step entering a function call.
    CallStep,
    /// A step returning from a function call.
    ReturnStep,
}

impl EdgeTag {
    pub const ALL: [EdgeTag; 4] =
        [EdgeTag::SubTerm, EdgeTag::StepsTo, EdgeTag::CallStep, EdgeTag::ReturnStep];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubTerm => "SubTerm",
            Self::StepsTo => "StepsTo",
            Self::CallStep => "CallStep",
            Self::ReturnStep => "ReturnStep",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == word)
    }

    fn bit(self) -> u8 {
        match self {
            Self::SubTerm => 1 << 0,
            Self::StepsTo => 1 << 1,
            Self::CallStep => 1 << 2,
            Self::ReturnStep => 1 << 3,
        }
    }
}

impl fmt::Display for EdgeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`EdgeTag`]s carried by one edge, decided once at ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeTags(u8);

impl EdgeTags {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Parses a space-separated label. Unrecognized words carry no tag.
    pub fn from_label(label: &str) -> Self {
        label
            .split_whitespace()
            .filter_map(EdgeTag::parse)
            .fold(Self::empty(), Self::with)
    }

    pub fn with(self, tag: EdgeTag) -> Self {
        Self(self.0 | tag.bit())
    }

    pub fn contains(self, tag: EdgeTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = EdgeTag> {
        EdgeTag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<EdgeTag> for EdgeTags {
    fn from_iter<I: IntoIterator<Item = EdgeTag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Directed edge of the full reduction graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEdge {
    from: TermId,
    to: TermId,
    tags: EdgeTags,
    label: String,
}

impl StepEdge {
    pub fn new(from: TermId, to: TermId, label: impl Into<String>) -> Self {
        let label = label.into();
        let tags = EdgeTags::from_label(&label);
        Self { from, to, tags, label }
    }

    pub fn from_id(&self) -> &TermId {
        &self.from
    }

    pub fn to_id(&self) -> &TermId {
        &self.to
    }

    pub fn tags(&self) -> EdgeTags {
        self.tags
    }

    pub fn has(&self, tag: EdgeTag) -> bool {
        self.tags.contains(tag)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
