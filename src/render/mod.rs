// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of a debug session.
//!
//! The chain view lays the visible graph out top to bottom (no graph layout: the visible graph is
//! always a set of simple chains). The source view marks the selected span and annotations.

pub mod chain;
pub mod source;
mod text;

pub use chain::{render_chain, render_chain_annotated, ChainRender, ChainRenderOptions};
pub use source::{line_messages, source_segments, SourceMark, SourceSegment};
pub(crate) use text::single_line;
