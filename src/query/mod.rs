// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the full reduction graph.
//!
//! The index answers typed adjacency questions; the path helpers walk the step relation on top
//! of it. Both power the navigation planner and the renderer.

pub mod index;
pub mod path;

pub use index::GraphIndex;
pub use path::{crunch, find_path, next_immediate_subterm, path_nodes};
