// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nanostep: terminal stepper for nanoml reduction graphs.
//!
//! A remote evaluator answers `/check` with the full reduction graph of one function call. This
//! crate indexes that graph once, shows a small visible subgraph (initially just the root and the
//! final term) and grows it with six navigation actions, each undoable.

pub mod check;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod tui;
pub mod ui;
