// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Talking to the remote evaluator.
//!
//! One `/check` round trip turns a program and a function name into a [`CheckOutcome`]: a
//! reduction graph (plus the stuck annotation), a timeout, or a parse error.

use std::sync::OnceLock;

use regex::Regex;

pub mod annotate;
pub mod client;
pub mod demos;
pub mod protocol;
pub mod tracker;

pub use annotate::{Annotation, Severity};
pub use client::{decode_response, CheckClient, CheckError, DEFAULT_SERVER, DEFAULT_TIMEOUT};
pub use demos::{find_demo, DemoProgram, DEMOS};
pub use protocol::{CheckOutcome, CheckRequest, CheckResponse, ProtocolError};
pub use tracker::{CheckTicket, CheckTracker};

pub const FALLBACK_FUNCTION: &str = "main";

/// The name bound by the last top-level `let` in `program`, or `main`.
pub fn infer_function_name(program: &str) -> String {
    static TOP_LEVEL_LET: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = TOP_LEVEL_LET
        .get_or_init(|| Regex::new(r"(?m)^let\s+(?:rec\s+)?([A-Za-z_][A-Za-z0-9_']*)").ok());

    regex
        .as_ref()
        .and_then(|regex| regex.captures_iter(program).filter_map(|caps| caps.get(1)).last())
        .map(|name| name.as_str().to_owned())
        .unwrap_or_else(|| FALLBACK_FUNCTION.to_owned())
}
