// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless controller state shared by the TUI and the `--print` mode.
//!
//! Holds the program under test, the current [`DebugSession`] and whatever the last check said
//! about the source. Check results are applied here; failures never disturb an existing session.

use tracing::{debug, info, warn};

use crate::check::{
    Annotation, CheckError, CheckOutcome, CheckRequest, CheckResponse, CheckTicket, CheckTracker,
};
use crate::model::DebugSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-line banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// What applying a check result did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckApplied {
    /// A newer check was issued meanwhile; the result was dropped.
    Stale,
    /// A new session replaced the previous one.
    Session,
    TimedOut,
    ParseError,
    Failed,
}

#[derive(Debug)]
pub struct UiState {
    program: String,
    function: String,
    session: Option<DebugSession>,
    annotations: Vec<Annotation>,
    notice: Option<Notice>,
    tracker: CheckTracker,
}

impl UiState {
    pub fn new(program: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            function: function.into(),
            session: None,
            annotations: Vec::new(),
            notice: None,
            tracker: CheckTracker::default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn session(&self) -> Option<&DebugSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DebugSession> {
        self.session.as_mut()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn check_in_flight(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Issues a ticket for a new check of the current program.
    pub fn begin_check(&mut self) -> (CheckTicket, CheckRequest) {
        let ticket = self.tracker.issue();
        self.notice = None;
        debug!(generation = ticket.generation(), function = %self.function, "check issued");
        let request = CheckRequest { prog: self.program.clone(), function: self.function.clone() };
        (ticket, request)
    }

    /// Applies the evaluator's answer for `ticket`.
    pub fn finish_check(
        &mut self,
        ticket: CheckTicket,
        result: Result<CheckResponse, CheckError>,
    ) -> CheckApplied {
        if !self.tracker.settle(ticket) {
            debug!(generation = ticket.generation(), "dropping stale check result");
            return CheckApplied::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => return self.fail(&err.to_string()),
        };
        let result_tag = response.result_tag();
        let outcome = match response.into_outcome() {
            Ok(outcome) => outcome,
            Err(err) => return self.fail(&err.to_string()),
        };

        match outcome {
            CheckOutcome::Evaluated { graph, annotations } => {
                let session = DebugSession::new(graph);
                info!(
                    check_id = %session.check_id(),
                    function = %self.function,
                    result = result_tag,
                    terms = session.index().terms().len(),
                    "check evaluated"
                );
                self.session = Some(session);
                self.annotations = annotations;
                CheckApplied::Session
            }
            CheckOutcome::TimedOut { input } => {
                info!(function = %self.function, input = %input, "check timed out");
                self.notice = Some(Notice::warning(format!("Timed out on input: {input}")));
                CheckApplied::TimedOut
            }
            CheckOutcome::ParseError { annotation, message } => {
                info!(function = %self.function, %message, "check parse error");
                self.annotations = vec![annotation];
                self.notice = Some(Notice::error(format!("Parse error: {message}")));
                CheckApplied::ParseError
            }
        }
    }

    fn fail(&mut self, reason: &str) -> CheckApplied {
        warn!(function = %self.function, %reason, "check failed");
        self.notice = Some(Notice::error(format!("Something went wrong: {reason}")));
        CheckApplied::Failed
    }
}
