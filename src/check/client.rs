// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use super::protocol::{CheckRequest, CheckResponse};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8091";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the evaluator's `/check` endpoint.
#[derive(Debug, Clone)]
pub struct CheckClient {
    client: reqwest::Client,
    base_url: String,
}

impl CheckClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CheckError::Transport(err.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/check", self.base_url)
    }

    /// Posts the program as a form and decodes the JSON response.
    pub async fn check(&self, request: &CheckRequest) -> Result<CheckResponse, CheckError> {
        let url = self.endpoint();
        debug!(%url, function = %request.function, bytes = request.prog.len(), "posting check");

        let resp = self.client.post(&url).form(request).send().await.map_err(CheckError::from)?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "check request failed");
            return Err(CheckError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(CheckError::from)?;
        decode_response(&body)
    }
}

/// Decodes a `/check` response body (also used for saved responses).
pub fn decode_response(body: &str) -> Result<CheckResponse, CheckError> {
    serde_json::from_str(body).map_err(|err| CheckError::Decode(err.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    Transport(String),
    TimedOut,
    Status(u16),
    Decode(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::TimedOut => f.write_str("request timed out"),
            Self::Status(code) => write!(f, "evaluator answered HTTP {code}"),
            Self::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else {
            Self::Transport(err.to_string())
        }
    }
}
