// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use smol_str::SmolStr;

/// An opaque identifier handed out by the evaluator (terms) or by the client (checks).
///
/// The only enforced rule is non-emptiness; the evaluator is free to use numbers or
/// arbitrary strings, and numbers are normalized to their decimal form at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    pub fn from_number(value: u64) -> Self {
        Self {
            value: SmolStr::new(value.to_string()),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermIdTag {}
pub type TermId = Id<TermIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckIdTag {}
pub type CheckId = Id<CheckIdTag>;

static CHECK_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

impl CheckId {
    /// Mints a fresh id for one successful evaluation; used to correlate log events.
    pub fn generate() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = CHECK_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            value: SmolStr::new(format!("chk-{nanos:x}-{}-{counter}", std::process::id())),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckId, Id, IdError, TermId};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn numeric_ids_match_their_decimal_string() {
        let from_number = TermId::from_number(42);
        let from_str: TermId = "42".parse().expect("term id");
        assert_eq!(from_number, from_str);
        assert_eq!(from_number.as_str(), "42");
    }

    #[test]
    fn generated_check_ids_are_distinct() {
        assert_ne!(CheckId::generate(), CheckId::generate());
    }
}
