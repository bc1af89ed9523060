// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Identifies one issued check. Tickets from the same tracker are strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckTicket(u64);

impl CheckTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Generation counter for outstanding checks.
///
/// Only the most recently issued ticket may settle; anything older arriving later is stale.
#[derive(Debug, Clone, Default)]
pub struct CheckTracker {
    latest: u64,
    settled: bool,
}

impl CheckTracker {
    pub fn issue(&mut self) -> CheckTicket {
        self.latest += 1;
        self.settled = false;
        CheckTicket(self.latest)
    }

    pub fn is_current(&self, ticket: CheckTicket) -> bool {
        ticket.0 == self.latest
    }

    pub fn in_flight(&self) -> bool {
        self.latest > 0 && !self.settled
    }

    /// Marks `ticket` as answered. Returns `false` (and changes nothing) for stale or repeated
    /// tickets.
    pub fn settle(&mut self, ticket: CheckTicket) -> bool {
        if !self.is_current(ticket) || self.settled {
            return false;
        }
        self.settled = true;
        true
    }
}
