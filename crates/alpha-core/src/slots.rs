//! Last-writer-wins guard for research results.
//!
//! Every request takes a ticket for the panel it will fill. Only the newest
//! ticket for a slot may commit, so a slow response can never overwrite the
//! result of a request issued after it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::research::ResearchResult;

/// A UI panel that shows one research result at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Brief,
    Audit,
    IpoScan,
    IpoProspectus,
    TopDown,
    BottomUp,
    Bulletin,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Brief,
        Slot::Audit,
        Slot::IpoScan,
        Slot::IpoProspectus,
        Slot::TopDown,
        Slot::BottomUp,
        Slot::Bulletin,
    ];

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == s)
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Audit => "audit",
            Self::IpoScan => "ipo-scan",
            Self::IpoProspectus => "ipo-prospectus",
            Self::TopDown => "top-down",
            Self::BottomUp => "bottom-up",
            Self::Bulletin => "bulletin",
        }
    }
}

/// Proof that a request was issued for `slot` as its `generation`-th request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTicket {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Committed {
    generation: u64,
    result: ResearchResult,
}

/// Per-session record of issued tickets and committed results.
#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    issued: HashMap<Slot, u64>,
    committed: HashMap<Slot, Committed>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier ticket for the slot.
    pub fn begin(&mut self, slot: Slot) -> RequestTicket {
        let generation = self.issued.entry(slot).or_insert(0);
        *generation += 1;
        RequestTicket {
            slot,
            generation: *generation,
        }
    }

    /// True if no newer ticket has been issued for the ticket's slot.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.issued.get(&ticket.slot).copied() == Some(ticket.generation)
    }

    /// Store `result` if the ticket is still current. Returns whether it was stored.
    pub fn commit(&mut self, ticket: RequestTicket, result: ResearchResult) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                slot = ticket.slot.as_str(),
                generation = ticket.generation,
                "Discarding stale research result"
            );
            return false;
        }

        self.committed.insert(
            ticket.slot,
            Committed {
                generation: ticket.generation,
                result,
            },
        );
        true
    }

    /// Latest committed result for a slot.
    pub fn latest(&self, slot: Slot) -> Option<&ResearchResult> {
        self.committed.get(&slot).map(|c| &c.result)
    }

    /// Generation of the latest committed result for a slot.
    pub fn latest_generation(&self, slot: Slot) -> Option<u64> {
        self.committed.get(&slot).map(|c| c.generation)
    }

    /// Forget committed results and invalidate every outstanding ticket, e.g. on logout.
    pub fn clear(&mut self) {
        self.committed.clear();
        for generation in self.issued.values_mut() {
            *generation += 1;
        }
    }
}
