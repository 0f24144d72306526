//! Narration journal.
//!
//! The controller records a [`BrawlEvent`] for everything a narrator might
//! want to describe. The journal never influences resolution; the host
//! drains it with [`Journal::take_events`], typically once per turn.
//!
//! Entries carry the turn they happened on and a sequence number that is
//! monotonic for the lifetime of the journal, so a host that drains late
//! can still order them.

use serde::Serialize;

use crate::catalog::EnvironmentalEvent;
use crate::controller::Tally;
use crate::encounter::EncounterId;
use crate::participant::ParticipantId;
use crate::resolver::Outcome;
use crate::scheduler::HazardReport;
use crate::status::StatusKind;

/// Something worth narrating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrawlEvent {
    /// A brawl broke out.
    EncounterStarted {
        /// The new encounter.
        encounter: EncounterId,
        /// Who is in it, in registration order.
        participants: Vec<ParticipantId>,
    },
    /// A turn boundary passed.
    TurnAdvanced {
        /// The turn just entered.
        turn: u32,
    },
    /// Someone did something.
    ActionResolved(Outcome),
    /// Someone hit the floor and stayed there.
    KnockedOut {
        /// Who went down.
        participant: ParticipantId,
        /// Who put them there; `None` for hazards.
        by: Option<ParticipantId>,
    },
    /// A status effect ran out.
    StatusExpired {
        /// Whose effect.
        participant: ParticipantId,
        /// Which effect.
        kind: StatusKind,
    },
    /// Flavor from the room.
    Environmental {
        /// The event drawn.
        event: &'static EnvironmentalEvent,
    },
    /// A hazard went off.
    HazardResolved(HazardReport),
    /// The brawl is over.
    EncounterEnded(Tally),
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    /// Monotonic sequence number.
    pub sequence: u64,
    /// Encounter turn when recorded.
    pub turn: u32,
    /// What happened.
    #[serde(flatten)]
    pub event: BrawlEvent,
}

/// Append-only event log, drained by the host.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
    next_sequence: u64,
}

impl Journal {
    /// An empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, turn: u32, event: BrawlEvent) {
        self.entries.push(JournalEntry {
            sequence: self.next_sequence,
            turn,
            event,
        });
        self.next_sequence += 1;
    }

    /// Drains and returns every entry, oldest first.
    pub fn take_events(&mut self) -> Vec<JournalEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Undrained entries.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of undrained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is waiting to be drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards undrained entries. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
