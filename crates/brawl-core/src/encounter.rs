//! The encounter: one brawl session's participants, turn counter, and hazard set.
//!
//! Participants are stored in a `BTreeMap` so every sweep over them (status
//! tick-down, hazard saves) runs in id order. Registration order is kept
//! separately for the end-of-encounter tally.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::catalog::EnvironmentalEvent;
use crate::error::{BrawlError, Result};
use crate::participant::{Participant, ParticipantId, ParticipantSheet};

/// Identifier of one brawl session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EncounterId(u64);

impl EncounterId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brawl#{}", self.0)
    }
}

/// State of one running brawl.
#[derive(Debug, Clone)]
pub struct Encounter {
    id: EncounterId,
    participants: BTreeMap<ParticipantId, Participant>,
    order: Vec<ParticipantId>,
    turn: u32,
    hazards: Vec<&'static EnvironmentalEvent>,
}

impl Encounter {
    /// Registers every sheet as a fresh participant.
    ///
    /// # Errors
    ///
    /// [`BrawlError::InsufficientParticipants`] for fewer than two sheets,
    /// [`BrawlError::InvalidArgument`] for a repeated participant id.
    pub fn new(
        id: EncounterId,
        sheets: Vec<ParticipantSheet>,
        default_slots: u8,
        hazards: Vec<&'static EnvironmentalEvent>,
    ) -> Result<Self> {
        if sheets.len() < 2 {
            return Err(BrawlError::InsufficientParticipants(sheets.len()));
        }

        let mut participants = BTreeMap::new();
        let mut order = Vec::with_capacity(sheets.len());
        for sheet in sheets {
            let pid = sheet.id();
            if participants.contains_key(&pid) {
                return Err(BrawlError::InvalidArgument(format!(
                    "participant {pid} registered twice"
                )));
            }
            participants.insert(pid, Participant::from_sheet(sheet, default_slots));
            order.push(pid);
        }

        Ok(Self {
            id,
            participants,
            order,
            turn: 0,
            hazards,
        })
    }

    /// Encounter id.
    #[must_use]
    pub const fn id(&self) -> EncounterId {
        self.id
    }

    /// Turn boundaries crossed so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Hazards this encounter can draw from.
    #[must_use]
    pub fn hazards(&self) -> &[&'static EnvironmentalEvent] {
        &self.hazards
    }

    /// Looks up a participant.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// Participants in registration order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.order.iter().filter_map(|id| self.participants.get(id))
    }

    /// Participant ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.keys().copied()
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the encounter has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub(crate) fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant> {
        self.participants
            .get_mut(&id)
            .ok_or(BrawlError::UnknownParticipant(id))
    }

    pub(crate) fn participants_mut(&mut self) -> impl Iterator<Item = &mut Participant> {
        self.participants.values_mut()
    }

    pub(crate) fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::sheet;

    #[test]
    fn needs_two_participants() {
        let err = Encounter::new(EncounterId::new(1), vec![sheet(1, "Fighter", 10)], 3, Vec::new())
            .unwrap_err();
        assert_eq!(err, BrawlError::InsufficientParticipants(1));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Encounter::new(
            EncounterId::new(1),
            vec![sheet(4, "Fighter", 10), sheet(4, "Bard", 12)],
            3,
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BrawlError::InvalidArgument(_)));
    }

    #[test]
    fn registration_order_is_kept() {
        let encounter = Encounter::new(
            EncounterId::new(1),
            vec![sheet(9, "Fighter", 10), sheet(2, "Bard", 12), sheet(5, "Monk", 13)],
            3,
            Vec::new(),
        )
        .unwrap();

        let registered: Vec<_> = encounter.participants().map(Participant::id).collect();
        let sorted: Vec<_> = encounter.ids().collect();
        assert_eq!(registered, vec![ParticipantId::new(9), ParticipantId::new(2), ParticipantId::new(5)]);
        assert_eq!(sorted, vec![ParticipantId::new(2), ParticipantId::new(5), ParticipantId::new(9)]);
        assert_eq!(encounter.len(), 3);
        assert!(!encounter.is_empty());
    }

    #[test]
    fn unknown_participant_errors() {
        let mut encounter = Encounter::new(
            EncounterId::new(1),
            vec![sheet(1, "Fighter", 10), sheet(2, "Bard", 12)],
            3,
            Vec::new(),
        )
        .unwrap();
        assert_eq!(
            encounter.participant_mut(ParticipantId::new(3)).unwrap_err(),
            BrawlError::UnknownParticipant(ParticipantId::new(3))
        );
    }
}
