//! Factories for participants and encounters.

use crate::catalog::events::HAZARD_EVENTS;
use crate::encounter::{Encounter, EncounterId};
use crate::participant::{ParticipantId, ParticipantSheet, StatBlock};

/// A sheet with no attribute modifiers.
pub(crate) fn sheet(id: u64, class: &str, defense: i32) -> ParticipantSheet {
    stats_sheet(id, class, StatBlock::new(defense))
}

/// A sheet with explicit stats.
pub(crate) fn stats_sheet(id: u64, class: &str, stats: StatBlock) -> ParticipantSheet {
    ParticipantSheet::new(ParticipantId::new(id), format!("{class} #{id}"), stats).with_class(class)
}

/// A sheet whose ace move is unlocked.
pub(crate) fn ace_sheet(id: u64, class: &str, defense: i32) -> ParticipantSheet {
    sheet(id, class, defense).with_ace_unlocked()
}

/// Encounter #1 with three slots each and every hazard enabled.
pub(crate) fn encounter_with(sheets: Vec<ParticipantSheet>) -> Encounter {
    Encounter::new(EncounterId::new(1), sheets, 3, HAZARD_EVENTS.iter().collect())
        .expect("test encounter should be valid")
}
