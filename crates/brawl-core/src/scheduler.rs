//! Event scheduler: narrative flavor on a turn cadence, hazards on demand.
//!
//! [`maybe_trigger`] only selects; it never touches the encounter.
//! [`activate_hazard`] rolls saves and lands their effects through the same
//! path moves use, so immunity and KO handling match.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::events::{HAZARD_EVENTS, NARRATIVE_EVENTS};
use crate::catalog::EnvironmentalEvent;
use crate::dice::Dice;
use crate::encounter::Encounter;
use crate::error::{BrawlError, Result};
use crate::participant::ParticipantId;
use crate::resolver::{apply_effects, roll_contest, ContestRoll, EffectReport};
use crate::status::EffectFlags;

/// One participant's save against a hazard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveResult {
    /// Who rolled.
    pub participant: ParticipantId,
    /// The save roll.
    pub roll: ContestRoll,
    /// Whether it met the DC.
    pub passed: bool,
    /// What landed as a result.
    #[serde(flatten)]
    pub report: EffectReport,
}

/// What a hazard did to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HazardReport {
    /// The hazard drawn.
    pub event: &'static EnvironmentalEvent,
    /// Saves in participant-id order; empty for announcement-only hazards.
    pub saves: Vec<SaveResult>,
}

impl HazardReport {
    /// Participants the hazard knocked out.
    pub fn knockouts(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.saves
            .iter()
            .filter(|s| s.report.knocked_out)
            .map(|s| s.participant)
    }
}

/// Picks a narrative event when `turn` lands on the cadence.
///
/// A cadence of 0 disables narrative events.
pub fn maybe_trigger(turn: u32, cadence: u32, dice: &mut dyn Dice) -> Option<&'static EnvironmentalEvent> {
    if cadence == 0 || turn % cadence != 0 {
        return None;
    }
    let event = NARRATIVE_EVENTS.get(dice.pick(NARRATIVE_EVENTS.len()))?;
    debug!(turn, event = event.key, "narrative event");
    Some(event)
}

/// Draws a hazard from the encounter's set and resolves its save.
///
/// Every participant not yet knocked out rolls d20 + best modifier from the
/// save pool; the pass or fail effects land on them. An encounter built with
/// an empty hazard set draws from the whole catalog.
///
/// # Errors
///
/// Propagates effect-application errors; none occur for catalog hazards.
pub fn activate_hazard(encounter: &mut Encounter, dice: &mut dyn Dice) -> Result<HazardReport> {
    let pool: Vec<&'static EnvironmentalEvent> = if encounter.hazards().is_empty() {
        HAZARD_EVENTS.iter().collect()
    } else {
        encounter.hazards().to_vec()
    };
    let event = *pool
        .get(dice.pick(pool.len()))
        .ok_or_else(|| BrawlError::InvalidArgument("hazard pool is empty".into()))?;

    let mut saves = Vec::new();
    if let Some(save) = &event.save {
        let eligible: Vec<ParticipantId> = encounter
            .ids()
            .filter(|id| encounter.participant(*id).is_some_and(|p| !p.is_knocked_out()))
            .collect();

        for id in eligible {
            let participant = encounter.participant_mut(id)?;
            let modifier = participant.best_modifier(save.pool);
            let guard = participant.statuses().flags();
            let roll = roll_contest(&mut *dice, EffectFlags::empty(), modifier, 0);
            let passed = roll.meets(save.dc);
            let effects = if passed { save.on_pass } else { save.on_fail };
            let applied = apply_effects(&mut *encounter, None, id, guard, effects, 1, 0)?;
            saves.push(SaveResult {
                participant: id,
                roll,
                passed,
                report: applied.report,
            });
        }
    }

    info!(
        encounter = %encounter.id(),
        hazard = event.key,
        saves = saves.len(),
        failed = saves.iter().filter(|s| !s.passed).count(),
        "hazard activated"
    );
    Ok(HazardReport { event, saves })
}
