//! Contest rolling and the single effect-application path.
//!
//! Moves and hazards both land their effects through [`apply_effects`], so
//! immunity, wound clamping, and KO handling behave the same whichever way
//! a participant gets hurt.

use tracing::{info, trace};

use crate::catalog::Effect;
use crate::dice::Dice;
use crate::encounter::Encounter;
use crate::error::Result;
use crate::participant::ParticipantId;
use crate::status::{EffectFlags, StatusEffect, StatusKind};

use super::outcome::{ContestRoll, EffectReport};

/// Rolls d20 + `modifier` + `bonus`, honoring advantage flags.
///
/// Advantage and disadvantage cancel each other out.
pub(crate) fn roll_contest(dice: &mut dyn Dice, flags: EffectFlags, modifier: i32, bonus: i32) -> ContestRoll {
    let advantage = flags.contains(EffectFlags::ATTACK_ADVANTAGE);
    let disadvantage = flags.contains(EffectFlags::ATTACK_DISADVANTAGE);

    let first = dice.d20();
    let (natural, discarded) = match (advantage, disadvantage) {
        (true, false) => {
            let second = dice.d20();
            (first.max(second), Some(first.min(second)))
        }
        (false, true) => {
            let second = dice.d20();
            (first.min(second), Some(first.max(second)))
        }
        _ => (first, None),
    };

    let roll = ContestRoll {
        natural,
        discarded,
        modifier,
        bonus,
        total: i32::from(natural) + modifier + bonus,
    };
    trace!(natural, ?discarded, modifier, bonus, total = roll.total, "contest roll");
    roll
}

/// Lands `effects` on `target` (and `SelfStatus` effects on `actor`).
///
/// `guard` is the target's flag set captured when the resolution began;
/// effects attached during this resolution do not change what is blocked.
/// Every `Wound` entry is multiplied by `multiplier`; `extra_wounds` is
/// added once, on the first wound entry.
pub(crate) fn apply_effects(
    encounter: &mut Encounter,
    actor: Option<ParticipantId>,
    target: ParticipantId,
    guard: EffectFlags,
    effects: &[Effect],
    multiplier: u8,
    extra_wounds: u8,
) -> Result<Applied> {
    let mut applied = Applied::default();
    let blocks_wounds = guard.contains(EffectFlags::SUPPRESSES_WOUNDS);
    let blocks_status = guard.contains(EffectFlags::SUPPRESSES_STATUS);
    let mut extra = extra_wounds;

    for effect in effects {
        match *effect {
            Effect::Wound(amount) => {
                if blocks_wounds {
                    applied.report.suppressed = true;
                    continue;
                }
                let total = amount.saturating_mul(multiplier).saturating_add(extra);
                extra = 0;
                let change = encounter
                    .participant_mut(target)?
                    .apply_wounds(i32::from(total))?;
                applied.report.wounds_applied += change.applied();
                if change.knocked_out {
                    applied.report.knocked_out = true;
                    info!(participant = %target, "knocked out");
                }
            }
            Effect::Status { kind, turns } => {
                if blocks_status {
                    applied.report.suppressed = true;
                    continue;
                }
                encounter
                    .participant_mut(target)?
                    .attach(StatusEffect::for_turns(kind, turns));
                applied.report.effects_applied.push(kind);
            }
            Effect::SelfStatus { kind, turns } => {
                if let Some(actor) = actor {
                    encounter
                        .participant_mut(actor)?
                        .attach(StatusEffect::for_turns(kind, turns));
                    applied.self_effects.push(kind);
                }
            }
        }
    }

    Ok(applied)
}

/// What [`apply_effects`] did.
#[derive(Debug, Default)]
pub(crate) struct Applied {
    pub(crate) report: EffectReport,
    pub(crate) self_effects: Vec<StatusKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::tests::helpers::{encounter_with, sheet};

    mod roll_tests {
        use super::*;

        #[test]
        fn plain_roll_uses_one_die() {
            let mut dice = ScriptedDice::new([14, 3]);
            let roll = roll_contest(&mut dice, EffectFlags::empty(), 2, 1);
            assert_eq!(roll.natural, 14);
            assert_eq!(roll.total, 17);
            assert_eq!(roll.discarded, None);
            assert_eq!(dice.rolls_made(), 1);
        }

        #[test]
        fn advantage_keeps_higher() {
            let mut dice = ScriptedDice::new([4, 16]);
            let roll = roll_contest(&mut dice, EffectFlags::ATTACK_ADVANTAGE, 0, 0);
            assert_eq!(roll.natural, 16);
            assert_eq!(roll.discarded, Some(4));
        }

        #[test]
        fn disadvantage_keeps_lower() {
            let mut dice = ScriptedDice::new([20, 5]);
            let roll = roll_contest(&mut dice, EffectFlags::ATTACK_DISADVANTAGE, 0, 0);
            assert_eq!(roll.natural, 5);
            assert!(!roll.is_critical());
        }

        #[test]
        fn advantage_and_disadvantage_cancel() {
            let mut dice = ScriptedDice::new([7, 19]);
            let flags = EffectFlags::ATTACK_ADVANTAGE | EffectFlags::ATTACK_DISADVANTAGE;
            let roll = roll_contest(&mut dice, flags, 0, 0);
            assert_eq!(roll.natural, 7);
            assert_eq!(dice.rolls_made(), 1);
        }
    }

    mod apply_tests {
        use super::*;

        #[test]
        fn wounds_multiply_and_extra_lands_once() {
            let mut encounter = encounter_with(vec![sheet(1, "Fighter", 10), sheet(2, "Rogue", 10)]);
            let target = ParticipantId::new(2);
            let applied = apply_effects(
                &mut encounter,
                None,
                target,
                EffectFlags::empty(),
                &[Effect::Wound(1), Effect::Wound(1)],
                2,
                1,
            )
            .unwrap();
            // (1*2 + 1) + (1*2)
            assert_eq!(applied.report.wounds_applied, 5);
        }

        #[test]
        fn wound_immunity_lets_statuses_through() {
            let mut encounter = encounter_with(vec![sheet(1, "Fighter", 10), sheet(2, "Rogue", 10)]);
            let applied = apply_effects(
                &mut encounter,
                None,
                ParticipantId::new(2),
                EffectFlags::SUPPRESSES_WOUNDS,
                &[Effect::Wound(2), Effect::Status { kind: StatusKind::Prone, turns: 1 }],
                1,
                0,
            )
            .unwrap();
            assert_eq!(applied.report.wounds_applied, 0);
            assert_eq!(applied.report.effects_applied, vec![StatusKind::Prone]);
            assert!(applied.report.suppressed);
        }

        #[test]
        fn full_immunity_blocks_everything() {
            let mut encounter = encounter_with(vec![sheet(1, "Fighter", 10), sheet(2, "Rogue", 10)]);
            let guard = EffectFlags::SUPPRESSES_WOUNDS | EffectFlags::SUPPRESSES_STATUS;
            let applied = apply_effects(
                &mut encounter,
                None,
                ParticipantId::new(2),
                guard,
                &[Effect::Wound(2), Effect::Status { kind: StatusKind::Dazed, turns: 1 }],
                1,
                0,
            )
            .unwrap();
            assert_eq!(applied.report, EffectReport { suppressed: true, ..EffectReport::default() });
            let target = encounter.participant(ParticipantId::new(2)).unwrap();
            assert_eq!(target.wound_level(), 0);
            assert!(target.statuses().is_empty());
        }

        #[test]
        fn self_status_lands_on_actor() {
            let mut encounter = encounter_with(vec![sheet(1, "Fighter", 10), sheet(2, "Rogue", 10)]);
            let actor = ParticipantId::new(1);
            let applied = apply_effects(
                &mut encounter,
                Some(actor),
                actor,
                EffectFlags::empty(),
                &[Effect::SelfStatus { kind: StatusKind::Weaving, turns: 1 }],
                1,
                0,
            )
            .unwrap();
            assert_eq!(applied.self_effects, vec![StatusKind::Weaving]);
            assert!(encounter.participant(actor).unwrap().statuses().contains(StatusKind::Weaving));
        }

        #[test]
        fn knockout_is_reported() {
            let mut encounter = encounter_with(vec![sheet(1, "Fighter", 10), sheet(2, "Rogue", 10)]);
            let applied = apply_effects(
                &mut encounter,
                None,
                ParticipantId::new(2),
                EffectFlags::empty(),
                &[Effect::Wound(3)],
                2,
                0,
            )
            .unwrap();
            assert!(applied.report.knocked_out);
            assert_eq!(applied.report.wounds_applied, 6);
        }
    }
}
