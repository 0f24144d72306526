//! Encounter lifecycle controller.
//!
//! [`Brawl`] is the only entry point a host turn engine talks to. It owns
//! the running [`Encounter`], the dice, and the journal, and is the single
//! writer for every participant record.
//!
//! ```text
//!            start()                 end()
//! Inactive ──────────► Active ──────────► Concluding ──► Inactive
//!                        │  ▲
//!     on_turn_advance()  │  │  perform_action(), activate_hazard()
//!                        └──┘
//! ```
//!
//! Active-only operations fail with [`BrawlError::NoActiveEncounter`] while
//! inactive; `start` while active fails with [`BrawlError::AlreadyActive`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{self, EnvironmentalEvent, Move, Prop, MOVES};
use crate::config::BrawlConfig;
use crate::dice::{Dice, SeededDice};
use crate::encounter::{Encounter, EncounterId};
use crate::error::{BrawlError, ConfigError, Result};
use crate::journal::{BrawlEvent, Journal, JournalEntry};
use crate::participant::{Participant, ParticipantId, ParticipantSheet};
use crate::resolver::{Outcome, ResolutionEngine};
use crate::scheduler::{self, HazardReport};
use crate::status::StatusKind;

/// Where the controller is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// No brawl running.
    #[default]
    Inactive,
    /// A brawl is running.
    Active,
    /// Tallying a finished brawl.
    Concluding,
}

/// A status effect that ran out at a turn boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Expiry {
    /// Whose effect.
    pub participant: ParticipantId,
    /// Which effect.
    pub kind: StatusKind,
}

/// What happened at one turn boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// The turn just entered.
    pub turn: u32,
    /// Effects that expired, in participant-id order.
    pub expired: Vec<Expiry>,
    /// Narrative event, when the turn landed on the cadence.
    pub event: Option<&'static EnvironmentalEvent>,
}

/// A prop still clutched by someone who went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trophy {
    /// The knocked-out holder.
    pub from: ParticipantId,
    /// The prop.
    pub prop: Prop,
}

/// Final standings of a brawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// The finished encounter.
    pub encounter: EncounterId,
    /// Turn boundaries crossed.
    pub turns: u32,
    /// Still standing, in registration order.
    pub conscious: Vec<ParticipantId>,
    /// On the floor, in registration order.
    pub knocked_out: Vec<ParticipantId>,
    /// Props left on the floor with the knocked out.
    pub trophies: Vec<Trophy>,
}

impl Tally {
    /// Whether the brawl ended with exactly one participant standing.
    #[must_use]
    pub fn has_winner(&self) -> bool {
        self.conscious.len() == 1
    }
}

/// The brawl engine.
#[derive(Debug)]
pub struct Brawl<D: Dice = SeededDice> {
    config: BrawlConfig,
    hazards: Vec<&'static EnvironmentalEvent>,
    dice: D,
    engine: ResolutionEngine,
    lifecycle: Lifecycle,
    encounter: Option<Encounter>,
    next_encounter: u64,
    journal: Journal,
}

impl Brawl<SeededDice> {
    /// A controller with seeded dice; the seed comes from the config (0 if unset).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config names an unknown hazard.
    pub fn seeded(config: BrawlConfig) -> std::result::Result<Self, ConfigError> {
        let dice = SeededDice::new(config.seed.unwrap_or_default());
        Self::new(config, dice)
    }
}

impl<D: Dice> Brawl<D> {
    /// A controller rolling with `dice`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config names an unknown hazard.
    pub fn new(config: BrawlConfig, dice: D) -> std::result::Result<Self, ConfigError> {
        let hazards = config.hazard_set()?;
        Ok(Self {
            config,
            hazards,
            dice,
            engine: ResolutionEngine::new(),
            lifecycle: Lifecycle::Inactive,
            encounter: None,
            next_encounter: 1,
            journal: Journal::new(),
        })
    }

    /// Swaps in a custom resolution engine.
    #[must_use]
    pub fn with_engine(mut self, engine: ResolutionEngine) -> Self {
        self.engine = engine;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts a brawl between `sheets`.
    ///
    /// Journal entries the host never drained from the previous brawl are
    /// discarded; the journal only ever holds the current brawl's history.
    ///
    /// # Errors
    ///
    /// [`BrawlError::AlreadyActive`] while a brawl runs,
    /// [`BrawlError::InsufficientParticipants`] for fewer than two sheets,
    /// [`BrawlError::InvalidArgument`] for repeated participant ids.
    pub fn start(&mut self, sheets: Vec<ParticipantSheet>) -> Result<EncounterId> {
        if self.lifecycle != Lifecycle::Inactive {
            warn!(lifecycle = ?self.lifecycle, "start rejected");
            return Err(BrawlError::AlreadyActive);
        }

        let id = EncounterId::new(self.next_encounter);
        let encounter = Encounter::new(
            id,
            sheets,
            self.config.default_move_slots,
            self.hazards.clone(),
        )?;
        self.next_encounter += 1;

        let participants = encounter.participants().map(Participant::id).collect();
        info!(encounter = %id, participants = encounter.len(), "brawl started");
        let stale = self.journal.len();
        if stale > 0 {
            debug!(stale, "discarding undrained entries from the previous brawl");
            self.journal.clear();
        }
        self.journal.record(
            0,
            BrawlEvent::EncounterStarted {
                encounter: id,
                participants,
            },
        );
        self.encounter = Some(encounter);
        self.lifecycle = Lifecycle::Active;
        Ok(id)
    }

    /// Crosses a turn boundary: ticks status effects down, restores
    /// reactions, and maybe draws a narrative event.
    ///
    /// # Errors
    ///
    /// [`BrawlError::NoActiveEncounter`] while inactive.
    pub fn on_turn_advance(&mut self) -> Result<TurnReport> {
        let encounter = self.encounter.as_mut().ok_or(BrawlError::NoActiveEncounter)?;
        let turn = encounter.advance_turn();
        self.journal.record(turn, BrawlEvent::TurnAdvanced { turn });

        let mut expired = Vec::new();
        for participant in encounter.participants_mut() {
            participant.restore_reaction();
            for kind in participant.tick_all() {
                debug!(participant = %participant.id(), %kind, "status expired");
                expired.push(Expiry {
                    participant: participant.id(),
                    kind,
                });
            }
        }
        for expiry in &expired {
            self.journal.record(
                turn,
                BrawlEvent::StatusExpired {
                    participant: expiry.participant,
                    kind: expiry.kind,
                },
            );
        }

        let event = scheduler::maybe_trigger(turn, self.config.event_cadence, &mut self.dice);
        if let Some(event) = event {
            info!(encounter = %encounter.id(), turn, event = event.key, "environmental event");
            self.journal.record(turn, BrawlEvent::Environmental { event });
        }

        Ok(TurnReport {
            turn,
            expired,
            event,
        })
    }

    /// Resolves `key` for `actor` against `targets`.
    ///
    /// # Errors
    ///
    /// [`BrawlError::NoActiveEncounter`] while inactive,
    /// [`BrawlError::UnknownMove`] for a key not in the catalog, and any
    /// validation error from the resolution engine. A rejected action
    /// changes nothing.
    pub fn perform_action(&mut self, actor: ParticipantId, key: &str, targets: &[ParticipantId]) -> Result<Outcome> {
        let encounter = self.encounter.as_mut().ok_or(BrawlError::NoActiveEncounter)?;
        let mv = catalog::find(key).ok_or_else(|| BrawlError::UnknownMove(key.to_string()))?;

        let outcome = self
            .engine
            .resolve(encounter, &mut self.dice, &self.config, mv, actor, targets)
            .inspect_err(|err| warn!(actor = %actor, key, %err, "action rejected"))?;

        let turn = encounter.turn();
        self.journal.record(turn, BrawlEvent::ActionResolved(outcome.clone()));
        for knocked in outcome.knockouts() {
            self.journal.record(
                turn,
                BrawlEvent::KnockedOut {
                    participant: knocked,
                    by: Some(actor),
                },
            );
        }
        if let Some(report) = &outcome.hazard {
            Self::record_hazard(&mut self.journal, turn, report);
        }
        Ok(outcome)
    }

    /// Sets off a hazard from the configured set.
    ///
    /// # Errors
    ///
    /// [`BrawlError::NoActiveEncounter`] while inactive.
    pub fn activate_hazard(&mut self) -> Result<HazardReport> {
        let encounter = self.encounter.as_mut().ok_or(BrawlError::NoActiveEncounter)?;
        let report = scheduler::activate_hazard(encounter, &mut self.dice)?;
        Self::record_hazard(&mut self.journal, encounter.turn(), &report);
        Ok(report)
    }

    /// Ends the brawl and returns the tally. All per-encounter state is dropped.
    ///
    /// # Errors
    ///
    /// [`BrawlError::NoActiveEncounter`] while inactive.
    pub fn end(&mut self) -> Result<Tally> {
        let mut encounter = self.encounter.take().ok_or(BrawlError::NoActiveEncounter)?;
        self.lifecycle = Lifecycle::Concluding;

        let mut tally = Tally {
            encounter: encounter.id(),
            turns: encounter.turn(),
            conscious: Vec::new(),
            knocked_out: Vec::new(),
            trophies: Vec::new(),
        };
        for participant in encounter.participants() {
            if participant.is_knocked_out() {
                tally.knocked_out.push(participant.id());
                if let Some(prop) = participant.ledger().prop() {
                    tally.trophies.push(Trophy {
                        from: participant.id(),
                        prop: *prop,
                    });
                }
            } else {
                tally.conscious.push(participant.id());
            }
        }
        for participant in encounter.participants_mut() {
            participant.clear();
        }

        info!(
            encounter = %tally.encounter,
            turns = tally.turns,
            conscious = tally.conscious.len(),
            knocked_out = tally.knocked_out.len(),
            "brawl ended"
        );
        self.journal
            .record(tally.turns, BrawlEvent::EncounterEnded(tally.clone()));
        self.lifecycle = Lifecycle::Inactive;
        Ok(tally)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Moves `participant` could attempt right now, in catalog order.
    ///
    /// # Errors
    ///
    /// [`BrawlError::NoActiveEncounter`] while inactive,
    /// [`BrawlError::UnknownParticipant`] for an unregistered id.
    pub fn available_moves(&self, participant: ParticipantId) -> Result<Vec<&'static Move>> {
        let encounter = self.encounter.as_ref().ok_or(BrawlError::NoActiveEncounter)?;
        let record = encounter
            .participant(participant)
            .ok_or(BrawlError::UnknownParticipant(participant))?;
        Ok(MOVES
            .iter()
            .filter(|mv| ResolutionEngine::check_usable(record, mv).is_ok())
            .collect())
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether a brawl is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// The running encounter.
    #[must_use]
    pub const fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// A participant of the running encounter.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.encounter.as_ref()?.participant(id)
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BrawlConfig {
        &self.config
    }

    /// Drains the narration journal.
    pub fn take_events(&mut self) -> Vec<JournalEntry> {
        self.journal.take_events()
    }

    /// The journal, undrained.
    #[must_use]
    pub const fn journal(&self) -> &Journal {
        &self.journal
    }

    #[cfg(test)]
    pub(crate) fn encounter_mut(&mut self) -> Option<&mut Encounter> {
        self.encounter.as_mut()
    }

    fn record_hazard(journal: &mut Journal, turn: u32, report: &HazardReport) {
        journal.record(turn, BrawlEvent::HazardResolved(report.clone()));
        for knocked in report.knockouts() {
            journal.record(
                turn,
                BrawlEvent::KnockedOut {
                    participant: knocked,
                    by: None,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::props::COMMON_PROPS;
    use crate::dice::ScriptedDice;
    use crate::resolver::ResolverTable;
    use crate::status::StatusEffect;
    use crate::tests::helpers::sheet;

    fn pid(id: u64) -> ParticipantId {
        ParticipantId::new(id)
    }

    fn brawl(rolls: &[u8]) -> Brawl<ScriptedDice> {
        let config = BrawlConfig {
            event_cadence: 0,
            ..BrawlConfig::default()
        };
        Brawl::new(config, ScriptedDice::new(rolls.iter().copied())).unwrap()
    }

    fn pair() -> Vec<ParticipantSheet> {
        vec![sheet(1, "Fighter", 12), sheet(2, "Rogue", 12)]
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn inactive_operations_fail() {
            let mut brawl = brawl(&[10]);
            assert_eq!(brawl.lifecycle(), Lifecycle::Inactive);
            assert_eq!(brawl.on_turn_advance().unwrap_err(), BrawlError::NoActiveEncounter);
            assert_eq!(
                brawl.perform_action(pid(1), "unarmed_strike", &[pid(2)]).unwrap_err(),
                BrawlError::NoActiveEncounter
            );
            assert_eq!(brawl.activate_hazard().unwrap_err(), BrawlError::NoActiveEncounter);
            assert_eq!(brawl.end().unwrap_err(), BrawlError::NoActiveEncounter);
            assert_eq!(brawl.available_moves(pid(1)).unwrap_err(), BrawlError::NoActiveEncounter);
        }

        #[test]
        fn start_twice_fails() {
            let mut brawl = brawl(&[10]);
            brawl.start(pair()).unwrap();
            assert_eq!(brawl.start(pair()).unwrap_err(), BrawlError::AlreadyActive);
            assert!(brawl.is_active());
        }

        #[test]
        fn lone_participant_cannot_brawl() {
            let mut brawl = brawl(&[10]);
            let err = brawl.start(vec![sheet(1, "Fighter", 12)]).unwrap_err();
            assert_eq!(err, BrawlError::InsufficientParticipants(1));
            assert_eq!(brawl.lifecycle(), Lifecycle::Inactive);
        }

        #[test]
        fn encounters_get_fresh_ids() {
            let mut brawl = brawl(&[10]);
            let first = brawl.start(pair()).unwrap();
            brawl.end().unwrap();
            let second = brawl.start(pair()).unwrap();
            assert_ne!(first, second);
            assert_eq!(brawl.participant(pid(1)).unwrap().ledger().moves_used(), 0);
        }

        #[test]
        fn new_brawl_starts_with_a_fresh_journal() {
            let mut brawl = brawl(&[15]);
            brawl.start(pair()).unwrap();
            for _ in 0..50 {
                let _ = brawl.perform_action(pid(1), "unarmed_strike", &[pid(2)]);
            }
            brawl.end().unwrap();
            assert!(brawl.journal().len() > 2);

            brawl.start(pair()).unwrap();
            let entries = brawl.take_events();
            assert_eq!(entries.len(), 1);
            assert!(matches!(entries[0].event, BrawlEvent::EncounterStarted { .. }));
            // sequence numbers keep counting across brawls
            assert!(entries[0].sequence > 2);
        }

        #[test]
        fn unknown_hazard_in_config_is_rejected() {
            let config = BrawlConfig {
                hazards: vec!["avalanche".into()],
                ..BrawlConfig::default()
            };
            let err = Brawl::new(config, ScriptedDice::default()).unwrap_err();
            assert!(matches!(err, ConfigError::UnknownHazard(_)));
        }
    }

    mod turn_tests {
        use super::*;

        #[test]
        fn turn_advance_expires_effects_and_restores_reactions() {
            let mut brawl = brawl(&[10]);
            brawl.start(pair()).unwrap();
            brawl.perform_action(pid(1), "duck_and_weave", &[]).unwrap();
            assert!(!brawl.participant(pid(1)).unwrap().ledger().reaction_available());

            let report = brawl.on_turn_advance().unwrap();
            assert_eq!(report.turn, 1);
            assert_eq!(
                report.expired,
                vec![Expiry {
                    participant: pid(1),
                    kind: StatusKind::Weaving
                }]
            );
            assert!(brawl.participant(pid(1)).unwrap().ledger().reaction_available());
        }

        #[test]
        fn narrative_event_on_cadence() {
            let config = BrawlConfig {
                event_cadence: 2,
                ..BrawlConfig::default()
            };
            let mut brawl = Brawl::new(config, ScriptedDice::default().with_picks([1])).unwrap();
            brawl.start(pair()).unwrap();

            assert!(brawl.on_turn_advance().unwrap().event.is_none());
            let event = brawl.on_turn_advance().unwrap().event.unwrap();
            assert_eq!(event.key, catalog::events::NARRATIVE_EVENTS[1].key);
        }

        #[test]
        fn knockout_outlasts_turns() {
            let mut brawl = brawl(&[10]);
            brawl.start(pair()).unwrap();
            brawl
                .encounter_mut()
                .unwrap()
                .participant_mut(pid(2))
                .unwrap()
                .apply_wounds(6)
                .unwrap();
            for _ in 0..5 {
                brawl.on_turn_advance().unwrap();
            }
            let rogue = brawl.participant(pid(2)).unwrap();
            assert!(rogue.statuses().contains(StatusKind::Incapacitated));
            assert_eq!(
                brawl.perform_action(pid(2), "unarmed_strike", &[pid(1)]).unwrap_err(),
                BrawlError::CannotAct(pid(2))
            );
        }
    }

    mod action_tests {
        use super::*;

        #[test]
        fn unknown_move_rejected() {
            let mut brawl = brawl(&[10]);
            brawl.start(pair()).unwrap();
            assert_eq!(
                brawl.perform_action(pid(1), "fireball", &[pid(2)]).unwrap_err(),
                BrawlError::UnknownMove("fireball".into())
            );
        }

        #[test]
        fn baseline_survives_an_empty_resolver_table() {
            let mut brawl = brawl(&[15]).with_engine(ResolutionEngine::with_table(ResolverTable::new()));
            brawl.start(pair()).unwrap();

            let outcome = brawl.perform_action(pid(1), "unarmed_strike", &[pid(2)]).unwrap();
            assert!(outcome.success);
            assert_eq!(brawl.participant(pid(2)).unwrap().wound_level(), 1);
            assert!(brawl
                .available_moves(pid(1))
                .unwrap()
                .iter()
                .any(|m| m.key == catalog::BASELINE_KEY));
        }

        #[test]
        fn knockout_is_journaled_with_attacker() {
            let mut brawl = brawl(&[20]);
            brawl.start(pair()).unwrap();
            brawl
                .encounter_mut()
                .unwrap()
                .participant_mut(pid(2))
                .unwrap()
                .apply_wounds(4)
                .unwrap();
            brawl.take_events();

            let outcome = brawl.perform_action(pid(1), "unarmed_strike", &[pid(2)]).unwrap();
            assert_eq!(outcome.knockouts().collect::<Vec<_>>(), vec![pid(2)]);

            let events: Vec<_> = brawl.take_events().into_iter().map(|e| e.event).collect();
            assert!(matches!(events[0], BrawlEvent::ActionResolved(_)));
            assert_eq!(
                events[1],
                BrawlEvent::KnockedOut {
                    participant: pid(2),
                    by: Some(pid(1))
                }
            );
        }

        #[test]
        fn host_hazard_is_journaled() {
            let mut brawl = brawl(&[1]);
            brawl.start(pair()).unwrap();
            brawl.take_events();

            let report = brawl.activate_hazard().unwrap();
            let events = brawl.take_events();
            assert_eq!(events[0].event, BrawlEvent::HazardResolved(report));
        }

        #[test]
        fn available_moves_follow_role_and_ledger() {
            let mut brawl = brawl(&[10]);
            brawl.start(vec![
                sheet(1, "Fighter", 12).with_move_slots(0),
                sheet(2, "Wizard", 12),
            ])
            .unwrap();

            let keys = |b: &Brawl<ScriptedDice>, id| -> Vec<&'static str> {
                b.available_moves(pid(id))
                    .unwrap()
                    .iter()
                    .map(|m| m.key.as_str())
                    .collect()
            };

            let fighter = keys(&brawl, 1);
            assert!(fighter.contains(&"unarmed_strike"));
            assert!(fighter.contains(&"duck_and_weave"));
            assert!(!fighter.contains(&"haymaker"));
            assert!(!fighter.contains(&"knockout_blow"));

            let wizard = keys(&brawl, 2);
            assert!(wizard.contains(&"arcane_jolt"));
            assert!(wizard.contains(&"mischief_hand"));
            assert!(!wizard.contains(&"prop_smash"));
            assert!(!wizard.contains(&"chaos_surge"));
        }
    }

    mod tally_tests {
        use super::*;

        #[test]
        fn tally_partitions_and_collects_trophies() {
            let mut brawl = brawl(&[10]);
            brawl
                .start(vec![sheet(3, "Bard", 12), sheet(1, "Fighter", 12), sheet(2, "Rogue", 12)])
                .unwrap();
            {
                let encounter = brawl.encounter_mut().unwrap();
                let rogue = encounter.participant_mut(pid(2)).unwrap();
                rogue.set_prop(COMMON_PROPS[0]);
                rogue.apply_wounds(6).unwrap();
                encounter
                    .participant_mut(pid(3))
                    .unwrap()
                    .attach(StatusEffect::for_turns(StatusKind::Prone, 3));
            }
            brawl.on_turn_advance().unwrap();

            let tally = brawl.end().unwrap();
            assert_eq!(tally.turns, 1);
            assert_eq!(tally.conscious, vec![pid(3), pid(1)]);
            assert_eq!(tally.knocked_out, vec![pid(2)]);
            assert_eq!(
                tally.trophies,
                vec![Trophy {
                    from: pid(2),
                    prop: COMMON_PROPS[0]
                }]
            );
            assert!(!tally.has_winner());
            assert_eq!(brawl.lifecycle(), Lifecycle::Inactive);
            assert!(brawl.encounter().is_none());
        }

        #[test]
        fn end_is_journaled() {
            let mut brawl = brawl(&[10]);
            brawl.start(pair()).unwrap();
            let tally = brawl.end().unwrap();
            let last = brawl.take_events().pop().unwrap();
            assert_eq!(last.event, BrawlEvent::EncounterEnded(tally));
        }
    }
}
