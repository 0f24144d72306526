//! Resolution engine: turns a requested move into an [`Outcome`].
//!
//! # Pipeline
//!
//! 1. **Validate**: move open to the actor, actor able to act, target count
//!    matches arity, targets registered, prop in hand where needed, cost
//!    affordable. A failure here leaves every participant untouched.
//! 2. **Snapshot**: capture defense and flags of the actor and each target.
//!    Effects attached during the resolution do not change what the rest
//!    of the resolution sees.
//! 3. **Debit**: spend the slot, reaction, or finisher. Misses are not refunded.
//! 4. **Dispatch**: run the resolver registered for the move's key.
//! 5. **Consume**: effects flagged `CONSUMED_ON_ACTION` on the actor are
//!    removed if the move rolled.
//!
//! # Strategy table
//!
//! [`ResolverTable`] maps each move key to a [`ResolverFn`]. It is filled
//! once from the catalog by resolution kind; hosts may register overrides.

mod effects;
pub mod outcome;
mod strategies;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::catalog::{ActionCategory, Effect, Move, MoveCost, MoveKey, ResolutionKind, BASELINE_KEY, MOVES};
use crate::config::BrawlConfig;
use crate::dice::Dice;
use crate::encounter::Encounter;
use crate::error::{BrawlError, Result};
use crate::participant::{Participant, ParticipantId};
use crate::status::EffectFlags;

pub(crate) use effects::{apply_effects, roll_contest};
pub use outcome::{ContestRoll, EffectReport, Outcome, TargetResult};

// =============================================================================
// Resolution context
// =============================================================================

/// Defense and flags of one participant, frozen at the start of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Combat-facing defense.
    pub defense: i32,
    /// Active flags.
    pub flags: EffectFlags,
}

impl Snapshot {
    fn of(participant: &Participant) -> Self {
        Self {
            defense: participant.defense(),
            flags: participant.statuses().flags(),
        }
    }
}

/// Everything a resolver needs while running one move.
pub struct ResolutionContext<'a> {
    pub(crate) encounter: &'a mut Encounter,
    pub(crate) dice: &'a mut dyn Dice,
    pub(crate) config: &'a BrawlConfig,
    pub(crate) mv: &'static Move,
    pub(crate) actor: ParticipantId,
    pub(crate) targets: &'a [ParticipantId],
    pub(crate) snapshots: BTreeMap<ParticipantId, Snapshot>,
    pub(crate) outcome: Outcome,
}

impl ResolutionContext<'_> {
    /// The move being resolved.
    #[must_use]
    pub fn move_entry(&self) -> &'static Move {
        self.mv
    }

    /// The acting participant.
    #[must_use]
    pub const fn actor(&self) -> ParticipantId {
        self.actor
    }

    /// Targets as listed by the caller, duplicates included.
    #[must_use]
    pub const fn targets(&self) -> &[ParticipantId] {
        self.targets
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BrawlConfig {
        self.config
    }

    /// Live encounter state. Use [`snapshot`](Self::snapshot) for the values
    /// the resolution started from.
    #[must_use]
    pub fn encounter(&self) -> &Encounter {
        &*self.encounter
    }

    /// The injected dice.
    pub fn dice_mut(&mut self) -> &mut dyn Dice {
        &mut *self.dice
    }

    /// The outcome under construction.
    pub fn outcome_mut(&mut self) -> &mut Outcome {
        &mut self.outcome
    }

    /// Rolls d20 + the actor's best modifier from the move's pool + `bonus`,
    /// honoring the actor's snapshot advantage flags.
    ///
    /// # Errors
    ///
    /// `UnknownParticipant` if the actor has left the encounter.
    pub fn roll(&mut self, bonus: i32) -> Result<ContestRoll> {
        let modifier = self
            .encounter
            .participant(self.actor)
            .ok_or(BrawlError::UnknownParticipant(self.actor))?
            .best_modifier(self.mv.pool);
        let flags = self.snapshot(self.actor).flags;
        let roll = roll_contest(&mut *self.dice, flags, modifier, bonus);
        self.outcome.roll = Some(roll);
        self.outcome.critical = roll.is_critical();
        Ok(roll)
    }

    /// Lands `effects` on `target` through the shared effect path, guarded by
    /// the target's snapshot flags. `SelfStatus` effects land on the actor.
    ///
    /// # Errors
    ///
    /// `UnknownParticipant` for an id not in the encounter.
    pub fn apply(&mut self, target: ParticipantId, effects: &[Effect], multiplier: u8) -> Result<EffectReport> {
        let guard = self.snapshot(target).flags;
        let applied = apply_effects(
            &mut *self.encounter,
            Some(self.actor),
            target,
            guard,
            effects,
            multiplier,
            0,
        )?;
        self.outcome.self_effects.extend(applied.self_effects);
        Ok(applied.report)
    }

    /// Frozen view of `id`; participants never snapshotted read as default.
    #[must_use]
    pub fn snapshot(&self, id: ParticipantId) -> Snapshot {
        self.snapshots.get(&id).copied().unwrap_or(Snapshot {
            defense: 0,
            flags: EffectFlags::empty(),
        })
    }
}

impl fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("move", &self.mv.key)
            .field("actor", &self.actor)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

/// A resolver: runs one move against a prepared context.
pub type ResolverFn = fn(&mut ResolutionContext<'_>) -> Result<()>;

// =============================================================================
// Strategy table
// =============================================================================

/// Move key → resolver map.
#[derive(Clone, Default)]
pub struct ResolverTable {
    resolvers: HashMap<MoveKey, ResolverFn>,
}

impl ResolverTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table covering every entry of `moves`, chosen by resolution kind.
    #[must_use]
    pub fn from_catalog(moves: &[Move]) -> Self {
        let mut table = Self::new();
        for mv in moves {
            table.register(mv.key, resolver_for(mv.resolution));
        }
        table
    }

    /// Registers (or replaces) the resolver for `key`.
    pub fn register(&mut self, key: MoveKey, resolver: ResolverFn) {
        self.resolvers.insert(key, resolver);
    }

    /// Resolver for `key`.
    #[must_use]
    pub fn get(&self, key: MoveKey) -> Option<ResolverFn> {
        self.resolvers.get(&key).copied()
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl fmt::Debug for ResolverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverTable")
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .finish()
    }
}

fn resolver_for(kind: ResolutionKind) -> ResolverFn {
    match kind {
        ResolutionKind::Contest => strategies::contest,
        ResolutionKind::SelfBuff => strategies::self_buff,
        ResolutionKind::AcquireProp => strategies::acquire_prop,
        ResolutionKind::WieldProp(_) => strategies::wield_prop,
        ResolutionKind::Hazard => strategies::hazard,
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Validates, debits, and dispatches moves.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    table: ResolverTable,
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionEngine {
    /// An engine covering the built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: ResolverTable::from_catalog(MOVES),
        }
    }

    /// An engine using a custom table.
    ///
    /// The baseline strike stays resolvable whatever the table holds: a
    /// table without an entry for [`BASELINE_KEY`] gets the contest resolver.
    #[must_use]
    pub fn with_table(mut table: ResolverTable) -> Self {
        if table.get(BASELINE_KEY).is_none() {
            table.register(BASELINE_KEY, strategies::contest);
        }
        Self { table }
    }

    /// The strategy table.
    #[must_use]
    pub fn table(&self) -> &ResolverTable {
        &self.table
    }

    /// Checks whether `participant` could use `mv` right now, targets aside.
    ///
    /// # Errors
    ///
    /// `MoveUnavailable`, `CannotAct`, `NoPropHeld`, `PropModeUnsupported`,
    /// `SlotsExhausted`, `AlreadyUsed`, or `ReactionSpent`.
    pub fn check_usable(participant: &Participant, mv: &Move) -> Result<()> {
        let id = participant.id();
        if !mv.is_open_to(participant) {
            return Err(BrawlError::MoveUnavailable {
                key: mv.key,
                participant: id,
            });
        }

        let forbidding = if mv.category == ActionCategory::Reaction {
            EffectFlags::CANNOT_REACT
        } else {
            EffectFlags::CANNOT_ACT
        };
        if participant.has_flag(forbidding) {
            return Err(BrawlError::CannotAct(id));
        }

        if let ResolutionKind::WieldProp(mode) = mv.resolution {
            let prop = participant.ledger().prop().ok_or(BrawlError::NoPropHeld(id))?;
            if !prop.supports(mode) {
                return Err(BrawlError::PropModeUnsupported {
                    key: mv.key,
                    prop: prop.name,
                });
            }
        }

        let ledger = participant.ledger();
        match mv.cost() {
            MoveCost::Free => Ok(()),
            MoveCost::Slot if ledger.moves_remaining() == 0 => Err(BrawlError::SlotsExhausted(id)),
            MoveCost::Finisher if ledger.finisher_used() => Err(BrawlError::AlreadyUsed(id)),
            MoveCost::Reaction if !ledger.reaction_available() => Err(BrawlError::ReactionSpent(id)),
            MoveCost::Slot | MoveCost::Finisher | MoveCost::Reaction => Ok(()),
        }
    }

    /// Full validation of one request.
    ///
    /// # Errors
    ///
    /// Anything [`check_usable`](Self::check_usable) returns, plus
    /// `UnknownParticipant` and `InvalidTarget`.
    pub fn validate(
        &self,
        encounter: &Encounter,
        mv: &Move,
        actor: ParticipantId,
        targets: &[ParticipantId],
    ) -> Result<()> {
        let participant = encounter
            .participant(actor)
            .ok_or(BrawlError::UnknownParticipant(actor))?;
        Self::check_usable(participant, mv)?;

        if !mv.arity.accepts(targets.len()) {
            return Err(BrawlError::InvalidTarget {
                key: mv.key,
                reason: format!("{:?} does not accept {} target(s)", mv.arity, targets.len()),
            });
        }
        if let Some(missing) = targets.iter().find(|t| encounter.participant(**t).is_none()) {
            return Err(BrawlError::UnknownParticipant(*missing));
        }
        Ok(())
    }

    /// Resolves one move.
    ///
    /// # Errors
    ///
    /// Any validation error, or `UnknownMove` if no resolver is registered.
    /// Nothing is debited when an error is returned.
    pub fn resolve(
        &self,
        encounter: &mut Encounter,
        dice: &mut dyn Dice,
        config: &BrawlConfig,
        mv: &'static Move,
        actor: ParticipantId,
        targets: &[ParticipantId],
    ) -> Result<Outcome> {
        self.validate(encounter, mv, actor, targets)?;
        let resolver = self
            .table
            .get(mv.key)
            .ok_or_else(|| BrawlError::UnknownMove(mv.key.to_string()))?;

        let mut snapshots = BTreeMap::new();
        for id in std::iter::once(&actor).chain(targets) {
            if let Some(p) = encounter.participant(*id) {
                snapshots.insert(*id, Snapshot::of(p));
            }
        }

        let cost = mv.cost();
        let participant = encounter.participant_mut(actor)?;
        match cost {
            MoveCost::Free => {}
            MoveCost::Slot => participant.consume_move_slot()?,
            MoveCost::Finisher => participant.consume_finisher()?,
            MoveCost::Reaction => participant.consume_reaction()?,
        }

        let mut ctx = ResolutionContext {
            encounter: &mut *encounter,
            dice: &mut *dice,
            config,
            mv,
            actor,
            targets,
            snapshots,
            outcome: Outcome::new(actor, mv.key, cost),
        };
        resolver(&mut ctx)?;

        let mut outcome = ctx.outcome;
        if outcome.roll.is_some() {
            outcome.consumed_effects = encounter.participant_mut(actor)?.consume_action_effects();
        }

        debug!(
            actor = %actor,
            key = %mv.key,
            success = outcome.success,
            critical = outcome.critical,
            wounds = outcome.total_wounds(),
            "action resolved"
        );
        Ok(outcome)
    }
}
