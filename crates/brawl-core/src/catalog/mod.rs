//! Static catalogs: moves, props, and environmental events.
//!
//! The move catalog is the single source of truth for how a move resolves:
//! - which attribute pool the contest uses (the actor's best modifier wins)
//! - how many targets it takes
//! - what it costs (derived from family and category, never chosen at runtime)
//! - which resolver runs it and what effects land on success
//!
//! # Families
//!
//! - [`MoveFamily::Baseline`]: the free unarmed strike, always available
//! - [`MoveFamily::Generic`]: open to everyone
//! - [`MoveFamily::Magic`]: needs arcane aptitude
//! - [`MoveFamily::Role`]: one ordinary move per role
//! - [`MoveFamily::Ace`]: one once-per-encounter move per role, unlocked at a milestone

pub mod events;
mod moves;
pub mod props;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::participant::{Attribute, Participant, Role};
use crate::status::StatusKind;

pub use events::{EnvironmentalEvent, EventCategory, SaveRequirement};
pub use moves::MOVES;
pub use props::{Prop, PropMode, PropTier};

/// Key of the baseline attack every participant always has.
pub const BASELINE_KEY: MoveKey = MoveKey::new("unarmed_strike");

/// Catalog key of a move.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveKey(&'static str);

impl MoveKey {
    /// Wraps a static key.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    /// The key text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveKey({})", self.0)
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for MoveKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Which group a move belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveFamily {
    /// The free fallback attack.
    Baseline,
    /// Available to everyone.
    Generic,
    /// Needs arcane aptitude.
    Magic,
    /// Ordinary move of one role.
    Role(Role),
    /// Once-per-encounter finisher of one role.
    Ace(Role),
}

/// How many targets a move takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetArity {
    /// No targets; affects the actor or the room.
    None,
    /// Exactly one target.
    Single,
    /// Between one and `max` targets; duplicates allowed.
    Many {
        /// Largest accepted target list.
        max: u8,
    },
}

impl TargetArity {
    /// Whether `count` targets satisfy this arity.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::None => count == 0,
            Self::Single => count == 1,
            Self::Many { max } => count >= 1 && count <= max as usize,
        }
    }
}

/// Action economy category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// A full action.
    Action,
    /// A quick bonus action.
    Bonus,
    /// Taken in response to someone else; never spends a slot.
    Reaction,
}

/// What using a move debits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCost {
    /// Nothing.
    Free,
    /// The round's reaction.
    Reaction,
    /// One move-slot.
    Slot,
    /// The once-per-encounter finisher.
    Finisher,
}

/// Which resolver runs the move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// d20 + best modifier against each target's defense.
    Contest,
    /// No roll; effects land on the actor.
    SelfBuff,
    /// Roll to snatch a prop off the nearest table.
    AcquireProp,
    /// Spend the held prop in the given way.
    WieldProp(PropMode),
    /// Set off a random hazard.
    Hazard,
}

/// One declared outcome of a successful resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Inflict wounds on the target (doubled on a critical).
    Wound(u8),
    /// Attach a status effect to the target.
    Status {
        /// Condition to attach.
        kind: StatusKind,
        /// Duration in turns.
        turns: u32,
    },
    /// Attach a status effect to the actor.
    SelfStatus {
        /// Condition to attach.
        kind: StatusKind,
        /// Duration in turns.
        turns: u32,
    },
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    /// Lookup key.
    pub key: MoveKey,
    /// Display name.
    pub name: &'static str,
    /// Access group.
    pub family: MoveFamily,
    /// Attributes the contest may draw on.
    pub pool: &'static [Attribute],
    /// Target count.
    pub arity: TargetArity,
    /// Action economy category.
    pub category: ActionCategory,
    /// Resolver selection.
    pub resolution: ResolutionKind,
    /// Effects applied on success, in order.
    pub effects: &'static [Effect],
    /// Narration text.
    pub description: &'static str,
}

impl Move {
    /// What using this move debits.
    #[must_use]
    pub const fn cost(&self) -> MoveCost {
        match (self.family, self.category) {
            (MoveFamily::Baseline, _) => MoveCost::Free,
            (MoveFamily::Ace(_), _) => MoveCost::Finisher,
            (_, ActionCategory::Reaction) => MoveCost::Reaction,
            _ => MoveCost::Slot,
        }
    }

    /// Whether the participant's role, aptitude, and milestones open this move.
    #[must_use]
    pub fn is_open_to(&self, participant: &Participant) -> bool {
        match self.family {
            MoveFamily::Baseline | MoveFamily::Generic => true,
            MoveFamily::Magic => participant.is_arcane(),
            MoveFamily::Role(role) => participant.role() == role,
            MoveFamily::Ace(role) => participant.role() == role && participant.ace_unlocked(),
        }
    }

    /// Total wound output declared by the move.
    #[must_use]
    pub fn base_wounds(&self) -> u8 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::Wound(n) => *n,
                _ => 0,
            })
            .sum()
    }
}

/// Looks up a move by key.
#[must_use]
pub fn find(key: &str) -> Option<&'static Move> {
    MOVES.iter().find(|m| m.key.as_str() == key)
}

/// The baseline unarmed strike.
#[must_use]
pub fn baseline() -> &'static Move {
    // MOVES[0] is the baseline; the catalog tests pin this.
    &MOVES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{ParticipantId, ParticipantSheet, StatBlock};
    use std::collections::HashSet;

    fn participant(class: &str, ace: bool) -> Participant {
        let mut sheet = ParticipantSheet::new(ParticipantId::new(1), "Test", StatBlock::new(10))
            .with_class(class);
        if ace {
            sheet = sheet.with_ace_unlocked();
        }
        Participant::from_sheet(sheet, 3)
    }

    mod catalog_shape_tests {
        use super::*;

        #[test]
        fn keys_are_unique() {
            let keys: HashSet<_> = MOVES.iter().map(|m| m.key).collect();
            assert_eq!(keys.len(), MOVES.len());
        }

        #[test]
        fn baseline_is_first_and_free() {
            let strike = baseline();
            assert_eq!(strike.key, BASELINE_KEY);
            assert_eq!(strike.cost(), MoveCost::Free);
            assert_eq!(strike.arity, TargetArity::Single);
            assert_eq!(strike.base_wounds(), 1);
            assert_eq!(strike.pool, &[Attribute::Strength, Attribute::Dexterity]);
        }

        #[test]
        fn every_role_has_one_ordinary_and_one_ace() {
            for role in [
                Role::Barbarian,
                Role::Bard,
                Role::Cleric,
                Role::Fighter,
                Role::Monk,
                Role::Paladin,
                Role::Rogue,
                Role::Wizard,
            ] {
                let ordinary = MOVES.iter().filter(|m| m.family == MoveFamily::Role(role)).count();
                let ace = MOVES.iter().filter(|m| m.family == MoveFamily::Ace(role)).count();
                assert_eq!((ordinary, ace), (1, 1), "role {role}");
            }
        }

        #[test]
        fn targeted_moves_have_a_pool() {
            for m in MOVES.iter().filter(|m| m.arity != TargetArity::None) {
                assert!(!m.pool.is_empty(), "{}", m.key);
            }
        }

        #[test]
        fn find_by_key() {
            assert_eq!(find("haymaker").map(|m| m.name), Some("Haymaker"));
            assert!(find("fireball").is_none());
        }
    }

    mod cost_tests {
        use super::*;

        #[test]
        fn reactions_never_cost_slots() {
            for m in MOVES.iter().filter(|m| m.category == ActionCategory::Reaction) {
                assert_ne!(m.cost(), MoveCost::Slot, "{}", m.key);
            }
        }

        #[test]
        fn aces_cost_the_finisher() {
            for m in MOVES.iter().filter(|m| matches!(m.family, MoveFamily::Ace(_))) {
                assert_eq!(m.cost(), MoveCost::Finisher, "{}", m.key);
            }
        }

        #[test]
        fn arity_accepts() {
            assert!(TargetArity::None.accepts(0));
            assert!(!TargetArity::Single.accepts(0));
            assert!(TargetArity::Many { max: 2 }.accepts(2));
            assert!(!TargetArity::Many { max: 2 }.accepts(3));
            assert!(!TargetArity::Many { max: 2 }.accepts(0));
        }
    }

    mod access_tests {
        use super::*;

        #[test]
        fn magic_needs_arcane_aptitude() {
            let jolt = find("arcane_jolt").unwrap();
            assert!(jolt.is_open_to(&participant("Wizard", false)));
            assert!(!jolt.is_open_to(&participant("Fighter", false)));
        }

        #[test]
        fn role_moves_are_role_locked() {
            let haymaker = find("haymaker").unwrap();
            assert!(haymaker.is_open_to(&participant("Fighter", false)));
            assert!(!haymaker.is_open_to(&participant("Rogue", false)));
        }

        #[test]
        fn ace_needs_milestone() {
            let ko = find("knockout_blow").unwrap();
            assert!(!ko.is_open_to(&participant("Fighter", false)));
            assert!(ko.is_open_to(&participant("Fighter", true)));
        }
    }
}
