//! Status effect registry.
//!
//! A [`StatusSet`] holds the time-boxed conditions on one participant. Each
//! [`StatusKind`] maps to a fixed set of [`EffectFlags`] that the resolution
//! engine consults before rolling or applying wounds.
//!
//! # Rules
//!
//! - Attaching a kind that is already present replaces it (duration resets)
//! - `tick_all` decrements every timed effect and removes those reaching 0
//! - Encounter-long effects (the KO incapacitation) never tick down
//!
//! # Immunity scope
//!
//! Wound immunity and status immunity are separate flags,
//! [`EffectFlags::SUPPRESSES_WOUNDS`] and [`EffectFlags::SUPPRESSES_STATUS`].
//! A kind carrying only the first still lets conditions through.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Behavioral flags exposed by active status effects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EffectFlags: u16 {
        /// May not take actions or bonus actions.
        const CANNOT_ACT = 1 << 0;
        /// May not take reactions.
        const CANNOT_REACT = 1 << 1;
        /// Incoming wounds are ignored.
        const SUPPRESSES_WOUNDS = 1 << 2;
        /// Incoming status effects are ignored.
        const SUPPRESSES_STATUS = 1 << 3;
        /// Contest rolls take the better of two dice.
        const ATTACK_ADVANTAGE = 1 << 4;
        /// Contest rolls take the worse of two dice.
        const ATTACK_DISADVANTAGE = 1 << 5;
        /// Removed after the bearer's next contest.
        const CONSUMED_ON_ACTION = 1 << 6;
        /// Lasts for the rest of the encounter.
        const TERMINAL = 1 << 7;
    }
}

/// Every condition the engine knows how to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Knocked out at the top of the wound track.
    Incapacitated,
    /// On the floor.
    Prone,
    /// Seeing stars.
    Dazed,
    /// Shaken by taunts.
    Rattled,
    /// Unable to do anything at all.
    Stunned,
    /// Magically confused.
    Befuddled,
    /// Can't see straight (ale in the eyes, smoke).
    Blinded,
    /// Has read the opponent; next contest rolls with advantage.
    SizedUp,
    /// Bobbing and weaving.
    Weaving,
    /// Guarding with a prop.
    Braced,
    /// Shimmering ward that turns blows.
    Warded,
    /// Divine protection from everything.
    Blessed,
    /// Refuses to go down.
    Unbreakable,
}

impl StatusKind {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Incapacitated => "Incapacitated",
            Self::Prone => "Prone",
            Self::Dazed => "Dazed",
            Self::Rattled => "Rattled",
            Self::Stunned => "Stunned",
            Self::Befuddled => "Befuddled",
            Self::Blinded => "Blinded",
            Self::SizedUp => "Sized Up",
            Self::Weaving => "Weaving",
            Self::Braced => "Braced",
            Self::Warded => "Warded",
            Self::Blessed => "Blessed",
            Self::Unbreakable => "Unbreakable",
        }
    }

    /// Flags this kind exposes while active.
    #[must_use]
    pub const fn flags(self) -> EffectFlags {
        match self {
            Self::Incapacitated => EffectFlags::CANNOT_ACT
                .union(EffectFlags::CANNOT_REACT)
                .union(EffectFlags::TERMINAL),
            Self::Stunned => EffectFlags::CANNOT_ACT.union(EffectFlags::CANNOT_REACT),
            Self::Dazed | Self::Rattled | Self::Blinded => EffectFlags::ATTACK_DISADVANTAGE,
            Self::Befuddled => EffectFlags::ATTACK_DISADVANTAGE.union(EffectFlags::CANNOT_REACT),
            Self::SizedUp => EffectFlags::ATTACK_ADVANTAGE.union(EffectFlags::CONSUMED_ON_ACTION),
            Self::Warded | Self::Unbreakable => EffectFlags::SUPPRESSES_WOUNDS,
            Self::Blessed => EffectFlags::SUPPRESSES_WOUNDS.union(EffectFlags::SUPPRESSES_STATUS),
            Self::Prone | Self::Weaving | Self::Braced => EffectFlags::empty(),
        }
    }

    /// Defense modifier applied unless the attaching move overrides it.
    #[must_use]
    pub const fn default_defense_modifier(self) -> i32 {
        match self {
            Self::Prone | Self::Stunned | Self::Blinded => -2,
            Self::Weaving | Self::Braced | Self::Unbreakable => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long an effect lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDuration {
    /// Remaining full turn cycles.
    Turns(u32),
    /// Until the encounter ends.
    Encounter,
}

/// A time-boxed condition on one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusKind,
    remaining: EffectDuration,
    defense_modifier: i32,
}

impl StatusEffect {
    /// An effect lasting `turns` turn cycles (at least one).
    #[must_use]
    pub fn for_turns(kind: StatusKind, turns: u32) -> Self {
        Self {
            kind,
            remaining: EffectDuration::Turns(turns.max(1)),
            defense_modifier: kind.default_defense_modifier(),
        }
    }

    /// An effect lasting until the encounter ends.
    #[must_use]
    pub fn for_encounter(kind: StatusKind) -> Self {
        Self {
            kind,
            remaining: EffectDuration::Encounter,
            defense_modifier: kind.default_defense_modifier(),
        }
    }

    /// Overrides the kind's default defense modifier.
    #[must_use]
    pub const fn with_defense_modifier(mut self, modifier: i32) -> Self {
        self.defense_modifier = modifier;
        self
    }

    /// The condition.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Time left.
    #[must_use]
    pub const fn remaining(&self) -> EffectDuration {
        self.remaining
    }

    /// Defense adjustment while active.
    #[must_use]
    pub const fn defense_modifier(&self) -> i32 {
        self.defense_modifier
    }

    /// Flags exposed while active.
    #[must_use]
    pub const fn flags(&self) -> EffectFlags {
        self.kind.flags()
    }

    /// Whether wounds are ignored while this is active.
    #[must_use]
    pub const fn suppresses_wounds(&self) -> bool {
        self.flags().contains(EffectFlags::SUPPRESSES_WOUNDS)
    }

    /// Whether new status effects are ignored while this is active.
    #[must_use]
    pub const fn suppresses_status_effects(&self) -> bool {
        self.flags().contains(EffectFlags::SUPPRESSES_STATUS)
    }
}

/// What [`StatusSet::attach`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attached {
    /// A new effect was appended.
    Added,
    /// An effect of the same kind was replaced.
    Replaced,
}

/// Active effects on one participant, in attachment order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSet {
    effects: Vec<StatusEffect>,
}

impl StatusSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `effect`, replacing any effect of the same kind.
    pub fn attach(&mut self, effect: StatusEffect) -> Attached {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            Attached::Replaced
        } else {
            self.effects.push(effect);
            Attached::Added
        }
    }

    /// Decrements timed effects by one turn and removes expired ones.
    ///
    /// Returns the kinds that expired, in attachment order.
    pub fn tick_all(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| match &mut effect.remaining {
            EffectDuration::Turns(turns) => {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(effect.kind);
                    false
                } else {
                    true
                }
            }
            EffectDuration::Encounter => true,
        });
        expired
    }

    /// Whether any active effect exposes `flag`.
    #[must_use]
    pub fn has_flag(&self, flag: EffectFlags) -> bool {
        self.flags().contains(flag)
    }

    /// Union of all active flags.
    #[must_use]
    pub fn flags(&self) -> EffectFlags {
        self.effects
            .iter()
            .fold(EffectFlags::empty(), |acc, e| acc | e.flags())
    }

    /// Sum of all active defense modifiers.
    #[must_use]
    pub fn defense_modifier(&self) -> i32 {
        self.effects.iter().map(StatusEffect::defense_modifier).sum()
    }

    /// Whether `kind` is active.
    #[must_use]
    pub fn contains(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Returns the active effect of `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Removes every effect carrying `flag`, returning their kinds.
    pub fn remove_flagged(&mut self, flag: EffectFlags) -> Vec<StatusKind> {
        let mut removed = Vec::new();
        self.effects.retain(|e| {
            if e.flags().contains(flag) {
                removed.push(e.kind);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Iterates over active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Number of active effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether no effects are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Drops every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod attach_tests {
        use super::*;

        #[test]
        fn attach_appends_new_kinds() {
            let mut set = StatusSet::new();
            assert_eq!(set.attach(StatusEffect::for_turns(StatusKind::Prone, 1)), Attached::Added);
            assert_eq!(set.attach(StatusEffect::for_turns(StatusKind::Dazed, 2)), Attached::Added);
            assert_eq!(set.len(), 2);
        }

        #[test]
        fn attach_same_kind_resets_duration() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::Rattled, 1));
            let result = set.attach(StatusEffect::for_turns(StatusKind::Rattled, 3));

            assert_eq!(result, Attached::Replaced);
            assert_eq!(set.len(), 1);
            assert_eq!(
                set.get(StatusKind::Rattled).unwrap().remaining(),
                EffectDuration::Turns(3)
            );
        }

        #[test]
        fn zero_turns_rounds_up_to_one() {
            let effect = StatusEffect::for_turns(StatusKind::Prone, 0);
            assert_eq!(effect.remaining(), EffectDuration::Turns(1));
        }
    }

    mod tick_tests {
        use super::*;

        #[test]
        fn tick_removes_expired() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::Prone, 1));
            set.attach(StatusEffect::for_turns(StatusKind::Dazed, 2));

            assert_eq!(set.tick_all(), vec![StatusKind::Prone]);
            assert!(set.contains(StatusKind::Dazed));
            assert_eq!(set.tick_all(), vec![StatusKind::Dazed]);
            assert!(set.is_empty());
        }

        #[test]
        fn encounter_effects_never_expire() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_encounter(StatusKind::Incapacitated));
            for _ in 0..50 {
                assert!(set.tick_all().is_empty());
            }
            assert!(set.has_flag(EffectFlags::TERMINAL));
        }
    }

    mod flag_tests {
        use super::*;

        #[test]
        fn flags_union_across_effects() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::Warded, 1));
            set.attach(StatusEffect::for_turns(StatusKind::Befuddled, 1));

            assert!(set.has_flag(EffectFlags::SUPPRESSES_WOUNDS));
            assert!(set.has_flag(EffectFlags::CANNOT_REACT));
            assert!(!set.has_flag(EffectFlags::SUPPRESSES_STATUS));
        }

        #[test]
        fn immunity_pair_is_explicit() {
            let warded = StatusEffect::for_turns(StatusKind::Warded, 1);
            let blessed = StatusEffect::for_turns(StatusKind::Blessed, 1);

            assert!(warded.suppresses_wounds());
            assert!(!warded.suppresses_status_effects());
            assert!(blessed.suppresses_wounds());
            assert!(blessed.suppresses_status_effects());
        }

        #[test]
        fn defense_modifiers_sum() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::Prone, 1));
            set.attach(StatusEffect::for_turns(StatusKind::Braced, 1).with_defense_modifier(4));
            assert_eq!(set.defense_modifier(), 2);
        }

        #[test]
        fn remove_flagged_consumes_sized_up() {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::SizedUp, 2));
            set.attach(StatusEffect::for_turns(StatusKind::Prone, 2));

            let removed = set.remove_flagged(EffectFlags::CONSUMED_ON_ACTION);
            assert_eq!(removed, vec![StatusKind::SizedUp]);
            assert!(set.contains(StatusKind::Prone));
        }
    }

    proptest! {
        #[test]
        fn effect_present_for_exactly_n_ticks(turns in 1_u32..20) {
            let mut set = StatusSet::new();
            set.attach(StatusEffect::for_turns(StatusKind::Dazed, turns));

            for _ in 0..turns - 1 {
                set.tick_all();
                prop_assert!(set.contains(StatusKind::Dazed));
            }
            set.tick_all();
            prop_assert!(!set.contains(StatusKind::Dazed));
        }
    }
}
