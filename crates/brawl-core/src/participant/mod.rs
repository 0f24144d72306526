//! Participant records for the brawl engine.
//!
//! This module provides the brawl-local state of one combatant:
//! - [`ParticipantId`]: Opaque reference supplied by the host
//! - [`Role`]: Normalized archetype, resolved once at registration
//! - [`AttributeSource`]: Read-only accessor for modifiers and baseline defense
//! - [`ParticipantSheet`]: What the host hands over to register someone
//! - [`Participant`]: The mutable record owned by the encounter
//!
//! Mutation happens only through the wound track ([`wounds`]), the resource
//! ledger ([`ledger`]), and the status registry wrappers below. The encounter
//! owns every record; hosts only ever see shared references.

pub mod ledger;
pub mod wounds;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::status::{Attached, EffectFlags, StatusEffect, StatusKind, StatusSet};

pub use ledger::Ledger;
pub use wounds::{WoundChange, MAX_WOUNDS, MAX_WOUND_PENALTY};

// =============================================================================
// Identity
// =============================================================================

/// Host-assigned identifier for a participant.
///
/// Participants are stored in id order, which is also the order used when
/// hazards roll saves for everyone.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(u64);

impl ParticipantId {
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

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// The six attributes moves and saves draw on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Raw muscle.
    Strength,
    /// Agility and reflexes.
    Dexterity,
    /// Toughness.
    Constitution,
    /// Book smarts.
    Intelligence,
    /// Awareness.
    Wisdom,
    /// Force of personality.
    Charisma,
}

impl Attribute {
    /// All attributes in sheet order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Three-letter abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Dexterity => 1,
            Self::Constitution => 2,
            Self::Intelligence => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Read-only view of a combatant's numbers.
///
/// The engine never computes these; the host's character data does.
pub trait AttributeSource: fmt::Debug + Send + Sync {
    /// Modifier for a single attribute.
    fn modifier(&self, attribute: Attribute) -> i32;

    /// Defense before wound penalties and status modifiers.
    fn base_defense(&self) -> i32;

    /// Best modifier among `pool`. An empty pool yields 0.
    fn best_modifier(&self, pool: &[Attribute]) -> i32 {
        pool.iter().map(|&a| self.modifier(a)).max().unwrap_or(0)
    }
}

/// Plain attribute block, the usual [`AttributeSource`].
///
/// # Example
///
/// ```
/// use brawl_core::participant::{Attribute, AttributeSource, StatBlock};
///
/// let stats = StatBlock::new(12)
///     .with(Attribute::Strength, 3)
///     .with(Attribute::Dexterity, 1);
///
/// assert_eq!(stats.best_modifier(&[Attribute::Strength, Attribute::Dexterity]), 3);
/// assert_eq!(stats.base_defense(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    modifiers: [i32; 6],
    defense: i32,
}

impl StatBlock {
    /// All modifiers zero, given baseline defense.
    #[must_use]
    pub const fn new(defense: i32) -> Self {
        Self {
            modifiers: [0; 6],
            defense,
        }
    }

    /// Sets one attribute modifier.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, modifier: i32) -> Self {
        self.modifiers[attribute.index()] = modifier;
        self
    }
}

impl AttributeSource for StatBlock {
    fn modifier(&self, attribute: Attribute) -> i32 {
        self.modifiers[attribute.index()]
    }

    fn base_defense(&self) -> i32 {
        self.defense
    }
}

// =============================================================================
// Roles
// =============================================================================

/// Normalized archetype that gates per-role moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Furious bruiser.
    Barbarian,
    /// Performer with a cutting tongue.
    Bard,
    /// Divine caster.
    Cleric,
    /// Trained soldier.
    Fighter,
    /// Martial artist.
    Monk,
    /// Holy warrior.
    Paladin,
    /// Sneak.
    Rogue,
    /// Arcane scholar.
    Wizard,
    /// No recognized class; generic moves only.
    Commoner,
}

impl Role {
    /// Resolves free-text class data to a role.
    ///
    /// Matching is case-insensitive and takes the first word that names a
    /// role, so `"Level 3 Half-Orc Barbarian"` resolves to `Barbarian`.
    /// Unrecognized text resolves to `Commoner`.
    #[must_use]
    pub fn normalize(text: &str) -> Self {
        text.split(|c: char| !c.is_ascii_alphabetic())
            .find_map(|word| match word.to_ascii_lowercase().as_str() {
                "barbarian" => Some(Self::Barbarian),
                "bard" => Some(Self::Bard),
                "cleric" => Some(Self::Cleric),
                "fighter" => Some(Self::Fighter),
                "monk" => Some(Self::Monk),
                "paladin" => Some(Self::Paladin),
                "rogue" => Some(Self::Rogue),
                "wizard" => Some(Self::Wizard),
                _ => None,
            })
            .unwrap_or(Self::Commoner)
    }

    /// Whether the role implies arcane aptitude.
    #[must_use]
    pub const fn is_arcane(self) -> bool {
        matches!(self, Self::Bard | Self::Cleric | Self::Paladin | Self::Wizard)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Everything the host supplies to register a participant.
#[derive(Debug, Clone)]
pub struct ParticipantSheet {
    id: ParticipantId,
    name: String,
    class_text: String,
    stats: Arc<dyn AttributeSource>,
    move_slots: Option<u8>,
    arcane: Option<bool>,
    ace_unlocked: bool,
}

impl ParticipantSheet {
    /// A sheet with no class text, default slots, and the ace locked.
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        stats: impl AttributeSource + 'static,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            class_text: String::new(),
            stats: Arc::new(stats),
            move_slots: None,
            arcane: None,
            ace_unlocked: false,
        }
    }

    /// Free-text class description, normalized at registration.
    #[must_use]
    pub fn with_class(mut self, class_text: impl Into<String>) -> Self {
        self.class_text = class_text.into();
        self
    }

    /// Overrides the configured move-slot maximum.
    #[must_use]
    pub fn with_move_slots(mut self, slots: u8) -> Self {
        self.move_slots = Some(slots);
        self
    }

    /// Overrides the arcane aptitude implied by the role.
    #[must_use]
    pub fn with_arcane(mut self, arcane: bool) -> Self {
        self.arcane = Some(arcane);
        self
    }

    /// Marks the narrative milestone that unlocks the role's ace move.
    #[must_use]
    pub fn with_ace_unlocked(mut self) -> Self {
        self.ace_unlocked = true;
        self
    }

    /// The sheet's participant id.
    #[must_use]
    pub const fn id(&self) -> ParticipantId {
        self.id
    }
}

// =============================================================================
// Participant
// =============================================================================

/// Brawl-local state for one combatant.
#[derive(Debug, Clone)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    role: Role,
    arcane: bool,
    ace_unlocked: bool,
    stats: Arc<dyn AttributeSource>,
    wounds: u8,
    ledger: Ledger,
    statuses: StatusSet,
}

impl Participant {
    /// Builds a fresh record from a sheet; `default_slots` applies when the
    /// sheet does not set its own.
    #[must_use]
    pub fn from_sheet(sheet: ParticipantSheet, default_slots: u8) -> Self {
        let role = Role::normalize(&sheet.class_text);
        Self {
            id: sheet.id,
            name: sheet.name,
            role,
            arcane: sheet.arcane.unwrap_or_else(|| role.is_arcane()),
            ace_unlocked: sheet.ace_unlocked,
            stats: sheet.stats,
            wounds: 0,
            ledger: Ledger::new(sheet.move_slots.unwrap_or(default_slots)),
            statuses: StatusSet::new(),
        }
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> ParticipantId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether magic moves are open to this participant.
    #[must_use]
    pub const fn is_arcane(&self) -> bool {
        self.arcane
    }

    /// Whether the role's ace move has been unlocked.
    #[must_use]
    pub const fn ace_unlocked(&self) -> bool {
        self.ace_unlocked
    }

    /// Best modifier among `pool`.
    #[must_use]
    pub fn best_modifier(&self, pool: &[Attribute]) -> i32 {
        self.stats.best_modifier(pool)
    }

    /// Combat-facing defense: baseline, minus wound penalty, plus status modifiers.
    #[must_use]
    pub fn defense(&self) -> i32 {
        self.stats.base_defense() - self.current_penalty() + self.statuses.defense_modifier()
    }

    /// Resource ledger (read-only).
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Active status effects (read-only).
    #[must_use]
    pub const fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    /// Attaches a status effect, replacing one of the same kind.
    pub fn attach(&mut self, effect: StatusEffect) -> Attached {
        self.statuses.attach(effect)
    }

    /// Ticks every timed effect down by one turn; returns expired kinds.
    pub fn tick_all(&mut self) -> Vec<StatusKind> {
        self.statuses.tick_all()
    }

    /// Whether any active effect exposes `flag`.
    #[must_use]
    pub fn has_flag(&self, flag: EffectFlags) -> bool {
        self.statuses.has_flag(flag)
    }

    /// Removes effects consumed by taking an action.
    pub(crate) fn consume_action_effects(&mut self) -> Vec<StatusKind> {
        self.statuses.remove_flagged(EffectFlags::CONSUMED_ON_ACTION)
    }

    /// Drops all per-encounter state.
    pub(crate) fn clear(&mut self) {
        self.statuses.clear();
        self.ledger.clear();
    }
}
