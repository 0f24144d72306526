//! # Brawl Core
//!
//! Non-lethal tavern brawl encounter engine.
//!
//! Participants soak up discrete wound levels instead of hit points, spend a
//! small budget of move-slots on special moves, may wield a single prop, and
//! suffer short-lived status effects. Every few turns the room itself joins
//! in with narrative flavor or a hazard that demands a save.
//!
//! ## Architecture
//!
//! - **Catalog**: static moves, props, and environmental events
//! - **Resolution engine**: validates, debits, rolls, and applies effects
//!   through a key → resolver strategy table
//! - **Scheduler**: narrative events on a turn cadence, hazards on demand
//! - **Controller**: the [`Brawl`] state machine the host drives
//!
//! All randomness flows through the [`Dice`] port, so a seed (or a scripted
//! roll sequence) fully determines a brawl.
//!
//! ## Usage
//!
//! ```
//! use brawl_core::{Brawl, BrawlConfig, ParticipantId, ParticipantSheet, StatBlock};
//!
//! let mut brawl = Brawl::seeded(BrawlConfig { seed: Some(7), ..BrawlConfig::default() })?;
//! let (a, b) = (ParticipantId::new(1), ParticipantId::new(2));
//! brawl.start(vec![
//!     ParticipantSheet::new(a, "Brann", StatBlock::new(12)).with_class("Fighter"),
//!     ParticipantSheet::new(b, "Mira", StatBlock::new(13)).with_class("Rogue"),
//! ])?;
//!
//! brawl.perform_action(a, "unarmed_strike", &[b])?;
//! brawl.on_turn_advance()?;
//! let tally = brawl.end()?;
//! assert_eq!(tally.turns, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod dice;
pub mod encounter;
pub mod error;
pub mod journal;
pub mod participant;
pub mod resolver;
pub mod scheduler;
pub mod status;

pub use config::BrawlConfig;
pub use controller::{Brawl, Lifecycle, Tally, Trophy, TurnReport};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use encounter::{Encounter, EncounterId};
pub use error::{BrawlError, ConfigError, Result};
pub use journal::{BrawlEvent, Journal, JournalEntry};
pub use participant::{Attribute, AttributeSource, Participant, ParticipantId, ParticipantSheet, Role, StatBlock};
pub use resolver::{Outcome, ResolutionEngine, ResolverTable};
pub use scheduler::HazardReport;
pub use status::{EffectFlags, StatusEffect, StatusKind};

#[cfg(test)]
mod tests;
