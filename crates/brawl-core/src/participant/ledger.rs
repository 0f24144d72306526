//! Resource ledger: move-slots, the finisher, the round's reaction, and
//! the single held prop.

use serde::Serialize;

use crate::catalog::Prop;
use crate::error::{BrawlError, Result};

use super::Participant;

/// Per-participant resource bookkeeping.
///
/// `moves_used <= moves_max` always holds; the finisher flips once per
/// encounter; at most one prop is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    moves_max: u8,
    moves_used: u8,
    finisher_used: bool,
    reaction_spent: bool,
    prop: Option<Prop>,
}

impl Ledger {
    /// A fresh ledger with `moves_max` slots.
    #[must_use]
    pub const fn new(moves_max: u8) -> Self {
        Self {
            moves_max,
            moves_used: 0,
            finisher_used: false,
            reaction_spent: false,
            prop: None,
        }
    }

    /// Slot budget.
    #[must_use]
    pub const fn moves_max(&self) -> u8 {
        self.moves_max
    }

    /// Slots spent.
    #[must_use]
    pub const fn moves_used(&self) -> u8 {
        self.moves_used
    }

    /// Slots left.
    #[must_use]
    pub const fn moves_remaining(&self) -> u8 {
        self.moves_max - self.moves_used
    }

    /// Whether the finishing move has been spent.
    #[must_use]
    pub const fn finisher_used(&self) -> bool {
        self.finisher_used
    }

    /// Whether a reaction is still available this round.
    #[must_use]
    pub const fn reaction_available(&self) -> bool {
        !self.reaction_spent
    }

    /// The held prop, if any.
    #[must_use]
    pub const fn prop(&self) -> Option<&Prop> {
        self.prop.as_ref()
    }

    pub(crate) fn clear(&mut self) {
        self.moves_used = 0;
        self.finisher_used = false;
        self.reaction_spent = false;
        self.prop = None;
    }
}

impl Participant {
    /// Spends one move-slot.
    ///
    /// # Errors
    ///
    /// [`BrawlError::SlotsExhausted`] when every slot is used; nothing changes.
    pub fn consume_move_slot(&mut self) -> Result<()> {
        if self.ledger.moves_used >= self.ledger.moves_max {
            return Err(BrawlError::SlotsExhausted(self.id));
        }
        self.ledger.moves_used += 1;
        Ok(())
    }

    /// Spends the once-per-encounter finisher.
    ///
    /// # Errors
    ///
    /// [`BrawlError::AlreadyUsed`] on the second call.
    pub fn consume_finisher(&mut self) -> Result<()> {
        if self.ledger.finisher_used {
            return Err(BrawlError::AlreadyUsed(self.id));
        }
        self.ledger.finisher_used = true;
        Ok(())
    }

    /// Spends this round's reaction.
    ///
    /// # Errors
    ///
    /// [`BrawlError::ReactionSpent`] if already used since the last turn advance.
    pub fn consume_reaction(&mut self) -> Result<()> {
        if self.ledger.reaction_spent {
            return Err(BrawlError::ReactionSpent(self.id));
        }
        self.ledger.reaction_spent = true;
        Ok(())
    }

    pub(crate) fn restore_reaction(&mut self) {
        self.ledger.reaction_spent = false;
    }

    /// Puts `prop` in hand, returning whatever was dropped to make room.
    pub fn set_prop(&mut self, prop: Prop) -> Option<Prop> {
        self.ledger.prop.replace(prop)
    }

    /// Empties the participant's hands.
    pub fn clear_prop(&mut self) -> Option<Prop> {
        self.ledger.prop.take()
    }
}
