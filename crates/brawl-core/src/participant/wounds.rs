//! Wound track: the 0–6 counter that stands in for hit points.
//!
//! Reaching [`MAX_WOUNDS`] knocks the participant out. The KO attaches an
//! encounter-long [`StatusKind::Incapacitated`] and is terminal: nothing
//! lowers the wound level during an encounter.

use serde::Serialize;

use crate::error::{BrawlError, Result};
use crate::status::{StatusEffect, StatusKind};

use super::Participant;

/// Wound level at which a participant is knocked out.
pub const MAX_WOUNDS: u8 = 6;

/// Cap on the defense penalty derived from wounds.
pub const MAX_WOUND_PENALTY: u8 = 5;

/// Result of one [`Participant::apply_wounds`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WoundChange {
    /// Level before the call.
    pub before: u8,
    /// Level after clamping.
    pub after: u8,
    /// True only on the call that crossed into KO.
    pub knocked_out: bool,
}

impl WoundChange {
    /// Wounds that actually landed after clamping.
    #[must_use]
    pub const fn applied(&self) -> u8 {
        self.after - self.before
    }
}

impl Participant {
    /// Adds `amount` wounds, clamped to [`MAX_WOUNDS`].
    ///
    /// # Errors
    ///
    /// Returns [`BrawlError::InvalidArgument`] for a negative amount.
    pub fn apply_wounds(&mut self, amount: i32) -> Result<WoundChange> {
        if amount < 0 {
            return Err(BrawlError::InvalidArgument(format!(
                "wound amount must be non-negative, got {amount}"
            )));
        }

        let before = self.wounds;
        let after = i32::from(before)
            .saturating_add(amount)
            .min(i32::from(MAX_WOUNDS));
        // after is within 0..=MAX_WOUNDS here
        self.wounds = u8::try_from(after).unwrap_or(MAX_WOUNDS);

        let knocked_out = before < MAX_WOUNDS && self.wounds == MAX_WOUNDS;
        if knocked_out {
            self.statuses
                .attach(StatusEffect::for_encounter(StatusKind::Incapacitated));
        }

        Ok(WoundChange {
            before,
            after: self.wounds,
            knocked_out,
        })
    }

    /// Defense penalty derived from wounds: `min(5, wound level)`.
    #[must_use]
    pub fn current_penalty(&self) -> i32 {
        i32::from(self.wounds.min(MAX_WOUND_PENALTY))
    }

    /// Current wound level.
    #[must_use]
    pub const fn wound_level(&self) -> u8 {
        self.wounds
    }

    /// Whether the participant has been knocked out.
    #[must_use]
    pub const fn is_knocked_out(&self) -> bool {
        self.wounds >= MAX_WOUNDS
    }
}
