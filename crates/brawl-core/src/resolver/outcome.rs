//! Records produced by resolving an action, handed to the narration layer.

use serde::Serialize;

use crate::catalog::{MoveCost, MoveKey, Prop};
use crate::participant::ParticipantId;
use crate::scheduler::HazardReport;
use crate::status::StatusKind;

/// One d20 roll plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContestRoll {
    /// The die that counted.
    pub natural: u8,
    /// The discarded die, when rolling with advantage or disadvantage.
    pub discarded: Option<u8>,
    /// Best applicable attribute modifier.
    pub modifier: i32,
    /// Situational bonus (a hurled prop, for instance).
    pub bonus: i32,
    /// `natural + modifier + bonus`.
    pub total: i32,
}

impl ContestRoll {
    /// Whether the counted die shows its highest face.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        self.natural == crate::dice::DIE_MAX
    }

    /// Whether the roll meets `target`. A critical always does.
    #[must_use]
    pub const fn meets(&self, target: i32) -> bool {
        self.is_critical() || self.total >= target
    }
}

/// What landed on one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectReport {
    /// Wounds that actually landed after clamping.
    pub wounds_applied: u8,
    /// Status effects attached.
    pub effects_applied: Vec<StatusKind>,
    /// Immunity blocked at least one effect.
    pub suppressed: bool,
    /// This application knocked the participant out.
    pub knocked_out: bool,
}

/// Result against one listed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetResult {
    /// Who was targeted.
    pub target: ParticipantId,
    /// Defense the roll was compared against.
    pub defense: i32,
    /// Whether the roll met the defense.
    pub hit: bool,
    /// What landed.
    #[serde(flatten)]
    pub report: EffectReport,
}

/// Structured result of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Who acted.
    pub actor: ParticipantId,
    /// What they did.
    pub move_key: MoveKey,
    /// What it cost.
    pub cost: MoveCost,
    /// The roll, for moves that roll.
    pub roll: Option<ContestRoll>,
    /// Whether the move achieved anything.
    pub success: bool,
    /// Natural 20.
    pub critical: bool,
    /// Per-target results, in the order given (duplicates included).
    pub targets: Vec<TargetResult>,
    /// Effects the actor put on themselves.
    pub self_effects: Vec<StatusKind>,
    /// Effects on the actor used up by this action.
    pub consumed_effects: Vec<StatusKind>,
    /// Prop picked up.
    pub prop_acquired: Option<Prop>,
    /// Prop dropped to make room.
    pub prop_dropped: Option<Prop>,
    /// Prop spent.
    pub prop_used: Option<Prop>,
    /// Hazard set off by the move.
    pub hazard: Option<HazardReport>,
}

impl Outcome {
    pub(crate) fn new(actor: ParticipantId, move_key: MoveKey, cost: MoveCost) -> Self {
        Self {
            actor,
            move_key,
            cost,
            roll: None,
            success: false,
            critical: false,
            targets: Vec::new(),
            self_effects: Vec::new(),
            consumed_effects: Vec::new(),
            prop_acquired: None,
            prop_dropped: None,
            prop_used: None,
            hazard: None,
        }
    }

    /// Total wounds landed across all targets.
    #[must_use]
    pub fn total_wounds(&self) -> u32 {
        self.targets
            .iter()
            .map(|t| u32::from(t.report.wounds_applied))
            .sum()
    }

    /// Targets knocked out by this action.
    pub fn knockouts(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.targets
            .iter()
            .filter(|t| t.report.knocked_out)
            .map(|t| t.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(natural: u8, modifier: i32) -> ContestRoll {
        ContestRoll {
            natural,
            discarded: None,
            modifier,
            bonus: 0,
            total: i32::from(natural) + modifier,
        }
    }

    #[test]
    fn meets_on_total() {
        assert!(roll(12, 2).meets(14));
        assert!(!roll(12, 1).meets(14));
    }

    #[test]
    fn critical_always_meets() {
        let crit = roll(20, -5);
        assert!(crit.is_critical());
        assert!(crit.meets(30));
    }

    #[test]
    fn outcome_serializes_with_flattened_reports() {
        let mut outcome = Outcome::new(ParticipantId::new(1), MoveKey::new("shove"), MoveCost::Slot);
        outcome.targets.push(TargetResult {
            target: ParticipantId::new(2),
            defense: 12,
            hit: true,
            report: EffectReport {
                effects_applied: vec![StatusKind::Prone],
                ..EffectReport::default()
            },
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["move_key"], "shove");
        assert_eq!(json["targets"][0]["effects_applied"][0], "prone");
    }
}
