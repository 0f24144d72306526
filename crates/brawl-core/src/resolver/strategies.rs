//! Resolver functions, one per [`ResolutionKind`](crate::catalog::ResolutionKind).

use tracing::info;

use crate::catalog::props::pool;
use crate::catalog::{PropMode, PropTier, ResolutionKind};
use crate::error::{BrawlError, Result};
use crate::scheduler;
use crate::status::{EffectFlags, StatusEffect, StatusKind};

use super::outcome::{EffectReport, TargetResult};
use super::{apply_effects, ResolutionContext};

/// One roll against every listed target.
pub(super) fn contest(ctx: &mut ResolutionContext<'_>) -> Result<()> {
    run_contest(ctx, 0, 0)
}

/// Shared contest body. `bonus` is added to the roll, `extra_wounds` to the
/// first wound landed on each hit target. Neither is doubled on a critical.
fn run_contest(ctx: &mut ResolutionContext<'_>, bonus: i32, extra_wounds: u8) -> Result<()> {
    let actor = ctx.actor;
    let roll = ctx.roll(bonus)?;
    let multiplier = if roll.is_critical() { 2 } else { 1 };

    for &target in ctx.targets {
        let view = ctx.snapshot(target);
        let hit = roll.meets(view.defense);
        let mut result = TargetResult {
            target,
            defense: view.defense,
            hit,
            report: EffectReport::default(),
        };
        if hit {
            let applied = apply_effects(
                &mut *ctx.encounter,
                Some(actor),
                target,
                view.flags,
                ctx.mv.effects,
                multiplier,
                extra_wounds,
            )?;
            result.report = applied.report;
            ctx.outcome.self_effects.extend(applied.self_effects);
        }
        ctx.outcome.success |= hit;
        ctx.outcome.targets.push(result);
    }
    Ok(())
}

/// No roll; the declared effects land on the actor.
pub(super) fn self_buff(ctx: &mut ResolutionContext<'_>) -> Result<()> {
    let applied = apply_effects(
        &mut *ctx.encounter,
        Some(ctx.actor),
        ctx.actor,
        EffectFlags::empty(),
        ctx.mv.effects,
        1,
        0,
    )?;
    ctx.outcome.self_effects = applied.self_effects;
    ctx.outcome.success = true;
    Ok(())
}

/// Roll against the grab DC; a natural 20 reaches the epic shelf.
pub(super) fn acquire_prop(ctx: &mut ResolutionContext<'_>) -> Result<()> {
    let actor = ctx.actor;
    let roll = ctx.roll(0)?;

    if !roll.meets(ctx.config.prop_grab_dc) {
        return Ok(());
    }

    let tier = if roll.is_critical() {
        PropTier::Epic
    } else {
        PropTier::Common
    };
    let shelf = pool(tier);
    let prop = *shelf
        .get(ctx.dice.pick(shelf.len()))
        .or_else(|| shelf.first())
        .ok_or_else(|| BrawlError::InvalidArgument(format!("no {tier:?} props to draw")))?;

    let participant = ctx.encounter.participant_mut(actor)?;
    ctx.outcome.prop_dropped = participant.set_prop(prop);
    ctx.outcome.prop_acquired = Some(prop);
    ctx.outcome.success = true;
    info!(participant = %actor, prop = prop.key, ?tier, "prop grabbed");
    Ok(())
}

/// Spends the held prop. It is gone whether or not the swing connects.
pub(super) fn wield_prop(ctx: &mut ResolutionContext<'_>) -> Result<()> {
    let ResolutionKind::WieldProp(mode) = ctx.mv.resolution else {
        return Err(BrawlError::UnknownMove(ctx.mv.key.to_string()));
    };
    let actor = ctx.actor;
    let prop = ctx
        .encounter
        .participant_mut(actor)?
        .clear_prop()
        .ok_or(BrawlError::NoPropHeld(actor))?;
    ctx.outcome.prop_used = Some(prop);

    match mode {
        PropMode::Smash => run_contest(ctx, 0, prop.tier.smash_wounds()),
        PropMode::Hurl => run_contest(ctx, prop.tier.hurl_bonus(), 0),
        PropMode::Parry => {
            let braced = StatusEffect::for_turns(StatusKind::Braced, 1)
                .with_defense_modifier(prop.tier.parry_defense());
            ctx.encounter.participant_mut(actor)?.attach(braced);
            ctx.outcome.self_effects.push(StatusKind::Braced);
            ctx.outcome.success = true;
            Ok(())
        }
    }
}

/// Sets off a hazard from the encounter's configured set.
pub(super) fn hazard(ctx: &mut ResolutionContext<'_>) -> Result<()> {
    let report = scheduler::activate_hazard(&mut *ctx.encounter, &mut *ctx.dice)?;
    ctx.outcome.success = true;
    ctx.outcome.hazard = Some(report);
    Ok(())
}
