//! Reference host turn engine.
//!
//! Drives a seeded brawl between four tavern patrons with a simple greedy
//! policy, logs narration through `tracing`, and prints the final tally as
//! JSON on stdout.
//!
//! ```text
//! brawl-sim [CONFIG.json] [--seed N] [--turns N]
//! RUST_LOG=debug brawl-sim --seed 42
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use brawl_core::catalog::{ActionCategory, Move, MoveFamily, TargetArity};
use brawl_core::{
    Attribute, Brawl, BrawlConfig, EffectFlags, ParticipantId, ParticipantSheet, SeededDice, StatBlock,
};
use clap::Parser;
use tracing::{debug, info};

const HAZARD_EVERY: u32 = 4;

/// Tavern brawl simulator
#[derive(Parser, Debug)]
#[command(name = "brawl-sim")]
#[command(about = "Run a seeded tavern brawl and print the tally as JSON")]
struct Args {
    /// JSON config file; defaults apply when omitted
    config: Option<PathBuf>,

    /// Seed for the dice, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of turns before last call
    #[arg(long, default_value_t = 12)]
    turns: u32,
}

fn load_config(args: &Args) -> Result<BrawlConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            BrawlConfig::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BrawlConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn patrons() -> Vec<ParticipantSheet> {
    vec![
        ParticipantSheet::new(
            ParticipantId::new(1),
            "Brann Ironbelly",
            StatBlock::new(13)
                .with(Attribute::Strength, 3)
                .with(Attribute::Constitution, 2),
        )
        .with_class("Dwarf Fighter")
        .with_ace_unlocked(),
        ParticipantSheet::new(
            ParticipantId::new(2),
            "Mira Quickfingers",
            StatBlock::new(14)
                .with(Attribute::Dexterity, 4)
                .with(Attribute::Charisma, 1),
        )
        .with_class("halfling rogue"),
        ParticipantSheet::new(
            ParticipantId::new(3),
            "Tobias Lark",
            StatBlock::new(12)
                .with(Attribute::Charisma, 4)
                .with(Attribute::Dexterity, 2),
        )
        .with_class("Bard (College of Lore)")
        .with_ace_unlocked(),
        ParticipantSheet::new(
            ParticipantId::new(4),
            "Old Gus",
            StatBlock::new(10).with(Attribute::Constitution, 3),
        )
        .with_class("retired sailor"),
    ]
}

/// Higher is better; reactions are never taken on the actor's own turn.
fn priority(mv: &Move) -> Option<u8> {
    if mv.category == ActionCategory::Reaction {
        return None;
    }
    Some(match mv.family {
        MoveFamily::Ace(_) => 4,
        MoveFamily::Role(_) => 3,
        MoveFamily::Magic => 2,
        MoveFamily::Generic => 1,
        MoveFamily::Baseline => 0,
    })
}

fn targets_for(mv: &Move, opponents: &[ParticipantId]) -> Vec<ParticipantId> {
    match mv.arity {
        TargetArity::None => Vec::new(),
        TargetArity::Single => opponents.iter().take(1).copied().collect(),
        TargetArity::Many { max } => opponents.iter().cycle().take(usize::from(max)).copied().collect(),
    }
}

fn take_turn(brawl: &mut Brawl<SeededDice>, actor: ParticipantId, turn: u32) -> Result<()> {
    let Some(encounter) = brawl.encounter() else {
        bail!("no brawl running");
    };
    let mut opponents: Vec<ParticipantId> = encounter
        .participants()
        .filter(|p| p.id() != actor && !p.is_knocked_out())
        .map(|p| p.id())
        .collect();
    if opponents.is_empty() {
        return Ok(());
    }
    let shift = usize::try_from(turn).unwrap_or_default() % opponents.len();
    opponents.rotate_left(shift);

    let choice = brawl
        .available_moves(actor)?
        .into_iter()
        .filter_map(|mv| priority(mv).map(|p| (p, mv)))
        .max_by_key(|(p, _)| *p)
        .map(|(_, mv)| mv)
        .context("baseline strike should always be available")?;

    let targets = targets_for(choice, &opponents);
    let outcome = brawl.perform_action(actor, choice.key.as_str(), &targets)?;
    info!(
        turn,
        actor = %actor,
        action = choice.name,
        success = outcome.success,
        critical = outcome.critical,
        wounds = outcome.total_wounds(),
        "{}",
        choice.description
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let turns = args.turns;
    info!(seed = ?config.seed, turns, "opening the tavern");

    let mut brawl = Brawl::seeded(config)?;
    let roster = patrons();
    let order: Vec<ParticipantId> = roster.iter().map(ParticipantSheet::id).collect();
    brawl.start(roster)?;

    for turn in 0..turns {
        for &actor in &order {
            let can_act = brawl
                .participant(actor)
                .is_some_and(|p| !p.has_flag(EffectFlags::CANNOT_ACT));
            if can_act {
                take_turn(&mut brawl, actor, turn)?;
            }
        }

        if turn % HAZARD_EVERY == HAZARD_EVERY - 1 {
            let report = brawl.activate_hazard()?;
            info!(turn, hazard = report.event.name, "{}", report.event.description);
        }

        let report = brawl.on_turn_advance()?;
        if let Some(event) = report.event {
            info!(turn = report.turn, event = event.name, "{}", event.description);
        }
        for entry in brawl.take_events() {
            let json = serde_json::to_string(&entry)?;
            debug!(entry = %json, "journal");
        }

        let standing = brawl
            .encounter()
            .map_or(0, |e| e.participants().filter(|p| !p.is_knocked_out()).count());
        if standing <= 1 {
            break;
        }
    }

    let tally = brawl.end()?;
    info!(
        conscious = tally.conscious.len(),
        knocked_out = tally.knocked_out.len(),
        "last call"
    );
    println!("{}", serde_json::to_string_pretty(&tally)?);
    Ok(())
}
