//! Error taxonomy for the brawl engine.
//!
//! Every variant is a recoverable, caller-visible condition. A failed
//! operation never leaves participant state half-mutated: validation runs
//! before any wound, slot, or effect bookkeeping is touched.

use thiserror::Error;

use crate::catalog::MoveKey;
use crate::participant::ParticipantId;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrawlError {
    /// Malformed input, e.g. a negative wound amount or a duplicate registration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Target list does not match the move's arity.
    #[error("invalid target for {key}: {reason}")]
    InvalidTarget {
        /// Move that rejected the targets.
        key: MoveKey,
        /// Human-readable reason.
        reason: String,
    },

    /// Participant has no move-slots left.
    #[error("participant {0} has no move slots left")]
    SlotsExhausted(ParticipantId),

    /// Finisher already spent this encounter.
    #[error("participant {0} has already used their finishing move")]
    AlreadyUsed(ParticipantId),

    /// `start` called with fewer than two participants.
    #[error("a brawl needs at least two participants, got {0}")]
    InsufficientParticipants(usize),

    /// Active-only operation called with no running encounter.
    #[error("no active encounter")]
    NoActiveEncounter,

    /// `start` called while an encounter is running.
    #[error("an encounter is already active")]
    AlreadyActive,

    /// Move key not present in the catalog.
    #[error("unknown move: {0}")]
    UnknownMove(String),

    /// Participant id not registered in the encounter.
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// Actor is under an effect that forbids acting (or reacting).
    #[error("participant {0} cannot act right now")]
    CannotAct(ParticipantId),

    /// Move belongs to a family the actor has no access to.
    #[error("move {key} is not available to participant {participant}")]
    MoveUnavailable {
        /// Requested move.
        key: MoveKey,
        /// Actor that asked for it.
        participant: ParticipantId,
    },

    /// Reaction already spent this round.
    #[error("participant {0} has already reacted this round")]
    ReactionSpent(ParticipantId),

    /// Prop move attempted with empty hands.
    #[error("participant {0} is not holding a prop")]
    NoPropHeld(ParticipantId),

    /// Held prop cannot be used the way the move asks.
    #[error("{prop} cannot be used for {key}")]
    PropModeUnsupported {
        /// Move that needed the mode.
        key: MoveKey,
        /// Name of the held prop.
        prop: &'static str,
    },
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, BrawlError>;

/// Errors raised while loading a [`BrawlConfig`](crate::config::BrawlConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured hazard key is not in the hazard catalog.
    #[error("unknown hazard in config: {0}")]
    UnknownHazard(String),
}
