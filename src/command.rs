//! Command and Event types for the seating engine.
//!
//! Commands are the discrete gestures of the new-play screen (add a player,
//! press "randomize", drop a dragged row). Events are what the display layer
//! re-renders from.

use crate::participant::{Participant, ParticipantId};
use crate::rank_map::RankMap;

// ============================================================================
// Input Commands
// ============================================================================

/// Input commands, one per user gesture
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a participant to the play
    Add(Participant),
    /// Remove a participant by identity
    Remove(ParticipantId),
    /// Shuffle the whole seating order
    Randomize,
    /// Make the participant at this insertion index go first
    RotateToStart { index: usize },
    /// Drag the participant in seat `from` to seat `to` (both 0-based)
    Move { from: usize, to: usize },
    /// Forget the seating order
    ClearRanks,
}

impl Command {
    #[inline]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add(_) => CommandKind::Add,
            Command::Remove(_) => CommandKind::Remove,
            Command::Randomize => CommandKind::Randomize,
            Command::RotateToStart { .. } => CommandKind::RotateToStart,
            Command::Move { .. } => CommandKind::Move,
            Command::ClearRanks => CommandKind::ClearRanks,
        }
    }
}

/// Payload-free tag of a [`Command`], used in rejections
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    Add = 0,
    Remove = 1,
    Randomize = 2,
    RotateToStart = 3,
    Move = 4,
    ClearRanks = 5,
}

// ============================================================================
// Output Events
// ============================================================================

/// A command was refused and nothing changed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRejected {
    pub command: CommandKind,
    pub reason: RejectReason,
}

/// Reasons for command rejection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Move needs an established order; randomize or rotate first
    NotRanked,
    /// Participant index past the end of the list
    IndexOutOfRange { index: usize, len: usize },
    /// Seat position past the last seat
    SeatOutOfRange { position: usize, len: usize },
    /// Participant is not in the play
    UnknownParticipant(ParticipantId),
    /// A rank value was not a positive integer
    InvalidRank { value: String },
}

/// Output events from the seating engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatingEvent {
    /// Participant joined the play
    Added(ParticipantId),
    /// Participant left the play; `had_rank` tells whether a seat was vacated
    Removed {
        id: ParticipantId,
        had_rank: bool,
    },
    /// New rank snapshot after an ordering operation
    Reordered(RankMap),
    /// The rank map no longer describes a usable order
    OrderLost,
    /// Command refused
    Rejected(CommandRejected),
}
