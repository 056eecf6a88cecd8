//! Error types for seating operations and the new-play workflow.
//!
//! Every variant is a local, recoverable condition. Nothing here is meant
//! to abort the caller.

use thiserror::Error;

use crate::participant::ParticipantId;

/// Rejections reported by [`OrderMaintainer`](crate::seating::OrderMaintainer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatingError {
    /// An index into the participant list was past the end.
    #[error("participant index {index} is out of range for {len} participants")]
    IndexOutOfRange { index: usize, len: usize },

    /// A 0-based seat position was past the last seat.
    #[error("seat position {position} is out of range for {len} seats")]
    SeatOutOfRange { position: usize, len: usize },

    /// The participant is not part of the current set.
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// A stored rank value was not a positive integer.
    #[error("invalid rank value {value:?}")]
    InvalidRank { value: String },
}

/// Errors raised by [`NewPlaySession`](crate::session::NewPlaySession).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Seating(#[from] SeatingError),

    /// A play record cannot be built before a game is chosen.
    #[error("no game selected for this play")]
    MissingGame,
}
