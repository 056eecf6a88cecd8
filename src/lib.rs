//! # Turn-Order
//!
//! A seating and turn-order engine for recording board game plays.
//!
//! ## Design Principles
//!
//! - **Dense Ranks**: A usable order is always exactly the seats `1..=k`
//! - **Explicit State**: Anything that is not a clean permutation is Unranked
//!   and has to be re-established by randomize or rotate
//! - **Minimal Disturbance**: A move only shifts the seats between source and
//!   destination
//! - **Single-Writer**: One caller owns the engine; no internal locking
//!
//! ## Architecture
//!
//! ```text
//! [UI Gesture] --> [Command] --> [SeatingEngine] --> [SeatingEvent]
//!                                      |
//!                               [OrderMaintainer]
//!                                      |
//!                     [NewPlaySession] --> [PlayRecord] --> [Storage]
//! ```

pub mod participant;
pub mod rank_map;
pub mod seating;
pub mod command;
pub mod engine;
pub mod colors;
pub mod record;
pub mod session;
pub mod suggestions;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use participant::{Participant, ParticipantId, ParticipantSet};
pub use rank_map::{parse_rank, Rank, RankMap, RankState};
pub use seating::OrderMaintainer;
pub use command::{Command, CommandKind, CommandRejected, RejectReason, SeatingEvent};
pub use engine::SeatingEngine;
pub use colors::{ranked_color_choices, ColorAssignments};
pub use record::{PlayRecord, PlayerRecord};
pub use session::{NewPlayPlayer, NewPlaySession, Step};
pub use suggestions::{suggest_locations, suggest_players, LastPlay, Roster};
pub use error::{SeatingError, SessionError};
