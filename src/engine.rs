//! Engine - command dispatch over an [`OrderMaintainer`].
//!
//! Maps each UI gesture to exactly one maintainer call and reports the
//! outcome as events. Failures never escape as errors here; they come back
//! as [`SeatingEvent::Rejected`].

use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;

use crate::command::{Command, CommandKind, CommandRejected, RejectReason, SeatingEvent};
use crate::error::SeatingError;
use crate::rank_map::{RankMap, RankState};
use crate::seating::OrderMaintainer;

/// Seating engine driven by [`Command`]s.
///
/// Single-writer: callers on several threads must serialize access.
pub struct SeatingEngine<R = StdRng> {
    /// The underlying order maintainer
    pub seating: OrderMaintainer,
    rng: R,
}

impl SeatingEngine<StdRng> {
    /// Create an engine with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for SeatingEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SeatingEngine<R> {
    /// Create an engine that draws randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            seating: OrderMaintainer::new(),
            rng,
        }
    }

    /// Process a single command and return output events.
    ///
    /// This is the main entry point for gesture handling, tests, and benchmarks.
    pub fn process_command(&mut self, cmd: Command) -> Vec<SeatingEvent> {
        let kind = cmd.kind();
        let mut events = Vec::new();

        match cmd {
            Command::Add(participant) => {
                let id = participant.id();
                let was_ranked = self.seating.is_ranked();
                // Duplicates are silently ignored
                if self.seating.add(participant) {
                    events.push(SeatingEvent::Added(id));
                    if was_ranked {
                        events.push(SeatingEvent::OrderLost);
                    }
                }
            }
            Command::Remove(id) => {
                let was_ranked = self.seating.is_ranked();
                let had_rank = self.seating.rank_of(&id).is_some();
                match self.seating.remove(&id) {
                    Some(_) => {
                        events.push(SeatingEvent::Removed { id, had_rank });
                        if was_ranked && !self.seating.is_ranked() {
                            events.push(SeatingEvent::OrderLost);
                        }
                    }
                    None => events.push(reject(kind, RejectReason::UnknownParticipant(id))),
                }
            }
            Command::Randomize => {
                let ranks = self.seating.randomize_with(&mut self.rng);
                events.push(SeatingEvent::Reordered(ranks.clone()));
            }
            Command::RotateToStart { index } => match self.seating.rotate_to_start(index) {
                Ok(ranks) => events.push(SeatingEvent::Reordered(ranks.clone())),
                Err(err) => events.push(reject(kind, err.into())),
            },
            Command::Move { from, to } => match self.seating.move_seat(from, to) {
                Ok(true) => events.push(SeatingEvent::Reordered(self.seating.ranks().clone())),
                Ok(false) => events.push(reject(kind, RejectReason::NotRanked)),
                Err(err) => events.push(reject(kind, err.into())),
            },
            Command::ClearRanks => {
                let ranks = self.seating.clear_ranks();
                events.push(SeatingEvent::Reordered(ranks.clone()));
            }
        }

        events
    }

    /// Current rank snapshot.
    #[inline]
    pub fn ranks(&self) -> &RankMap {
        self.seating.ranks()
    }

    #[inline]
    pub fn state(&self) -> RankState {
        self.seating.state()
    }

    /// Get total participant count.
    #[inline]
    pub fn participant_count(&self) -> usize {
        self.seating.len()
    }

    /// Compute state hash for determinism testing.
    ///
    /// Folds participants in insertion order together with their ranks.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for participant in self.seating.participants() {
            let id = participant.id();
            id.hash(&mut hasher);
            self.seating.rank_of(&id).hash(&mut hasher);
        }
        hasher.finish()
    }
}

#[inline]
fn reject(command: CommandKind, reason: RejectReason) -> SeatingEvent {
    tracing::debug!(?command, ?reason, "command rejected");
    SeatingEvent::Rejected(CommandRejected { command, reason })
}

impl From<SeatingError> for RejectReason {
    fn from(err: SeatingError) -> Self {
        match err {
            SeatingError::IndexOutOfRange { index, len } => {
                RejectReason::IndexOutOfRange { index, len }
            }
            SeatingError::SeatOutOfRange { position, len } => {
                RejectReason::SeatOutOfRange { position, len }
            }
            SeatingError::UnknownParticipant(id) => RejectReason::UnknownParticipant(id),
            SeatingError::InvalidRank { value } => RejectReason::InvalidRank { value },
        }
    }
}
