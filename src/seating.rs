//! Seating - turn-order maintenance over a dynamic participant set.
//!
//! Owns the participant set and its rank map and implements the seating
//! gestures of the new-play flow:
//! 1. ADD / REMOVE: membership changes, ranks are never renumbered
//! 2. RANDOMIZE: draw a fresh permutation of `1..=k`
//! 3. ROTATE: make a chosen participant go first
//! 4. MOVE: drag one seat to another, shifting only the seats in between
//!
//! All operations are O(k) in the number of participants.

use rand::Rng;

use crate::error::SeatingError;
use crate::participant::{Participant, ParticipantId, ParticipantSet};
use crate::rank_map::{Rank, RankMap, RankState};

/// Maintains a dense turn order over a changing set of participants.
#[derive(Clone, Debug, Default)]
pub struct OrderMaintainer {
    participants: ParticipantSet,
    ranks: RankMap,
}

impl OrderMaintainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            participants: ParticipantSet::with_capacity(capacity),
            ranks: RankMap::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Add a participant. Duplicates are ignored and the rank map is untouched.
    ///
    /// # Returns
    /// `true` if the participant was inserted
    pub fn add(&mut self, participant: Participant) -> bool {
        let id = participant.id();
        let inserted = self.participants.insert(participant);
        if inserted {
            tracing::debug!(participant = %id, count = self.participants.len(), "participant added");
        }
        inserted
    }

    /// Remove a participant and its rank, if any.
    ///
    /// Remaining ranks are left as they are, so a gap may open and the
    /// order becomes [`RankState::Unranked`] until re-established.
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let removed = self.participants.remove(id)?;
        let rank = self.ranks.remove(id);
        tracing::debug!(participant = %id, ?rank, state = ?self.state(), "participant removed");
        Some(removed)
    }

    /// Remove the participant at `index` in insertion order.
    pub fn remove_at(&mut self, index: usize) -> Result<Participant, SeatingError> {
        let len = self.participants.len();
        let removed = self
            .participants
            .remove_at(index)
            .ok_or(SeatingError::IndexOutOfRange { index, len })?;
        let id = removed.id();
        let rank = self.ranks.remove(&id);
        tracing::debug!(participant = %id, index, ?rank, state = ?self.state(), "participant removed");
        Ok(removed)
    }

    // ========================================================================
    // Rank State
    // ========================================================================

    #[inline]
    pub fn state(&self) -> RankState {
        self.ranks.state_for(&self.participants)
    }

    /// True iff the ranks are a clean `1..=k` permutation over the participants.
    #[inline]
    pub fn is_ranked(&self) -> bool {
        self.state() == RankState::Ranked
    }

    /// Reset to no ranks at all.
    pub fn clear_ranks(&mut self) -> &RankMap {
        self.ranks.clear();
        tracing::debug!("ranks cleared");
        &self.ranks
    }

    /// Install an externally supplied rank map (e.g. one read back from
    /// storage). Entries for unknown participants are discarded; no other
    /// validation happens, so the result may well be unranked.
    pub fn load_ranks(&mut self, mut ranks: RankMap) -> RankState {
        let participants = &self.participants;
        ranks.retain(|id| participants.contains(id));
        self.ranks = ranks;
        let state = self.state();
        tracing::debug!(?state, "ranks loaded");
        state
    }

    // ========================================================================
    // Ordering Operations
    // ========================================================================

    /// Assign every participant a distinct random rank from `1..=k`,
    /// replacing whatever was there.
    ///
    /// Ranks are drawn one participant at a time from a shrinking pool, so
    /// every permutation is equally likely.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &RankMap {
        let k = self.participants.len();
        let mut pool: Vec<Rank> = (1..=k as Rank).collect();
        let mut ranks = RankMap::with_capacity(k);

        for member in &self.participants {
            let pick = rng.gen_range(0..pool.len());
            ranks.insert(member.id(), pool.swap_remove(pick));
        }

        self.ranks = ranks;
        tracing::debug!(count = k, "ranks randomized");
        &self.ranks
    }

    /// [`randomize_with`](Self::randomize_with) using the thread-local RNG.
    pub fn randomize(&mut self) -> &RankMap {
        self.randomize_with(&mut rand::thread_rng())
    }

    /// Make the participant at `chosen_index` (insertion order) go first.
    ///
    /// # Algorithm
    /// - Ranked: rotate every existing rank `r` to
    ///   `((r + k - chosen_index - 1) mod k) + 1`, preserving the circular
    ///   order.
    /// - Unranked: discard whatever is there and seat everyone by insertion
    ///   order, starting from the chosen participant and wrapping around.
    pub fn rotate_to_start(&mut self, chosen_index: usize) -> Result<&RankMap, SeatingError> {
        let k = self.participants.len();
        if chosen_index >= k {
            return Err(SeatingError::IndexOutOfRange {
                index: chosen_index,
                len: k,
            });
        }

        if self.is_ranked() {
            for rank in self.ranks.values_mut() {
                *rank = ((*rank as usize + k - chosen_index - 1) % k + 1) as Rank;
            }
            tracing::debug!(chosen_index, count = k, "ranks rotated");
        } else {
            if !self.ranks.is_empty() {
                tracing::warn!(
                    entries = self.ranks.len(),
                    count = k,
                    "discarding inconsistent ranks before assigning start player"
                );
            }
            let mut ranks = RankMap::with_capacity(k);
            for (i, member) in self.participants.iter().enumerate() {
                ranks.insert(member.id(), ((i + k - chosen_index) % k + 1) as Rank);
            }
            self.ranks = ranks;
            tracing::debug!(chosen_index, count = k, "ranks assigned from start player");
        }

        Ok(&self.ranks)
    }

    /// Move the participant in seat `from` (0-based) to seat `to` (0-based).
    ///
    /// Only the seats between the two positions shift, each by one, toward
    /// the vacated seat; the mover lands on rank `to + 1`.
    ///
    /// # Returns
    /// - `Ok(true)` if the move was applied (or `from == to`)
    /// - `Ok(false)` if there is no established order to move within
    /// - `Err(SeatOutOfRange)` if either position is past the last seat
    pub fn move_seat(&mut self, from: usize, to: usize) -> Result<bool, SeatingError> {
        if !self.is_ranked() {
            tracing::debug!(from, to, "move ignored, no established order");
            return Ok(false);
        }

        let k = self.participants.len();
        for position in [from, to] {
            if position >= k {
                return Err(SeatingError::SeatOutOfRange { position, len: k });
            }
        }
        if from == to {
            return Ok(true);
        }

        let source = from as Rank + 1;
        let target = to as Rank + 1;
        // Ranked guarantees every seat in 1..=k has a holder
        let mover = self
            .ranks
            .holder_of(source)
            .cloned()
            .ok_or(SeatingError::SeatOutOfRange { position: from, len: k })?;

        for rank in self.ranks.values_mut() {
            if from < to {
                // moving later: (source, target] slide up one seat
                if *rank > source && *rank <= target {
                    *rank -= 1;
                }
            } else if *rank >= target && *rank < source {
                // moving earlier: [target, source) slide down one seat
                *rank += 1;
            }
        }
        self.ranks.insert(mover.clone(), target);

        tracing::debug!(participant = %mover, from, to, "seat moved");
        Ok(true)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    #[inline]
    pub fn ranks(&self) -> &RankMap {
        &self.ranks
    }

    #[inline]
    pub fn rank_of(&self, id: &ParticipantId) -> Option<Rank> {
        self.ranks.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants sorted by rank, or `None` while unranked.
    pub fn seating_order(&self) -> Option<Vec<&Participant>> {
        if !self.is_ranked() {
            return None;
        }
        let mut seated: Vec<(Rank, &Participant)> = self
            .participants
            .iter()
            .filter_map(|p| self.ranks.get(&p.id()).map(|rank| (rank, p)))
            .collect();
        seated.sort_unstable_by_key(|(rank, _)| *rank);
        Some(seated.into_iter().map(|(_, p)| p).collect())
    }
}
