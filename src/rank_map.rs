//! Rank Map - participant identity to 1-based seat number.
//!
//! Ranks are plain integers in memory. Storage keeps them as decimal
//! strings, so conversion happens here and nowhere else.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::SeatingError;
use crate::participant::{ParticipantId, ParticipantSet};

/// 1-based seat / turn position.
pub type Rank = u32;

/// Whether a rank map describes a usable seating order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RankState {
    /// Empty, incomplete, or otherwise not a clean `1..=k` permutation
    Unranked,
    /// Every participant holds exactly one of the ranks `1..=k`
    Ranked,
}

/// Mapping from participant identity to rank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankMap {
    ranks: FxHashMap<ParticipantId, Rank>,
}

impl RankMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ranks: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, id: &ParticipantId) -> Option<Rank> {
        self.ranks.get(id).copied()
    }

    #[inline]
    pub fn insert(&mut self, id: ParticipantId, rank: Rank) -> Option<Rank> {
        self.ranks.insert(id, rank)
    }

    #[inline]
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Rank> {
        self.ranks.remove(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Rank)> {
        self.ranks.iter().map(|(id, rank)| (id, *rank))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Rank> {
        self.ranks.values_mut()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&ParticipantId) -> bool) {
        self.ranks.retain(|id, _| keep(id));
    }

    /// Find who currently holds `rank`.
    pub fn holder_of(&self, rank: Rank) -> Option<&ParticipantId> {
        self.ranks
            .iter()
            .find_map(|(id, r)| (*r == rank).then_some(id))
    }

    /// Classify this map against the current participant set.
    ///
    /// Ranked means: one entry per participant, no entries for anyone else,
    /// and the values are exactly `1..=k`.
    pub fn state_for(&self, participants: &ParticipantSet) -> RankState {
        let k = participants.len();
        if k == 0 || self.ranks.len() != k {
            return RankState::Unranked;
        }

        let mut seen = FxHashSet::with_capacity_and_hasher(k, Default::default());
        for member in participants {
            match self.ranks.get(&member.id()) {
                Some(&rank) if rank >= 1 && rank as usize <= k && seen.insert(rank) => {}
                _ => return RankState::Unranked,
            }
        }
        RankState::Ranked
    }

    // ========================================================================
    // Storage Boundary
    // ========================================================================

    /// Render ranks as the strings the storage layer persists.
    pub fn to_storage(&self) -> FxHashMap<ParticipantId, String> {
        self.ranks
            .iter()
            .map(|(id, rank)| (id.clone(), rank.to_string()))
            .collect()
    }

    /// Rebuild a map from stored strings.
    ///
    /// Values that are not positive integers are dropped; the resulting map
    /// is then incomplete and classifies as [`RankState::Unranked`].
    pub fn from_storage<I, K, V>(stored: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ParticipantId>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (id, value) in stored {
            let id = id.into();
            match parse_rank(value.as_ref()) {
                Ok(rank) => {
                    map.ranks.insert(id, rank);
                }
                Err(err) => {
                    tracing::warn!(participant = %id, error = %err, "dropping stored rank");
                }
            }
        }
        map
    }
}

/// Parse a stored rank. Only positive decimal integers are accepted.
pub fn parse_rank(value: &str) -> Result<Rank, SeatingError> {
    match value.trim().parse::<Rank>() {
        Ok(rank) if rank >= 1 => Ok(rank),
        _ => Err(SeatingError::InvalidRank {
            value: value.to_owned(),
        }),
    }
}

impl FromIterator<(ParticipantId, Rank)> for RankMap {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, Rank)>>(iter: T) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}
