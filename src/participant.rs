//! Participants - identities of the people being seated.
//!
//! A participant is identified by its name plus username. The set keeps
//! insertion order, which is the iteration order used by rotation and
//! randomization; it says nothing about who sits where.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque identity key for a participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Build the key from a display name and an optional account username.
    ///
    /// Backslashes and `|` inside either part are escaped, so the single
    /// unescaped `|` always separates name from username.
    pub fn from_parts(name: &str, username: &str) -> Self {
        let mut key = String::with_capacity(name.len() + username.len() + 1);
        push_escaped(&mut key, name);
        key.push('|');
        push_escaped(&mut key, username);
        Self(key)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn push_escaped(key: &mut String, part: &str) {
    for c in part.chars() {
        if c == '\\' || c == '|' {
            key.push('\\');
        }
        key.push(c);
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A player taking part in a play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Display name
    pub name: String,
    /// Account username (empty for players without an account)
    pub username: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }

    /// A participant without an account.
    pub fn guest(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    #[inline]
    pub fn id(&self) -> ParticipantId {
        ParticipantId::from_parts(&self.name, &self.username)
    }

    /// Human readable label, also the key for favorite-color lookups.
    pub fn description(&self) -> String {
        if self.username.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.username)
        }
    }
}

/// Insertion-ordered set of participants with O(1) membership lookup.
#[derive(Clone, Debug, Default)]
pub struct ParticipantSet {
    /// Participants in insertion order
    members: Vec<Participant>,
    /// Identity -> index into `members`
    index: FxHashMap<ParticipantId, usize>,
}

impl ParticipantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a participant.
    ///
    /// # Returns
    /// `true` if inserted, `false` if an equal participant was already present
    pub fn insert(&mut self, participant: Participant) -> bool {
        let id = participant.id();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.members.len());
        self.members.push(participant);
        true
    }

    /// Remove a participant by identity, keeping the order of the rest.
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let position = self.index.remove(id)?;
        let removed = self.members.remove(position);
        self.reindex_from(position);
        Some(removed)
    }

    /// Remove the participant at `position` in insertion order.
    pub fn remove_at(&mut self, position: usize) -> Option<Participant> {
        if position >= self.members.len() {
            return None;
        }
        let removed = self.members.remove(position);
        self.index.remove(&removed.id());
        self.reindex_from(position);
        Some(removed)
    }

    /// Shift stored indices after a removal at `position`.
    fn reindex_from(&mut self, position: usize) {
        for (i, member) in self.members.iter().enumerate().skip(position) {
            self.index.insert(member.id(), i);
        }
    }

    #[inline]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn position_of(&self, id: &ParticipantId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.members.get(position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.members
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_uses_name_and_username() {
        let a = Participant::new("Alice", "alice42");
        let b = Participant::new("Alice", "");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), Participant::new("Alice", "alice42").id());
    }

    #[test]
    fn test_separator_in_names_does_not_collide() {
        let a = Participant::new("A|b", "");
        let b = Participant::new("A", "b|");
        let c = Participant::new("A\\", "|b");
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_ne!(b.id(), c.id());

        let mut set = ParticipantSet::new();
        assert!(set.insert(a));
        assert!(set.insert(b));
        assert!(set.insert(c));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_plain_key_shape() {
        assert_eq!(Participant::new("Alice", "alice42").id().as_str(), "Alice|alice42");
        assert_eq!(Participant::new("A|b", "").id().as_str(), "A\\|b|");
    }

    #[test]
    fn test_description() {
        assert_eq!(Participant::new("Alice", "alice42").description(), "Alice (alice42)");
        assert_eq!(Participant::guest("Bob").description(), "Bob");
    }

    #[test]
    fn test_insert_ignores_duplicates() {
        let mut set = ParticipantSet::new();
        assert!(set.insert(Participant::guest("A")));
        assert!(set.insert(Participant::guest("B")));
        assert!(!set.insert(Participant::guest("A")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut set = ParticipantSet::new();
        for name in ["A", "B", "C", "D"] {
            set.insert(Participant::guest(name));
        }

        let removed = set.remove(&Participant::guest("B").id());
        assert_eq!(removed, Some(Participant::guest("B")));

        let names: Vec<_> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "D"]);
        assert_eq!(set.position_of(&Participant::guest("D").id()), Some(2));
        assert_eq!(set.remove(&Participant::guest("B").id()), None);
    }

    #[test]
    fn test_remove_at() {
        let mut set = ParticipantSet::new();
        for name in ["A", "B", "C"] {
            set.insert(Participant::guest(name));
        }

        assert_eq!(set.remove_at(0), Some(Participant::guest("A")));
        assert_eq!(set.remove_at(5), None);
        assert_eq!(set.position_of(&Participant::guest("C").id()), Some(1));
        assert!(!set.contains(&Participant::guest("A").id()));
    }
}
