//! Player colors - who plays which color, and which colors to offer next.

use rustc_hash::FxHashMap;

use crate::participant::ParticipantId;

/// Participant -> chosen color.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorAssignments {
    by_participant: FxHashMap<ParticipantId, String>,
}

impl ColorAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a participant's color, returning the one it replaced.
    pub fn assign(&mut self, id: ParticipantId, color: impl Into<String>) -> Option<String> {
        self.by_participant.insert(id, color.into())
    }

    pub fn unassign(&mut self, id: &ParticipantId) -> Option<String> {
        self.by_participant.remove(id)
    }

    #[inline]
    pub fn color_of(&self, id: &ParticipantId) -> Option<&str> {
        self.by_participant.get(id).map(String::as_str)
    }

    /// True if any participant already plays `color`.
    pub fn is_taken(&self, color: &str) -> bool {
        self.by_participant.values().any(|c| c == color)
    }
}

/// Colors to offer a participant, best first.
///
/// Their favorites that this game has and nobody has taken come first, in
/// favorite order. Then the rest of the game's untaken colors, in game order.
pub fn ranked_color_choices(
    favorites: &[String],
    game_colors: &[String],
    assignments: &ColorAssignments,
) -> Vec<String> {
    let mut choices: Vec<String> = favorites
        .iter()
        .filter(|c| game_colors.contains(c) && !assignments.is_taken(c))
        .cloned()
        .collect();

    choices.extend(
        game_colors
            .iter()
            .filter(|c| !favorites.contains(c) && !assignments.is_taken(c))
            .cloned(),
    );

    choices
}
