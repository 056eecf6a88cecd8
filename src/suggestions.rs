//! Suggestions - which locations and players to offer while recording a play.
//!
//! Roster lists and "last play" preferences come from outside as plain data;
//! this module only decides their order and what the current filter keeps.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::participant::Participant;

/// Hours during which the previous play still counts as "just now".
pub const RECENT_PLAY_HOURS: i64 = 6;

/// What was recorded for the most recent play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlay {
    pub time: DateTime<Utc>,
    pub location: String,
    pub players: Vec<Participant>,
}

impl LastPlay {
    /// True if the play ended less than [`RECENT_PLAY_HOURS`] before `now`.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        now - self.time < TimeDelta::hours(RECENT_PLAY_HOURS)
    }
}

/// Everything known about the people this user plays with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    /// Username of the account recording the play
    pub self_username: Option<String>,
    /// Every known player
    pub all_players: Vec<Participant>,
    /// Players who have played at the current location
    pub location_players: Vec<Participant>,
}

/// Locations to offer, best first.
///
/// Blank names are dropped. If the last play was recent its location moves
/// to the front. Only names starting with `filter` (ignoring case) are kept.
pub fn suggest_locations(
    locations: &[String],
    filter: &str,
    last_play: Option<&LastPlay>,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut ordered: Vec<&String> = locations.iter().filter(|l| !l.trim().is_empty()).collect();

    if let Some(last) = last_play.filter(|l| l.is_recent(now)) {
        if let Some(pos) = ordered.iter().position(|l| **l == last.location) {
            let recent = ordered.remove(pos);
            ordered.insert(0, recent);
        }
    }

    let filter = filter.to_lowercase();
    ordered
        .into_iter()
        .filter(|l| l.to_lowercase().starts_with(&filter))
        .cloned()
        .collect()
}

/// Players to offer, best first.
///
/// Order: the recording user, then the last play's players (only when that
/// play was recent and at this same location), then players from this
/// location, then everyone else. Players already added are left out, and
/// `filter` must appear in the name or username (ignoring case).
pub fn suggest_players(
    roster: &Roster,
    location: &str,
    added: &[Participant],
    filter: &str,
    last_play: Option<&LastPlay>,
    now: DateTime<Utc>,
) -> Vec<Participant> {
    let me = roster
        .self_username
        .as_deref()
        .and_then(|name| roster.all_players.iter().find(|p| p.username == name));

    let mut ordered: Vec<&Participant> = Vec::with_capacity(roster.all_players.len());
    if let Some(me) = me {
        ordered.push(me);
    }

    if let Some(last) = last_play.filter(|l| l.is_recent(now) && l.location == location) {
        for player in &last.players {
            if let Some(known) = roster.all_players.iter().find(|p| *p == player) {
                if !ordered.contains(&known) {
                    ordered.push(known);
                }
            }
        }
    }

    for player in &roster.location_players {
        if !ordered.contains(&player) {
            ordered.push(player);
        }
    }

    for player in &roster.all_players {
        let is_me = me.is_some_and(|m| m.username == player.username);
        if !is_me && !ordered.contains(&player) {
            ordered.push(player);
        }
    }

    let filter = filter.to_lowercase();
    ordered
        .into_iter()
        .filter(|p| !added.contains(p))
        .filter(|p| {
            p.name.to_lowercase().contains(&filter) || p.username.to_lowercase().contains(&filter)
        })
        .cloned()
        .collect()
}
