//! Play records handed to the storage layer once a play is saved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One participant as stored with a play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub username: String,
    /// Empty when no color was picked
    pub color: String,
    /// Seat number as a decimal string, empty when unranked
    pub start_position: String,
}

/// An immutable logged play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub date: NaiveDate,
    pub game_id: u32,
    pub game_name: String,
    pub quantity: u32,
    /// Length in minutes; zero while the timer is still running
    pub length_minutes: u32,
    pub location: String,
    pub incomplete: bool,
    pub no_win_stats: bool,
    pub comments: String,
    pub player_count: usize,
    /// Set only while the timer is running
    pub start_time: Option<DateTime<Utc>>,
    /// When the finished play was last updated; unset while the timer runs
    pub update_timestamp: Option<DateTime<Utc>>,
    pub dirty_timestamp: DateTime<Utc>,
    pub players: Vec<PlayerRecord>,
}
