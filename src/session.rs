//! New-play session - the step-by-step flow for logging a play.
//!
//! Holds everything the user enters while recording a play (game, location,
//! players, colors, seating, comments, timer) and turns it into a
//! [`PlayRecord`] at the end. Roster lookups and color metadata are resolved
//! by the caller and handed in as plain data.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::colors::{ranked_color_choices, ColorAssignments};
use crate::error::{SeatingError, SessionError};
use crate::participant::{Participant, ParticipantId};
use crate::rank_map::{Rank, RankMap};
use crate::record::{PlayRecord, PlayerRecord};
use crate::seating::OrderMaintainer;
use crate::suggestions::{suggest_locations, suggest_players, LastPlay, Roster};

/// Screens of the new-play flow, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Location,
    Players,
    PlayersColor,
    PlayersSort,
    Comments,
}

/// A participant row as displayed during the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlayPlayer {
    pub participant: Participant,
    /// Empty until a color is picked
    pub color: String,
    /// Colors to offer, best first
    pub favorite_colors: Vec<String>,
    pub rank: Option<Rank>,
}

#[derive(Clone, Debug)]
struct GameRef {
    id: u32,
    name: String,
}

/// In-progress play being recorded.
#[derive(Clone, Debug)]
pub struct NewPlaySession {
    step: Step,
    date: NaiveDate,
    game: Option<GameRef>,
    location: String,
    comments: String,
    seating: OrderMaintainer,
    colors: ColorAssignments,
    game_colors: Vec<String>,
    /// Participant description -> favorite colors
    favorite_colors: FxHashMap<String, Vec<String>>,
    /// Set while the timer runs
    start_time: Option<DateTime<Utc>>,
    /// Accumulated length while the timer is stopped
    length: TimeDelta,
    roster: Roster,
    last_play: Option<LastPlay>,
    location_filter: String,
    player_filter: String,
}

impl NewPlaySession {
    /// Start a session dated today (UTC).
    pub fn new() -> Self {
        Self::starting_on(Utc::now().date_naive())
    }

    pub fn starting_on(date: NaiveDate) -> Self {
        Self {
            step: Step::Location,
            date,
            game: None,
            location: String::new(),
            comments: String::new(),
            seating: OrderMaintainer::new(),
            colors: ColorAssignments::new(),
            game_colors: Vec::new(),
            favorite_colors: FxHashMap::default(),
            start_time: None,
            length: TimeDelta::zero(),
            roster: Roster::default(),
            last_play: None,
            location_filter: String::new(),
            player_filter: String::new(),
        }
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn set_game(&mut self, id: u32, name: impl Into<String>) {
        self.game = Some(GameRef {
            id,
            name: name.into(),
        });
    }

    /// The colors this game offers.
    pub fn set_game_colors(&mut self, colors: Vec<String>) {
        self.game_colors = colors;
    }

    pub fn set_location(&mut self, name: impl Into<String>) {
        self.location = name.into();
        self.step = Step::Players;
    }

    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The previous play, used to float its location and players to the top.
    pub fn set_last_play(&mut self, last_play: Option<LastPlay>) {
        self.last_play = last_play;
    }

    pub fn filter_locations(&mut self, filter: impl Into<String>) {
        self.location_filter = filter.into();
    }

    /// Known locations (most played first) reordered and filtered for display.
    pub fn suggested_locations(&self, locations: &[String], now: DateTime<Utc>) -> Vec<String> {
        suggest_locations(locations, &self.location_filter, self.last_play.as_ref(), now)
    }

    // ========================================================================
    // Players
    // ========================================================================

    /// Replace the known players (all of them, and those seen at this location).
    pub fn set_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    pub fn filter_players(&mut self, filter: impl Into<String>) {
        self.player_filter = filter.into();
    }

    /// Players not yet added, best candidates first.
    pub fn suggested_players(&self, now: DateTime<Utc>) -> Vec<Participant> {
        suggest_players(
            &self.roster,
            &self.location,
            self.seating.participants().as_slice(),
            &self.player_filter,
            self.last_play.as_ref(),
            now,
        )
    }

    pub fn add_player(&mut self, participant: Participant) -> bool {
        self.seating.add(participant)
    }

    /// Favorite colors resolved for a participant, keyed by description.
    pub fn set_favorite_colors(&mut self, participant: &Participant, colors: Vec<String>) {
        self.favorite_colors.insert(participant.description(), colors);
    }

    /// Drop a player along with their color and seat.
    pub fn remove_player(&mut self, id: &ParticipantId) -> Option<Participant> {
        let removed = self.seating.remove(id)?;
        self.colors.unassign(id);
        Some(removed)
    }

    pub fn finish_adding_players(&mut self) {
        self.step = Step::PlayersColor;
    }

    // ========================================================================
    // Colors
    // ========================================================================

    pub fn add_color_to_player(
        &mut self,
        index: usize,
        color: impl Into<String>,
    ) -> Result<(), SessionError> {
        let participants = self.seating.participants();
        let id = participants
            .get(index)
            .map(Participant::id)
            .ok_or(SeatingError::IndexOutOfRange {
                index,
                len: participants.len(),
            })?;
        self.colors.assign(id, color);
        Ok(())
    }

    pub fn finish_player_colors(&mut self) {
        self.step = Step::PlayersSort;
    }

    /// Chosen colors in participant order (empty string when unpicked).
    pub fn selected_colors(&self) -> Vec<String> {
        self.seating
            .participants()
            .iter()
            .map(|p| self.colors.color_of(&p.id()).unwrap_or_default().to_owned())
            .collect()
    }

    // ========================================================================
    // Seating
    // ========================================================================

    pub fn clear_sort_order(&mut self) -> &RankMap {
        self.seating.clear_ranks()
    }

    pub fn randomize_players<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &RankMap {
        self.seating.randomize_with(rng)
    }

    pub fn select_start_player(&mut self, index: usize) -> Result<&RankMap, SessionError> {
        Ok(self.seating.rotate_to_start(index)?)
    }

    /// Drag-reorder; `Ok(false)` when there is no order to move within yet.
    pub fn move_player(&mut self, from: usize, to: usize) -> Result<bool, SessionError> {
        Ok(self.seating.move_seat(from, to)?)
    }

    pub fn finish_player_sort(&mut self) {
        self.step = Step::Comments;
    }

    #[inline]
    pub fn seating(&self) -> &OrderMaintainer {
        &self.seating
    }

    // ========================================================================
    // Comments and Timer
    // ========================================================================

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    #[inline]
    pub fn is_timer_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Start or stop the play timer.
    ///
    /// Starting backdates the start by the length already recorded, so a
    /// stop/start pair keeps accumulating.
    pub fn toggle_timer(&mut self, now: DateTime<Utc>) {
        match self.start_time.take() {
            None => {
                self.start_time = Some(now - self.length);
                self.length = TimeDelta::zero();
                tracing::debug!(start = %now, "timer started");
            }
            Some(start) => {
                self.length = (now - start).max(TimeDelta::zero());
                tracing::debug!(minutes = self.length.num_minutes(), "timer stopped");
            }
        }
    }

    /// Recorded length in whole minutes (zero while the timer runs).
    pub fn length_minutes(&self) -> u32 {
        u32::try_from(self.length.num_minutes()).unwrap_or(0)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Current participant rows for display.
    pub fn players(&self) -> Vec<NewPlayPlayer> {
        self.seating
            .participants()
            .iter()
            .map(|participant| {
                let id = participant.id();
                let favorites = self
                    .favorite_colors
                    .get(&participant.description())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                NewPlayPlayer {
                    participant: participant.clone(),
                    color: self.colors.color_of(&id).unwrap_or_default().to_owned(),
                    favorite_colors: ranked_color_choices(favorites, &self.game_colors, &self.colors),
                    rank: self.seating.rank_of(&id),
                }
            })
            .collect()
    }

    /// Build the record to persist.
    pub fn build_record(&self, now: DateTime<Utc>) -> Result<PlayRecord, SessionError> {
        let game = self.game.as_ref().ok_or(SessionError::MissingGame)?;
        // A gapped or partial order is not worth saving
        let ranks = if self.seating.is_ranked() {
            self.seating.ranks().to_storage()
        } else {
            FxHashMap::default()
        };

        let players: Vec<PlayerRecord> = self
            .seating
            .participants()
            .iter()
            .map(|p| {
                let id = p.id();
                PlayerRecord {
                    name: p.name.clone(),
                    username: p.username.clone(),
                    color: self.colors.color_of(&id).unwrap_or_default().to_owned(),
                    start_position: ranks.get(&id).cloned().unwrap_or_default(),
                }
            })
            .collect();

        tracing::info!(
            game_id = game.id,
            players = players.len(),
            ranked = self.seating.is_ranked(),
            "play record built"
        );

        Ok(PlayRecord {
            date: self.date,
            game_id: game.id,
            game_name: game.name.clone(),
            quantity: 1,
            length_minutes: if self.is_timer_running() { 0 } else { self.length_minutes() },
            location: self.location.clone(),
            incomplete: false,
            no_win_stats: false,
            comments: self.comments.clone(),
            player_count: players.len(),
            start_time: self.start_time,
            update_timestamp: if self.is_timer_running() { None } else { Some(now) },
            dirty_timestamp: now,
            players,
        })
    }
}

impl Default for NewPlaySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 19, minute, 0).unwrap()
    }

    fn session_with(names: &[&str]) -> NewPlaySession {
        let mut session = NewPlaySession::starting_on(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        session.set_game(13, "Catan");
        session.set_location("Home");
        for name in names {
            session.add_player(Participant::guest(*name));
        }
        session
    }

    #[test]
    fn test_steps_advance() {
        let mut session = NewPlaySession::new();
        assert_eq!(session.step(), Step::Location);
        session.set_location("Club");
        assert_eq!(session.step(), Step::Players);
        session.finish_adding_players();
        assert_eq!(session.step(), Step::PlayersColor);
        session.finish_player_colors();
        assert_eq!(session.step(), Step::PlayersSort);
        session.finish_player_sort();
        assert_eq!(session.step(), Step::Comments);
    }

    #[test]
    fn test_color_for_bad_index() {
        let mut session = session_with(&["A"]);
        assert_eq!(
            session.add_color_to_player(3, "Red"),
            Err(SessionError::Seating(SeatingError::IndexOutOfRange { index: 3, len: 1 }))
        );
        session.add_color_to_player(0, "Red").unwrap();
        assert_eq!(session.selected_colors(), vec!["Red".to_string()]);
    }

    #[test]
    fn test_remove_player_drops_color_and_rank() {
        let mut session = session_with(&["A", "B"]);
        session.add_color_to_player(0, "Red").unwrap();
        session.select_start_player(0).unwrap();

        let a = Participant::guest("A").id();
        assert!(session.remove_player(&a).is_some());

        assert_eq!(session.seating().rank_of(&a), None);
        assert_eq!(session.selected_colors(), vec![String::new()]);
        assert!(!session.seating().is_ranked());
    }

    #[test]
    fn test_players_rows() {
        let mut session = session_with(&["A", "B"]);
        session.set_game_colors(vec!["Red".into(), "Blue".into(), "Green".into()]);
        session.set_favorite_colors(&Participant::guest("B"), vec!["Green".into()]);
        session.add_color_to_player(0, "Red").unwrap();
        session.select_start_player(1).unwrap();

        let rows = session.players();
        assert_eq!(rows[0].color, "Red");
        assert_eq!(rows[0].rank, Some(2));
        assert_eq!(rows[0].favorite_colors, vec!["Blue".to_string(), "Green".to_string()]);
        assert_eq!(rows[1].rank, Some(1));
        assert_eq!(rows[1].favorite_colors, vec!["Green".to_string(), "Blue".to_string()]);
    }

    #[test]
    fn test_timer_accumulates() {
        let mut session = session_with(&[]);
        session.toggle_timer(at(0));
        assert!(session.is_timer_running());
        session.toggle_timer(at(20));
        assert_eq!(session.length_minutes(), 20);

        session.toggle_timer(at(30));
        session.toggle_timer(at(45));
        assert_eq!(session.length_minutes(), 35);
    }

    #[test]
    fn test_move_player_needs_order() {
        let mut session = session_with(&["A", "B", "C"]);
        assert_eq!(session.move_player(0, 2), Ok(false));

        session.randomize_players(&mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(session.move_player(0, 2), Ok(true));
        assert!(session.seating().is_ranked());
    }

    #[test]
    fn test_build_record() {
        let mut session = session_with(&["A", "B", "C"]);
        session.add_color_to_player(1, "Blue").unwrap();
        session.select_start_player(2).unwrap();
        session.set_comments("close game");
        session.toggle_timer(at(0));
        session.toggle_timer(at(50));

        let record = session.build_record(at(55)).unwrap();
        assert_eq!(record.game_id, 13);
        assert_eq!(record.game_name, "Catan");
        assert_eq!(record.location, "Home");
        assert_eq!(record.length_minutes, 50);
        assert_eq!(record.start_time, None);
        assert_eq!(record.player_count, 3);
        assert_eq!(record.dirty_timestamp, at(55));

        let seats: Vec<_> = record.players.iter().map(|p| p.start_position.as_str()).collect();
        assert_eq!(seats, ["2", "3", "1"]);
        assert_eq!(record.players[1].color, "Blue");
        assert_eq!(record.players[0].color, "");
    }

    #[test]
    fn test_build_record_while_timing() {
        let mut session = session_with(&["A"]);
        session.toggle_timer(at(5));

        let record = session.build_record(at(10)).unwrap();
        assert_eq!(record.length_minutes, 0);
        assert_eq!(record.start_time, Some(at(5)));
        assert_eq!(record.players[0].start_position, "");
    }

    #[test]
    fn test_build_record_unranked_has_no_seats() {
        let mut session = session_with(&["A", "B", "C"]);
        session.select_start_player(0).unwrap();
        session.remove_player(&Participant::guest("B").id());
        assert!(!session.seating().is_ranked());

        let record = session.build_record(at(30)).unwrap();
        let seats: Vec<_> = record.players.iter().map(|p| p.start_position.as_str()).collect();
        assert_eq!(seats, ["", ""]);
        assert_eq!(record.player_count, 2);
    }

    #[test]
    fn test_build_record_update_timestamp() {
        let mut session = session_with(&["A"]);
        assert_eq!(session.build_record(at(10)).unwrap().update_timestamp, Some(at(10)));

        session.toggle_timer(at(12));
        assert_eq!(session.build_record(at(20)).unwrap().update_timestamp, None);
    }

    #[test]
    fn test_suggested_players_skip_added() {
        let mut session = session_with(&["Bob"]);
        session.set_roster(Roster {
            self_username: Some("ann".into()),
            all_players: vec![
                Participant::guest("Bob"),
                Participant::guest("Cat"),
                Participant::new("Ann", "ann"),
            ],
            location_players: vec![Participant::guest("Cat")],
        });

        let names = |s: &NewPlaySession| -> Vec<String> {
            s.suggested_players(at(0)).into_iter().map(|p| p.name).collect()
        };
        assert_eq!(names(&session), ["Ann", "Cat"]);

        session.filter_players("c");
        assert_eq!(names(&session), ["Cat"]);
    }

    #[test]
    fn test_suggested_locations_follow_last_play() {
        let mut session = session_with(&[]);
        session.set_last_play(Some(LastPlay {
            time: at(0),
            location: "Club".into(),
            players: Vec::new(),
        }));
        let known = vec!["Home".to_string(), "Club".to_string(), String::new()];

        assert_eq!(session.suggested_locations(&known, at(30)), ["Club", "Home"]);

        session.filter_locations("h");
        assert_eq!(session.suggested_locations(&known, at(30)), ["Home"]);
    }

    #[test]
    fn test_build_record_requires_game() {
        let session = NewPlaySession::new();
        assert_eq!(session.build_record(at(0)), Err(SessionError::MissingGame));
    }
}
