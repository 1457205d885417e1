//! Data structures for the chess tournament: players, pairings, rounds, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{MatchResult, Pairing, Round};
pub use player::{Player, PlayerId, MAX_PLAYER_NAME_LEN};
pub use tournament::{
    InvariantViolation, Resource, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentStatus, MAX_TOURNAMENT_NAME_LEN, MIN_PLAYERS_TO_START,
};
