//! Chess tournament manager: pairing and lifecycle engine, per-tournament store, REST API.

pub mod config;
pub mod logic;
pub mod manager;
pub mod models;
pub mod store;
pub mod web;

pub use logic::{
    advance_round, cancel_tournament, list_players, pairings_for_round, record_result,
    register_player, standings, start_tournament, BracketLine, ScoreLine, Standings,
};
pub use manager::{NewTournament, TournamentManager};
pub use models::{
    InvariantViolation, MatchResult, Pairing, Player, PlayerId, Resource, Round, Tournament,
    TournamentError, TournamentFormat, TournamentId, TournamentStatus,
};
pub use store::TournamentStore;
