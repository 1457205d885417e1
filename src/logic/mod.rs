//! Tournament business logic: registry, pairing generators, lifecycle, result tracking.

pub mod elimination;
mod lifecycle;
mod registry;
pub mod round_robin;
mod tracker;
mod verify;

pub use lifecycle::{advance_round, cancel_tournament, start_tournament};
pub use registry::{list_players, register_player};
pub use tracker::{
    pairings_for_round, record_result, standings, BracketLine, ScoreLine, Standings,
};
pub use verify::verify_round;
