//! Tournament, TournamentStatus, TournamentFormat and the error taxonomy.

use crate::models::game::Round;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Longest accepted tournament name, in characters.
pub const MAX_TOURNAMENT_NAME_LEN: usize = 100;

/// Fewest registered players a tournament can start with.
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Something the caller asked for that does not exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resource {
    Tournament(TournamentId),
    Round(u32),
    Pairing { round: u32, index: usize },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Tournament(id) => write!(f, "tournament {id}"),
            Resource::Round(round) => write!(f, "round {round}"),
            Resource::Pairing { round, index } => write!(f, "pairing {index} of round {round}"),
        }
    }
}

/// A broken engine invariant. Never caused by caller input.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("players {0} and {1} paired more than once")]
    RepeatedMatchup(PlayerId, PlayerId),
    #[error("player {player} appears twice in round {round}")]
    PlayerTwiceInRound { round: u32, player: PlayerId },
    #[error("round {0} has more than one bye")]
    MultipleByes(u32),
    #[error("player {0} received a second bye")]
    RepeatedBye(PlayerId),
    #[error("player {0} is not on the roster")]
    UnknownPlayer(PlayerId),
    #[error("pairing {index} of round {round} has no winner")]
    NoWinner { round: u32, index: usize },
    #[error("generated round {actual} where round {expected} was due")]
    RoundOutOfSequence { expected: u32, actual: u32 },
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Malformed input; the caller can correct it.
    #[error("{0}")]
    Validation(String),
    /// Operation not allowed in the current lifecycle state.
    #[error("cannot {action} a tournament that is {status}")]
    InvalidState {
        action: &'static str,
        status: TournamentStatus,
    },
    #[error("{0} not found")]
    NotFound(Resource),
    /// A player with this name already exists (case-insensitive).
    #[error("player '{0}' is already registered for this tournament")]
    DuplicatePlayer(String),
    #[error("at least 2 players are required to start (registered {registered})")]
    InsufficientPlayers { registered: usize },
    /// A different result was already recorded for this pairing.
    #[error("a different result is already recorded for pairing {index} of round {round}")]
    AlreadyRecorded { round: u32, index: usize },
    /// The previous elimination round still has undecided pairings.
    #[error("round {0} is not complete yet")]
    NotReady(u32),
    /// Waited too long for another writer on the same tournament.
    #[error("tournament is busy, try again")]
    Timeout,
    /// Internal defect; must not be shown to clients as their fault.
    #[error("internal invariant violated: {0}")]
    Defect(#[from] InvariantViolation),
}

impl TournamentError {
    pub fn validation(message: impl Into<String>) -> Self {
        TournamentError::Validation(message.into())
    }

    pub fn is_defect(&self) -> bool {
        matches!(self, TournamentError::Defect(_))
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TournamentError::Validation(_) => "VALIDATION_ERROR",
            TournamentError::InvalidState { .. } => "INVALID_STATE",
            TournamentError::NotFound(Resource::Tournament(_)) => "TOURNAMENT_NOT_FOUND",
            TournamentError::NotFound(_) => "NOT_FOUND",
            TournamentError::DuplicatePlayer(_) => "PLAYER_ALREADY_REGISTERED",
            TournamentError::InsufficientPlayers { .. } => "INSUFFICIENT_PLAYERS",
            TournamentError::AlreadyRecorded { .. } => "ALREADY_RECORDED",
            TournamentError::NotReady(_) => "NOT_READY",
            TournamentError::Timeout => "TIMEOUT",
            TournamentError::Defect(_) => "INTERNAL_ERROR",
        }
    }
}

/// Pairing system of the tournament. Fixed at creation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    RoundRobin,
    SingleElimination,
}

impl TournamentFormat {
    /// Rounds needed for `players` entrants: n-1 (even) or n (odd) for round-robin,
    /// ceil(log2 n) for single elimination. Zero when fewer than two players.
    pub fn total_rounds(self, players: usize) -> u32 {
        if players < MIN_PLAYERS_TO_START {
            return 0;
        }
        match self {
            TournamentFormat::RoundRobin => {
                let seats = players + players % 2;
                (seats - 1) as u32
            }
            TournamentFormat::SingleElimination => players.next_power_of_two().trailing_zeros(),
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Accepting registrations; no rounds yet.
    #[default]
    Planned,
    /// Roster frozen, rounds being played.
    InProgress,
    /// Final round decided.
    Completed,
    /// Stopped by an administrator; history kept.
    Cancelled,
}

impl TournamentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TournamentStatus::Completed | TournamentStatus::Cancelled)
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentStatus::Planned => "PLANNED",
            TournamentStatus::InProgress => "IN_PROGRESS",
            TournamentStatus::Completed => "COMPLETED",
            TournamentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Full tournament state: roster, rounds and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(rename = "type")]
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    /// Roster in registration order.
    pub players: Vec<Player>,
    /// Generated rounds, round 1 first.
    pub rounds: Vec<Round>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Planned state with no players.
    ///
    /// The name must be non-empty and the start date must not be in the past.
    pub fn create(
        name: &str,
        description: &str,
        start_date: NaiveDate,
        format: TournamentFormat,
    ) -> Result<Self, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::validation("Tournament name cannot be empty"));
        }
        if name.chars().count() > MAX_TOURNAMENT_NAME_LEN {
            return Err(TournamentError::validation(format!(
                "Tournament name cannot be longer than {MAX_TOURNAMENT_NAME_LEN} characters"
            )));
        }
        if start_date < Utc::now().date_naive() {
            return Err(TournamentError::validation(
                "Tournament start date must not be in the past",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.trim().to_string(),
            start_date,
            format,
            status: TournamentStatus::Planned,
            players: Vec::new(),
            rounds: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Round by 1-based number.
    pub fn round(&self, number: u32) -> Option<&Round> {
        let idx = (number as usize).checked_sub(1)?;
        self.rounds.get(idx)
    }

    pub fn round_mut(&mut self, number: u32) -> Option<&mut Round> {
        let idx = (number as usize).checked_sub(1)?;
        self.rounds.get_mut(idx)
    }

    /// Number of the latest generated round (0 before start).
    pub fn current_round(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Rounds the format prescribes for the current roster.
    pub fn total_rounds(&self) -> u32 {
        self.format.total_rounds(self.players.len())
    }

    pub fn latest_round(&self) -> Option<&Round> {
        self.rounds.last()
    }
}
