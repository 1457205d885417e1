//! Pairing, MatchResult and Round: one board of a round, and the round itself.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Outcome of a single game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchResult {
    WhiteWin,
    BlackWin,
    Draw,
}

/// A single board: white against black, or a bye when `black_player` is `None`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub round: u32,
    pub white_player: PlayerId,
    /// None for a bye.
    pub black_player: Option<PlayerId>,
    pub white_player_name: String,
    pub black_player_name: Option<String>,
    /// None if not yet played (always None for a bye).
    pub result: Option<MatchResult>,
}

impl Pairing {
    pub fn game(round: u32, white: &Player, black: &Player) -> Self {
        Self {
            round,
            white_player: white.id,
            black_player: Some(black.id),
            white_player_name: white.name.clone(),
            black_player_name: Some(black.name.clone()),
            result: None,
        }
    }

    pub fn bye(round: u32, player: &Player) -> Self {
        Self {
            round,
            white_player: player.id,
            black_player: None,
            white_player_name: player.name.clone(),
            black_player_name: None,
            result: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.black_player.is_none()
    }

    /// A bye counts as decided; a game once it has a result.
    pub fn is_decided(&self) -> bool {
        self.is_bye() || self.result.is_some()
    }

    /// Whether `player` sits at this board.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.white_player == player || self.black_player == Some(player)
    }

    /// Player advancing from this board: the bye holder, or the winner of a decisive game.
    pub fn winner(&self) -> Option<PlayerId> {
        match (self.black_player, self.result) {
            (None, _) => Some(self.white_player),
            (Some(_), Some(MatchResult::WhiteWin)) => Some(self.white_player),
            (Some(black), Some(MatchResult::BlackWin)) => Some(black),
            _ => None,
        }
    }

    /// Player knocked out by this board, if any.
    pub fn loser(&self) -> Option<PlayerId> {
        match (self.black_player, self.result) {
            (Some(black), Some(MatchResult::WhiteWin)) => Some(black),
            (Some(_), Some(MatchResult::BlackWin)) => Some(self.white_player),
            _ => None,
        }
    }
}

/// One round of the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based.
    pub number: u32,
    pub pairings: Vec<Pairing>,
    /// True when every pairing has a result or is a bye.
    pub complete: bool,
}

impl Round {
    pub fn new(number: u32, pairings: Vec<Pairing>) -> Self {
        let mut round = Self {
            number,
            pairings,
            complete: false,
        };
        round.refresh_completion();
        round
    }

    pub fn is_complete(&self) -> bool {
        self.pairings.iter().all(Pairing::is_decided)
    }

    /// Recompute `complete` after a result changes.
    pub fn refresh_completion(&mut self) {
        self.complete = self.is_complete();
    }

    pub fn bye_count(&self) -> usize {
        self.pairings.iter().filter(|p| p.is_bye()).count()
    }
}
