//! Round and match tracking: result recording and standings.

use crate::logic::{elimination, lifecycle};
use crate::models::{
    MatchResult, Pairing, PlayerId, Resource, Tournament, TournamentError, TournamentFormat,
    TournamentStatus,
};
use serde::Serialize;

/// Record the result of one board. `index` is 0-based within the round.
///
/// Re-sending the recorded result is a no-op; a different one fails with
/// `AlreadyRecorded`. When the round becomes complete the next round is generated,
/// or the tournament completes after its final round.
pub fn record_result(
    tournament: &mut Tournament,
    round: u32,
    index: usize,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::InvalidState {
            action: "record a result for",
            status: tournament.status,
        });
    }
    let format = tournament.format;
    let target = tournament
        .round_mut(round)
        .ok_or(TournamentError::NotFound(Resource::Round(round)))?;
    let pairing = target
        .pairings
        .get_mut(index)
        .ok_or(TournamentError::NotFound(Resource::Pairing { round, index }))?;

    if pairing.is_bye() {
        return Err(TournamentError::validation(format!(
            "Pairing {index} of round {round} is a bye and takes no result"
        )));
    }
    if format == TournamentFormat::SingleElimination && result == MatchResult::Draw {
        return Err(TournamentError::validation(
            "Elimination games need a decisive result",
        ));
    }
    match pairing.result {
        Some(existing) if existing == result => return Ok(()),
        Some(_) => return Err(TournamentError::AlreadyRecorded { round, index }),
        None => pairing.result = Some(result),
    }
    target.refresh_completion();
    log::debug!(
        "Tournament {}: round {} pairing {} -> {:?}",
        tournament.id,
        round,
        index,
        result
    );

    lifecycle::settle(tournament)
}

/// Pairings of one round; empty when the round has not been generated.
pub fn pairings_for_round(tournament: &Tournament, round: u32) -> Vec<Pairing> {
    tournament
        .round(round)
        .map(|r| r.pairings.clone())
        .unwrap_or_default()
}

/// One round-robin standings line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLine {
    pub player_id: PlayerId,
    pub name: String,
    /// 1 per win or bye, 0.5 per draw.
    pub score: f64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub byes: u32,
}

/// One single-elimination standings line.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketLine {
    pub player_id: PlayerId,
    pub name: String,
    pub seed: u32,
    pub alive: bool,
    /// Latest round the player was paired in (0 before start).
    pub round_reached: u32,
}

/// Standings view, shaped by the tournament format.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "entries", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standings {
    RoundRobin(Vec<ScoreLine>),
    SingleElimination(Vec<BracketLine>),
}

/// Current standings. Round-robin: score descending, then registration order.
/// Single elimination: alive first, then furthest round, then seed.
pub fn standings(tournament: &Tournament) -> Standings {
    match tournament.format {
        TournamentFormat::RoundRobin => Standings::RoundRobin(score_table(tournament)),
        TournamentFormat::SingleElimination => Standings::SingleElimination(bracket_table(tournament)),
    }
}

fn score_table(tournament: &Tournament) -> Vec<ScoreLine> {
    let pairings: Vec<&Pairing> = tournament.rounds.iter().flat_map(|r| &r.pairings).collect();
    let mut lines: Vec<(u32, ScoreLine)> = tournament
        .players
        .iter()
        .map(|player| {
            let mut line = ScoreLine {
                player_id: player.id,
                name: player.name.clone(),
                score: 0.0,
                wins: 0,
                draws: 0,
                losses: 0,
                byes: 0,
            };
            for p in pairings.iter().filter(|p| p.involves(player.id)) {
                if p.is_bye() {
                    line.byes += 1;
                } else if p.result == Some(MatchResult::Draw) {
                    line.draws += 1;
                } else if p.winner() == Some(player.id) {
                    line.wins += 1;
                } else if p.loser() == Some(player.id) {
                    line.losses += 1;
                }
            }
            let half_points = 2 * (line.wins + line.byes) + line.draws;
            line.score = f64::from(half_points) / 2.0;
            (half_points, line)
        })
        .collect();
    // Stable sort keeps registration order among equal scores.
    lines.sort_by(|a, b| b.0.cmp(&a.0));
    lines.into_iter().map(|(_, line)| line).collect()
}

fn bracket_table(tournament: &Tournament) -> Vec<BracketLine> {
    let mut lines: Vec<BracketLine> = elimination::seed_order(&tournament.players)
        .into_iter()
        .enumerate()
        .map(|(idx, player)| {
            let boards = || {
                tournament
                    .rounds
                    .iter()
                    .flat_map(|r| &r.pairings)
                    .filter(|p| p.involves(player.id))
            };
            BracketLine {
                player_id: player.id,
                name: player.name.clone(),
                seed: idx as u32 + 1,
                alive: !boards().any(|p| p.loser() == Some(player.id)),
                round_reached: boards().map(|p| p.round).max().unwrap_or(0),
            }
        })
        .collect();
    lines.sort_by_key(|l| (!l.alive, std::cmp::Reverse(l.round_reached), l.seed));
    lines
}
