//! Lifecycle: Planned -> InProgress -> Completed, or Cancelled from any non-terminal state.

use crate::logic::{elimination, round_robin, verify::verify_round};
use crate::models::{
    Round, Tournament, TournamentError, TournamentFormat, TournamentStatus, MIN_PLAYERS_TO_START,
};

/// Build and verify the round that follows the latest one. Does not touch `tournament`.
fn generate_next_round(tournament: &Tournament) -> Result<Round, TournamentError> {
    let number = tournament.current_round() + 1;
    let pairings = match (tournament.format, tournament.latest_round()) {
        (TournamentFormat::RoundRobin, _) => round_robin::round_pairings(&tournament.players, number),
        (TournamentFormat::SingleElimination, None) => elimination::first_round(&tournament.players),
        (TournamentFormat::SingleElimination, Some(previous)) => {
            elimination::next_round(previous, &tournament.players)?
        }
    };
    let round = Round::new(number, pairings);
    verify_round(tournament, &round)?;
    Ok(round)
}

/// Start the tournament: freeze the roster and generate round 1.
///
/// The status only changes once round 1 exists, so a failure leaves the tournament Planned.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Planned {
        return Err(TournamentError::InvalidState {
            action: "start",
            status: tournament.status,
        });
    }
    let registered = tournament.players.len();
    if registered < MIN_PLAYERS_TO_START {
        return Err(TournamentError::InsufficientPlayers { registered });
    }
    let first = generate_next_round(tournament)?;
    tournament.rounds.push(first);
    tournament.status = TournamentStatus::InProgress;
    log::info!(
        "Tournament {} started with {} players, {} rounds planned",
        tournament.id,
        registered,
        tournament.total_rounds()
    );
    Ok(())
}

/// Move past the latest round: generate the next one, or complete the tournament
/// when the latest round was the last.
pub fn advance_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::InvalidState {
            action: "advance",
            status: tournament.status,
        });
    }
    let (number, complete) = match tournament.latest_round() {
        Some(round) => (round.number, round.is_complete()),
        None => (0, true),
    };
    if !complete {
        return Err(TournamentError::NotReady(number));
    }
    if number >= tournament.total_rounds() {
        complete_tournament(tournament);
        return Ok(());
    }
    let next = generate_next_round(tournament)?;
    log::info!(
        "Tournament {}: round {} generated ({} pairings)",
        tournament.id,
        next.number,
        next.pairings.len()
    );
    tournament.rounds.push(next);
    Ok(())
}

/// Advance for as long as the latest round is complete.
pub(crate) fn settle(tournament: &mut Tournament) -> Result<(), TournamentError> {
    while tournament.status == TournamentStatus::InProgress
        && tournament.latest_round().is_some_and(Round::is_complete)
    {
        advance_round(tournament)?;
    }
    Ok(())
}

fn complete_tournament(tournament: &mut Tournament) {
    tournament.status = TournamentStatus::Completed;
    log::info!(
        "Tournament {} completed after {} rounds",
        tournament.id,
        tournament.current_round()
    );
}

/// Cancel the tournament. Roster and rounds are kept.
pub fn cancel_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status.is_terminal() {
        return Err(TournamentError::InvalidState {
            action: "cancel",
            status: tournament.status,
        });
    }
    tournament.status = TournamentStatus::Cancelled;
    log::info!("Tournament {} cancelled", tournament.id);
    Ok(())
}
