//! Invariant checks run on every generated round before it is stored.

use crate::models::{InvariantViolation, PlayerId, Round, Tournament, TournamentFormat};
use std::collections::HashSet;

fn matchup(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Check `candidate` against the tournament it is about to join.
///
/// Every player must be on the roster and sit at most once in the round. Round-robin
/// additionally allows one bye per round and forbids a repeated matchup or a second bye.
pub fn verify_round(tournament: &Tournament, candidate: &Round) -> Result<(), InvariantViolation> {
    let expected = tournament.current_round() + 1;
    if candidate.number != expected {
        return Err(InvariantViolation::RoundOutOfSequence {
            expected,
            actual: candidate.number,
        });
    }

    let mut seated = HashSet::new();
    for pairing in &candidate.pairings {
        for player in std::iter::once(pairing.white_player).chain(pairing.black_player) {
            if tournament.player(player).is_none() {
                return Err(InvariantViolation::UnknownPlayer(player));
            }
            if !seated.insert(player) {
                return Err(InvariantViolation::PlayerTwiceInRound {
                    round: candidate.number,
                    player,
                });
            }
        }
    }

    // Elimination brackets pad with as many byes as the bracket needs.
    if tournament.format == TournamentFormat::RoundRobin {
        if candidate.bye_count() > 1 {
            return Err(InvariantViolation::MultipleByes(candidate.number));
        }
        let played = tournament.rounds.iter().flat_map(|r| &r.pairings);
        let mut met = HashSet::new();
        let mut had_bye = HashSet::new();
        for pairing in played {
            match pairing.black_player {
                Some(black) => {
                    met.insert(matchup(pairing.white_player, black));
                }
                None => {
                    had_bye.insert(pairing.white_player);
                }
            }
        }
        for pairing in &candidate.pairings {
            match pairing.black_player {
                Some(black) if met.contains(&matchup(pairing.white_player, black)) => {
                    return Err(InvariantViolation::RepeatedMatchup(
                        pairing.white_player,
                        black,
                    ));
                }
                None if had_bye.contains(&pairing.white_player) => {
                    return Err(InvariantViolation::RepeatedBye(pairing.white_player));
                }
                _ => {}
            }
        }
    }
    Ok(())
}
