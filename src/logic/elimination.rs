//! Single-elimination bracket: seeding, first round with byes, and advancement.

use crate::models::{InvariantViolation, Pairing, Player, Round, TournamentError};
use std::cmp::Reverse;

/// Players in seed order (seed 1 first): rating descending, then registration order, then id.
pub fn seed_order(roster: &[Player]) -> Vec<&Player> {
    let mut seeded: Vec<(usize, &Player)> = roster.iter().enumerate().collect();
    seeded.sort_by_key(|(idx, p)| (Reverse(p.rating), *idx, p.id));
    seeded.into_iter().map(|(_, p)| p).collect()
}

/// 1-based seeds in bracket order for a bracket of `size` slots (a power of two).
///
/// Adjacent entries meet in round 1; for 8 slots: 1 8 4 5 2 7 3 6.
pub fn bracket_slots(size: usize) -> Vec<usize> {
    let mut slots = vec![1];
    while slots.len() < size {
        let width = slots.len() * 2;
        slots = slots
            .iter()
            .flat_map(|&seed| [seed, width + 1 - seed])
            .collect();
    }
    slots
}

/// Round 1 of the bracket. Slots without a player become byes for the seed they face,
/// so byes go to the top seeds. The higher seed plays white.
pub fn first_round(roster: &[Player]) -> Vec<Pairing> {
    if roster.len() < 2 {
        return Vec::new();
    }
    let seeds = seed_order(roster);
    let slots = bracket_slots(seeds.len().next_power_of_two());
    slots
        .chunks_exact(2)
        .map(|pair| {
            let high = seeds[pair[0] - 1];
            match seeds.get(pair[1] - 1) {
                Some(low) => Pairing::game(1, high, low),
                None => Pairing::bye(1, high),
            }
        })
        .collect()
}

/// Next round from the winners of `previous`: winners of boards 2j and 2j+1 meet,
/// the upper board's winner with white.
///
/// Fails with `NotReady` while any board of `previous` is undecided.
pub fn next_round(previous: &Round, roster: &[Player]) -> Result<Vec<Pairing>, TournamentError> {
    if !previous.is_complete() {
        return Err(TournamentError::NotReady(previous.number));
    }
    let number = previous.number + 1;
    let mut winners = Vec::with_capacity(previous.pairings.len());
    for (index, pairing) in previous.pairings.iter().enumerate() {
        let id = pairing.winner().ok_or(InvariantViolation::NoWinner {
            round: previous.number,
            index,
        })?;
        let player = roster
            .iter()
            .find(|p| p.id == id)
            .ok_or(InvariantViolation::UnknownPlayer(id))?;
        winners.push(player);
    }

    let pairings = winners
        .chunks(2)
        .filter_map(|pair| match pair {
            [white, black] => Some(Pairing::game(number, white, black)),
            [single] => Some(Pairing::bye(number, single)),
            _ => None,
        })
        .collect();
    Ok(pairings)
}
