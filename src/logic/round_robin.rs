//! Round-robin pairings: circle method (Berger tables).
//!
//! Seats follow registration order; an odd roster gets a bye seat in front, so the
//! bye is the fixed seat. Seat 0 stays put while the other seats move one position
//! per round. Table `i` pairs position `i` with position `m - 1 - i`, so every seat
//! meets every other seat exactly once over `m - 1` rounds.

use crate::models::{Pairing, Player};

/// Seat list for the circle: the roster, preceded by `None` (the bye seat) on odd rosters.
fn seats(roster: &[Player]) -> Vec<Option<&Player>> {
    let bye = (roster.len() % 2 == 1).then_some(None);
    bye.into_iter().chain(roster.iter().map(Some)).collect()
}

/// Number of rounds in the full schedule for this roster.
pub fn round_count(roster: &[Player]) -> u32 {
    if roster.len() < 2 {
        return 0;
    }
    (seats(roster).len() - 1) as u32
}

/// Pairings for one round (1-based), ordered by table.
///
/// Colors: at table 0 the fixed seat has white in rounds 1, 3, 5...; at other tables
/// the upper position has white on odd tables. Moving seats therefore alternate
/// colors round by round. Returns an empty list for fewer than two players or a
/// round outside the schedule.
pub fn round_pairings(roster: &[Player], round: u32) -> Vec<Pairing> {
    if round == 0 || round > round_count(roster) {
        return Vec::new();
    }
    let seats = seats(roster);
    let m = seats.len();
    let rotating = m - 1;
    let shift = (round as usize - 1) % rotating;

    let seat_at = |position: usize| {
        if position == 0 {
            seats[0]
        } else {
            seats[(position - 1 + rotating - shift) % rotating + 1]
        }
    };

    (0..m / 2)
        .filter_map(|table| {
            let upper = seat_at(table);
            let lower = seat_at(m - 1 - table);
            let upper_white = if table == 0 {
                shift % 2 == 0
            } else {
                table % 2 == 1
            };
            let (white, black) = if upper_white {
                (upper, lower)
            } else {
                (lower, upper)
            };
            match (white, black) {
                (Some(w), Some(b)) => Some(Pairing::game(round, w, b)),
                (Some(p), None) | (None, Some(p)) => Some(Pairing::bye(round, p)),
                (None, None) => None,
            }
        })
        .collect()
}

/// The whole schedule, round 1 first.
pub fn schedule(roster: &[Player]) -> Vec<Vec<Pairing>> {
    (1..=round_count(roster))
        .map(|round| round_pairings(roster, round))
        .collect()
}
