//! Player registry: registration while the tournament is Planned.

use crate::models::{
    Player, PlayerId, Tournament, TournamentError, TournamentStatus, MAX_PLAYER_NAME_LEN,
};

/// Register a player. Names are trimmed and must be unique (case-insensitive);
/// rating must be a positive integer. Only valid while Planned.
pub fn register_player(
    tournament: &mut Tournament,
    name: &str,
    rating: i64,
) -> Result<PlayerId, TournamentError> {
    if tournament.status != TournamentStatus::Planned {
        return Err(TournamentError::InvalidState {
            action: "register players for",
            status: tournament.status,
        });
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::validation("Player name cannot be empty"));
    }
    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(TournamentError::validation(format!(
            "Player name cannot be longer than {MAX_PLAYER_NAME_LEN} characters"
        )));
    }
    let rating = u32::try_from(rating)
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| TournamentError::validation("Player rating must be a positive integer"))?;
    if tournament.players.iter().any(|p| p.has_name(name)) {
        return Err(TournamentError::DuplicatePlayer(name.to_string()));
    }

    let player = Player::new(name, rating);
    let id = player.id;
    tournament.players.push(player);
    Ok(id)
}

/// Roster in registration order.
pub fn list_players(tournament: &Tournament) -> &[Player] {
    &tournament.players
}
