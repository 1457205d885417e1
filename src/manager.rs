//! Tournament orchestrator: the operations the API exposes, on top of the store.

use crate::logic::{
    cancel_tournament, list_players, pairings_for_round, record_result, register_player,
    standings, start_tournament, Standings,
};
use crate::models::{
    MatchResult, Pairing, Player, PlayerId, Resource, Round, Tournament, TournamentError,
    TournamentFormat, TournamentId,
};
use crate::store::TournamentStore;
use chrono::NaiveDate;
use std::sync::Arc;

/// Input for creating a tournament.
#[derive(Clone, Debug)]
pub struct NewTournament {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub format: TournamentFormat,
}

fn log_defect(id: TournamentId, err: &TournamentError) {
    if err.is_defect() {
        log::error!("Tournament {id}: {err}");
    }
}

/// Entry point for all tournament operations.
#[derive(Default)]
pub struct TournamentManager {
    store: TournamentStore,
}

impl TournamentManager {
    pub fn new(store: TournamentStore) -> Self {
        Self { store }
    }

    pub fn create_tournament(&self, new: NewTournament) -> Result<Arc<Tournament>, TournamentError> {
        let tournament =
            Tournament::create(&new.name, &new.description, new.start_date, new.format)?;
        let snapshot = self.store.insert(tournament);
        log::info!(
            "Created tournament {} ({:?}) '{}'",
            snapshot.id,
            snapshot.format,
            snapshot.name
        );
        Ok(snapshot)
    }

    pub async fn register_player(
        &self,
        id: TournamentId,
        name: &str,
        rating: i64,
    ) -> Result<PlayerId, TournamentError> {
        let (player_id, _) = self
            .store
            .update(id, |t| register_player(t, name, rating))
            .await?;
        log::info!("Tournament {id}: registered player {player_id}");
        Ok(player_id)
    }

    /// Start the tournament; round 1 is part of the same commit.
    pub async fn start(&self, id: TournamentId) -> Result<Arc<Tournament>, TournamentError> {
        let (_, snapshot) = self
            .store
            .update(id, start_tournament)
            .await
            .inspect_err(|e| log_defect(id, e))?;
        Ok(snapshot)
    }

    pub async fn cancel(&self, id: TournamentId) -> Result<Arc<Tournament>, TournamentError> {
        let (_, snapshot) = self.store.update(id, cancel_tournament).await?;
        Ok(snapshot)
    }

    /// Record one result and return the round it belongs to, as committed.
    pub async fn record_result(
        &self,
        id: TournamentId,
        round: u32,
        index: usize,
        result: MatchResult,
    ) -> Result<Round, TournamentError> {
        let (_, snapshot) = self
            .store
            .update(id, |t| record_result(t, round, index, result))
            .await
            .inspect_err(|e| log_defect(id, e))?;
        let recorded = snapshot
            .round(round)
            .cloned()
            .ok_or(TournamentError::NotFound(Resource::Round(round)))?;
        Ok(recorded)
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Arc<Tournament>, TournamentError> {
        self.store.get(id)
    }

    pub fn tournaments(&self) -> Vec<Arc<Tournament>> {
        self.store.list()
    }

    pub fn players(&self, id: TournamentId) -> Result<Vec<Player>, TournamentError> {
        let tournament = self.store.get(id)?;
        Ok(list_players(&tournament).to_vec())
    }

    /// Pairings of one round; empty if that round does not exist yet.
    pub fn pairings(&self, id: TournamentId, round: u32) -> Result<Vec<Pairing>, TournamentError> {
        let tournament = self.store.get(id)?;
        Ok(pairings_for_round(&tournament, round))
    }

    pub fn rounds(&self, id: TournamentId) -> Result<Vec<Round>, TournamentError> {
        Ok(self.store.get(id)?.rounds.clone())
    }

    pub fn standings(&self, id: TournamentId) -> Result<Standings, TournamentError> {
        let tournament = self.store.get(id)?;
        Ok(standings(&tournament))
    }
}
