//! In-memory tournament store with one writer at a time per tournament.
//!
//! Each entry holds a committed snapshot and a writer gate. Writers queue on the gate,
//! apply their change to a private copy and publish it only on success, so a failed
//! operation leaves nothing behind. Readers take the committed snapshot and never wait
//! for a writer's computation.

use crate::models::{Resource, Tournament, TournamentError, TournamentId};
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Default bound on how long a writer waits behind another writer.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

struct TournamentEntry {
    writer: Mutex<()>,
    committed: RwLock<Arc<Tournament>>,
}

impl TournamentEntry {
    fn new(tournament: Tournament) -> Self {
        Self {
            writer: Mutex::new(()),
            committed: RwLock::new(Arc::new(tournament)),
        }
    }

    // The lock only guards an Arc swap, so a poisoned lock still holds a valid snapshot.
    fn load(&self) -> Arc<Tournament> {
        self.committed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, tournament: Tournament) -> Arc<Tournament> {
        let snapshot = Arc::new(tournament);
        *self
            .committed
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        snapshot
    }
}

/// Tournaments keyed by id.
pub struct TournamentStore {
    tournaments: DashMap<TournamentId, Arc<TournamentEntry>>,
    write_timeout: Duration,
}

impl Default for TournamentStore {
    fn default() -> Self {
        Self::new(DEFAULT_WRITE_TIMEOUT)
    }
}

impl TournamentStore {
    pub fn new(write_timeout: Duration) -> Self {
        Self {
            tournaments: DashMap::new(),
            write_timeout,
        }
    }

    fn entry(&self, id: TournamentId) -> Result<Arc<TournamentEntry>, TournamentError> {
        self.tournaments
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(TournamentError::NotFound(Resource::Tournament(id)))
    }

    /// Add a new tournament and return its committed snapshot.
    pub fn insert(&self, tournament: Tournament) -> Arc<Tournament> {
        let entry = Arc::new(TournamentEntry::new(tournament));
        let snapshot = entry.load();
        self.tournaments.insert(snapshot.id, entry);
        snapshot
    }

    /// Latest committed state of one tournament.
    pub fn get(&self, id: TournamentId) -> Result<Arc<Tournament>, TournamentError> {
        Ok(self.entry(id)?.load())
    }

    /// Latest committed state of every tournament, oldest first.
    pub fn list(&self) -> Vec<Arc<Tournament>> {
        let mut all: Vec<Arc<Tournament>> = self
            .tournaments
            .iter()
            .map(|entry| entry.value().load())
            .collect();
        all.sort_by_key(|t| (t.created_at, t.id));
        all
    }

    /// Run `op` as the only writer of tournament `id`.
    ///
    /// Waits behind the current writer for at most the configured timeout. The change is
    /// committed only when `op` succeeds; the returned snapshot is the committed state.
    pub async fn update<T, F>(
        &self,
        id: TournamentId,
        op: F,
    ) -> Result<(T, Arc<Tournament>), TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    {
        let entry = self.entry(id)?;
        let _writer = timeout(self.write_timeout, entry.writer.lock())
            .await
            .map_err(|_| {
                log::warn!("Tournament {id}: gave up waiting for writer after {:?}", self.write_timeout);
                TournamentError::Timeout
            })?;
        let mut draft = Tournament::clone(&entry.load());
        let value = op(&mut draft)?;
        Ok((value, entry.publish(draft)))
    }
}
