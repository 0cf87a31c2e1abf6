//! In-memory [`Store`] with optional JSON snapshot persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use scorecard_core::error::CoreError;
use scorecard_core::identity::{Actor, Directory, NewActor, ReportingLine};
use scorecard_core::scorecard::Scorecard;
use scorecard_core::types::DbId;
use tokio::sync::RwLock;

use crate::seed;
use crate::snapshot::Snapshot;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Default)]
struct State {
    directory: Directory,
    documents: BTreeMap<DbId, Scorecard>,
}

impl State {
    fn from_snapshot(snapshot: Snapshot) -> Result<Self, CoreError> {
        let directory = Directory::from_actors(snapshot.actors)?;
        let mut documents = BTreeMap::new();
        for doc in snapshot.scorecards {
            let id = doc.id().ok_or_else(|| {
                CoreError::Validation("Stored scorecard is missing its id".to_string())
            })?;
            if documents.insert(id, doc).is_some() {
                return Err(CoreError::Conflict(format!("Duplicate scorecard id {id}")));
            }
        }
        Ok(Self {
            directory,
            documents,
        })
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            actors: self.directory.actors().cloned().collect(),
            scorecards: self.documents.values().cloned().collect(),
        }
    }

    fn next_document_id(&self) -> DbId {
        self.documents.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Thread-safe in-memory store.
///
/// Each mutation is applied to a staged copy of the state, written to the
/// snapshot file (when one is configured) and only then committed, so a
/// failed write leaves both memory and disk unchanged.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// An empty store with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the demo team and scorecard.
    pub fn seeded() -> Result<Self, StoreError> {
        Self::from_snapshot(seed::demo_snapshot()?)
    }

    /// A store holding the contents of `snapshot`, with no backing file.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        Ok(Self {
            state: RwLock::new(State::from_snapshot(snapshot)?),
            snapshot_path: None,
        })
    }

    /// Load the store from `path`, or start fresh if the file is missing
    /// (seeded with demo data when `seed_if_missing` is set). The file is
    /// kept in sync with every later mutation.
    pub async fn open(path: impl AsRef<Path>, seed_if_missing: bool) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match Snapshot::load(&path).await? {
            Some(snapshot) => {
                tracing::info!(
                    path = %path.display(),
                    actors = snapshot.actors.len(),
                    scorecards = snapshot.scorecards.len(),
                    "Loaded store snapshot",
                );
                snapshot
            }
            None if seed_if_missing => {
                tracing::info!(path = %path.display(), "No snapshot found, seeding demo data");
                seed::demo_snapshot()?
            }
            None => {
                tracing::info!(path = %path.display(), "No snapshot found, starting empty");
                Snapshot::default()
            }
        };

        let store = Self {
            state: RwLock::new(State::from_snapshot(snapshot)?),
            snapshot_path: Some(path),
        };
        store.flush().await?;
        Ok(store)
    }

    /// Write the current state to the snapshot file, if one is configured.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let state = self.state.read().await;
        self.persist(&state).await
    }

    async fn persist(&self, state: &State) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        state.to_snapshot().write(path).await.inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write store snapshot");
        })
    }

    /// Apply `mutate` to a copy of the state, persist it, then commit.
    async fn mutate<T, F>(&self, mutate: F) -> Result<T, StoreError>
    where
        T: Send,
        F: FnOnce(&mut State) -> Result<T, CoreError> + Send,
    {
        let mut state = self.state.write().await;
        let mut staged = state.clone();
        let value = mutate(&mut staged)?;
        self.persist(&staged).await?;
        *state = staged;
        Ok(value)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_actor(&self, id: DbId) -> Result<Option<Actor>, StoreError> {
        Ok(self.state.read().await.directory.get(id).cloned())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, StoreError> {
        Ok(self.state.read().await.directory.actors().cloned().collect())
    }

    async fn create_actor(&self, input: NewActor) -> Result<Actor, StoreError> {
        let actor = self.mutate(|state| state.directory.insert(input)).await?;
        tracing::info!(actor_id = actor.id, role = %actor.role, "Actor created");
        Ok(actor)
    }

    async fn update_actor(&self, actor: Actor) -> Result<Actor, StoreError> {
        let actor = self.mutate(|state| state.directory.update(actor)).await?;
        tracing::info!(actor_id = actor.id, role = %actor.role, "Actor updated");
        Ok(actor)
    }

    async fn delete_actor(&self, id: DbId) -> Result<Actor, StoreError> {
        let actor = self
            .mutate(|state| {
                let owned = state
                    .documents
                    .values()
                    .filter(|doc| doc.is_owned_by(id))
                    .count();
                if owned > 0 {
                    return Err(CoreError::Conflict(format!(
                        "Actor {id} owns {owned} scorecard(s) and cannot be deleted"
                    )));
                }
                state.directory.remove(id)
            })
            .await?;
        tracing::info!(actor_id = id, "Actor deleted");
        Ok(actor)
    }

    async fn directory(&self) -> Result<Directory, StoreError> {
        Ok(self.state.read().await.directory.clone())
    }

    async fn get_document(&self, id: DbId) -> Result<Option<Scorecard>, StoreError> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn list_documents(&self) -> Result<Vec<Scorecard>, StoreError> {
        Ok(self.state.read().await.documents.values().cloned().collect())
    }

    async fn list_documents_by_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<Scorecard>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .values()
            .filter(|doc| doc.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn list_documents_by_manager(
        &self,
        manager_id: DbId,
    ) -> Result<Vec<Scorecard>, StoreError> {
        let state = self.state.read().await;
        let reports = state.directory.reports_of(manager_id);
        Ok(state
            .documents
            .values()
            .filter(|doc| reports.contains(&doc.owner().id))
            .cloned()
            .collect())
    }

    async fn create_document(&self, doc: Scorecard) -> Result<Scorecard, StoreError> {
        let doc = self
            .mutate(|state| {
                state.directory.require(doc.owner().id)?;
                let mut doc = doc;
                let id = state.next_document_id();
                doc.mark_persisted(id, 1);
                state.documents.insert(id, doc.clone());
                Ok(doc)
            })
            .await?;
        tracing::info!(
            scorecard_id = ?doc.id(),
            owner_id = doc.owner().id,
            status = ?doc.status(),
            "Scorecard created",
        );
        Ok(doc)
    }

    async fn save_document(&self, id: DbId, doc: Scorecard) -> Result<Scorecard, StoreError> {
        self.mutate(|state| {
            let stored = state
                .documents
                .get(&id)
                .ok_or(CoreError::NotFound {
                    entity: "Scorecard",
                    id,
                })?;
            if stored.version() != doc.version() {
                return Err(CoreError::Conflict(format!(
                    "Scorecard {id} was modified concurrently (expected version {}, found {})",
                    doc.version(),
                    stored.version()
                )));
            }
            if stored.owner().id != doc.owner().id {
                return Err(CoreError::Validation(
                    "Scorecard owner cannot be changed".to_string(),
                ));
            }

            let mut doc = doc;
            let version = stored.version() + 1;
            doc.mark_persisted(id, version);
            state.documents.insert(id, doc.clone());
            Ok(doc)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_document_id_follows_max() {
        let state = State::from_snapshot(seed::demo_snapshot().unwrap()).unwrap();
        assert_eq!(state.next_document_id(), 2);
        assert_eq!(State::default().next_document_id(), 1);
    }

    #[test]
    fn snapshot_without_ids_is_rejected() {
        let mut snapshot = seed::demo_snapshot().unwrap();
        let owner = snapshot.actors[0].clone();
        let draft = Scorecard::new(&owner, None, Vec::new(), chrono::Utc::now()).unwrap();
        snapshot.scorecards.push(draft);
        assert!(State::from_snapshot(snapshot).is_err());
    }
}
