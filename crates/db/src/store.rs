//! The persistence contract.

use async_trait::async_trait;
use scorecard_core::error::CoreError;
use scorecard_core::identity::{Actor, Directory, NewActor};
use scorecard_core::scorecard::Scorecard;
use scorecard_core::types::DbId;

/// Errors raised by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule was violated (missing record, stale version, bad link).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage for actors and scorecard documents.
///
/// Lookups return `Ok(None)` for missing records; mutations of missing
/// records fail with `CoreError::NotFound`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_actor(&self, id: DbId) -> Result<Option<Actor>, StoreError>;

    /// All actors in ascending id order.
    async fn list_actors(&self) -> Result<Vec<Actor>, StoreError>;

    async fn create_actor(&self, input: NewActor) -> Result<Actor, StoreError>;

    async fn update_actor(&self, actor: Actor) -> Result<Actor, StoreError>;

    /// Remove an actor. Fails with `Conflict` while the actor still has
    /// reports or owns scorecards.
    async fn delete_actor(&self, id: DbId) -> Result<Actor, StoreError>;

    /// A consistent copy of the actor directory, used to authorize a
    /// single request.
    async fn directory(&self) -> Result<Directory, StoreError>;

    async fn get_document(&self, id: DbId) -> Result<Option<Scorecard>, StoreError>;

    /// All documents in ascending id order.
    async fn list_documents(&self) -> Result<Vec<Scorecard>, StoreError>;

    async fn list_documents_by_owner(&self, owner_id: DbId)
        -> Result<Vec<Scorecard>, StoreError>;

    /// Documents owned by the manager's current direct reports.
    async fn list_documents_by_manager(
        &self,
        manager_id: DbId,
    ) -> Result<Vec<Scorecard>, StoreError>;

    /// Persist a new document, assigning its id and version 1.
    async fn create_document(&self, doc: Scorecard) -> Result<Scorecard, StoreError>;

    /// Replace document `id`. Fails with `Conflict` unless `doc.version()`
    /// matches the stored version; on success the version is bumped.
    async fn save_document(&self, id: DbId, doc: Scorecard) -> Result<Scorecard, StoreError>;
}
