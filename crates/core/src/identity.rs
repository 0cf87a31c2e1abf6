//! Actors and the manager → report relationship.
//!
//! The relationship is stored exactly once, as the report's `manager_id`.
//! A manager's report set is derived from it by [`Directory`], so the
//! "who reports to whom" and "who manages whom" views cannot drift apart.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{Date, DbId};

/// Maximum length for an actor's display name.
pub const MAX_ACTOR_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A person who takes part in the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub role: Role,
    /// Direct manager. Only Contributors carry one.
    #[serde(default)]
    pub manager_id: Option<DbId>,
    pub level: String,
    pub department: String,
    pub date_of_joining: Date,
}

/// DTO for creating a new actor. The id is assigned by the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActor {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub manager_id: Option<DbId>,
    pub level: String,
    pub department: String,
    pub date_of_joining: Date,
}

impl NewActor {
    pub fn into_actor(self, id: DbId) -> Actor {
        Actor {
            id,
            name: self.name,
            role: self.role,
            manager_id: self.manager_id,
            level: self.level,
            department: self.department,
            date_of_joining: self.date_of_joining,
        }
    }
}

/// Validate an actor display name: non-blank and within length limits.
pub fn validate_actor_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Actor name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_ACTOR_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Actor name exceeds maximum length of {MAX_ACTOR_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reporting line lookup
// ---------------------------------------------------------------------------

/// Read-only view of the reporting relationship, as consumed by the
/// workflow engine when authorizing manager reviews.
pub trait ReportingLine {
    /// The direct manager of `report_id`, if any.
    fn manager_of(&self, report_id: DbId) -> Option<DbId>;

    /// Ids of everyone who reports directly to `manager_id`, ascending.
    fn reports_of(&self, manager_id: DbId) -> Vec<DbId>;

    fn is_direct_manager(&self, manager_id: DbId, report_id: DbId) -> bool {
        self.manager_of(report_id) == Some(manager_id)
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// The set of known actors plus a derived reverse index of reports.
///
/// Every mutation re-checks the relationship invariants:
///
/// - only a Contributor may have a manager,
/// - the manager must exist, hold the Manager role and not be the actor itself,
/// - a Manager with reports can be neither removed nor moved to another role.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    actors: BTreeMap<DbId, Actor>,
    reports: BTreeMap<DbId, BTreeSet<DbId>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from existing records, validating every link.
    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> Result<Self, CoreError> {
        let mut directory = Self::new();
        for actor in actors {
            if directory.actors.contains_key(&actor.id) {
                return Err(CoreError::Conflict(format!(
                    "Duplicate actor id {}",
                    actor.id
                )));
            }
            directory.actors.insert(actor.id, actor);
        }

        for actor in directory.actors.values() {
            validate_actor_name(&actor.name)?;
            directory.check_manager_link(actor)?;
        }

        let links: Vec<(DbId, DbId)> = directory
            .actors
            .values()
            .filter_map(|a| a.manager_id.map(|m| (m, a.id)))
            .collect();
        for (manager_id, report_id) in links {
            directory.link(manager_id, report_id);
        }

        Ok(directory)
    }

    pub fn get(&self, id: DbId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Like [`Directory::get`] but reports a missing actor as `NotFound`.
    pub fn require(&self, id: DbId) -> Result<&Actor, CoreError> {
        self.get(id)
            .ok_or(CoreError::NotFound { entity: "Actor", id })
    }

    /// All actors in ascending id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> + Clone {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The id the next inserted actor will receive.
    pub fn next_id(&self) -> DbId {
        self.actors.keys().next_back().map_or(1, |id| id + 1)
    }

    /// Add a new actor, assigning the next free id.
    pub fn insert(&mut self, input: NewActor) -> Result<Actor, CoreError> {
        let actor = input.into_actor(self.next_id());
        validate_actor_name(&actor.name)?;
        self.check_manager_link(&actor)?;

        if let Some(manager_id) = actor.manager_id {
            self.link(manager_id, actor.id);
        }
        self.actors.insert(actor.id, actor.clone());
        Ok(actor)
    }

    /// Replace an existing actor record.
    pub fn update(&mut self, actor: Actor) -> Result<Actor, CoreError> {
        let existing = self.require(actor.id)?;
        validate_actor_name(&actor.name)?;

        if existing.role == Role::Manager
            && actor.role != Role::Manager
            && self.has_reports(actor.id)
        {
            return Err(CoreError::Conflict(format!(
                "Actor {} still has direct reports and must remain a manager",
                actor.id
            )));
        }
        self.check_manager_link(&actor)?;

        let previous_manager = existing.manager_id;
        if let Some(manager_id) = previous_manager {
            self.unlink(manager_id, actor.id);
        }
        if let Some(manager_id) = actor.manager_id {
            self.link(manager_id, actor.id);
        }
        self.actors.insert(actor.id, actor.clone());
        Ok(actor)
    }

    /// Remove an actor. Managers must have their reports reassigned first.
    pub fn remove(&mut self, id: DbId) -> Result<Actor, CoreError> {
        self.require(id)?;
        if self.has_reports(id) {
            return Err(CoreError::Conflict(format!(
                "Actor {id} still has direct reports; reassign them first"
            )));
        }

        let actor = self
            .actors
            .remove(&id)
            .ok_or(CoreError::NotFound { entity: "Actor", id })?;
        if let Some(manager_id) = actor.manager_id {
            self.unlink(manager_id, id);
        }
        Ok(actor)
    }

    fn has_reports(&self, manager_id: DbId) -> bool {
        self.reports
            .get(&manager_id)
            .is_some_and(|reports| !reports.is_empty())
    }

    fn check_manager_link(&self, actor: &Actor) -> Result<(), CoreError> {
        let Some(manager_id) = actor.manager_id else {
            return Ok(());
        };

        if actor.role != Role::Contributor {
            return Err(CoreError::Validation(format!(
                "Only contributors can have a manager (actor {} is a {})",
                actor.id, actor.role
            )));
        }
        if manager_id == actor.id {
            return Err(CoreError::Validation(format!(
                "Actor {} cannot be their own manager",
                actor.id
            )));
        }

        match self.actors.get(&manager_id) {
            Some(manager) if manager.role == Role::Manager => Ok(()),
            Some(other) => Err(CoreError::Validation(format!(
                "Actor {manager_id} is a {} and cannot manage others",
                other.role
            ))),
            None => Err(CoreError::Validation(format!(
                "Manager {manager_id} does not exist"
            ))),
        }
    }

    fn link(&mut self, manager_id: DbId, report_id: DbId) {
        self.reports.entry(manager_id).or_default().insert(report_id);
    }

    fn unlink(&mut self, manager_id: DbId, report_id: DbId) {
        if let Some(reports) = self.reports.get_mut(&manager_id) {
            reports.remove(&report_id);
            if reports.is_empty() {
                self.reports.remove(&manager_id);
            }
        }
    }
}

impl ReportingLine for Directory {
    fn manager_of(&self, report_id: DbId) -> Option<DbId> {
        self.actors.get(&report_id).and_then(|a| a.manager_id)
    }

    fn reports_of(&self, manager_id: DbId) -> Vec<DbId> {
        self.reports
            .get(&manager_id)
            .map(|reports| reports.iter().copied().collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
