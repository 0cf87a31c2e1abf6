//! The Balanced Scorecard document: perspectives → KRA → KPIs, plus status,
//! reviewer comments and history.
//!
//! Status, comments, history and version are private. They change only
//! through [`crate::workflow`] (status, comments, history) and the
//! persistence hooks (id, version). Owner content edits go through
//! [`Scorecard::edit`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::history::{History, HistoryEntry};
use crate::identity::Actor;
use crate::roles::Role;
use crate::status::ScorecardStatus;
use crate::types::{Date, DbId, Timestamp};
use crate::validation::{validate_perspectives, validate_weightage};

/// Shown as `reporting_to` when the owner has no manager.
pub const NO_MANAGER: &str = "N/A";

/// Perspectives every new scorecard starts with, at equal weight.
pub const DEFAULT_PERSPECTIVES: &[&str] = &[
    "Finance",
    "Customer",
    "Internal Process",
    "Learning and Growth",
    "Infrastructure",
];

/// Weightage given to each default perspective (5 × 20 = 100).
pub const DEFAULT_PERSPECTIVE_WEIGHTAGE: u32 = 20;

fn generate_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A measurable indicator under a KRA. Purely descriptive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub result_kpi: String,
    #[serde(default)]
    pub process_kpi: String,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub definition: String,
    /// Frequency of measurement.
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub base_level: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub initiatives: String,
}

impl Kpi {
    /// An empty KPI with a fresh id.
    pub fn blank() -> Self {
        Self {
            id: generate_id(),
            ..Self::default()
        }
    }
}

/// Key Result Area: a weighted objective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kra {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Percentage of the whole scorecard.
    pub weightage: u32,
    #[serde(default)]
    pub kpi_owner: String,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

/// A top-level category holding exactly one KRA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub kra: Kra,
}

impl Perspective {
    /// A perspective with an empty KRA of the given weightage.
    pub fn new(name: impl Into<String>, weightage: u32) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kra: Kra {
                id: generate_id(),
                weightage,
                ..Kra::default()
            },
        }
    }

    /// Fill in any blank ids on the perspective, its KRA and its KPIs.
    fn ensure_ids(&mut self) {
        if self.id.is_empty() {
            self.id = generate_id();
        }
        if self.kra.id.is_empty() {
            self.kra.id = generate_id();
        }
        for kpi in &mut self.kra.kpis {
            if kpi.id.is_empty() {
                kpi.id = generate_id();
            }
        }
    }
}

/// Owner details copied onto the document at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSnapshot {
    pub id: DbId,
    pub name: String,
    pub level: String,
    pub department: String,
    pub date_of_joining: Date,
}

impl From<&Actor> for OwnerSnapshot {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            level: actor.level.clone(),
            department: actor.department.clone(),
            date_of_joining: actor.date_of_joining,
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A Balanced Scorecard document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    #[serde(default)]
    id: Option<DbId>,
    owner: OwnerSnapshot,
    reporting_to: String,
    date: Date,
    status: ScorecardStatus,
    perspectives: Vec<Perspective>,
    #[serde(default)]
    manager_comments: Option<String>,
    #[serde(default)]
    executive_comments: Option<String>,
    #[serde(default)]
    history: History,
    /// Bumped by the store on every successful save.
    #[serde(default)]
    version: u64,
}

impl Scorecard {
    /// Open a new draft owned by `owner`.
    ///
    /// Only contributors own scorecards. `manager`, when given, must be the
    /// owner's direct manager; its name is copied into `reporting_to`. The
    /// creation itself is recorded as the first history entry.
    pub fn new(
        owner: &Actor,
        manager: Option<&Actor>,
        perspectives: Vec<Perspective>,
        created_at: Timestamp,
    ) -> Result<Self, CoreError> {
        if owner.role != Role::Contributor {
            return Err(CoreError::Forbidden(format!(
                "Only contributors can create scorecards (actor {} is a {})",
                owner.id, owner.role
            )));
        }
        if let Some(manager) = manager {
            if owner.manager_id != Some(manager.id) {
                return Err(CoreError::Validation(format!(
                    "Actor {} is not the manager of actor {}",
                    manager.id, owner.id
                )));
            }
        }

        validate_perspectives(&perspectives)?;
        let mut perspectives = perspectives;
        perspectives.iter_mut().for_each(Perspective::ensure_ids);

        let mut history = History::new();
        history.append(HistoryEntry {
            status: ScorecardStatus::Draft,
            timestamp: created_at,
            actor: owner.name.clone(),
            comments: None,
        });

        Ok(Self {
            id: None,
            owner: OwnerSnapshot::from(owner),
            reporting_to: manager
                .map(|m| m.name.clone())
                .unwrap_or_else(|| NO_MANAGER.to_string()),
            date: created_at.date_naive(),
            status: ScorecardStatus::Draft,
            perspectives,
            manager_comments: None,
            executive_comments: None,
            history,
            version: 0,
        })
    }

    /// Open a new draft with the [`DEFAULT_PERSPECTIVES`] template.
    pub fn with_default_perspectives(
        owner: &Actor,
        manager: Option<&Actor>,
        created_at: Timestamp,
    ) -> Result<Self, CoreError> {
        let perspectives = DEFAULT_PERSPECTIVES
            .iter()
            .map(|name| Perspective::new(*name, DEFAULT_PERSPECTIVE_WEIGHTAGE))
            .collect();
        Self::new(owner, manager, perspectives, created_at)
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn owner(&self) -> &OwnerSnapshot {
        &self.owner
    }

    pub fn reporting_to(&self) -> &str {
        &self.reporting_to
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn status(&self) -> ScorecardStatus {
        self.status
    }

    pub fn perspectives(&self) -> &[Perspective] {
        &self.perspectives
    }

    pub fn manager_comments(&self) -> Option<&str> {
        self.manager_comments.as_deref()
    }

    pub fn executive_comments(&self) -> Option<&str> {
        self.executive_comments.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_owned_by(&self, actor_id: DbId) -> bool {
        self.owner.id == actor_id
    }

    /// Record the identity and version assigned by the store.
    pub fn mark_persisted(&mut self, id: DbId, version: u64) {
        self.id = Some(id);
        self.version = version;
    }

    /// Start an owner edit. Fails unless `actor` owns the document and the
    /// status is editable.
    pub fn edit(&mut self, actor: &Actor) -> Result<ScorecardEditor<'_>, CoreError> {
        if !self.is_owned_by(actor.id) {
            return Err(CoreError::Forbidden(format!(
                "Only the owner can edit this scorecard (actor {} is not the owner)",
                actor.id
            )));
        }
        if !self.status.is_editable() {
            return Err(CoreError::Conflict(format!(
                "Scorecard cannot be edited while '{}'",
                self.status
            )));
        }
        Ok(ScorecardEditor { doc: self })
    }

    // Mutators for the workflow engine.

    pub(crate) fn set_status(&mut self, status: ScorecardStatus) {
        self.status = status;
    }

    pub(crate) fn set_manager_comments(&mut self, comments: Option<String>) {
        self.manager_comments = comments;
    }

    pub(crate) fn set_executive_comments(&mut self, comments: Option<String>) {
        self.executive_comments = comments;
    }

    pub(crate) fn record(&mut self, entry: HistoryEntry) {
        self.history.append(entry);
    }
}

// ---------------------------------------------------------------------------
// Owner editing
// ---------------------------------------------------------------------------

/// Partial update for a KRA; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KraUpdate {
    pub name: Option<String>,
    pub weightage: Option<u32>,
    pub kpi_owner: Option<String>,
}

/// Mutable access to a scorecard's content, handed out by [`Scorecard::edit`].
#[derive(Debug)]
pub struct ScorecardEditor<'a> {
    doc: &'a mut Scorecard,
}

impl ScorecardEditor<'_> {
    /// Append a perspective with an empty KRA at 0% and return its id.
    pub fn add_perspective(&mut self, name: impl Into<String>) -> String {
        let perspective = Perspective::new(name, 0);
        let id = perspective.id.clone();
        self.doc.perspectives.push(perspective);
        id
    }

    pub fn remove_perspective(&mut self, perspective_id: &str) -> Result<Perspective, CoreError> {
        let index = self.position(perspective_id)?;
        Ok(self.doc.perspectives.remove(index))
    }

    pub fn rename_perspective(
        &mut self,
        perspective_id: &str,
        name: impl Into<String>,
    ) -> Result<(), CoreError> {
        self.perspective_mut(perspective_id)?.name = name.into();
        Ok(())
    }

    pub fn update_kra(&mut self, perspective_id: &str, update: KraUpdate) -> Result<(), CoreError> {
        if let Some(weightage) = update.weightage {
            validate_weightage(weightage)?;
        }
        let kra = &mut self.perspective_mut(perspective_id)?.kra;
        if let Some(name) = update.name {
            kra.name = name;
        }
        if let Some(weightage) = update.weightage {
            kra.weightage = weightage;
        }
        if let Some(kpi_owner) = update.kpi_owner {
            kra.kpi_owner = kpi_owner;
        }
        Ok(())
    }

    /// Append a blank KPI to a perspective's KRA and return its id.
    pub fn add_kpi(&mut self, perspective_id: &str) -> Result<String, CoreError> {
        let kpi = Kpi::blank();
        let id = kpi.id.clone();
        self.perspective_mut(perspective_id)?.kra.kpis.push(kpi);
        Ok(id)
    }

    /// Replace the KPI with the same id.
    pub fn update_kpi(&mut self, perspective_id: &str, kpi: Kpi) -> Result<(), CoreError> {
        let kpis = &mut self.perspective_mut(perspective_id)?.kra.kpis;
        let slot = kpis
            .iter_mut()
            .find(|k| k.id == kpi.id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown KPI '{}'", kpi.id)))?;
        *slot = kpi;
        Ok(())
    }

    pub fn remove_kpi(&mut self, perspective_id: &str, kpi_id: &str) -> Result<Kpi, CoreError> {
        let kpis = &mut self.perspective_mut(perspective_id)?.kra.kpis;
        let index = kpis
            .iter()
            .position(|k| k.id == kpi_id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown KPI '{kpi_id}'")))?;
        Ok(kpis.remove(index))
    }

    /// Replace all content at once. Blank ids are filled in. Nothing changes
    /// if any KRA weightage is out of range.
    pub fn replace_perspectives(&mut self, perspectives: Vec<Perspective>) -> Result<(), CoreError> {
        validate_perspectives(&perspectives)?;
        let mut perspectives = perspectives;
        perspectives.iter_mut().for_each(Perspective::ensure_ids);
        self.doc.perspectives = perspectives;
        Ok(())
    }

    pub fn perspectives(&self) -> &[Perspective] {
        &self.doc.perspectives
    }

    fn position(&self, perspective_id: &str) -> Result<usize, CoreError> {
        self.doc
            .perspectives
            .iter()
            .position(|p| p.id == perspective_id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown perspective '{perspective_id}'")))
    }

    fn perspective_mut(&mut self, perspective_id: &str) -> Result<&mut Perspective, CoreError> {
        let index = self.position(perspective_id)?;
        Ok(&mut self.doc.perspectives[index])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
