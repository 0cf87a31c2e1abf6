//! Scorecard approval state machine.
//!
//! The transition table maps `(from, to)` to the action it represents and
//! the reviewer allowed to perform it:
//!
//! ```text
//! save_draft  owner            Draft | QueriedByManager | RejectedByManager -> Draft
//! submit      owner            Draft | QueriedByManager | RejectedByManager -> PendingManagerApproval
//! query       direct manager   PendingManagerApproval   -> QueriedByManager
//! reject      direct manager   PendingManagerApproval   -> RejectedByManager
//! approve     direct manager   PendingManagerApproval   -> PendingExecutiveApproval
//! reject      executive        PendingExecutiveApproval -> RejectedByExecutive
//! approve     executive        PendingExecutiveApproval -> Approved
//! ```
//!
//! A transition either applies completely or returns an error and leaves
//! the document untouched.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::history::HistoryEntry;
use crate::identity::{Actor, ReportingLine};
use crate::roles::Role;
use crate::scorecard::Scorecard;
use crate::status::ScorecardStatus;
use crate::types::Timestamp;
use crate::validation::ensure_submittable;

use ScorecardStatus::{
    Approved, Draft, PendingExecutiveApproval, PendingManagerApproval, QueriedByManager,
    RejectedByExecutive, RejectedByManager,
};

// ---------------------------------------------------------------------------
// Actions and reviewers
// ---------------------------------------------------------------------------

/// What an actor asks the workflow to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    SaveDraft,
    Submit,
    Query,
    Reject,
    Approve,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SaveDraft => "save_draft",
            Self::Submit => "submit",
            Self::Query => "query",
            Self::Reject => "reject",
            Self::Approve => "approve",
        }
    }

    /// The status this action leads to from `from`, if it is defined there.
    pub fn target(self, from: ScorecardStatus) -> Option<ScorecardStatus> {
        TRANSITIONS
            .iter()
            .find(|rule| rule.action == self && rule.from == from)
            .map(|rule| rule.to)
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may perform a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reviewer {
    /// The contributor who owns the document.
    Owner,
    /// A Manager who is the owner's direct manager.
    DirectManager,
    /// Any Executive.
    Executive,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub action: ReviewAction,
    pub from: ScorecardStatus,
    pub to: ScorecardStatus,
    pub reviewer: Reviewer,
}

const fn rule(
    action: ReviewAction,
    from: ScorecardStatus,
    to: ScorecardStatus,
    reviewer: Reviewer,
) -> TransitionRule {
    TransitionRule {
        action,
        from,
        to,
        reviewer,
    }
}

/// Every defined transition. `Approved` and `RejectedByExecutive` have no
/// outgoing rows.
pub const TRANSITIONS: &[TransitionRule] = &[
    rule(ReviewAction::SaveDraft, Draft, Draft, Reviewer::Owner),
    rule(ReviewAction::SaveDraft, QueriedByManager, Draft, Reviewer::Owner),
    rule(ReviewAction::SaveDraft, RejectedByManager, Draft, Reviewer::Owner),
    rule(ReviewAction::Submit, Draft, PendingManagerApproval, Reviewer::Owner),
    rule(ReviewAction::Submit, QueriedByManager, PendingManagerApproval, Reviewer::Owner),
    rule(ReviewAction::Submit, RejectedByManager, PendingManagerApproval, Reviewer::Owner),
    rule(ReviewAction::Query, PendingManagerApproval, QueriedByManager, Reviewer::DirectManager),
    rule(ReviewAction::Reject, PendingManagerApproval, RejectedByManager, Reviewer::DirectManager),
    rule(ReviewAction::Approve, PendingManagerApproval, PendingExecutiveApproval, Reviewer::DirectManager),
    rule(ReviewAction::Reject, PendingExecutiveApproval, RejectedByExecutive, Reviewer::Executive),
    rule(ReviewAction::Approve, PendingExecutiveApproval, Approved, Reviewer::Executive),
];

/// Look up the rule for `from -> to`.
pub fn find_rule(from: ScorecardStatus, to: ScorecardStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
}

/// Statuses reachable from `from` in one step.
pub fn valid_transitions(from: ScorecardStatus) -> impl Iterator<Item = ScorecardStatus> {
    TRANSITIONS
        .iter()
        .filter(move |r| r.from == from)
        .map(|r| r.to)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Result of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub action: ReviewAction,
    pub from: ScorecardStatus,
    pub to: ScorecardStatus,
    /// Whether a history entry was appended (false for same-status saves).
    pub recorded: bool,
}

/// Move `doc` to `to` on behalf of `actor`, timestamped now.
///
/// See [`transition_at`].
pub fn transition<R>(
    doc: &mut Scorecard,
    to: ScorecardStatus,
    actor: &Actor,
    reporting: &R,
    comment: Option<&str>,
) -> Result<TransitionOutcome, CoreError>
where
    R: ReportingLine + ?Sized,
{
    transition_at(doc, to, actor, reporting, comment, Utc::now())
}

/// Move `doc` to `to` on behalf of `actor`.
///
/// Fails with:
/// - `InvalidTransition` if no rule leads from the current status to `to`,
/// - `Forbidden` if `actor` is not the reviewer the rule requires,
/// - `Validation` if a submit is attempted while weightage is not 100.
///
/// On success the status is updated, a manager or executive comment
/// overwrites the matching comment field, and a history entry is appended
/// when the status actually changed. The entry carries the comment only
/// when `to` is a rejection.
pub fn transition_at<R>(
    doc: &mut Scorecard,
    to: ScorecardStatus,
    actor: &Actor,
    reporting: &R,
    comment: Option<&str>,
    now: Timestamp,
) -> Result<TransitionOutcome, CoreError>
where
    R: ReportingLine + ?Sized,
{
    let from = doc.status();
    let rule = find_rule(from, to).ok_or_else(|| {
        CoreError::InvalidTransition(format!("'{from}' -> '{to}' is not allowed"))
    })?;

    authorize(rule, doc, actor, reporting)?;
    if rule.action == ReviewAction::Submit {
        ensure_submittable(doc)?;
    }

    // All checks passed; mutate.
    let comment = normalize_comment(comment);
    match rule.reviewer {
        Reviewer::DirectManager => doc.set_manager_comments(comment.clone()),
        Reviewer::Executive => doc.set_executive_comments(comment.clone()),
        Reviewer::Owner => {}
    }

    doc.set_status(to);
    let recorded = from != to;
    if recorded {
        doc.record(HistoryEntry {
            status: to,
            timestamp: now,
            actor: actor.name.clone(),
            comments: if to.is_rejection() { comment } else { None },
        });
    }

    Ok(TransitionOutcome {
        action: rule.action,
        from,
        to,
        recorded,
    })
}

/// Perform `action` on `doc`, resolving its target from the current status.
pub fn apply_action<R>(
    doc: &mut Scorecard,
    action: ReviewAction,
    actor: &Actor,
    reporting: &R,
    comment: Option<&str>,
) -> Result<TransitionOutcome, CoreError>
where
    R: ReportingLine + ?Sized,
{
    let from = doc.status();
    let to = action.target(from).ok_or_else(|| {
        CoreError::InvalidTransition(format!("Cannot {action} a scorecard that is '{from}'"))
    })?;
    transition(doc, to, actor, reporting, comment)
}

/// Actions `actor` is permitted to attempt on `doc` in its current status.
///
/// Submit is listed whenever the actor may submit; the weightage check
/// still applies when it is attempted.
pub fn available_actions<R>(doc: &Scorecard, actor: &Actor, reporting: &R) -> Vec<ReviewAction>
where
    R: ReportingLine + ?Sized,
{
    TRANSITIONS
        .iter()
        .filter(|r| r.from == doc.status())
        .filter(|r| authorize(r, doc, actor, reporting).is_ok())
        .map(|r| r.action)
        .collect()
}

/// Whether `actor` may see `doc`: its owner, the owner's direct manager,
/// executives and administrators.
pub fn can_view<R>(doc: &Scorecard, actor: &Actor, reporting: &R) -> bool
where
    R: ReportingLine + ?Sized,
{
    match actor.role {
        Role::Executive | Role::Administrator => true,
        Role::Manager => reporting.is_direct_manager(actor.id, doc.owner().id),
        Role::Contributor => doc.is_owned_by(actor.id),
    }
}

fn authorize<R>(
    rule: &TransitionRule,
    doc: &Scorecard,
    actor: &Actor,
    reporting: &R,
) -> Result<(), CoreError>
where
    R: ReportingLine + ?Sized,
{
    let allowed = match rule.reviewer {
        Reviewer::Owner => doc.is_owned_by(actor.id),
        Reviewer::DirectManager => {
            actor.role == Role::Manager && reporting.is_direct_manager(actor.id, doc.owner().id)
        }
        Reviewer::Executive => actor.role == Role::Executive,
    };

    if allowed {
        return Ok(());
    }

    let required = match rule.reviewer {
        Reviewer::Owner => "the scorecard owner",
        Reviewer::DirectManager => "the owner's direct manager",
        Reviewer::Executive => "an executive",
    };
    Err(CoreError::Forbidden(format!(
        "Only {required} can {} a scorecard that is '{}' (actor {})",
        rule.action, rule.from, actor.id
    )))
}

/// Trim a comment; blank comments count as absent.
fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
