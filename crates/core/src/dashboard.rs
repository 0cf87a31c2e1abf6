//! Status counts shown on an actor's dashboard.
//!
//! The caller passes in the documents the actor can see; this module only
//! aggregates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::roles::Role;
use crate::scorecard::Scorecard;
use crate::status::ScorecardStatus;

/// Aggregate view over a set of scorecards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    /// Count per status. Every status is present, zero counts included.
    pub by_status: BTreeMap<ScorecardStatus, usize>,
    /// Documents waiting on this actor's tier. `None` for roles that do
    /// not review.
    pub pending_review: Option<usize>,
}

impl StatusSummary {
    pub fn for_actor<'a>(role: Role, docs: impl IntoIterator<Item = &'a Scorecard>) -> Self {
        let mut by_status: BTreeMap<ScorecardStatus, usize> =
            ScorecardStatus::ALL.into_iter().map(|s| (s, 0)).collect();

        let mut total = 0;
        for doc in docs {
            total += 1;
            *by_status.entry(doc.status()).or_default() += 1;
        }

        let pending_review = review_queue(role).map(|status| by_status[&status]);

        Self {
            total,
            by_status,
            pending_review,
        }
    }
}

/// The status a role works through when reviewing.
fn review_queue(role: Role) -> Option<ScorecardStatus> {
    match role {
        Role::Manager => Some(ScorecardStatus::PendingManagerApproval),
        Role::Executive | Role::Administrator => Some(ScorecardStatus::PendingExecutiveApproval),
        Role::Contributor => None,
    }
}
