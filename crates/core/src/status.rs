//! Scorecard lifecycle status.
//!
//! Whether a status is editable, pending, a rejection or terminal is a
//! property of the variant, never derived from its display label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a scorecard document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardStatus {
    Draft,
    PendingManagerApproval,
    QueriedByManager,
    RejectedByManager,
    PendingExecutiveApproval,
    RejectedByExecutive,
    Approved,
}

impl ScorecardStatus {
    pub const ALL: [ScorecardStatus; 7] = [
        ScorecardStatus::Draft,
        ScorecardStatus::PendingManagerApproval,
        ScorecardStatus::QueriedByManager,
        ScorecardStatus::RejectedByManager,
        ScorecardStatus::PendingExecutiveApproval,
        ScorecardStatus::RejectedByExecutive,
        ScorecardStatus::Approved,
    ];

    /// The owner may change content and (re-)submit.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            Self::Draft | Self::RejectedByManager | Self::QueriedByManager
        )
    }

    /// Waiting on a reviewer.
    pub fn is_pending_review(self) -> bool {
        matches!(
            self,
            Self::PendingManagerApproval | Self::PendingExecutiveApproval
        )
    }

    pub fn is_rejection(self) -> bool {
        matches!(self, Self::RejectedByManager | Self::RejectedByExecutive)
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        self == Self::Approved
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingManagerApproval => "Pending Manager Approval",
            Self::QueriedByManager => "Queried by Manager",
            Self::RejectedByManager => "Rejected by Manager",
            Self::PendingExecutiveApproval => "Pending Executive Approval",
            Self::RejectedByExecutive => "Rejected by Executive",
            Self::Approved => "Approved",
        }
    }
}

impl fmt::Display for ScorecardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
