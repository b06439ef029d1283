use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    pub message: Option<String>,
}

/// Status reported by the remote service for a run.
///
/// Values the service may add in the future are preserved in `Other` and
/// treated as still in progress.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Fetching,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    ApplyQueued,
    Applying,
    Applied,
    PlannedAndFinished,
    Canceled,
    Discarded,
    Errored,
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunFailure {
    Canceled,
    Discarded,
    Errored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    InProgress,
    Succeeded,
    Failed(RunFailure),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Fetching => "fetching",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::CostEstimating => "cost_estimating",
            RunStatus::CostEstimated => "cost_estimated",
            RunStatus::PolicyChecking => "policy_checking",
            RunStatus::PolicyOverride => "policy_override",
            RunStatus::PolicySoftFailed => "policy_soft_failed",
            RunStatus::PolicyChecked => "policy_checked",
            RunStatus::Confirmed => "confirmed",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::PlannedAndFinished => "planned_and_finished",
            RunStatus::Canceled => "canceled",
            RunStatus::Discarded => "discarded",
            RunStatus::Errored => "errored",
            RunStatus::Other(status) => status,
        }
    }

    pub fn outcome(&self) -> RunOutcome {
        match self {
            RunStatus::Applied | RunStatus::PlannedAndFinished => RunOutcome::Succeeded,
            RunStatus::Canceled => RunOutcome::Failed(RunFailure::Canceled),
            RunStatus::Discarded => RunOutcome::Failed(RunFailure::Discarded),
            RunStatus::Errored => RunOutcome::Failed(RunFailure::Errored),
            _ => RunOutcome::InProgress,
        }
    }
}

impl From<String> for RunStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => RunStatus::Pending,
            "fetching" => RunStatus::Fetching,
            "plan_queued" => RunStatus::PlanQueued,
            "planning" => RunStatus::Planning,
            "planned" => RunStatus::Planned,
            "cost_estimating" => RunStatus::CostEstimating,
            "cost_estimated" => RunStatus::CostEstimated,
            "policy_checking" => RunStatus::PolicyChecking,
            "policy_override" => RunStatus::PolicyOverride,
            "policy_soft_failed" => RunStatus::PolicySoftFailed,
            "policy_checked" => RunStatus::PolicyChecked,
            "confirmed" => RunStatus::Confirmed,
            "apply_queued" => RunStatus::ApplyQueued,
            "applying" => RunStatus::Applying,
            "applied" => RunStatus::Applied,
            "planned_and_finished" => RunStatus::PlannedAndFinished,
            "canceled" => RunStatus::Canceled,
            "discarded" => RunStatus::Discarded,
            "errored" => RunStatus::Errored,
            _ => RunStatus::Other(status),
        }
    }
}

impl From<&str> for RunStatus {
    fn from(status: &str) -> Self {
        RunStatus::from(status.to_string())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
