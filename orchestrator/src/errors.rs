use std::time::Duration;

use http_client::ApiError;
use tfe_defs::{RunFailure, VariableDecodeError};
use thiserror::Error;

/// Every way an invocation can stop. The first one returned ends the run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("could not decode json-vars. Make sure that this is a list of variables to be set")]
    InvalidVariables(#[source] VariableDecodeError),

    #[error("unable to create client")]
    Client(#[source] ApiError),

    #[error("could not read workspace {organization}/{workspace}")]
    WorkspaceLookup {
        organization: String,
        workspace: String,
        #[source]
        source: ApiError,
    },

    #[error("could not list variables")]
    VariableList(#[source] ApiError),

    #[error("could not create variable {key:?}")]
    VariableCreate {
        key: String,
        #[source]
        source: ApiError,
    },

    #[error("variable {key:?} already exists but was not found for update")]
    VariableConflict { key: String },

    #[error("could not update variable {key:?}")]
    VariableUpdate {
        key: String,
        #[source]
        source: ApiError,
    },

    #[error("unable to resolve configuration version")]
    ConfigurationVersion(#[source] ApiError),

    #[error("workspace has no configuration version to run")]
    NoConfigurationVersion,

    #[error("unable to create run")]
    RunCreate(#[source] ApiError),

    #[error("unable to find run {run_id:?}")]
    RunRead {
        run_id: String,
        #[source]
        source: ApiError,
    },

    #[error("run was canceled")]
    RunCanceled,

    #[error("run was discarded")]
    RunDiscarded,

    #[error("run encountered an error")]
    RunErrored,

    #[error("run timed out after {}", display_duration(.0))]
    Timeout(Duration),

    #[error("operation was cancelled")]
    Cancelled,

    #[error("could not write step outputs")]
    Output(#[source] std::io::Error),
}

fn display_duration(duration: &Duration) -> String {
    humantime::format_duration(*duration).to_string()
}

impl From<RunFailure> for RunError {
    fn from(failure: RunFailure) -> Self {
        match failure {
            RunFailure::Canceled => RunError::RunCanceled,
            RunFailure::Discarded => RunError::RunDiscarded,
            RunFailure::Errored => RunError::RunErrored,
        }
    }
}
