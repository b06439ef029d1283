mod errors;
mod run;
mod variable;
mod workspace;

pub use errors::VariableDecodeError;
pub use run::{Run, RunFailure, RunOutcome, RunStatus};
pub use variable::{
    deserialize_workspace_variables, RemoteVariable, VariableCategory, VariableCreateOptions,
    VariableUpdateOptions, VariableValue, WorkspaceVariable,
};
pub use workspace::{ConfigurationVersion, Workspace};
