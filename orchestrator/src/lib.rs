mod errors;
pub mod interface;
mod pipeline;
mod poller;
mod reconciler;
mod trigger;

pub use errors::RunError;
pub use interface::RemoteService;
pub use pipeline::{execute, RunConfig, DEFAULT_MESSAGE};
pub use poller::{wait_for_run, PollSettings, DEFAULT_POLL_INTERVAL, MAXIMUM_TIMEOUT};
pub use reconciler::{
    build_create_options, build_update_options, find_variable, reconcile_variables,
};
pub use trigger::{trigger_run, ConfigurationVersionSource, TriggeredRun};
