mod client;
mod configuration_versions;
mod errors;
mod jsonapi;
mod runs;
mod variables;
mod workspaces;

pub use client::{TfeClient, DEFAULT_ADDRESS};
pub use errors::{ApiError, ErrorObject, ErrorSource};
