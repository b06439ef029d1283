use std::time::Duration;

use clap::{ArgAction, Parser};
use http_client::DEFAULT_ADDRESS;
use orchestrator::{ConfigurationVersionSource, PollSettings, RunConfig, DEFAULT_MESSAGE};
use tfe_defs::WorkspaceVariable;

/// Inputs of the step. Every flag can also be given through the
/// `INPUT_*` variables a workflow runner exports for action inputs.
#[derive(Parser, Debug, Clone)]
#[command(name = "tfe-run")]
#[command(about = "Set workspace variables, queue a run and optionally wait for it to finish")]
#[command(version)]
pub struct Config {
    /// API token for the remote service
    #[arg(long, env = "INPUT_TFE-TOKEN", hide_env_values = true)]
    pub token: String,

    /// Organization that owns the workspace
    #[arg(long, env = "INPUT_ORGANIZATION")]
    pub organization: String,

    /// Name of the workspace to run
    #[arg(long, env = "INPUT_WORKSPACE")]
    pub workspace: String,

    /// JSON list of variables, e.g. [{"key": "img_tag", "value": "v1.2.3"}]
    #[arg(long = "json-vars", env = "INPUT_JSON-VARS", default_value = "")]
    pub json_vars: String,

    /// Message attached to the run
    #[arg(long, env = "INPUT_MESSAGE", default_value = DEFAULT_MESSAGE)]
    pub message: String,

    /// Address of the service
    #[arg(long, env = "INPUT_URL", default_value = DEFAULT_ADDRESS)]
    pub url: String,

    /// Wait for the run to finish; anything but "true" returns right after queueing
    #[arg(long, env = "INPUT_WAIT", default_value = "true", value_parser = parse_wait, action = ArgAction::Set)]
    pub wait: bool,

    /// "create", "latest" or a configuration version id (cv-...)
    #[arg(
        long = "configuration-version",
        env = "INPUT_CONFIGURATION-VERSION",
        default_value = "create"
    )]
    pub configuration_version: ConfigurationVersionSource,

    /// Time between status checks, e.g. 5s
    #[arg(long = "poll-interval", env = "INPUT_POLL-INTERVAL", default_value = "5s", value_parser = parse_positive_duration)]
    pub poll_interval: Duration,

    /// Give up waiting after this long, e.g. 60m
    #[arg(long, env = "INPUT_TIMEOUT", default_value = "60m", value_parser = parse_positive_duration)]
    pub timeout: Duration,
}

fn parse_wait(value: &str) -> Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

fn parse_positive_duration(value: &str) -> Result<Duration, String> {
    let duration = humantime::parse_duration(value.trim()).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

impl Config {
    pub fn into_run_config(self, variables: Vec<WorkspaceVariable>) -> RunConfig {
        RunConfig {
            organization: self.organization,
            workspace: self.workspace,
            variables,
            message: self.message,
            base_url: self.url,
            wait: self.wait,
            configuration_version: self.configuration_version,
            poll: PollSettings {
                interval: self.poll_interval,
                timeout: self.timeout,
            },
        }
    }
}
