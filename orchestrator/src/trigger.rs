use std::fmt;
use std::str::FromStr;

use log::info;
use tfe_defs::{ConfigurationVersion, RunStatus, Workspace};
use tfe_utils::run_url;

use crate::{RemoteService, RunError};

/// Where the configuration version attached to the run comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConfigurationVersionSource {
    /// Create a fresh configuration version that does not queue runs itself.
    #[default]
    Create,
    /// Reuse the workspace's most recent configuration version.
    Latest,
    /// Use the given configuration version id.
    Existing(String),
}

impl FromStr for ConfigurationVersionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "create" => Ok(ConfigurationVersionSource::Create),
            "latest" => Ok(ConfigurationVersionSource::Latest),
            id if id.starts_with("cv-") => Ok(ConfigurationVersionSource::Existing(id.to_string())),
            other => Err(format!(
                "expected 'create', 'latest' or a configuration version id (cv-...), got {:?}",
                other
            )),
        }
    }
}

impl fmt::Display for ConfigurationVersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationVersionSource::Create => f.write_str("create"),
            ConfigurationVersionSource::Latest => f.write_str("latest"),
            ConfigurationVersionSource::Existing(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriggeredRun {
    pub id: String,
    pub url: String,
    pub status: RunStatus,
}

async fn resolve_configuration_version<S: RemoteService + ?Sized>(
    service: &S,
    workspace: &Workspace,
    source: &ConfigurationVersionSource,
) -> Result<ConfigurationVersion, RunError> {
    match source {
        ConfigurationVersionSource::Create => {
            info!("Creating configuration version...");
            let configuration_version = service
                .create_configuration_version(&workspace.id)
                .await
                .map_err(RunError::ConfigurationVersion)?;
            info!(
                "Configuration version created: {}",
                configuration_version.id
            );
            Ok(configuration_version)
        }
        ConfigurationVersionSource::Latest => service
            .latest_configuration_version(&workspace.id)
            .await
            .map_err(RunError::ConfigurationVersion)?
            .ok_or(RunError::NoConfigurationVersion),
        ConfigurationVersionSource::Existing(id) => service
            .read_configuration_version(id)
            .await
            .map_err(RunError::ConfigurationVersion),
    }
}

/// Queues a run on the workspace with state refresh enabled.
pub async fn trigger_run<S: RemoteService + ?Sized>(
    service: &S,
    workspace: &Workspace,
    message: &str,
    source: &ConfigurationVersionSource,
    base_url: &str,
) -> Result<TriggeredRun, RunError> {
    let configuration_version = resolve_configuration_version(service, workspace, source).await?;
    log::debug!(
        "Using configuration version {} ({})",
        configuration_version.id,
        configuration_version.status
    );

    let run = service
        .create_run(&workspace.id, &configuration_version.id, message, true)
        .await
        .map_err(RunError::RunCreate)?;

    Ok(TriggeredRun {
        url: run_url(base_url, &workspace.organization, &workspace.name, &run.id),
        id: run.id,
        status: run.status,
    })
}
