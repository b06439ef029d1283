mod config;
mod output;

use clap::Parser;
use http_client::TfeClient;
use orchestrator::{execute, RunError};
use tfe_defs::deserialize_workspace_variables;
use tfe_utils::setup_logging;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::output::OutputTarget;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = setup_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping");
            interrupt.cancel();
        }
    });

    if let Err(e) = run(config, &cancel).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config, cancel: &CancellationToken) -> anyhow::Result<()> {
    let variables =
        deserialize_workspace_variables(&config.json_vars).map_err(RunError::InvalidVariables)?;
    let client = TfeClient::new(&config.url, &config.token).map_err(RunError::Client)?;
    let run_config = config.into_run_config(variables);
    let outputs = OutputTarget::from_env();

    let run = execute(&client, &run_config, cancel, |run| {
        outputs.write(run).map_err(RunError::Output)
    })
    .await?;
    log::debug!("Run {} ended as {}", run.id, run.status);

    Ok(())
}
