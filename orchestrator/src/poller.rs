use std::time::Duration;

use log::{debug, info};
use tfe_defs::{RunOutcome, RunStatus};
use tokio_util::sync::CancellationToken;

use crate::{RemoteService, RunError};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const MAXIMUM_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PollSettings {
    pub interval: Duration,
    /// Ceiling on the total wait, armed once when polling starts.
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: MAXIMUM_TIMEOUT,
        }
    }
}

/// Polls the run until it reaches a terminal status.
///
/// Each round waits for whichever comes first: cancellation, the deadline or
/// the poll interval, checked in that order when several are ready. A
/// successful terminal status is returned, a failed one becomes the matching
/// `RunError`. The run itself is never canceled from here.
pub async fn wait_for_run<S: RemoteService + ?Sized>(
    service: &S,
    run_id: &str,
    settings: &PollSettings,
    cancel: &CancellationToken,
) -> Result<RunStatus, RunError> {
    let deadline = tokio::time::sleep(settings.timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RunError::Cancelled),
            _ = &mut deadline => return Err(RunError::Timeout(settings.timeout)),
            _ = tokio::time::sleep(settings.interval) => {}
        }

        info!("Checking in on run status...");
        let run = service
            .read_run(run_id)
            .await
            .map_err(|e| RunError::RunRead {
                run_id: run_id.to_string(),
                source: e,
            })?;

        match run.status.outcome() {
            RunOutcome::Succeeded => {
                info!("Run finished successfully ({})", run.status);
                return Ok(run.status);
            }
            RunOutcome::Failed(failure) => return Err(failure.into()),
            RunOutcome::InProgress => debug!("Run {} is {}", run_id, run.status),
        }
    }
}
