use std::future::Future;

use log::info;
use tfe_defs::WorkspaceVariable;
use tokio_util::sync::CancellationToken;

use crate::{
    reconcile_variables, trigger_run, wait_for_run, ConfigurationVersionSource, PollSettings,
    RemoteService, RunError, TriggeredRun,
};

pub const DEFAULT_MESSAGE: &str = "Queued by tfe-run";

/// Everything one invocation needs, resolved once at the boundary.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub organization: String,
    pub workspace: String,
    pub variables: Vec<WorkspaceVariable>,
    pub message: String,
    pub base_url: String,
    pub wait: bool,
    pub configuration_version: ConfigurationVersionSource,
    pub poll: PollSettings,
}

async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T, RunError>
where
    F: Future<Output = Result<T, RunError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RunError::Cancelled),
        result = future => result,
    }
}

/// Reconciles variables, triggers a run and, when configured, waits for it.
///
/// `on_triggered` is called as soon as the run exists, so the run id and URL
/// are reported even if waiting fails afterwards.
pub async fn execute<S, F>(
    service: &S,
    config: &RunConfig,
    cancel: &CancellationToken,
    on_triggered: F,
) -> Result<TriggeredRun, RunError>
where
    S: RemoteService + ?Sized,
    F: FnOnce(&TriggeredRun) -> Result<(), RunError>,
{
    let workspace = cancellable(cancel, async {
        service
            .read_workspace(&config.organization, &config.workspace)
            .await
            .map_err(|e| RunError::WorkspaceLookup {
                organization: config.organization.clone(),
                workspace: config.workspace.clone(),
                source: e,
            })
    })
    .await?;
    log::debug!("Resolved workspace {} to {}", workspace.name, workspace.id);

    cancellable(
        cancel,
        reconcile_variables(service, &workspace.id, &config.variables),
    )
    .await?;

    let mut run = cancellable(
        cancel,
        trigger_run(
            service,
            &workspace,
            &config.message,
            &config.configuration_version,
            &config.base_url,
        ),
    )
    .await?;

    info!("Run URL: {}", run.url);
    on_triggered(&run)?;

    if !config.wait {
        return Ok(run);
    }

    info!("Waiting for run to complete");
    run.status = wait_for_run(service, &run.id, &config.poll, cancel).await?;
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::MockRemoteService;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use tfe_defs::{
        ConfigurationVersion, RemoteVariable, Run, RunStatus, VariableCategory, VariableValue,
        Workspace,
    };

    fn config(wait: bool) -> RunConfig {
        RunConfig {
            organization: "acme".to_string(),
            workspace: "prod".to_string(),
            variables: vec![WorkspaceVariable::new(
                "img_tag",
                VariableValue::String("v1.2.3".to_string()),
            )],
            message: DEFAULT_MESSAGE.to_string(),
            base_url: "https://app.terraform.io".to_string(),
            wait,
            configuration_version: ConfigurationVersionSource::Create,
            poll: PollSettings::default(),
        }
    }

    fn run(status: RunStatus) -> Run {
        Run {
            id: "run-xyz".to_string(),
            status,
            message: Some(DEFAULT_MESSAGE.to_string()),
        }
    }

    fn service_until_trigger() -> MockRemoteService {
        let mut service = MockRemoteService::new();
        service
            .expect_read_workspace()
            .withf(|organization, workspace| organization == "acme" && workspace == "prod")
            .times(1)
            .returning(|organization, workspace| {
                Ok(Workspace {
                    id: "ws-1".to_string(),
                    name: workspace.to_string(),
                    organization: organization.to_string(),
                })
            });
        service
            .expect_list_variables()
            .times(1)
            .returning(|_| Ok(vec![]));
        service
            .expect_create_variable()
            .withf(|_, options| options.key == "img_tag" && options.value == "v1.2.3")
            .times(1)
            .returning(|_, options| {
                Ok(RemoteVariable {
                    id: "var-1".to_string(),
                    key: options.key.clone(),
                    category: VariableCategory::Terraform,
                    value: Some(options.value.clone()),
                    description: None,
                    hcl: false,
                    sensitive: false,
                })
            });
        service.expect_update_variable().never();
        service
            .expect_create_configuration_version()
            .times(1)
            .returning(|_| {
                Ok(ConfigurationVersion {
                    id: "cv-1".to_string(),
                    status: "pending".to_string(),
                })
            });
        service
            .expect_create_run()
            .withf(|_, _, message, refresh| message == DEFAULT_MESSAGE && *refresh)
            .times(1)
            .returning(|_, _, _, _| Ok(run(RunStatus::Pending)));
        service
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_end_to_end() {
        let mut service = service_until_trigger();
        let mut statuses = VecDeque::from(vec![RunStatus::Pending, RunStatus::Applied]);
        service
            .expect_read_run()
            .times(2)
            .returning(move |_| Ok(run(statuses.pop_front().unwrap_or(RunStatus::Pending))));

        let mut reported = None;
        let result = execute(
            &service,
            &config(true),
            &CancellationToken::new(),
            |run| {
                reported = Some(run.url.clone());
                Ok(())
            },
        )
        .await
        .unwrap();

        let expected_url = "https://app.terraform.io/app/acme/workspaces/prod/runs/run-xyz";
        assert_eq!(reported.as_deref(), Some(expected_url));
        assert_eq!(result.url, expected_url);
        assert_eq!(result.status, RunStatus::Applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_without_waiting_skips_polling() {
        let mut service = service_until_trigger();
        service.expect_read_run().never();

        let result = execute(&service, &config(false), &CancellationToken::new(), |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(result.status, RunStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_url_is_reported_before_a_failed_wait() {
        let mut service = service_until_trigger();
        service
            .expect_read_run()
            .times(1)
            .returning(|_| Ok(run(RunStatus::Discarded)));

        let mut reported = false;
        let error = execute(&service, &config(true), &CancellationToken::new(), |_| {
            reported = true;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(reported);
        assert!(matches!(error, RunError::RunDiscarded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_failure_stops_before_waiting() {
        let mut service = service_until_trigger();
        service.expect_read_run().never();

        let mut seen_url = None;
        let error = execute(&service, &config(true), &CancellationToken::new(), |run| {
            seen_url = Some(run.url.clone());
            Err(RunError::Output(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file system",
            )))
        })
        .await
        .unwrap_err();

        assert_eq!(
            seen_url.as_deref(),
            Some("https://app.terraform.io/app/acme/workspaces/prod/runs/run-xyz")
        );
        assert!(matches!(error, RunError::Output(_)));
    }

    #[tokio::test]
    async fn test_reconcile_failure_never_triggers_a_run() {
        let mut service = MockRemoteService::new();
        service.expect_read_workspace().times(1).returning(|_, _| {
            Ok(Workspace {
                id: "ws-1".to_string(),
                name: "prod".to_string(),
                organization: "acme".to_string(),
            })
        });
        service.expect_list_variables().times(1).returning(|_| {
            Err(http_client::ApiError::Status {
                method: "GET".to_string(),
                path: "/workspaces/ws-1/vars".to_string(),
                status: 500,
                message: "internal error".to_string(),
                errors: vec![],
            })
        });
        service.expect_create_configuration_version().never();
        service.expect_create_run().never();

        let mut reported = false;
        let error = execute(&service, &config(true), &CancellationToken::new(), |_| {
            reported = true;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(!reported);
        assert!(matches!(error, RunError::VariableList(_)));
    }

    #[tokio::test]
    async fn test_workspace_lookup_failure() {
        let mut service = MockRemoteService::new();
        service.expect_read_workspace().times(1).returning(|_, _| {
            Err(http_client::ApiError::Status {
                method: "GET".to_string(),
                path: "/organizations/acme/workspaces/prod".to_string(),
                status: 404,
                message: "not found".to_string(),
                errors: vec![],
            })
        });
        service.expect_list_variables().never();

        let error = execute(&service, &config(true), &CancellationToken::new(), |_| Ok(()))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "could not read workspace acme/prod");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mut service = MockRemoteService::new();
        service.expect_read_workspace().never();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = execute(&service, &config(true), &cancel, |_| Ok(()))
            .await
            .unwrap_err();
        assert!(matches!(error, RunError::Cancelled));
    }
}
