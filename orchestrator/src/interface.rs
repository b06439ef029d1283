use async_trait::async_trait;
use http_client::{ApiError, TfeClient};
use tfe_defs::{
    ConfigurationVersion, RemoteVariable, Run, VariableCreateOptions, VariableUpdateOptions,
    Workspace,
};

/// Operations of the remote service the orchestration needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn read_workspace(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Workspace, ApiError>;
    async fn list_variables(&self, workspace_id: &str) -> Result<Vec<RemoteVariable>, ApiError>;
    async fn create_variable(
        &self,
        workspace_id: &str,
        options: &VariableCreateOptions,
    ) -> Result<RemoteVariable, ApiError>;
    async fn update_variable(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<RemoteVariable, ApiError>;
    async fn create_configuration_version(
        &self,
        workspace_id: &str,
    ) -> Result<ConfigurationVersion, ApiError>;
    async fn latest_configuration_version(
        &self,
        workspace_id: &str,
    ) -> Result<Option<ConfigurationVersion>, ApiError>;
    async fn read_configuration_version(
        &self,
        configuration_version_id: &str,
    ) -> Result<ConfigurationVersion, ApiError>;
    async fn create_run(
        &self,
        workspace_id: &str,
        configuration_version_id: &str,
        message: &str,
        refresh: bool,
    ) -> Result<Run, ApiError>;
    async fn read_run(&self, run_id: &str) -> Result<Run, ApiError>;
}

#[async_trait]
impl RemoteService for TfeClient {
    async fn read_workspace(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Workspace, ApiError> {
        TfeClient::read_workspace(self, organization, workspace).await
    }

    async fn list_variables(&self, workspace_id: &str) -> Result<Vec<RemoteVariable>, ApiError> {
        TfeClient::list_variables(self, workspace_id).await
    }

    async fn create_variable(
        &self,
        workspace_id: &str,
        options: &VariableCreateOptions,
    ) -> Result<RemoteVariable, ApiError> {
        TfeClient::create_variable(self, workspace_id, options).await
    }

    async fn update_variable(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<RemoteVariable, ApiError> {
        TfeClient::update_variable(self, workspace_id, variable_id, options).await
    }

    async fn create_configuration_version(
        &self,
        workspace_id: &str,
    ) -> Result<ConfigurationVersion, ApiError> {
        // Runs are queued explicitly below, not by the upload
        TfeClient::create_configuration_version(self, workspace_id, false).await
    }

    async fn latest_configuration_version(
        &self,
        workspace_id: &str,
    ) -> Result<Option<ConfigurationVersion>, ApiError> {
        TfeClient::latest_configuration_version(self, workspace_id).await
    }

    async fn read_configuration_version(
        &self,
        configuration_version_id: &str,
    ) -> Result<ConfigurationVersion, ApiError> {
        TfeClient::read_configuration_version(self, configuration_version_id).await
    }

    async fn create_run(
        &self,
        workspace_id: &str,
        configuration_version_id: &str,
        message: &str,
        refresh: bool,
    ) -> Result<Run, ApiError> {
        TfeClient::create_run(self, workspace_id, configuration_version_id, message, refresh).await
    }

    async fn read_run(&self, run_id: &str) -> Result<Run, ApiError> {
        TfeClient::read_run(self, run_id).await
    }
}
