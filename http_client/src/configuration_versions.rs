use reqwest::Method;
use serde_json::json;
use tfe_defs::ConfigurationVersion;

use crate::jsonapi::{ConfigurationVersionAttributes, Document, Resource};
use crate::{ApiError, TfeClient};

impl TfeClient {
    pub async fn create_configuration_version(
        &self,
        workspace_id: &str,
        auto_queue_runs: bool,
    ) -> Result<ConfigurationVersion, ApiError> {
        let path = format!("/workspaces/{}/configuration-versions", workspace_id);
        let body = json!({
            "data": {
                "type": "configuration-versions",
                "attributes": {"auto-queue-runs": auto_queue_runs},
            }
        });
        let document: Document<Resource<ConfigurationVersionAttributes>> =
            self.call_api_as(Method::POST, &path, &[], Some(body)).await?;
        Ok(document.data.into())
    }

    /// Most recent configuration version of the workspace, if it has any.
    pub async fn latest_configuration_version(
        &self,
        workspace_id: &str,
    ) -> Result<Option<ConfigurationVersion>, ApiError> {
        let path = format!("/workspaces/{}/configuration-versions", workspace_id);
        let query = [("page[size]", "1".to_string())];
        let document: Document<Vec<Resource<ConfigurationVersionAttributes>>> =
            self.call_api_as(Method::GET, &path, &query, None).await?;
        Ok(document.data.into_iter().next().map(Into::into))
    }

    pub async fn read_configuration_version(
        &self,
        configuration_version_id: &str,
    ) -> Result<ConfigurationVersion, ApiError> {
        let path = format!("/configuration-versions/{}", configuration_version_id);
        let document: Document<Resource<ConfigurationVersionAttributes>> =
            self.call_api_as(Method::GET, &path, &[], None).await?;
        Ok(document.data.into())
    }
}
