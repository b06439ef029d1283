use reqwest::Method;
use serde_json::json;
use tfe_defs::Run;

use crate::jsonapi::{Document, Resource, RunAttributes};
use crate::{ApiError, TfeClient};

impl TfeClient {
    pub async fn create_run(
        &self,
        workspace_id: &str,
        configuration_version_id: &str,
        message: &str,
        refresh: bool,
    ) -> Result<Run, ApiError> {
        let body = json!({
            "data": {
                "type": "runs",
                "attributes": {
                    "message": message,
                    "refresh": refresh,
                },
                "relationships": {
                    "workspace": {
                        "data": {"type": "workspaces", "id": workspace_id}
                    },
                    "configuration-version": {
                        "data": {"type": "configuration-versions", "id": configuration_version_id}
                    }
                }
            }
        });
        let document: Document<Resource<RunAttributes>> =
            self.call_api_as(Method::POST, "/runs", &[], Some(body)).await?;
        Ok(document.data.into())
    }

    pub async fn read_run(&self, run_id: &str) -> Result<Run, ApiError> {
        let path = format!("/runs/{}", run_id);
        let document: Document<Resource<RunAttributes>> =
            self.call_api_as(Method::GET, &path, &[], None).await?;
        Ok(document.data.into())
    }
}
