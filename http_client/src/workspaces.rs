use reqwest::Method;
use tfe_defs::Workspace;

use crate::jsonapi::{Document, Resource, WorkspaceAttributes};
use crate::{ApiError, TfeClient};

impl TfeClient {
    pub async fn read_workspace(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Workspace, ApiError> {
        let path = format!("/organizations/{}/workspaces/{}", organization, workspace);
        let document: Document<Resource<WorkspaceAttributes>> =
            self.call_api_as(Method::GET, &path, &[], None).await?;
        Ok(Workspace {
            id: document.data.id,
            name: document.data.attributes.name,
            organization: organization.to_string(),
        })
    }
}
