use reqwest::Method;
use serde_json::{json, Map, Value};
use tfe_defs::{RemoteVariable, VariableCreateOptions, VariableUpdateOptions};

use crate::jsonapi::{Document, Resource, VariableAttributes};
use crate::{ApiError, TfeClient};

const PAGE_SIZE: u32 = 100;

impl TfeClient {
    /// Lists every variable of the workspace, following pagination.
    pub async fn list_variables(&self, workspace_id: &str) -> Result<Vec<RemoteVariable>, ApiError> {
        let path = format!("/workspaces/{}/vars", workspace_id);
        let mut variables = vec![];
        let mut page = 1;
        loop {
            let query = [
                ("page[number]", page.to_string()),
                ("page[size]", PAGE_SIZE.to_string()),
            ];
            let document: Document<Vec<Resource<VariableAttributes>>> =
                self.call_api_as(Method::GET, &path, &query, None).await?;
            let next_page = document.next_page();
            variables.extend(document.data.into_iter().map(RemoteVariable::from));
            match next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }
        Ok(variables)
    }

    pub async fn create_variable(
        &self,
        workspace_id: &str,
        options: &VariableCreateOptions,
    ) -> Result<RemoteVariable, ApiError> {
        let path = format!("/workspaces/{}/vars", workspace_id);
        let mut attributes = Map::new();
        attributes.insert("key".to_string(), json!(options.key));
        attributes.insert("value".to_string(), json!(options.value));
        attributes.insert("category".to_string(), json!(options.category.as_str()));
        attributes.insert("hcl".to_string(), json!(options.hcl));
        attributes.insert("sensitive".to_string(), json!(options.sensitive));
        if let Some(description) = &options.description {
            attributes.insert("description".to_string(), json!(description));
        }
        let body = json!({
            "data": {
                "type": "vars",
                "attributes": Value::Object(attributes),
            }
        });
        let document: Document<Resource<VariableAttributes>> =
            self.call_api_as(Method::POST, &path, &[], Some(body)).await?;
        Ok(document.data.into())
    }

    pub async fn update_variable(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<RemoteVariable, ApiError> {
        let path = format!("/workspaces/{}/vars/{}", workspace_id, variable_id);
        let body = json!({
            "data": {
                "type": "vars",
                "id": variable_id,
                "attributes": update_attributes(options),
            }
        });
        let document: Document<Resource<VariableAttributes>> =
            self.call_api_as(Method::PATCH, &path, &[], Some(body)).await?;
        Ok(document.data.into())
    }
}

fn update_attributes(options: &VariableUpdateOptions) -> Value {
    let mut attributes = Map::new();
    attributes.insert("value".to_string(), json!(options.value));
    if let Some(description) = &options.description {
        attributes.insert("description".to_string(), json!(description));
    }
    if let Some(category) = options.category {
        attributes.insert("category".to_string(), json!(category.as_str()));
    }
    if let Some(hcl) = options.hcl {
        attributes.insert("hcl".to_string(), json!(hcl));
    }
    if let Some(sensitive) = options.sensitive {
        attributes.insert("sensitive".to_string(), json!(sensitive));
    }
    Value::Object(attributes)
}
