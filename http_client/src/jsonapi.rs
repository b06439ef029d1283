use serde::Deserialize;
use tfe_defs::{ConfigurationVersion, RemoteVariable, Run, RunStatus, VariableCategory};

pub const MEDIA_TYPE: &str = "application/vnd.api+json";

#[derive(Deserialize, Debug)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Deserialize, Debug)]
pub struct Resource<A> {
    pub id: String,
    pub attributes: A,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    pub next_page: Option<u32>,
}

impl<T> Document<T> {
    pub fn next_page(&self) -> Option<u32> {
        self.meta
            .as_ref()
            .and_then(|m| m.pagination.as_ref())
            .and_then(|p| p.next_page)
    }
}

#[derive(Deserialize, Debug)]
pub struct WorkspaceAttributes {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct VariableAttributes {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: VariableCategory,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl From<Resource<VariableAttributes>> for RemoteVariable {
    fn from(resource: Resource<VariableAttributes>) -> Self {
        let attributes = resource.attributes;
        RemoteVariable {
            id: resource.id,
            key: attributes.key,
            category: attributes.category,
            value: attributes.value,
            description: attributes.description,
            hcl: attributes.hcl,
            sensitive: attributes.sensitive,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ConfigurationVersionAttributes {
    pub status: String,
}

impl From<Resource<ConfigurationVersionAttributes>> for ConfigurationVersion {
    fn from(resource: Resource<ConfigurationVersionAttributes>) -> Self {
        ConfigurationVersion {
            id: resource.id,
            status: resource.attributes.status,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RunAttributes {
    pub status: RunStatus,
    pub message: Option<String>,
}

impl From<Resource<RunAttributes>> for Run {
    fn from(resource: Resource<RunAttributes>) -> Self {
        Run {
            id: resource.id,
            status: resource.attributes.status,
            message: resource.attributes.message,
        }
    }
}
