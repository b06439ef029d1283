use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub organization: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ConfigurationVersion {
    pub id: String,
    pub status: String,
}
