use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VariableDecodeError;

const REDACTED: &str = "<sensitive>";

/// Scalar value of a workspace variable as it was decoded from the input.
///
/// Anything that is not a string, bool or number is kept as `Other` and
/// stringified as JSON when normalized.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableValue {
    String(String),
    Bool(bool),
    Integer(i128),
    Float(f64),
    Other(serde_json::Value),
}

impl From<serde_json::Value> for VariableValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => VariableValue::String(s),
            serde_json::Value::Bool(b) => VariableValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    VariableValue::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    VariableValue::Integer(u as i128)
                } else if let Some(f) = n.as_f64() {
                    VariableValue::Float(f)
                } else {
                    VariableValue::Other(serde_json::Value::Number(n))
                }
            }
            other => VariableValue::Other(other),
        }
    }
}

impl From<&VariableValue> for serde_json::Value {
    fn from(value: &VariableValue) -> Self {
        match value {
            VariableValue::String(s) => serde_json::Value::String(s.clone()),
            VariableValue::Bool(b) => serde_json::Value::Bool(*b),
            VariableValue::Integer(i) => {
                if let Ok(i) = i64::try_from(*i) {
                    serde_json::Value::from(i)
                } else if let Ok(u) = u64::try_from(*i) {
                    serde_json::Value::from(u)
                } else {
                    serde_json::Value::String(i.to_string())
                }
            }
            VariableValue::Float(f) => serde_json::Value::from(*f),
            VariableValue::Other(v) => v.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for VariableValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(VariableValue::from)
    }
}

impl Serialize for VariableValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_json::Value::from(self).serialize(serializer)
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    #[default]
    Terraform,
    Env,
}

impl VariableCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableCategory::Terraform => "terraform",
            VariableCategory::Env => "env",
        }
    }
}

impl fmt::Display for VariableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the caller supplied variable list.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct WorkspaceVariable {
    pub key: String,
    pub value: VariableValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<VariableCategory>,
}

impl WorkspaceVariable {
    pub fn new(key: &str, value: VariableValue) -> Self {
        WorkspaceVariable {
            key: key.to_string(),
            value,
            description: None,
            hcl: None,
            sensitive: None,
            category: None,
        }
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive.unwrap_or(false)
    }
}

impl fmt::Debug for WorkspaceVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("WorkspaceVariable");
        s.field("key", &self.key);
        if self.is_sensitive() {
            s.field("value", &REDACTED);
        } else {
            s.field("value", &self.value);
        }
        s.field("description", &self.description)
            .field("hcl", &self.hcl)
            .field("sensitive", &self.sensitive)
            .field("category", &self.category)
            .finish()
    }
}

/// Decodes the `json-vars` input. An empty or blank input means no variables.
pub fn deserialize_workspace_variables(
    input: &str,
) -> Result<Vec<WorkspaceVariable>, VariableDecodeError> {
    if input.trim().is_empty() {
        return Ok(vec![]);
    }
    let variables: Vec<WorkspaceVariable> = serde_json::from_str(input)?;
    if let Some(position) = variables.iter().position(|v| v.key.trim().is_empty()) {
        return Err(VariableDecodeError::EmptyKey(position));
    }
    Ok(variables)
}

/// A variable as it is stored on the workspace.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RemoteVariable {
    pub id: String,
    pub key: String,
    pub category: VariableCategory,
    pub value: Option<String>,
    pub description: Option<String>,
    pub hcl: bool,
    pub sensitive: bool,
}

#[derive(Clone, PartialEq)]
pub struct VariableCreateOptions {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub category: VariableCategory,
    pub hcl: bool,
    pub sensitive: bool,
}

impl fmt::Debug for VariableCreateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableCreateOptions")
            .field("key", &self.key)
            .field("value", &redact(&self.value, self.sensitive))
            .field("description", &self.description)
            .field("category", &self.category)
            .field("hcl", &self.hcl)
            .field("sensitive", &self.sensitive)
            .finish()
    }
}

/// Fields sent when updating a variable in place. `None` leaves the remote
/// field untouched, so the value is redacted unless it is known to be
/// non-sensitive.
#[derive(Clone, PartialEq)]
pub struct VariableUpdateOptions {
    pub value: String,
    pub description: Option<String>,
    pub category: Option<VariableCategory>,
    pub hcl: Option<bool>,
    pub sensitive: Option<bool>,
}

impl fmt::Debug for VariableUpdateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableUpdateOptions")
            .field(
                "value",
                &redact(&self.value, self.sensitive != Some(false)),
            )
            .field("description", &self.description)
            .field("category", &self.category)
            .field("hcl", &self.hcl)
            .field("sensitive", &self.sensitive)
            .finish()
    }
}

fn redact(value: &str, sensitive: bool) -> &str {
    if sensitive {
        REDACTED
    } else {
        value
    }
}
