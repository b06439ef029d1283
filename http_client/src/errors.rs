use serde::Deserialize;
use thiserror::Error;

const KEY_POINTER: &str = "/data/attributes/key";
const KEY_TAKEN: &str = "has already been taken";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorObject {
    pub status: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub source: Option<ErrorSource>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorSource {
    pub pointer: Option<String>,
}

impl ErrorObject {
    /// Points at the `key` attribute, or says the key is taken when the
    /// service leaves out the pointer.
    pub fn marks_key_taken(&self) -> bool {
        let pointer = self.source.as_ref().and_then(|s| s.pointer.as_deref());
        match pointer {
            Some(pointer) => pointer == KEY_POINTER,
            None => self
                .detail
                .as_deref()
                .is_some_and(|d| d.to_ascii_lowercase().contains(KEY_TAKEN)),
        }
    }
}

// Older endpoints return bare strings in `errors`
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorEntry {
    Object(ErrorObject),
    Text(String),
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid service address {0:?}: {1}")]
    InvalidAddress(String, String),

    #[error("an API token is required")]
    MissingToken,

    #[error("could not build HTTP client")]
    Builder(#[source] reqwest::Error),

    #[error("{method} {path} failed")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned {status}: {message}")]
    Status {
        method: String,
        path: String,
        status: u16,
        message: String,
        errors: Vec<ErrorObject>,
    },

    #[error("could not decode response from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub(crate) fn from_response(method: &str, path: &str, status: u16, body: &str) -> Self {
        let errors = parse_error_objects(body);
        let details: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
            .collect();
        let message = if !details.is_empty() {
            details.join("; ")
        } else if !body.trim().is_empty() {
            body.trim().to_string()
        } else {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown error")
                .to_string()
        };
        ApiError::Status {
            method: method.to_string(),
            path: path.to_string(),
            status,
            message,
            errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The variable key is already in use in this workspace and category.
    ///
    /// The service answers a duplicate key with a 422 whose error marks the
    /// `key` attribute as taken; a plain 409 is accepted as well.
    pub fn is_conflict(&self) -> bool {
        match self {
            ApiError::Status { status: 409, .. } => true,
            ApiError::Status {
                status: 422,
                errors,
                ..
            } => errors.iter().any(ErrorObject::marks_key_taken),
            _ => false,
        }
    }
}

fn parse_error_objects(body: &str) -> Vec<ErrorObject> {
    match serde_json::from_str::<ErrorDocument>(body) {
        Ok(document) => document
            .errors
            .into_iter()
            .map(|entry| match entry {
                ErrorEntry::Object(object) => object,
                ErrorEntry::Text(text) => ErrorObject {
                    detail: Some(text),
                    ..Default::default()
                },
            })
            .collect(),
        Err(_) => vec![],
    }
}
