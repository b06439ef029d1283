use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tfe_utils::trim_base_url;
use url::Url;

use crate::jsonapi::MEDIA_TYPE;
use crate::ApiError;

pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";

const API_PREFIX: &str = "/api/v2";
const USER_AGENT: &str = concat!("tfe-run/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Minimal client for the workspace/variable/run endpoints of the API.
#[derive(Clone)]
pub struct TfeClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl TfeClient {
    pub fn new(address: &str, token: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(address)
            .map_err(|e| ApiError::InvalidAddress(address.to_string(), e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidAddress(
                address.to_string(),
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        if token.trim().is_empty() {
            return Err(ApiError::MissingToken);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Builder)?;

        Ok(TfeClient {
            base_url: trim_base_url(address).to_string(),
            token: token.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn call_api(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, MEDIA_TYPE);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json_body) = body {
            request = request
                .header(CONTENT_TYPE, MEDIA_TYPE)
                .body(json_body.to_string());
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source: e,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(ApiError::from_response(
                method.as_str(),
                path,
                status.as_u16(),
                &text,
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }

    pub(crate) async fn call_api_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.call_api(method, path, query, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}
