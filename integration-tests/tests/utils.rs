use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

pub const ORGANIZATION: &str = "acme";
pub const WORKSPACE: &str = "prod";
pub const WORKSPACE_ID: &str = "ws-fake";

#[derive(Clone, Debug, PartialEq)]
pub struct FakeVariable {
    pub id: String,
    pub key: String,
    pub value: String,
    pub category: String,
    pub hcl: bool,
    pub sensitive: bool,
    pub description: Option<String>,
}

impl FakeVariable {
    pub fn new(id: &str, key: &str, value: &str) -> Self {
        FakeVariable {
            id: id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            category: "terraform".to_string(),
            hcl: false,
            sensitive: false,
            description: None,
        }
    }

    fn to_resource(&self) -> Value {
        json!({
            "id": self.id,
            "type": "vars",
            "attributes": {
                "key": self.key,
                "value": if self.sensitive { Value::Null } else { json!(self.value) },
                "category": self.category,
                "hcl": self.hcl,
                "sensitive": self.sensitive,
                "description": self.description,
            }
        })
    }
}

/// In-memory stand-in for the remote service, recording every call.
#[derive(Default, Debug)]
pub struct FakeState {
    pub variables: Vec<FakeVariable>,
    /// Variables per page returned by the listing, 0 means everything at once
    pub page_size: usize,
    pub run_statuses: VecDeque<String>,
    /// Keys whose first create loses a race against another writer
    pub race_on_create: Vec<String>,
    pub list_calls: usize,
    pub created: Vec<Value>,
    pub updated: Vec<(String, Value)>,
    pub configuration_versions: usize,
    pub run_creates: Vec<Value>,
    pub run_reads: usize,
    next_id: usize,
}

impl FakeState {
    pub fn with_statuses(statuses: &[&str]) -> Self {
        FakeState {
            run_statuses: statuses.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }
}

pub type SharedState = Arc<Mutex<FakeState>>;

pub struct FakeService {
    pub address: String,
    pub state: SharedState,
}

pub async fn test_scaffold<F, Fut>(state: FakeState, function_to_test: F)
where
    F: FnOnce(FakeService) -> Fut,
    Fut: Future<Output = ()>,
{
    let shared = Arc::new(Mutex::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    let app = router(shared.clone());
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    function_to_test(FakeService {
        address,
        state: shared,
    })
    .await;

    server.abort();
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/v2/organizations/{organization}/workspaces/{workspace}",
            get(read_workspace),
        )
        .route(
            "/api/v2/workspaces/{workspace_id}/vars",
            get(list_variables).post(create_variable),
        )
        .route(
            "/api/v2/workspaces/{workspace_id}/vars/{variable_id}",
            patch(update_variable),
        )
        .route(
            "/api/v2/workspaces/{workspace_id}/configuration-versions",
            post(create_configuration_version),
        )
        .route("/api/v2/runs", post(create_run))
        .route("/api/v2/runs/{run_id}", get(read_run))
        .with_state(state)
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"errors": [{"status": "404", "title": "not found"}]})),
    )
}

fn key_taken() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"errors": [{
            "status": "422",
            "title": "invalid attribute",
            "detail": "Key has already been taken",
            "source": {"pointer": "/data/attributes/key"}
        }]})),
    )
}

fn attributes(body: &str) -> Value {
    serde_json::from_str::<Value>(body).unwrap_or_default()["data"]["attributes"].clone()
}

async fn read_workspace(
    Path((organization, workspace)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    if organization != ORGANIZATION || workspace != WORKSPACE {
        return not_found();
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": {"id": WORKSPACE_ID, "type": "workspaces", "attributes": {"name": workspace}}
        })),
    )
}

async fn list_variables(
    State(state): State<SharedState>,
    Path(workspace_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if workspace_id != WORKSPACE_ID {
        return not_found();
    }
    let mut state = state.lock().unwrap();
    state.list_calls += 1;

    let page: usize = query
        .get("page[number]")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let page_size = if state.page_size == 0 {
        state.variables.len().max(1)
    } else {
        state.page_size
    };
    let start = (page - 1) * page_size;
    let items: Vec<Value> = state
        .variables
        .iter()
        .skip(start)
        .take(page_size)
        .map(FakeVariable::to_resource)
        .collect();
    let next_page = if start + page_size < state.variables.len() {
        json!(page + 1)
    } else {
        Value::Null
    };

    (
        StatusCode::OK,
        Json(json!({
            "data": items,
            "meta": {"pagination": {"current-page": page, "next-page": next_page}}
        })),
    )
}

async fn create_variable(
    State(state): State<SharedState>,
    Path(workspace_id): Path<String>,
    body: String,
) -> (StatusCode, Json<Value>) {
    if workspace_id != WORKSPACE_ID {
        return not_found();
    }
    let attributes = attributes(&body);
    let mut state = state.lock().unwrap();
    state.created.push(attributes.clone());

    let key = attributes["key"].as_str().unwrap_or_default().to_string();
    let category = attributes["category"]
        .as_str()
        .unwrap_or("terraform")
        .to_string();

    if let Some(position) = state.race_on_create.iter().position(|k| *k == key) {
        state.race_on_create.remove(position);
        let mut raced = FakeVariable::new(&format!("var-raced-{}", key), &key, "from-elsewhere");
        raced.category = category;
        state.variables.push(raced);
        return key_taken();
    }
    if state
        .variables
        .iter()
        .any(|v| v.key == key && v.category == category)
    {
        return key_taken();
    }

    state.next_id += 1;
    let variable = FakeVariable {
        id: format!("var-{}", state.next_id),
        key,
        value: attributes["value"].as_str().unwrap_or_default().to_string(),
        category,
        hcl: attributes["hcl"].as_bool().unwrap_or(false),
        sensitive: attributes["sensitive"].as_bool().unwrap_or(false),
        description: attributes["description"].as_str().map(String::from),
    };
    let resource = variable.to_resource();
    state.variables.push(variable);
    (StatusCode::CREATED, Json(json!({ "data": resource })))
}

async fn update_variable(
    State(state): State<SharedState>,
    Path((workspace_id, variable_id)): Path<(String, String)>,
    body: String,
) -> (StatusCode, Json<Value>) {
    if workspace_id != WORKSPACE_ID {
        return not_found();
    }
    let attributes = attributes(&body);
    let mut state = state.lock().unwrap();
    state.updated.push((variable_id.clone(), attributes.clone()));

    let Some(variable) = state.variables.iter_mut().find(|v| v.id == variable_id) else {
        return not_found();
    };
    if let Some(value) = attributes["value"].as_str() {
        variable.value = value.to_string();
    }
    if let Some(hcl) = attributes["hcl"].as_bool() {
        variable.hcl = hcl;
    }
    if let Some(sensitive) = attributes["sensitive"].as_bool() {
        variable.sensitive = sensitive;
    }
    if let Some(description) = attributes["description"].as_str() {
        variable.description = Some(description.to_string());
    }
    (StatusCode::OK, Json(json!({ "data": variable.to_resource() })))
}

async fn create_configuration_version(
    State(state): State<SharedState>,
    Path(workspace_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if workspace_id != WORKSPACE_ID {
        return not_found();
    }
    let mut state = state.lock().unwrap();
    state.configuration_versions += 1;
    (
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "id": format!("cv-{}", state.configuration_versions),
                "type": "configuration-versions",
                "attributes": {"status": "pending", "auto-queue-runs": false}
            }
        })),
    )
}

async fn create_run(State(state): State<SharedState>, body: String) -> (StatusCode, Json<Value>) {
    let document = serde_json::from_str::<Value>(&body).unwrap_or_default();
    let mut state = state.lock().unwrap();
    state.run_creates.push(document.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "id": "run-1",
                "type": "runs",
                "attributes": {
                    "status": "pending",
                    "message": document["data"]["attributes"]["message"],
                }
            }
        })),
    )
}

async fn read_run(
    State(state): State<SharedState>,
    Path(run_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if run_id != "run-1" {
        return not_found();
    }
    let mut state = state.lock().unwrap();
    state.run_reads += 1;
    let status = state
        .run_statuses
        .pop_front()
        .unwrap_or_else(|| "pending".to_string());
    (
        StatusCode::OK,
        Json(json!({
            "data": {"id": run_id, "type": "runs", "attributes": {"status": status, "message": null}}
        })),
    )
}
