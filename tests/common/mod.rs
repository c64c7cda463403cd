#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use learning_trails_api::clients::{HttpAuthClient, HttpUserClient};
use learning_trails_api::config::SecurityConfig;
use learning_trails_api::database::MemoryDocumentStore;
use learning_trails_api::{app, AppState};

pub const VALID_TOKEN: &str = "valid-token";
pub const USER_ID: &str = "user-123";
/// Resolves to a payload without an id.
pub const ANONYMOUS_TOKEN: &str = "anonymous-token";
/// Resolves to a user the User service does not know.
pub const GHOST_TOKEN: &str = "ghost-token";

/// The API on an in-memory store, wired through the real HTTP clients to a
/// fake Auth/User service.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    /// `PUT` paths the fake User service accepted.
    pub notifications: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let collaborators = serve(collaborator_router(notifications.clone())).await?;

        let state = AppState::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(HttpAuthClient::new(reqwest::Client::new(), format!("{}/auth", collaborators))),
            Arc::new(HttpUserClient::new(reqwest::Client::new(), format!("{}/users", collaborators))),
        );
        let security = SecurityConfig {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
        };
        let base_url = serve(app(state, &security)).await?;

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            notifications,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        read(res).await
    }

    pub async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.request(method, self.url(path)).json(&body).send().await?;
        read(res).await
    }

    pub async fn post_with_token(&self, path: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    /// POST and return `data._id` of the created document.
    pub async fn create(&self, path: &str, body: Value) -> Result<String> {
        let (status, body) = self.send(reqwest::Method::POST, path, body).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "POST {} returned {}: {}", path, status, body);
        id_of(&body)
    }

    pub async fn create_with_token(&self, path: &str, body: Value) -> Result<String> {
        let (status, body) = self.post_with_token(path, VALID_TOKEN, body).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "POST {} returned {}: {}", path, status, body);
        id_of(&body)
    }
}

pub fn id_of(body: &Value) -> Result<String> {
    body["data"]["_id"]
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("missing data._id in {}", body))
}

async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = StatusCode::from_u16(res.status().as_u16())?;
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

async fn serve(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

fn collaborator_router(notifications: Arc<Mutex<Vec<String>>>) -> Router {
    Router::new()
        .route("/auth/validate-token", get(validate_token))
        .route("/users/:user/:kind/:id/add", put(add_resource))
        .with_state(notifications)
}

async fn validate_token(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    match token {
        VALID_TOKEN => (StatusCode::OK, Json(json!({ "userPayload": { "id": USER_ID } }))),
        GHOST_TOKEN => (StatusCode::OK, Json(json!({ "userPayload": { "id": "ghost" } }))),
        ANONYMOUS_TOKEN => (StatusCode::OK, Json(json!({ "userPayload": {} }))),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "invalid token" }))),
    }
}

async fn add_resource(
    State(notifications): State<Arc<Mutex<Vec<String>>>>,
    Path((user, kind, id)): Path<(String, String, String)>,
) -> StatusCode {
    if user == "ghost" {
        return StatusCode::NOT_FOUND;
    }
    notifications
        .lock()
        .unwrap()
        .push(format!("/{}/{}/{}/add", user, kind, id));
    StatusCode::OK
}
