//! # REST Controller
//!
//! Thin axum front end over a shared [`TaskListApi`].
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | `200 "OK"` |
//! | `GET /person/get?name=..` | JSON array of formatted rows (`name` is accepted and ignored) |
//! | `POST /person/update` | adds a record named after the body's `name`, echoes the body |
//!
//! Datastore calls are synchronous, so handlers run them on the blocking pool.
//!
//! ## Errors
//!
//! Every failure becomes `{"error": "<message>"}`:
//!
//! - validation → `400`
//! - [`StoreError::Unavailable`] → `503`
//! - [`StoreError::Conflict`] → `409`
//! - anything else → `500`
//!
//! Malformed JSON bodies are rejected by axum's own extractor before reaching us.

use crate::api::TaskListApi;
use crate::datastore::Datastore;
use crate::error::{StoreError, TaskListError};
use crate::model::Person;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared handle every handler receives.
pub type AppState<D> = Arc<TaskListApi<D>>;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<TaskListError> for ApiError {
    fn from(err: TaskListError) -> Self {
        let status = match &err {
            TaskListError::Command(_) => StatusCode::BAD_REQUEST,
            TaskListError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            TaskListError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            TaskListError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("request task failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct GetParams {
    #[serde(default = "unknown_name")]
    pub name: String,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

pub fn router<D: Datastore + 'static>(api: AppState<D>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/person/get", get(get_people::<D>))
        .route("/person/update", post(update_person::<D>))
        .with_state(api)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_people<D: Datastore + 'static>(
    State(api): State<AppState<D>>,
    Query(params): Query<GetParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    debug!(name = %params.name, "get people");
    let rows = tokio::task::spawn_blocking(move || api.list_formatted()).await??;

    info!("found {} tasks:", rows.len());
    for row in &rows {
        info!("{}", row);
    }
    Ok(Json(rows))
}

async fn update_person<D: Datastore + 'static>(
    State(api): State<AppState<D>>,
    Json(person): Json<Person>,
) -> Result<Json<Person>, ApiError> {
    let name = person.name.clone();
    let added = tokio::task::spawn_blocking(move || api.add(&name)).await??;

    info!(id = ?added.id, "person added");
    Ok(Json(person))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<D: Datastore + 'static>(api: AppState<D>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(api))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
