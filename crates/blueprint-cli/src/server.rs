//! HTTP viewer serving rendered views.
//!
//! Routes mirror the layout of an exported site:
//!
//! - `/` - the generic context view
//! - `/contexts/{name}`, `/containers/{name}`, `/components/{name}` - one
//!   view each, with or without an `.html` suffix
//!
//! Every request reads the project again, so edits show up on reload. Reading
//! and rendering are blocking and run on the blocking thread pool.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{debug, error, info};
use tokio::{net::TcpListener, task};

use blueprint::{
    Blueprint, BlueprintError,
    config::AppConfig,
    graph::escape_html,
    view::{ViewKind, ViewRef},
};

use crate::CliError;

/// State shared by all handlers.
#[derive(Debug, Clone)]
struct ServerState {
    project: Arc<PathBuf>,
    blueprint: Arc<Blueprint>,
}

/// A failed request, rendered as a short HTML page.
#[derive(Debug)]
struct ServerError {
    status: StatusCode,
    message: String,
}

impl ServerError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<BlueprintError> for ServerError {
    fn from(err: BlueprintError) -> Self {
        let status = match err {
            BlueprintError::ViewNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = format!(
            "<!DOCTYPE html>\n<html>\n<body>\n    <h1>{}</h1>\n    <p>{}</p>\n</body>\n</html>\n",
            self.status,
            escape_html(&self.message),
        );
        (self.status, Html(body)).into_response()
    }
}

/// Build the router serving the views of `project`.
pub fn router(project: PathBuf, config: AppConfig) -> Router {
    let state = ServerState {
        project: Arc::new(project),
        blueprint: Arc::new(Blueprint::new(config)),
    };

    Router::new()
        .route("/", get(index))
        .route("/:kind/:name", get(view_page))
        .with_state(state)
}

/// Serve `project` on `addr` until the process is stopped.
///
/// # Errors
///
/// Returns [`CliError::Serve`] if the address cannot be bound.
pub async fn serve(project: PathBuf, config: AppConfig, addr: SocketAddr) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Serve { addr, source })?;

    info!(addr:%, project:% = project.display(); "Serving views");
    axum::serve(listener, router(project, config))
        .await
        .map_err(|source| CliError::Serve { addr, source })
}

async fn index(State(state): State<ServerState>) -> Result<Html<String>, ServerError> {
    render(state, ViewRef::generic()).await
}

async fn view_page(
    State(state): State<ServerState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<Html<String>, ServerError> {
    let kind = ViewKind::from_segment(&kind)
        .ok_or_else(|| ServerError::new(StatusCode::BAD_REQUEST, format!("unknown view kind `{kind}`")))?;
    let name = name.strip_suffix(".html").unwrap_or(&name);

    let reference = if kind == ViewKind::Context && name == "index" {
        ViewRef::generic()
    } else {
        ViewRef::new(kind, Some(name.to_string()))
    };
    render(state, reference).await
}

async fn render(state: ServerState, reference: ViewRef) -> Result<Html<String>, ServerError> {
    debug!(view:% = reference; "Handling view request");

    let html = task::spawn_blocking(move || -> Result<String, BlueprintError> {
        let model = state.blueprint.load(state.project.as_path())?;
        let view = state.blueprint.view(&model, &reference)?;
        Ok(state.blueprint.render_page(&model, &view)?.html)
    })
    .await
    .map_err(|err| {
        error!(err:%; "Render task failed");
        ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "render task failed")
    })??;

    Ok(Html(html))
}
