use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::settings::AppSettings;

#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<AppSettings>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings: Arc::new(settings) }
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub app_name: String,
    pub environment: String,
}

pub fn app_router(state: AppState) -> Router {
    let health_path = format!("{}/health", state.settings.api_v1_prefix);

    Router::new()
        .route(&health_path, get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: AppSettings) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| "invalid host/port for smart-rag server")?;
    let state = AppState::new(settings);
    let app = app_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        app_name = %state.settings.app_name,
        environment = %state.settings.environment,
        "smart-rag listening on http://{}",
        addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        app_name: state.settings.app_name.clone(),
        environment: state.settings.environment.clone(),
    })
}
