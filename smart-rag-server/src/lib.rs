//! HTTP shell for the smart-rag service.

pub mod server;
pub mod settings;

pub use server::{AppState, HealthResponse, app_router, run_server};
pub use settings::{AppSettings, SettingsError};
