// In crates/app-config/src/types.rs

use serde::Deserialize;

use crate::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Settings for the database connection.
    pub database: DatabaseSettings,
    /// Settings for the external reasoning endpoint.
    pub gateway: GatewaySettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// The single origin allowed to call the API from a browser.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    /// The connection URL for the PostgreSQL database.
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GatewaySettings {
    /// Base URL of the OpenAI-compatible completion API, without the trailing `/chat/completions`.
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
    /// The model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer credential. Usually supplied through the environment, never committed.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl GatewaySettings {
    /// Returns the configured credential, or `MissingCredential` if it is absent or blank.
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::MissingCredential),
        }
    }
}

/// Helper functions for serde defaults
fn default_allowed_origin() -> String { "http://localhost:5173".to_string() }
fn default_gateway_url() -> String { "https://ai.gateway.lovable.dev/v1".to_string() }
fn default_model() -> String { "google/gemini-2.5-flash".to_string() }
