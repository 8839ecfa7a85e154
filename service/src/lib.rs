use config::Config;

pub mod config;
pub mod logging;

/// Builds the HTTP client shared by Gemini calls for the life of the process.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().use_rustls_tls().build()
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    http_client: reqwest::Client,
}

impl AppState {
    pub fn new(app_config: Config, http_client: reqwest::Client) -> Self {
        Self {
            config: app_config,
            http_client,
        }
    }

    pub fn config_ref(&self) -> &Config {
        &self.config
    }

    pub fn http_client_ref(&self) -> &reqwest::Client {
        &self.http_client
    }
}
