use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Starting meeting notes relay [{}] with model {}",
        config.runtime_env(),
        config.gemini_model()
    );
    if config.gemini_api_key().is_none() {
        error!("GEMINI_API_KEY is not set; summarize requests will fail");
    }
    if config.email_user().is_none() || config.email_pass().is_none() {
        error!("EMAIL_USER/EMAIL_PASS are not set; share requests will fail");
    }

    let http_client = match service::build_http_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, http_client);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}
