use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod github;
mod handlers;


pub use config::Config;
pub use error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub agent: ureq::Agent,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(std::time::Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { config, agent }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oauth_proxy=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    info!(
        "Starting OAuth proxy on {}:{} (client id {}...)",
        config.host,
        config.port,
        &config.client_id[..config.client_id.len().min(8)]
    );

    let bind_addr = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/api/health", web::get().to(handlers::health))
            .route(
                "/api/github/oauth/token",
                web::post().to(handlers::exchange_token),
            )
            .route(
                "/api/github/oauth/verify",
                web::get().to(handlers::verify_token),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
