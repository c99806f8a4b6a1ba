use anyhow::{Context, Result};
use axum::{Router, extract::FromRef};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod appointment;
mod backend_api;
mod config;
mod error;
mod mailer;
mod models;
mod routes;
mod search;
mod validation;

use backend_api::{AppointmentProvider, BackendApi, ListingProvider};
use mailer::{AppointmentNotifier, HttpMailer};

/// Shared application state: configuration plus the upstream collaborators.
/// The collaborators are trait objects so tests can swap in scripted ones.
#[derive(Clone, FromRef)]
struct AppState {
    settings: Arc<config::Settings>,
    listings: Arc<dyn ListingProvider>,
    appointments: Arc<dyn AppointmentProvider>,
    notifier: Arc<dyn AppointmentNotifier>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first; ignore a missing file.
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carmarket=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing carmarket server...");

    let settings = match config::Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let shared_settings = Arc::new(settings);

    // One shared reqwest client for both the backend API and the mailer.
    let http_client = Arc::new(
        Client::builder()
            .user_agent(concat!("carmarket/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build shared reqwest client")?,
    );
    tracing::info!("Shared HTTP client created.");

    let backend = BackendApi::new(Arc::clone(&http_client), &shared_settings);
    let app_state = AppState {
        settings: Arc::clone(&shared_settings),
        listings: Arc::new(backend.clone()),
        appointments: Arc::new(backend),
        notifier: Arc::new(HttpMailer::new(Arc::clone(&http_client), &shared_settings)),
    };

    let router: Router = routes::create_router(app_state);
    let app = router.nest_service("/static", ServeDir::new("static"));

    let addr: SocketAddr = shared_settings
        .server_address
        .parse()
        .with_context(|| {
            format!(
                "Invalid server address format in configuration ('{}')",
                shared_settings.server_address
            )
        })?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
