// Application configuration, loaded via the 'config' crate and 'dotenv'.

use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub server_address: String,
    /// Base URL of the marketplace backend API (listings + appointments).
    pub backend_api_url: String,
    /// Endpoint of the transactional mail provider.
    pub mailer_url: String,
    pub mailer_service_id: Option<String>,
    pub mailer_template_id: Option<String>,
    pub mailer_public_key: Option<String>,
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("backend_api_url", "http://127.0.0.1:8080/api")?
            .set_default("mailer_url", "https://api.emailjs.com/api/v1.0/email/send")
    }

    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_BACKEND_API_URL)
            .add_source(Environment::with_prefix("APP"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
