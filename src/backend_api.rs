// Client for the marketplace backend API (car inventory + appointments).

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::config::Settings;
use crate::models::{AppointmentRequest, AppointmentResult, CarListing};

/// Errors from the upstream collaborators (backend API, mail provider).
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Provider(String),
}

/// Read side of the inventory: the full listing set, truncated by the caller.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    async fn all(&self) -> Result<Vec<CarListing>, UpstreamError>;
}

/// Write side: create one appointment record.
#[async_trait]
pub trait AppointmentProvider: Send + Sync {
    async fn create(&self, request: &AppointmentRequest)
    -> Result<AppointmentResult, UpstreamError>;
}

/// reqwest-backed implementation of both provider traits, sharing the
/// application-wide HTTP client.
#[derive(Clone)]
pub struct BackendApi {
    client: Arc<Client>,
    base_url: String,
}

impl BackendApi {
    pub fn new(client: Arc<Client>, settings: &Settings) -> Self {
        BackendApi {
            client,
            base_url: settings.backend_api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ListingProvider for BackendApi {
    async fn all(&self) -> Result<Vec<CarListing>, UpstreamError> {
        let url = self.url("cars");
        tracing::debug!("Fetching car inventory from {}", url);
        let cars: Vec<CarListing> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::info!("Fetched {} listings from the backend", cars.len());
        Ok(cars)
    }
}

#[async_trait]
impl AppointmentProvider for BackendApi {
    async fn create(
        &self,
        request: &AppointmentRequest,
    ) -> Result<AppointmentResult, UpstreamError> {
        let url = self.url("appointments");
        tracing::debug!("Creating appointment for car {} via {}", request.car_id, url);
        let result: AppointmentResult = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match &result.id {
            Some(id) => tracing::info!("Appointment created with id {}", id),
            None => tracing::warn!("Appointment response carried no id"),
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let settings = Settings {
            server_address: "127.0.0.1:3000".into(),
            backend_api_url: "http://backend.test/api/".into(),
            mailer_url: "http://mailer.test".into(),
            mailer_service_id: None,
            mailer_template_id: None,
            mailer_public_key: None,
        };
        let api = BackendApi::new(Arc::new(Client::new()), &settings);
        assert_eq!(api.url("cars"), "http://backend.test/api/cars");
        assert_eq!(api.url("appointments"), "http://backend.test/api/appointments");
    }

    #[test]
    fn appointment_request_uses_backend_wire_names() {
        let request = AppointmentRequest {
            car_id: "car-1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "0601020304".into(),
            message: "hello".into(),
            date: "2026-09-12T14:30:00+00:00".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["carId"], "car-1");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Lovelace");
        assert_eq!(value["tel"], "0601020304");
        assert_eq!(value["date"], "2026-09-12T14:30:00+00:00");
    }
}
