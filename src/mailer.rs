// Notification-email collaborator. The provider speaks an EmailJS-style
// REST contract: one POST with service/template ids and the template
// parameters; resolves on success, rejects on failure, no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

use crate::backend_api::UpstreamError;
use crate::config::Settings;
use crate::models::AppointmentForm;

/// Sends the appointment notification email from the raw form payload.
#[async_trait]
pub trait AppointmentNotifier: Send + Sync {
    async fn send(&self, form: &AppointmentForm) -> Result<(), UpstreamError>;
}

#[derive(Clone)]
pub struct HttpMailer {
    client: Arc<Client>,
    url: String,
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
}

impl HttpMailer {
    pub fn new(client: Arc<Client>, settings: &Settings) -> Self {
        HttpMailer {
            client,
            url: settings.mailer_url.clone(),
            service_id: settings.mailer_service_id.clone(),
            template_id: settings.mailer_template_id.clone(),
            public_key: settings.mailer_public_key.clone(),
        }
    }

    fn payload(&self, form: &AppointmentForm) -> Result<serde_json::Value, UpstreamError> {
        let service_id = self
            .service_id
            .as_deref()
            .ok_or_else(|| UpstreamError::Provider("mailer service id not configured".into()))?;
        let template_id = self
            .template_id
            .as_deref()
            .ok_or_else(|| UpstreamError::Provider("mailer template id not configured".into()))?;
        let public_key = self
            .public_key
            .as_deref()
            .ok_or_else(|| UpstreamError::Provider("mailer public key not configured".into()))?;

        Ok(json!({
            "service_id": service_id,
            "template_id": template_id,
            "user_id": public_key,
            "template_params": {
                "car_id": form.car_id,
                "first_name": form.first_name,
                "last_name": form.last_name,
                "email": form.email,
                "phone": form.phone,
                "message": form.message,
                "date": form.date,
            },
        }))
    }
}

#[async_trait]
impl AppointmentNotifier for HttpMailer {
    async fn send(&self, form: &AppointmentForm) -> Result<(), UpstreamError> {
        let payload = self.payload(form)?;
        tracing::debug!("Sending appointment notification for car {}", form.car_id);
        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        tracing::info!("Notification email accepted by the provider");
        Ok(())
    }
}
