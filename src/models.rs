// Data structures shared between the routes, the validation layer and the
// upstream clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One car listing as returned by the marketplace backend.
/// Only the fields needed for card rendering; immutable on our side.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CarListing {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

/// Raw appointment form input, exactly as submitted. All fields are strings;
/// nothing here has been validated yet.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppointmentForm {
    #[serde(default)]
    pub car_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date: String,
}

/// The validated payload sent to the backend's create-appointment endpoint.
/// Field names match the backend wire format; `date` is always RFC 3339.
/// Built only by `validation::validate`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub car_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "tel")]
    pub phone: String,
    pub message: String,
    pub date: String,
}

/// Response from create-appointment. A present `id` is the sole success
/// signal the workflow consumes.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppointmentResult {
    pub id: Option<String>,
}

/// Active search filter state, taken from the landing page query string.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub q: Option<String>,
    pub brand: Option<String>,
}

/// Banner severity shown after a submit attempt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient user-visible notification. Created on a submit outcome,
/// superseded by the next submit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Banner { kind: BannerKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Banner { kind: BannerKind::Error, message: message.into() }
    }

    /// CSS modifier for the banner, used by the templates.
    pub fn kind_str(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

/// Per-field validation errors, keyed by form field name. Ordered so the
/// rendered output is stable.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct FieldErrors(pub BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
