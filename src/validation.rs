// Schema validation for the appointment form.
//
// Pure and side-effect free: the raw form goes in, either a structured
// `AppointmentRequest` or a per-field error map comes out. Submission side
// effects live in `appointment`, not here.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::{AppointmentForm, AppointmentRequest, FieldErrors};

/// Error text for a blank required field.
pub const REQUIRED_VALUE: &str = "required value";
/// Error text for a malformed email address.
pub const INVALID_EMAIL: &str = "Invalid email";
/// Error text for a date that is not a valid timestamp.
pub const INVALID_DATETIME: &str = "Invalid datetime";

/// Validate a required text field. Returns the error message, if any.
fn validate_required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(REQUIRED_VALUE.to_string());
    }
    None
}

/// Validate an email: required, must contain '@' with a dotted domain.
fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some(REQUIRED_VALUE.to_string());
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Some(INVALID_EMAIL.to_string());
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(' ');
    if local.is_empty() || !domain_ok {
        return Some(INVALID_EMAIL.to_string());
    }
    None
}

/// Normalize the submitted date into an RFC 3339 string.
///
/// The browser's datetime widget does not produce a full ISO timestamp, so
/// its native value (`2024-05-01T10:30`, optionally with seconds) is
/// converted here before it enters the request payload. Already-ISO input
/// is passed through re-serialized in UTC.
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).to_rfc3339());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc().to_rfc3339());
        }
    }
    None
}

/// Validate the whole form against the fixed schema.
///
/// All failing fields are reported at once; any failure blocks submission.
pub fn validate(form: &AppointmentForm) -> Result<AppointmentRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    if let Some(msg) = validate_required(&form.first_name) {
        errors.push("first_name", msg);
    }
    if let Some(msg) = validate_required(&form.last_name) {
        errors.push("last_name", msg);
    }
    if let Some(msg) = validate_email(&form.email) {
        errors.push("email", msg);
    }
    if let Some(msg) = validate_required(&form.phone) {
        errors.push("phone", msg);
    }
    if let Some(msg) = validate_required(&form.message) {
        errors.push("message", msg);
    }

    let date = match normalize_date(&form.date) {
        Some(iso) => iso,
        None => {
            errors.push("date", INVALID_DATETIME);
            String::new()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(AppointmentRequest {
        car_id: form.car_id.trim().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        message: form.message.trim().to_string(),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AppointmentForm {
        AppointmentForm {
            car_id: "car-42".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+33 6 12 34 56 78".into(),
            message: "Is the car still available?".into(),
            date: "2026-09-12T14:30".into(),
        }
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = validate(&AppointmentForm::default()).unwrap_err();
        for field in ["first_name", "last_name", "email", "phone", "message"] {
            assert_eq!(errors.get(field), Some(REQUIRED_VALUE), "field {field}");
        }
        assert_eq!(errors.get("date"), Some(INVALID_DATETIME));
    }

    #[test]
    fn whitespace_only_fields_are_blank() {
        let mut form = valid_form();
        form.message = "   ".into();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get("message"), Some(REQUIRED_VALUE));
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn email_without_domain_is_rejected() {
        let mut form = valid_form();
        form.email = "ada-at-example".into();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));

        form.email = "ada@nodot".into();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn picker_local_value_becomes_rfc3339() {
        let request = validate(&valid_form()).unwrap();
        assert_eq!(request.date, "2026-09-12T14:30:00+00:00");
        // Round-trips through a strict RFC 3339 parse.
        assert!(chrono::DateTime::parse_from_rfc3339(&request.date).is_ok());
    }

    #[test]
    fn rfc3339_input_is_accepted_as_is() {
        let mut form = valid_form();
        form.date = "2026-09-12T14:30:00+02:00".into();
        let request = validate(&form).unwrap();
        assert_eq!(request.date, "2026-09-12T12:30:00+00:00");
    }

    #[test]
    fn garbage_date_is_invalid() {
        let mut form = valid_form();
        form.date = "next tuesday".into();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get("date"), Some(INVALID_DATETIME));
    }

    #[test]
    fn valid_form_builds_trimmed_request() {
        let mut form = valid_form();
        form.first_name = "  Ada ".into();
        let request = validate(&form).unwrap();
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.car_id, "car-42");
        assert_eq!(request.phone, "+33 6 12 34 56 78");
    }
}
