// Appointment submission workflow: validate, notify by email, then create
// the appointment record through the backend API.

use crate::backend_api::AppointmentProvider;
use crate::mailer::AppointmentNotifier;
use crate::models::{AppointmentForm, Banner, FieldErrors};
use crate::validation;

/// Banner text on a successful submission.
pub const SENT_MESSAGE: &str = "appointment sent !";
/// Banner text when the email or the create call failed.
pub const FAILED_MESSAGE: &str = "cannot send appointment";

/// Outcome of one submit attempt.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Schema validation failed; no side effect was attempted.
    Invalid(FieldErrors),
    /// The side effects ran. `appointment_id` is present only when the
    /// backend acknowledged the record; its presence is the caller's
    /// signal to e.g. close the form.
    Completed {
        appointment_id: Option<String>,
        banner: Banner,
    },
}

/// Run one submission end to end.
///
/// Exactly one email attempt and at most one create call happen per valid
/// form: the email is awaited first and a failure there skips the create
/// call entirely. The two failure modes are not distinguished to the user;
/// both collapse into the same error banner.
pub async fn submit(
    notifier: &dyn AppointmentNotifier,
    api: &dyn AppointmentProvider,
    form: &AppointmentForm,
) -> SubmitOutcome {
    let request = match validation::validate(form) {
        Ok(request) => request,
        Err(errors) => return SubmitOutcome::Invalid(errors),
    };

    if let Err(e) = notifier.send(form).await {
        tracing::error!("Notification email failed: {}", e);
        return SubmitOutcome::Completed {
            appointment_id: None,
            banner: Banner::error(FAILED_MESSAGE),
        };
    }

    match api.create(&request).await {
        Ok(result) => match result.id {
            Some(id) => SubmitOutcome::Completed {
                appointment_id: Some(id),
                banner: Banner::success(SENT_MESSAGE),
            },
            // The backend resolved without an id; treat it as a failure
            // rather than reporting success for a record that may not exist.
            None => SubmitOutcome::Completed {
                appointment_id: None,
                banner: Banner::error(FAILED_MESSAGE),
            },
        },
        Err(e) => {
            tracing::error!("Appointment creation failed: {}", e);
            SubmitOutcome::Completed {
                appointment_id: None,
                banner: Banner::error(FAILED_MESSAGE),
            }
        }
    }
}
