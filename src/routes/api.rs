// JSON handlers mirroring the page workflows.

use axum::{
    extract::{Json as JsonExtract, State},
    response::{IntoResponse, Json},
};
use serde::Serialize;

use crate::AppState;
use crate::appointment::{self, SubmitOutcome};
use crate::error::{AppError, AppResult};
use crate::models::{AppointmentForm, Banner};
use crate::routes::pages::LOAD_FAILED_MESSAGE;
use crate::search;

#[derive(Serialize)]
struct AppointmentOutcome {
    success: bool,
    id: Option<String>,
    banner: Banner,
}

/// GET /api/cars — the truncated landing-page sample.
pub async fn get_cars(
    State(app_state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/cars - Request received.");
    let cars = app_state
        .listings
        .all()
        .await
        .map_err(|e| {
            tracing::error!("[HANDLER] /api/cars - Inventory fetch failed: {}", e);
            AppError::Upstream(LOAD_FAILED_MESSAGE.to_string())
        })?;
    Ok(Json(search::sample(cars)))
}

/// POST /api/appointments — validate and run the submission workflow.
pub async fn create_appointment(
    State(app_state): State<AppState>,
    JsonExtract(form): JsonExtract<AppointmentForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("[HANDLER] /api/appointments - Submit for car {}", form.car_id);

    match appointment::submit(
        app_state.notifier.as_ref(),
        app_state.appointments.as_ref(),
        &form,
    )
    .await
    {
        SubmitOutcome::Invalid(errors) => Err(AppError::Validation(errors)),
        SubmitOutcome::Completed { appointment_id, banner } => Ok(Json(AppointmentOutcome {
            success: appointment_id.is_some(),
            id: appointment_id,
            banner,
        })),
    }
}
