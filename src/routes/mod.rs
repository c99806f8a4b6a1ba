// Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

mod api;
mod pages;

pub fn create_router(app_state: AppState) -> Router {
    // JSON twins of the page workflows, consumed by the frontend script
    // and by anything else that prefers structured responses.
    let api_router = Router::new()
        .route("/cars", get(api::get_cars))
        .route("/appointments", post(api::create_appointment))
        .with_state(app_state.clone());

    Router::new()
        .route("/", get(pages::landing_page))
        .route("/cars/:car_id/appointment", get(pages::appointment_page))
        .route("/cars/:car_id/appointment", post(pages::submit_appointment))
        .nest("/api", api_router)
        .with_state(app_state)
}
