// Server-rendered pages: the landing page with the search section, and the
// appointment form.

use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse},
};

use crate::AppState;
use crate::appointment::{self, SubmitOutcome};
use crate::error::{AppError, AppResult};
use crate::models::{AppointmentForm, Banner, CarListing, FieldErrors, SearchFilter};
use crate::search;

/// Error banner text when the inventory fetch fails. Deliberately distinct
/// from the empty-result message so "backend down" does not read as
/// "no cars match".
pub const LOAD_FAILED_MESSAGE: &str = "Could not load listings.";
/// Empty-state text when the filtered sample has no entries.
pub const EMPTY_STATE_MESSAGE: &str = "No content to show !";

/// One card on the landing page, flattened to display strings.
struct CardView {
    id: String,
    brand: String,
    model: String,
    year: String,
    price: String,
    image_url: String,
}

impl From<&CarListing> for CardView {
    fn from(car: &CarListing) -> Self {
        CardView {
            id: car.id.clone(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: car.price.clone().unwrap_or_default(),
            image_url: car.image_url.clone().unwrap_or_default(),
        }
    }
}

/// One brand facet link. `href` keeps the active text query, so facet
/// clicks and searches compose.
struct BrandView {
    name: String,
    href: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    query: String,
    selected_brand: String,
    brands: Vec<BrandView>,
    all_href: String,
    cars: Vec<CardView>,
    load_failed: bool,
    empty_message: &'static str,
    load_failed_message: &'static str,
}

/// Serialize a filter back into a landing-page URL. Values are
/// percent-encoded, so queries containing '&', '=' or '+' survive the
/// round trip through a facet link.
fn href_for(filter: &SearchFilter) -> String {
    match serde_urlencoded::to_string(filter) {
        Ok(qs) if !qs.is_empty() => format!("/?{qs}"),
        _ => "/".to_string(),
    }
}

fn brand_views(filter: &SearchFilter) -> Vec<BrandView> {
    let query = filter
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    search::BRANDS
        .iter()
        .map(|name| {
            let selected = filter
                .brand
                .as_deref()
                .is_some_and(|b| b.eq_ignore_ascii_case(name));
            // Selecting the active facet again clears it; the text query
            // rides along either way.
            let target = SearchFilter {
                q: query.clone(),
                brand: (!selected).then(|| name.to_string()),
            };
            BrandView {
                name: name.to_string(),
                href: href_for(&target),
                selected,
            }
        })
        .collect()
}

/// GET / — fetch the inventory sample once, apply the active filter, render.
pub async fn landing_page(
    State(app_state): State<AppState>,
    Query(filter): Query<SearchFilter>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Landing page requested with filter {:?}", filter);

    let (sample, load_failed) = match app_state.listings.all().await {
        Ok(cars) => (search::sample(cars), false),
        Err(e) => {
            // Surfaced as its own banner rather than the empty-state text.
            tracing::error!("Failed to fetch car inventory: {}", e);
            (Vec::new(), true)
        }
    };

    let visible = search::filter_listings(&sample, &filter);
    let template = LandingTemplate {
        query: filter.q.clone().unwrap_or_default(),
        selected_brand: filter.brand.clone().unwrap_or_default(),
        brands: brand_views(&filter),
        all_href: "/".to_string(),
        cars: visible.into_iter().map(CardView::from).collect(),
        load_failed,
        empty_message: EMPTY_STATE_MESSAGE,
        load_failed_message: LOAD_FAILED_MESSAGE,
    };
    render(template)
}

/// One form field prepared for the template: the label carries the field's
/// own validation error when there is one, replacing the default text.
struct FieldView {
    label: String,
    value: String,
    error: bool,
}

fn field_view(default_label: &str, value: &str, errors: &FieldErrors, key: &str) -> FieldView {
    match errors.get(key) {
        Some(message) => FieldView {
            label: message.to_string(),
            value: value.to_string(),
            error: true,
        },
        None => FieldView {
            label: default_label.to_string(),
            value: value.to_string(),
            error: false,
        },
    }
}

#[derive(Template)]
#[template(path = "appointment.html")]
struct AppointmentTemplate {
    car_id: String,
    first_name: FieldView,
    last_name: FieldView,
    email: FieldView,
    phone: FieldView,
    date: FieldView,
    message: FieldView,
    banner: Option<Banner>,
    sent: bool,
}

impl AppointmentTemplate {
    fn new(car_id: String, form: &AppointmentForm, errors: &FieldErrors) -> Self {
        AppointmentTemplate {
            car_id,
            first_name: field_view("Firstname", &form.first_name, errors, "first_name"),
            last_name: field_view("Lastname", &form.last_name, errors, "last_name"),
            email: field_view("Email", &form.email, errors, "email"),
            phone: field_view("Phone", &form.phone, errors, "phone"),
            date: field_view("Availability date", &form.date, errors, "date"),
            message: field_view("Message", &form.message, errors, "message"),
            banner: None,
            sent: false,
        }
    }
}

/// GET /cars/:car_id/appointment — blank form.
pub async fn appointment_page(
    Path(car_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let template =
        AppointmentTemplate::new(car_id, &AppointmentForm::default(), &FieldErrors::default());
    render(template)
}

/// POST /cars/:car_id/appointment — run the submission workflow and
/// re-render the form with inline errors or the outcome banner.
pub async fn submit_appointment(
    State(app_state): State<AppState>,
    Path(car_id): Path<String>,
    Form(mut form): Form<AppointmentForm>,
) -> AppResult<impl IntoResponse> {
    // The car id comes from the URL; the hidden field is display-only.
    form.car_id = car_id.clone();
    tracing::info!("Appointment submitted for car {}", car_id);

    let outcome = appointment::submit(
        app_state.notifier.as_ref(),
        app_state.appointments.as_ref(),
        &form,
    )
    .await;

    let template = match outcome {
        SubmitOutcome::Invalid(errors) => AppointmentTemplate::new(car_id, &form, &errors),
        SubmitOutcome::Completed { appointment_id, banner } => {
            let sent = appointment_id.is_some();
            // On success the fields reset; on failure the input is kept for
            // the resubmit.
            let form_for_render = if sent { AppointmentForm::default() } else { form };
            let mut template =
                AppointmentTemplate::new(car_id, &form_for_render, &FieldErrors::default());
            template.banner = Some(banner);
            template.sent = sent;
            template
        }
    };
    render(template)
}

fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{FakeBackend, car, state_with};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_body(state: crate::AppState, uri: &str) -> (StatusCode, String) {
        let app = crate::routes::create_router(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_form(state: crate::AppState, uri: &str, body: &str) -> (StatusCode, String) {
        let app = crate::routes::create_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn twelve_cars() -> Vec<crate::models::CarListing> {
        (0..12)
            .map(|i| car(&format!("car-{i}"), "Toyota", &format!("Model {i}"), 2018 + i))
            .collect()
    }

    #[tokio::test]
    async fn landing_shows_at_most_eight_cards() {
        let state = state_with(FakeBackend { cars: Ok(twelve_cars()), ..Default::default() });
        let (status, body) = get_body(state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("class=\"card\"").count(), crate::search::SAMPLE_SIZE);
        assert!(!body.contains(EMPTY_STATE_MESSAGE));
    }

    #[tokio::test]
    async fn unmatched_brand_renders_empty_state() {
        let state = state_with(FakeBackend { cars: Ok(twelve_cars()), ..Default::default() });
        let (status, body) = get_body(state, "/?brand=Ferrari").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(EMPTY_STATE_MESSAGE));
        assert_eq!(body.matches("class=\"card\"").count(), 0);
    }

    #[tokio::test]
    async fn facet_links_keep_the_query_encoded() {
        let cars = vec![car("a", "BMW", "M3", 2021), car("b", "BMW", "M4", 2022)];
        let state = state_with(FakeBackend { cars: Ok(cars), ..Default::default() });
        let (status, body) = get_body(state, "/?q=m3+%26+m4").await;
        assert_eq!(status, StatusCode::OK);
        // Facet hrefs re-encode the active query instead of embedding it raw.
        assert!(body.contains("q=m3+%26+m4&amp;brand=BMW"));
        assert!(!body.contains("q=m3 &"));
    }

    #[tokio::test]
    async fn fetch_failure_gets_its_own_banner() {
        let state = state_with(FakeBackend {
            cars: Err("backend down".to_string()),
            ..Default::default()
        });
        let (status, body) = get_body(state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(LOAD_FAILED_MESSAGE));
        // Not collapsed into the no-results state.
        assert!(!body.contains(EMPTY_STATE_MESSAGE));
    }

    #[tokio::test]
    async fn blank_form_gets_inline_required_errors() {
        let state = state_with(FakeBackend::default());
        let (status, body) = post_form(state, "/cars/car-1/appointment", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("required value"));
        assert!(body.contains("Invalid datetime"));
        assert!(!body.contains("appointment sent !"));
    }

    #[tokio::test]
    async fn valid_form_shows_success_banner() {
        let state = state_with(FakeBackend::default());
        let body_str = "first_name=Ada&last_name=Lovelace&email=ada%40example.com\
                        &phone=0601020304&message=hello&date=2026-10-03T09%3A00";
        let (status, body) = post_form(state, "/cars/car-1/appointment", body_str).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("appointment sent !"));
        assert!(!body.contains("required value"));
    }

    #[tokio::test]
    async fn mailer_failure_shows_error_banner() {
        let state = state_with(FakeBackend { fail_send: true, ..Default::default() });
        let body_str = "first_name=Ada&last_name=Lovelace&email=ada%40example.com\
                        &phone=0601020304&message=hello&date=2026-10-03T09%3A00";
        let (status, body) = post_form(state, "/cars/car-1/appointment", body_str).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("cannot send appointment"));
    }
}
