use std::sync::Arc;

use axum::{
    Json,
    Router,
    routing::get,
};
use serde_json::json;

use appointment_cell::{appointment_routes, SchedulingState};
use calendar_cell::{calendar_routes, CalendarState};
use patient_cell::{create_patient_router, PatientDirectory};
use shared_config::AppConfig;

pub fn create_router(
    config: Arc<AppConfig>,
    calendar: CalendarState,
    patients: Arc<PatientDirectory>,
) -> Router {
    let scheduling = SchedulingState::new(config, calendar.clone(), patients.clone());

    Router::new()
        .route("/", get(|| async { "Outpatient scheduling API is running!" }))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .nest("/appointments", appointment_routes(scheduling))
        .nest("/calendar", calendar_routes(calendar))
        .nest("/patients", create_patient_router(patients))
}
