// libs/appointment-cell/src/router.rs
use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::state::SchedulingState;

pub fn appointment_routes(state: SchedulingState) -> Router {
    Router::new()
        // Booking commands and listings
        .route("/", post(handlers::create_appointment).get(handlers::filter_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment).put(handlers::update_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/{appointment_id}/status", patch(handlers::change_appointment_status))
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route("/summary", get(handlers::get_day_summary))

        // Availability and follow-up search
        .route("/availability", get(handlers::get_slot_availability))
        .route("/time-slots", get(handlers::get_available_time_slots))
        .route("/validate-date", post(handlers::validate_date))
        .route("/find-available-date", post(handlers::find_available_date))
        .with_state(state)
}
