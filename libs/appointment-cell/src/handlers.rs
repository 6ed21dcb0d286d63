// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentFilters, AvailabilityQuery, CancelAppointmentRequest,
    ChangeStatusRequest, CreateAppointmentRequest, DateValidationQuery, FollowUpRequest,
    SummaryQuery, TimeSlotQuery, UpdateAppointmentRequest,
};
use crate::services::SchedulingService;
use crate::state::SchedulingState;

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        match error {
            AppointmentError::NotFound(_) => AppError::NotFound(error.to_string()),
            AppointmentError::CapacityExhausted(_)
            | AppointmentError::InvalidStatusTransition { .. }
            | AppointmentError::NotModifiable(_) => AppError::Conflict(error.to_string()),
            AppointmentError::DateBlocked(_) => AppError::Unprocessable(error.to_string()),
            AppointmentError::SearchExhausted { .. } => AppError::NotFound(error.to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Calendar(e) => AppError::from(e),
            AppointmentError::Patient(e) => AppError::from(e),
        }
    }
}

// ==============================================================================
// APPOINTMENT COMMANDS
// ==============================================================================

pub async fn create_appointment(
    State(state): State<SchedulingState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.store.create(request).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment created successfully"
    })))
}

pub async fn update_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.store.update(appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment updated successfully"
    })))
}

pub async fn cancel_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.store.cancel(appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment cancelled successfully"
    })))
}

pub async fn change_appointment_status(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.store.change_status(appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": format!("Appointment is now {}", appointment.status)
    })))
}

// ==============================================================================
// APPOINTMENT QUERIES
// ==============================================================================

pub async fn get_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let view = SchedulingService::new(&state).get_appointment(appointment_id).await?;
    Ok(Json(json!(view)))
}

pub async fn filter_appointments(
    State(state): State<SchedulingState>,
    Query(filters): Query<AppointmentFilters>,
) -> Result<Json<Value>, AppError> {
    let appointments = SchedulingService::new(&state).filter_appointments(&filters).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

pub async fn get_patient_appointments(
    State(state): State<SchedulingState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = SchedulingService::new(&state).patient_appointments(&patient_id).await?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "appointments": appointments,
        "total": appointments.len()
    })))
}

pub async fn get_day_summary(
    State(state): State<SchedulingState>,
    Query(query): Query<SummaryQuery>,
) -> Json<Value> {
    let summary = SchedulingService::new(&state).summary_for_date(query.date).await;
    Json(json!(summary))
}

// ==============================================================================
// AVAILABILITY
// ==============================================================================

pub async fn get_slot_availability(
    State(state): State<SchedulingState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = SchedulingService::new(&state)
        .resolve_availability(query.date, &query.room_id, query.doctor_id.as_deref())
        .await?;

    Ok(Json(json!({
        "date": query.date,
        "room_id": query.room_id,
        "doctor_id": query.doctor_id,
        "slots": slots
    })))
}

pub async fn get_available_time_slots(
    State(state): State<SchedulingState>,
    Query(query): Query<TimeSlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = SchedulingService::new(&state)
        .available_time_slots(query.date, &query.room_id, &query.doctor_id)
        .await?;

    Ok(Json(json!({
        "date": query.date,
        "room_id": query.room_id,
        "doctor_id": query.doctor_id,
        "slots": slots
    })))
}

pub async fn validate_date(
    State(state): State<SchedulingState>,
    Json(query): Json<DateValidationQuery>,
) -> Result<Json<Value>, AppError> {
    let result = SchedulingService::new(&state)
        .validate_date(query.date, &query.request)
        .await?;
    Ok(Json(json!(result)))
}

pub async fn find_available_date(
    State(state): State<SchedulingState>,
    Json(request): Json<FollowUpRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Local::now().date_naive();
    let result = SchedulingService::new(&state)
        .find_available_date(today, &request)
        .await?;
    Ok(Json(json!(result)))
}
