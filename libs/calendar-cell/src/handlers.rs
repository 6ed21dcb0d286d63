// libs/calendar-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{BlockedDateCheckQuery, CalendarError, NewBlockedDate};
use crate::state::CalendarState;

impl From<CalendarError> for AppError {
    fn from(error: CalendarError) -> Self {
        match error {
            CalendarError::RoomNotFound(_)
            | CalendarError::DoctorNotFound(_)
            | CalendarError::TimeSlotNotFound(_)
            | CalendarError::PurposeNotFound(_)
            | CalendarError::BlockedDateNotFound(_) => AppError::NotFound(error.to_string()),
            CalendarError::DoctorNotAssignable { .. } | CalendarError::ValidationError(_) => {
                AppError::ValidationError(error.to_string())
            }
            CalendarError::ReferenceData(_) => AppError::Internal(error.to_string()),
        }
    }
}

pub async fn list_rooms(State(state): State<CalendarState>) -> Json<Value> {
    let rooms = state.catalog.rooms();
    Json(json!({
        "rooms": rooms,
        "total": rooms.len()
    }))
}

pub async fn list_room_doctors(
    State(state): State<CalendarState>,
    Path(room_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.catalog.require_room(&room_id)?;
    let doctors = state.catalog.doctors_by_room(&room_id);

    Ok(Json(json!({
        "room_id": room_id,
        "doctors": doctors,
        "total": doctors.len()
    })))
}

pub async fn list_doctors(State(state): State<CalendarState>) -> Json<Value> {
    let doctors = state.catalog.doctors();
    Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    }))
}

pub async fn list_time_slots(State(state): State<CalendarState>) -> Json<Value> {
    Json(json!({
        "time_slots": state.catalog.time_slots(),
        "total": state.catalog.time_slots().len()
    }))
}

pub async fn list_purposes(State(state): State<CalendarState>) -> Json<Value> {
    Json(json!({ "purposes": state.catalog.purposes() }))
}

pub async fn list_preparations(State(state): State<CalendarState>) -> Json<Value> {
    Json(json!({ "preparations": state.catalog.preparations() }))
}

pub async fn list_slot_configurations(State(state): State<CalendarState>) -> Json<Value> {
    Json(json!({ "slot_configurations": state.capacity.configurations() }))
}

pub async fn list_blocked_dates(State(state): State<CalendarState>) -> Json<Value> {
    let blocked_dates = state.blocked_dates.list().await;
    Json(json!({
        "blocked_dates": blocked_dates,
        "total": blocked_dates.len()
    }))
}

pub async fn add_blocked_date(
    State(state): State<CalendarState>,
    Json(request): Json<NewBlockedDate>,
) -> Result<Json<Value>, AppError> {
    if let Some(room_id) = request.room_id.as_deref() {
        state.catalog.require_room(room_id)?;
    }
    if let Some(doctor_id) = request.doctor_id.as_deref() {
        state.catalog.require_doctor(doctor_id)?;
    }

    let blocked = state.blocked_dates.add(request).await?;

    Ok(Json(json!({
        "success": true,
        "blocked_date": blocked
    })))
}

pub async fn remove_blocked_date(
    State(state): State<CalendarState>,
    Path(blocked_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = state.blocked_dates.remove(&blocked_id).await?;

    Ok(Json(json!({
        "success": true,
        "blocked_date": removed
    })))
}

pub async fn check_blocked_date(
    State(state): State<CalendarState>,
    Query(query): Query<BlockedDateCheckQuery>,
) -> Json<Value> {
    let blocked = state
        .blocked_dates
        .is_date_blocked(query.date, query.room_id.as_deref(), query.doctor_id.as_deref())
        .await;

    Json(json!({
        "date": query.date,
        "is_blocked": blocked.is_some(),
        "blocked_date": blocked
    }))
}
