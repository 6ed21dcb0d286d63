// libs/calendar-cell/src/router.rs
use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers;
use crate::state::CalendarState;

pub fn calendar_routes(state: CalendarState) -> Router {
    Router::new()
        .route("/rooms", get(handlers::list_rooms))
        .route("/rooms/{room_id}/doctors", get(handlers::list_room_doctors))
        .route("/doctors", get(handlers::list_doctors))
        .route("/time-slots", get(handlers::list_time_slots))
        .route("/purposes", get(handlers::list_purposes))
        .route("/preparations", get(handlers::list_preparations))
        .route("/slot-configurations", get(handlers::list_slot_configurations))
        .route("/blocked-dates", get(handlers::list_blocked_dates).post(handlers::add_blocked_date))
        .route("/blocked-dates/check", get(handlers::check_blocked_date))
        .route("/blocked-dates/{blocked_id}", delete(handlers::remove_blocked_date))
        .with_state(state)
}
