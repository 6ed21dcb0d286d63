// libs/calendar-cell/tests/calendar_test.rs

use std::io::Write;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use calendar_cell::{
    calendar_routes, seed::demo_reference_data, state::read_reference_data, CalendarError,
    CalendarState,
};
use shared_utils::test_utils::{day, TestConfig};

fn demo_state() -> CalendarState {
    let config = TestConfig::default().to_app_config();
    CalendarState::from_reference_data(demo_reference_data(day(2025, 6, 10)), &config).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_list_rooms_endpoint() {
    let app = calendar_routes(demo_state());

    let response = app
        .oneshot(Request::builder().uri("/rooms").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 6);
}

#[tokio::test]
async fn test_room_doctors_endpoint() {
    let app = calendar_routes(demo_state());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/rooms/room-1/doctors").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);

    let response = app
        .oneshot(Request::builder().uri("/rooms/room-404/doctors").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blocked_date_lifecycle_over_http() {
    let state = demo_state();
    let app = calendar_routes(state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blocked-dates")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "date": "2025-06-18",
                        "type": "holiday",
                        "room_id": "room-3",
                        "reason": "Renovation"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["blocked_date"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/blocked-dates/check?date=2025-06-18&room_id=room-3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let check = body_json(response).await;
    assert_eq!(check["is_blocked"], true);
    assert_eq!(check["blocked_date"]["reason"], "Renovation");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/blocked-dates/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let date = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
    assert!(state.blocked_dates.is_date_blocked(date, Some("room-3"), None).await.is_none());
}

#[tokio::test]
async fn test_blocked_date_for_unknown_room_rejected() {
    let app = calendar_routes(demo_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blocked-dates")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "date": "2025-06-18",
                        "type": "holiday",
                        "room_id": "room-404",
                        "reason": "Renovation"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_reference_data_file_round_trip() {
    let data = demo_reference_data(day(2025, 6, 10));
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&data).unwrap().as_bytes()).unwrap();

    let loaded = read_reference_data(file.path()).unwrap();
    assert_eq!(loaded.rooms, data.rooms);
    assert_eq!(loaded.time_slots.len(), 16);
}

#[test]
fn test_reference_data_with_dangling_configuration_rejected() {
    let mut data = demo_reference_data(day(2025, 6, 10));
    data.slot_configurations[0].time_slot_ids.push("slot-23-0".to_string());

    let config = TestConfig::default().to_app_config();
    let result = CalendarState::from_reference_data(data, &config);
    assert_matches!(result, Err(CalendarError::ReferenceData(_)));
}

#[test]
fn test_malformed_reference_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    assert!(read_reference_data(file.path()).is_err());
}
