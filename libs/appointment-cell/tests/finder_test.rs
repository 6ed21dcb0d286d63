mod common;

use assert_matches::assert_matches;
use chrono::{Datelike, Weekday};

use appointment_cell::{AppointmentError, FollowUpRequest, SchedulingService};
use shared_utils::dates::add_days;
use shared_utils::test_utils::{day, TestConfig};

use common::*;

fn follow_up(target_days: u32, doctor: &str, include_holidays: bool) -> FollowUpRequest {
    FollowUpRequest {
        target_days,
        from_date: None,
        request: validation(Some("patient-1"), doctor, include_holidays),
    }
}

#[tokio::test]
async fn test_skips_holiday_and_weekend() {
    let state = clinic_state(TestConfig::default());
    // today + 7 is Friday 2025-06-13, declared a holiday.
    let today = day(2025, 6, 6);
    add_holiday(&state, day(2025, 6, 13), "Hospital foundation day").await;

    let result = SchedulingService::new(&state)
        .find_available_date(today, &follow_up(7, DOCTOR_A, false))
        .await
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.date, day(2025, 6, 16));
    assert_eq!(result.date.weekday(), Weekday::Mon);
    assert_eq!(result.skipped_days, 3);
    assert_eq!(
        result.skipped_reasons,
        vec![
            "2025-06-13: Hospital foundation day".to_string(),
            "2025-06-14: weekend".to_string(),
            "2025-06-15: weekend".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_include_holidays_takes_target_day() {
    let state = clinic_state(TestConfig::default());
    let today = day(2025, 6, 7);

    let result = SchedulingService::new(&state)
        .find_available_date(today, &follow_up(7, DOCTOR_A, true))
        .await
        .unwrap();

    assert_eq!(result.date, day(2025, 6, 14));
    assert_eq!(result.skipped_days, 0);
    assert!(result.skipped_reasons.is_empty());
    assert_eq!(result.warnings, vec!["weekend".to_string()]);
}

#[tokio::test]
async fn test_skips_doctor_leave() {
    let state = clinic_state(TestConfig::default());
    add_leave(&state, day(2025, 6, 10), DOCTOR_A, "Conference").await;

    let result = SchedulingService::new(&state)
        .find_available_date(day(2025, 6, 9), &follow_up(1, DOCTOR_A, false))
        .await
        .unwrap();
    assert_eq!(result.date, day(2025, 6, 11));
    assert_eq!(result.skipped_reasons, vec!["2025-06-10: Conference".to_string()]);

    // Other doctors are unaffected.
    let result = SchedulingService::new(&state)
        .find_available_date(day(2025, 6, 9), &follow_up(1, DOCTOR_B, false))
        .await
        .unwrap();
    assert_eq!(result.date, day(2025, 6, 10));
}

#[tokio::test]
async fn test_capacity_skips_are_counted_but_not_narrated() {
    let state = clinic_state(TestConfig::default().with_daily_limits(300, 1));
    state.store.create(booking(tuesday(), "slot-8-0", DOCTOR_A, "patient-2")).await.unwrap();

    let result = SchedulingService::new(&state)
        .find_available_date(day(2025, 6, 9), &follow_up(1, DOCTOR_A, false))
        .await
        .unwrap();

    assert_eq!(result.date, day(2025, 6, 11));
    assert_eq!(result.skipped_days, 1);
    assert!(result.skipped_reasons.is_empty());
}

#[tokio::test]
async fn test_skipped_days_match_distance_from_target() {
    let state = clinic_state(TestConfig::default());
    let service = SchedulingService::new(&state);
    let today = day(2025, 6, 2);

    for target_days in 0..10 {
        let result = service
            .find_available_date(today, &follow_up(target_days, DOCTOR_A, false))
            .await
            .unwrap();
        let target = add_days(today, i64::from(target_days)).unwrap();
        assert_eq!(i64::from(result.skipped_days), (result.date - target).num_days());
        assert!(!matches!(result.date.weekday(), Weekday::Sat | Weekday::Sun));
    }
}

#[tokio::test]
async fn test_from_date_overrides_today() {
    let state = clinic_state(TestConfig::default());
    let mut request = follow_up(0, DOCTOR_A, false);
    request.from_date = Some(day(2025, 6, 10));

    let result = SchedulingService::new(&state)
        .find_available_date(day(2030, 1, 1), &request)
        .await
        .unwrap();
    assert_eq!(result.date, day(2025, 6, 10));
}

#[tokio::test]
async fn test_exhausted_search_is_an_error() {
    let state = clinic_state(TestConfig::default());
    let today = day(2025, 6, 9);
    let mut date = today;
    for _ in 0..=14 {
        add_leave(&state, date, DOCTOR_A, "Sabbatical").await;
        date = add_days(date, 1).unwrap();
    }

    let result = SchedulingService::new(&state)
        .find_available_date(today, &follow_up(0, DOCTOR_A, false))
        .await;

    assert_matches!(
        result,
        Err(AppointmentError::SearchExhausted { target_date, horizon_days: 14 }) if target_date == today
    );
}

#[tokio::test]
async fn test_target_beyond_calendar_range_is_rejected() {
    let state = clinic_state(TestConfig::default());
    let mut request = follow_up(u32::MAX, DOCTOR_A, false);
    request.from_date = Some(tuesday());

    let result = SchedulingService::new(&state)
        .find_available_date(tuesday(), &request)
        .await;

    assert_matches!(result, Err(AppointmentError::ValidationError(_)));
}
