#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use appointment_cell::{CreateAppointmentRequest, SchedulingState, ValidationRequest};
use calendar_cell::{
    seed::{demo_reference_data, demo_time_slots},
    BlockedDateKind, CalendarState, Doctor, ExaminationRoom, NewBlockedDate, ReferenceData,
    SlotConfiguration,
};
use patient_cell::{services::patient::demo_patients, PatientDirectory};
use shared_utils::test_utils::{day, TestConfig};

pub const ROOM: &str = "room-x";
pub const DOCTOR_A: &str = "doc-a";
pub const DOCTOR_B: &str = "doc-b";
pub const SLOTS: [&str; 3] = ["slot-8-0", "slot-8-30", "slot-9-0"];

/// 2025-06-10, a Tuesday.
pub fn tuesday() -> NaiveDate {
    day(2025, 6, 10)
}

fn build(config: &TestConfig, data: ReferenceData) -> SchedulingState {
    let config = config.to_arc();
    let calendar = CalendarState::from_reference_data(data, &config).unwrap();
    let patients = Arc::new(PatientDirectory::new(demo_patients()).unwrap());
    SchedulingState::new(config, calendar, patients)
}

/// Built-in demo catalog as of `tuesday()`.
pub fn demo_state() -> SchedulingState {
    build(&TestConfig::default(), demo_reference_data(tuesday()))
}

/// One room, two doctors, three morning slots. Per-slot capacity comes from
/// `config.default_max_per_slot`; daily limits from the config defaults.
pub fn clinic_state(config: TestConfig) -> SchedulingState {
    let demo = demo_reference_data(tuesday());

    let room = ExaminationRoom {
        id: ROOM.to_string(),
        code: "RMX".to_string(),
        name: "Room X".to_string(),
        description: None,
        color: None,
        is_active: true,
    };

    let doctor = |id: &str| Doctor {
        id: id.to_string(),
        code: id.to_uppercase(),
        name: format!("Dr. {}", id),
        specialty: "Internal Medicine".to_string(),
        room_ids: vec![ROOM.to_string()],
        is_active: true,
    };

    let data = ReferenceData {
        rooms: vec![room],
        doctors: vec![doctor(DOCTOR_A), doctor(DOCTOR_B)],
        time_slots: demo_time_slots().into_iter().take(SLOTS.len()).collect(),
        purposes: demo.purposes,
        preparations: demo.preparations,
        slot_configurations: vec![SlotConfiguration {
            id: "config-x".to_string(),
            room_id: ROOM.to_string(),
            doctor_id: None,
            time_slot_ids: SLOTS.iter().map(|s| s.to_string()).collect(),
            max_appointments_per_slot: config.default_max_per_slot,
            max_appointments_per_day: None,
            effective_from: day(2025, 1, 1),
            effective_to: None,
            is_active: true,
        }],
        blocked_dates: vec![],
    };

    build(&config, data)
}

pub fn booking(date: NaiveDate, slot: &str, doctor: &str, patient: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        room_id: ROOM.to_string(),
        doctor_id: doctor.to_string(),
        patient_id: patient.to_string(),
        time_slot_id: slot.to_string(),
        purpose_id: "purpose-1".to_string(),
        date,
        preparations: vec![],
        notes: None,
        contact_phone: None,
        include_holidays: false,
        created_by: None,
    }
}

pub fn validation(patient: Option<&str>, doctor: &str, include_holidays: bool) -> ValidationRequest {
    ValidationRequest {
        patient_id: patient.map(str::to_string),
        room_id: ROOM.to_string(),
        doctor_id: doctor.to_string(),
        include_holidays,
    }
}

pub async fn add_holiday(state: &SchedulingState, date: NaiveDate, reason: &str) {
    state
        .calendar
        .blocked_dates
        .add(NewBlockedDate {
            date,
            kind: BlockedDateKind::Holiday,
            room_id: None,
            doctor_id: None,
            reason: reason.to_string(),
            can_force_book: false,
        })
        .await
        .unwrap();
}

pub async fn add_leave(state: &SchedulingState, date: NaiveDate, doctor: &str, reason: &str) {
    state
        .calendar
        .blocked_dates
        .add(NewBlockedDate {
            date,
            kind: BlockedDateKind::DoctorLeave,
            room_id: None,
            doctor_id: Some(doctor.to_string()),
            reason: reason.to_string(),
            can_force_book: true,
        })
        .await
        .unwrap();
}
