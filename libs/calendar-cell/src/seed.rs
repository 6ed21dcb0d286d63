// libs/calendar-cell/src/seed.rs
//
// Built-in demo reference data, served when no calendar data file is
// configured.

use chrono::{Datelike, NaiveDate, NaiveTime};

use shared_utils::dates::add_days;

use crate::models::{
    AppointmentPurpose, BlockedDate, BlockedDateKind, Doctor, ExaminationRoom, PreparationTag,
    ReferenceData, SlotConfiguration, TimeSlot,
};

/// Fixed public holidays as (month, day, name).
const HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (4, 6, "Chakri Memorial Day"),
    (4, 13, "Songkran Festival"),
    (4, 14, "Songkran Festival"),
    (4, 15, "Songkran Festival"),
    (5, 1, "Labour Day"),
    (5, 4, "Coronation Day"),
    (7, 28, "King's Birthday"),
    (8, 12, "Mother's Day"),
    (10, 13, "King Bhumibol Memorial Day"),
    (10, 23, "Chulalongkorn Day"),
    (12, 5, "Father's Day"),
    (12, 10, "Constitution Day"),
    (12, 31, "New Year's Eve"),
];

pub fn demo_reference_data(today: NaiveDate) -> ReferenceData {
    let time_slots = demo_time_slots();
    let rooms = demo_rooms();

    let slot_configurations = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| SlotConfiguration {
            id: format!("config-{}", i),
            room_id: room.id.clone(),
            doctor_id: None,
            time_slot_ids: time_slots.iter().map(|s| s.id.clone()).collect(),
            max_appointments_per_slot: 3,
            max_appointments_per_day: Some(300),
            effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(today),
            effective_to: None,
            is_active: true,
        })
        .collect();

    ReferenceData {
        rooms,
        doctors: demo_doctors(),
        time_slots,
        purposes: demo_purposes(),
        preparations: demo_preparations(),
        slot_configurations,
        blocked_dates: demo_blocked_dates(today),
    }
}

/// Half-hour slots from 08:00 to 16:00.
pub fn demo_time_slots() -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(16);
    for hour in 8..16 {
        for minute in [0, 30] {
            let (end_hour, end_minute) = if minute == 30 { (hour + 1, 0) } else { (hour, 30) };
            let (Some(start_time), Some(end_time)) = (
                NaiveTime::from_hms_opt(hour, minute, 0),
                NaiveTime::from_hms_opt(end_hour, end_minute, 0),
            ) else {
                continue;
            };
            slots.push(TimeSlot {
                id: format!("slot-{}-{}", hour, minute),
                start_time,
                end_time,
                label: format!("{} - {}", start_time.format("%H:%M"), end_time.format("%H:%M")),
            });
        }
    }
    slots
}

fn demo_rooms() -> Vec<ExaminationRoom> {
    [
        ("room-1", "MED01", "Internal Medicine 1", "General and internal medicine", "#3b82f6"),
        ("room-2", "MED02", "Internal Medicine 2", "General and internal medicine", "#6366f1"),
        ("room-3", "SUR01", "General Surgery", "General surgery clinic", "#10b981"),
        ("room-4", "ORT01", "Orthopedics", "Bone and joint clinic", "#f59e0b"),
        ("room-5", "ENT01", "Ear, Nose & Throat", "ENT clinic", "#ec4899"),
        ("room-6", "EYE01", "Ophthalmology", "Eye clinic", "#8b5cf6"),
    ]
    .into_iter()
    .map(|(id, code, name, description, color)| ExaminationRoom {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        color: Some(color.to_string()),
        is_active: true,
    })
    .collect()
}

fn demo_doctors() -> Vec<Doctor> {
    [
        ("doc-1", "DR001", "Dr. Somchai Jaidee", "Internal Medicine", &["room-1", "room-2"][..]),
        ("doc-2", "DR002", "Dr. Somying Raksadee", "Internal Medicine", &["room-1", "room-2"][..]),
        ("doc-3", "DR003", "Dr. Wichai Sanlaya", "General Surgery", &["room-3"][..]),
        ("doc-4", "DR004", "Dr. Manee Kraduk", "Orthopedics", &["room-4"][..]),
        ("doc-5", "DR005", "Dr. Theera Hoodee", "Otolaryngology", &["room-5"][..]),
        ("doc-6", "DR006", "Dr. Saengchan Tasawang", "Ophthalmology", &["room-6"][..]),
    ]
    .into_iter()
    .map(|(id, code, name, specialty, rooms)| Doctor {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        room_ids: rooms.iter().map(|r| r.to_string()).collect(),
        is_active: true,
    })
    .collect()
}

fn demo_purposes() -> Vec<AppointmentPurpose> {
    [
        ("purpose-1", "FOLLOWUP", "Follow-up", "Follow-up after treatment", &[][..], 15),
        ("purpose-2", "CHECKUP", "Health check-up", "Annual health check-up", &["prep-1", "prep-2"][..], 30),
        ("purpose-3", "CONSULT", "Consultation", "Initial consultation", &["prep-4"][..], 20),
        ("purpose-4", "PRE_SURGERY", "Pre-surgery work-up", "Readiness checks before surgery", &["prep-1", "prep-2", "prep-3"][..], 45),
        ("purpose-5", "POST_SURGERY", "Post-surgery follow-up", "Wound check after surgery", &[][..], 20),
        ("purpose-6", "LAB_RESULT", "Lab results", "Review lab results and collect medication", &["prep-4"][..], 15),
    ]
    .into_iter()
    .map(|(id, code, name, description, preparations, minutes)| AppointmentPurpose {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        default_preparations: preparations.iter().map(|p| p.to_string()).collect(),
        estimated_duration_minutes: minutes,
    })
    .collect()
}

fn demo_preparations() -> Vec<PreparationTag> {
    [
        ("prep-1", "NPO_WATER", "No water for 6 hours", "water_drop"),
        ("prep-2", "NPO_FOOD", "No food for 8 hours", "restaurant"),
        ("prep-3", "NO_ASPIRIN", "Stop aspirin 7 days before", "medication"),
        ("prep-4", "BRING_RESULTS", "Bring previous results", "description"),
        ("prep-5", "WEAR_LOOSE", "Wear loose clothing", "checkroom"),
        ("prep-6", "BRING_XRAY", "Bring previous X-ray films", "medical_information"),
    ]
    .into_iter()
    .map(|(id, code, name, icon)| PreparationTag {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        icon: Some(icon.to_string()),
    })
    .collect()
}

fn demo_blocked_dates(today: NaiveDate) -> Vec<BlockedDate> {
    let year = today.year();
    let mut blocked: Vec<BlockedDate> = HOLIDAYS
        .iter()
        .enumerate()
        .filter_map(|(i, (month, day, name))| {
            NaiveDate::from_ymd_opt(year, *month, *day).map(|date| BlockedDate {
                id: format!("blocked-{}", i),
                date,
                kind: BlockedDateKind::Holiday,
                room_id: None,
                doctor_id: None,
                reason: name.to_string(),
                can_force_book: false,
            })
        })
        .collect();

    if let Some(date) = add_days(today, 7) {
        blocked.push(BlockedDate {
            id: "blocked-leave-1".to_string(),
            date,
            kind: BlockedDateKind::DoctorLeave,
            room_id: None,
            doctor_id: Some("doc-1".to_string()),
            reason: "Dr. Somchai Jaidee on vacation".to_string(),
            can_force_book: true,
        });
    }

    blocked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_slots_cover_working_day() {
        let slots = demo_time_slots();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].id, "slot-8-0");
        assert_eq!(slots[15].id, "slot-15-30");
        assert_eq!(slots[15].end_time, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn test_demo_data_is_consistent() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let data = demo_reference_data(today);
        assert_eq!(data.rooms.len(), 6);
        assert_eq!(data.slot_configurations.len(), 6);
        assert_eq!(data.blocked_dates.len(), HOLIDAYS.len() + 1);
        assert!(data
            .blocked_dates
            .iter()
            .any(|bd| bd.kind == BlockedDateKind::DoctorLeave && add_days(today, 7) == Some(bd.date)));
    }
}
