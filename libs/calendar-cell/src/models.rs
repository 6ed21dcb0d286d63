// libs/calendar-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ==============================================================================
// CALENDAR CATALOG
// ==============================================================================

/// A time-of-day interval reused on every calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub label: String,
}

impl TimeSlot {
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            format!("{} - {}", self.start_time.format("%H:%M"), self.end_time.format("%H:%M"))
        } else {
            self.label.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationRoom {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub code: String,
    pub name: String,
    pub specialty: String,
    /// Rooms this doctor may be booked into.
    pub room_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Doctor {
    pub fn can_work_in(&self, room_id: &str) -> bool {
        self.room_ids.iter().any(|id| id == room_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPurpose {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_preparations: Vec<String>,
    pub estimated_duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationTag {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_active() -> bool {
    true
}

// ==============================================================================
// BLOCKED DATES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockedDateKind {
    Holiday,
    DoctorLeave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDate {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: BlockedDateKind,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub can_force_book: bool,
}

impl BlockedDate {
    pub fn is_global(&self) -> bool {
        self.room_id.is_none() && self.doctor_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlockedDate {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: BlockedDateKind,
    pub room_id: Option<String>,
    pub doctor_id: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub can_force_book: bool,
}

// ==============================================================================
// CAPACITY POLICY
// ==============================================================================

/// Per-room (optionally per-doctor) capacity rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfiguration {
    pub id: String,
    pub room_id: String,
    #[serde(default)]
    pub doctor_id: Option<String>,
    pub time_slot_ids: Vec<String>,
    pub max_appointments_per_slot: u32,
    #[serde(default)]
    pub max_appointments_per_day: Option<u32>,
    pub effective_from: NaiveDate,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SlotConfiguration {
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.effective_from <= date
            && self.effective_to.map_or(true, |to| date <= to)
    }

    pub fn covers_slot(&self, time_slot_id: &str) -> bool {
        self.time_slot_ids.iter().any(|id| id == time_slot_id)
    }
}

/// Derived capacity figure for one scope on one day. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityInfo {
    pub current: u32,
    pub max: u32,
    pub available: u32,
}

impl CapacityInfo {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current,
            max,
            available: max.saturating_sub(current),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.available == 0
    }
}

// ==============================================================================
// REFERENCE DATA BUNDLE
// ==============================================================================

/// Everything the configuration collaborator hands the core at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub rooms: Vec<ExaminationRoom>,
    pub doctors: Vec<Doctor>,
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub purposes: Vec<AppointmentPurpose>,
    #[serde(default)]
    pub preparations: Vec<PreparationTag>,
    #[serde(default)]
    pub slot_configurations: Vec<SlotConfiguration>,
    #[serde(default)]
    pub blocked_dates: Vec<BlockedDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockedDateCheckQuery {
    pub date: NaiveDate,
    pub room_id: Option<String>,
    pub doctor_id: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum CalendarError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Time slot not found: {0}")]
    TimeSlotNotFound(String),

    #[error("Appointment purpose not found: {0}")]
    PurposeNotFound(String),

    #[error("Blocked date not found: {0}")]
    BlockedDateNotFound(String),

    #[error("Doctor {doctor_id} is not assigned to room {room_id}")]
    DoctorNotAssignable { room_id: String, doctor_id: String },

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_info_never_negative() {
        let info = CapacityInfo::new(7, 3);
        assert_eq!(info.available, 0);
        assert!(info.is_exhausted());

        let info = CapacityInfo::new(1, 3);
        assert_eq!(info.available, 2);
    }

    #[test]
    fn test_blocked_date_kind_wire_format() {
        let json = serde_json::to_string(&BlockedDateKind::DoctorLeave).unwrap();
        assert_eq!(json, "\"doctor-leave\"");
    }

    #[test]
    fn test_time_slot_parses_short_times() {
        let slot: TimeSlot = serde_json::from_str(
            r#"{"id":"slot-8-0","start_time":"08:00","end_time":"08:30"}"#,
        ).unwrap();
        assert_eq!(slot.display_label(), "08:00 - 08:30");
    }
}
