// libs/appointment-cell/src/models.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use calendar_cell::{
    AppointmentPurpose, CalendarError, CapacityInfo, Doctor, ExaminationRoom, PreparationTag,
    TimeSlot,
};
use patient_cell::{Patient, PatientError};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_number: String,
    pub room_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub time_slot_id: String,
    pub purpose_id: String,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
    pub preparations: Vec<String>,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<String>,
    pub cancel_reason: Option<String>,
}

impl Appointment {
    /// Cancelled appointments no longer hold capacity.
    pub fn holds_capacity(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn booking_key(&self) -> BookingKey {
        BookingKey {
            date: self.date,
            time_slot_id: self.time_slot_id.clone(),
            room_id: self.room_id.clone(),
            doctor_id: self.doctor_id.clone(),
        }
    }
}

/// The scope a booking reserves capacity in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub room_id: String,
    pub doctor_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    CheckedIn,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 7] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::CheckedIn => "checked-in",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| AppointmentError::ValidationError(format!("Unknown appointment status: {}", s)))
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub room_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub time_slot_id: String,
    pub purpose_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub preparations: Vec<String>,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    /// Book through weekends, holidays and doctor leave.
    #[serde(default)]
    pub include_holidays: bool,
    pub created_by: Option<String>,
}

/// Partial update. Any `None` field is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub room_id: Option<String>,
    pub doctor_id: Option<String>,
    pub time_slot_id: Option<String>,
    pub purpose_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub preparations: Option<Vec<String>>,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub include_holidays: bool,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: String,
    pub cancelled_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: AppointmentStatus,
    /// Recorded as the cancel reason when moving to `cancelled`.
    pub reason: Option<String>,
    pub changed_by: Option<String>,
}

// ==============================================================================
// AVAILABILITY MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub time_slot_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    pub room_id: String,
    pub doctor_id: Option<String>,
    pub total_capacity: u32,
    pub booked_count: u32,
    pub available_count: u32,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub can_force_book: Option<bool>,
}

impl SlotAvailability {
    pub fn is_available(&self) -> bool {
        self.available_count > 0 && !self.is_blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub time_slot_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub room_id: String,
    pub doctor_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSlotQuery {
    pub date: NaiveDate,
    pub room_id: String,
    pub doctor_id: String,
}

// ==============================================================================
// DATE VALIDATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default)]
    pub patient_id: Option<String>,
    pub room_id: String,
    pub doctor_id: String,
    #[serde(default)]
    pub include_holidays: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValidationQuery {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub request: ValidationRequest,
}

/// Follow-up search: the first bookable date on or after `today + target_days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpRequest {
    pub target_days: u32,
    /// Day the search counts from; the current local day when absent.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub request: ValidationRequest,
}

/// Patient's nearest existing booking relative to a candidate date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProximity {
    pub appointment_id: Uuid,
    pub appointment_number: String,
    pub date: NaiveDate,
    pub days_away: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValidationChecks {
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub is_doctor_leave: bool,
    pub leave_reason: Option<String>,
    pub room_capacity: CapacityInfo,
    pub doctor_capacity: CapacityInfo,
    pub patient_existing_appointment: Option<PatientProximity>,
}

impl DateValidationChecks {
    /// Weekend, holiday or doctor leave.
    pub fn is_day_off(&self) -> bool {
        self.is_weekend || self.is_holiday || self.is_doctor_leave
    }

    pub fn has_capacity(&self) -> bool {
        !self.room_capacity.is_exhausted() && !self.doctor_capacity.is_exhausted()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValidationResult {
    pub is_valid: bool,
    pub date: NaiveDate,
    pub skipped_days: u32,
    pub skipped_reasons: Vec<String>,
    pub checks: DateValidationChecks,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

// ==============================================================================
// LISTING MODELS
// ==============================================================================

/// Query-string filters. `status` is a comma-separated list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub room_id: Option<String>,
    pub doctor_id: Option<String>,
    pub status: Option<String>,
    pub search_text: Option<String>,
}

impl AppointmentFilters {
    pub fn statuses(&self) -> Result<Vec<AppointmentStatus>, AppointmentError> {
        match self.status.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(AppointmentStatus::from_str)
                .collect(),
        }
    }
}

/// An appointment with its references resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub room: Option<ExaminationRoom>,
    pub doctor: Option<Doctor>,
    pub patient: Option<Patient>,
    pub time_slot: Option<TimeSlot>,
    pub purpose: Option<AppointmentPurpose>,
    pub preparation_tags: Vec<PreparationTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_room: BTreeMap<String, usize>,
    pub by_doctor: BTreeMap<String, usize>,
}

// ==============================================================================
// ERROR MODELS
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Capacity exhausted: {0}")]
    CapacityExhausted(String),

    #[error("Date is blocked: {0}")]
    DateBlocked(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment cannot be modified in current status: {0}")]
    NotModifiable(AppointmentStatus),

    #[error("No available date found within {horizon_days} days of {target_date}")]
    SearchExhausted {
        target_date: NaiveDate,
        horizon_days: u32,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Patient(#[from] PatientError),
}
