// libs/appointment-cell/src/services/store.rs
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use calendar_cell::{BlockedDateSet, CalendarError, CalendarState};
use patient_cell::PatientDirectory;
use shared_utils::dates::is_weekend;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookingKey, CancelAppointmentRequest,
    ChangeStatusRequest, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::services::availability::AvailabilityResolver;
use crate::services::book::AppointmentBook;
use crate::services::lifecycle::AppointmentLifecycleService;

/// Sole owner of appointment records. Every write is a check-and-reserve
/// performed under one write guard, so two bookings racing for the last
/// seat in a slot can never both succeed.
#[derive(Debug)]
pub struct AppointmentStore {
    book: RwLock<AppointmentBook>,
    calendar: CalendarState,
    patients: Arc<PatientDirectory>,
    lifecycle: AppointmentLifecycleService,
    default_operator: String,
}

impl AppointmentStore {
    pub fn new(calendar: CalendarState, patients: Arc<PatientDirectory>, default_operator: impl Into<String>) -> Self {
        Self {
            book: RwLock::new(AppointmentBook::new()),
            calendar,
            patients,
            lifecycle: AppointmentLifecycleService::new(),
            default_operator: default_operator.into(),
        }
    }

    /// Short read lock for single queries.
    pub async fn read(&self) -> RwLockReadGuard<'_, AppointmentBook> {
        self.book.read().await
    }

    /// Detached copy for multi-step scans that must not hold any lock.
    pub async fn snapshot(&self) -> AppointmentBook {
        self.book.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.book
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(AppointmentError::NotFound(id))
    }

    #[instrument(skip(self, request), fields(room_id = %request.room_id, doctor_id = %request.doctor_id, date = %request.date))]
    pub async fn create(&self, request: CreateAppointmentRequest) -> Result<Appointment, AppointmentError> {
        debug!("Creating appointment in slot {}", request.time_slot_id);

        self.validate_references(&request.room_id, &request.doctor_id, &request.time_slot_id)?;
        self.patients.require(&request.patient_id)?;
        self.validate_purpose(&request.purpose_id, &request.preparations)?;

        let key = BookingKey {
            date: request.date,
            time_slot_id: request.time_slot_id.clone(),
            room_id: request.room_id.clone(),
            doctor_id: request.doctor_id.clone(),
        };

        let blocked = self.calendar.blocked_dates.snapshot().await;
        if !request.include_holidays {
            ensure_not_blocked(&blocked, &key)?;
        }

        let mut book = self.book.write().await;
        AvailabilityResolver::new(&self.calendar, &blocked, &book).ensure_capacity(&key, None)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            appointment_number: book.next_appointment_number(request.date),
            room_id: request.room_id,
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            time_slot_id: request.time_slot_id,
            purpose_id: request.purpose_id,
            date: request.date,
            status: AppointmentStatus::Scheduled,
            preparations: request.preparations,
            notes: request.notes,
            contact_phone: request.contact_phone,
            created_at: Utc::now(),
            created_by: request.created_by.unwrap_or_else(|| self.default_operator.clone()),
            updated_at: None,
            updated_by: None,
            cancelled_at: None,
            cancelled_by: None,
            cancel_reason: None,
        };

        book.insert(appointment.clone());
        info!("Appointment {} created ({})", appointment.appointment_number, appointment.id);

        Ok(appointment)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: UpdateAppointmentRequest) -> Result<Appointment, AppointmentError> {
        let blocked = self.calendar.blocked_dates.snapshot().await;
        let mut book = self.book.write().await;

        let current = book.get(id).cloned().ok_or(AppointmentError::NotFound(id))?;
        self.lifecycle.ensure_modifiable(current.status)?;

        let mut updated = current.clone();
        if let Some(room_id) = request.room_id {
            updated.room_id = room_id;
        }
        if let Some(doctor_id) = request.doctor_id {
            updated.doctor_id = doctor_id;
        }
        if let Some(time_slot_id) = request.time_slot_id {
            updated.time_slot_id = time_slot_id;
        }
        if let Some(date) = request.date {
            updated.date = date;
        }
        if let Some(purpose_id) = request.purpose_id {
            updated.purpose_id = purpose_id;
        }
        if let Some(preparations) = request.preparations {
            updated.preparations = preparations;
        }
        if request.notes.is_some() {
            updated.notes = request.notes;
        }
        if request.contact_phone.is_some() {
            updated.contact_phone = request.contact_phone;
        }

        self.validate_purpose(&updated.purpose_id, &updated.preparations)?;

        let key = updated.booking_key();
        if key != current.booking_key() {
            debug!("Appointment {} moves to {:?}", id, key);
            self.validate_references(&key.room_id, &key.doctor_id, &key.time_slot_id)?;
            if !request.include_holidays {
                ensure_not_blocked(&blocked, &key)?;
            }
            AvailabilityResolver::new(&self.calendar, &blocked, &book).ensure_capacity(&key, Some(id))?;
        }

        updated.updated_at = Some(Utc::now());
        updated.updated_by = Some(request.updated_by.unwrap_or_else(|| self.default_operator.clone()));

        let stored = book.get_mut(id).ok_or(AppointmentError::NotFound(id))?;
        *stored = updated.clone();
        info!("Appointment {} updated", updated.appointment_number);

        Ok(updated)
    }

    #[instrument(skip(self, request))]
    pub async fn cancel(&self, id: Uuid, request: CancelAppointmentRequest) -> Result<Appointment, AppointmentError> {
        self.change_status(
            id,
            ChangeStatusRequest {
                status: AppointmentStatus::Cancelled,
                reason: Some(request.reason),
                changed_by: request.cancelled_by,
            },
        )
        .await
    }

    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn change_status(&self, id: Uuid, request: ChangeStatusRequest) -> Result<Appointment, AppointmentError> {
        // Cancellation always records why, whichever route asked for it.
        let reason = request.reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        if request.status == AppointmentStatus::Cancelled && reason.is_none() {
            return Err(AppointmentError::ValidationError("Cancel reason is required".to_string()));
        }

        let mut book = self.book.write().await;
        let appointment = book.get_mut(id).ok_or(AppointmentError::NotFound(id))?;

        self.lifecycle.validate_status_transition(appointment.status, request.status)?;

        let now = Utc::now();
        let operator = request.changed_by.unwrap_or_else(|| self.default_operator.clone());

        if request.status == AppointmentStatus::Cancelled {
            appointment.cancelled_at = Some(now);
            appointment.cancelled_by = Some(operator.clone());
            appointment.cancel_reason = reason;
        }

        let previous = appointment.status;
        appointment.status = request.status;
        appointment.updated_at = Some(now);
        appointment.updated_by = Some(operator);

        info!("Appointment {} moved {} -> {}", appointment.appointment_number, previous, appointment.status);
        Ok(appointment.clone())
    }

    fn validate_references(&self, room_id: &str, doctor_id: &str, time_slot_id: &str) -> Result<(), AppointmentError> {
        self.calendar.catalog.ensure_assignable(room_id, doctor_id)?;
        self.calendar.catalog.require_time_slot(time_slot_id)?;
        Ok(())
    }

    fn validate_purpose(&self, purpose_id: &str, preparations: &[String]) -> Result<(), AppointmentError> {
        let catalog = &self.calendar.catalog;
        catalog
            .purpose(purpose_id)
            .ok_or_else(|| CalendarError::PurposeNotFound(purpose_id.to_string()))?;

        if let Some(unknown) = preparations.iter().find(|p| catalog.preparation(p).is_none()) {
            return Err(AppointmentError::ValidationError(format!("Unknown preparation tag: {}", unknown)));
        }

        Ok(())
    }
}

/// Weekends, holidays and doctor leave refuse bookings unless overridden.
fn ensure_not_blocked(blocked: &BlockedDateSet, key: &BookingKey) -> Result<(), AppointmentError> {
    if is_weekend(key.date) {
        warn!("Booking attempted on weekend {}", key.date);
        return Err(AppointmentError::DateBlocked(format!("{} falls on a weekend", key.date)));
    }

    if let Some(entry) = blocked.blocking(key.date, &key.room_id, Some(key.doctor_id.as_str())) {
        warn!("Booking attempted on blocked date {}: {}", key.date, entry.reason);
        return Err(AppointmentError::DateBlocked(format!("{}: {}", key.date, entry.reason)));
    }

    Ok(())
}
