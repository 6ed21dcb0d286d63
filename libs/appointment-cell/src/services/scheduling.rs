// libs/appointment-cell/src/services/scheduling.rs
use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AppointmentError, AppointmentFilters, AppointmentView, AvailableSlot, DateValidationResult,
    DaySummary, FollowUpRequest, SlotAvailability, ValidationRequest,
};
use crate::services::availability::AvailabilityResolver;
use crate::services::book::AppointmentBook;
use crate::services::finder::NextSlotFinder;
use crate::services::listing::{summarize_day, AppointmentListing, AppointmentQuery};
use crate::services::validation::DateValidator;
use crate::state::SchedulingState;

/// Query side of the scheduling engine. Writes go through `AppointmentStore`.
pub struct SchedulingService<'a> {
    state: &'a SchedulingState,
}

impl<'a> SchedulingService<'a> {
    pub fn new(state: &'a SchedulingState) -> Self {
        Self { state }
    }

    fn ensure_room(&self, room_id: &str, doctor_id: Option<&str>) -> Result<(), AppointmentError> {
        let catalog = &self.state.calendar.catalog;
        match doctor_id {
            Some(doctor_id) => catalog.ensure_assignable(room_id, doctor_id)?,
            None => {
                catalog.require_room(room_id)?;
            }
        }
        Ok(())
    }

    fn ensure_request(&self, request: &ValidationRequest) -> Result<(), AppointmentError> {
        self.ensure_room(&request.room_id, Some(request.doctor_id.as_str()))?;
        if let Some(patient_id) = &request.patient_id {
            self.state.patients.require(patient_id)?;
        }
        Ok(())
    }

    pub async fn resolve_availability(
        &self,
        date: NaiveDate,
        room_id: &str,
        doctor_id: Option<&str>,
    ) -> Result<Vec<SlotAvailability>, AppointmentError> {
        self.ensure_room(room_id, doctor_id)?;

        let blocked = self.state.calendar.blocked_dates.snapshot().await;
        let book = self.state.store.read().await;
        Ok(AvailabilityResolver::new(&self.state.calendar, &blocked, &book).resolve(date, room_id, doctor_id))
    }

    pub async fn is_slot_available(
        &self,
        date: NaiveDate,
        time_slot_id: &str,
        room_id: &str,
        doctor_id: Option<&str>,
    ) -> Result<bool, AppointmentError> {
        self.ensure_room(room_id, doctor_id)?;
        self.state.calendar.catalog.require_time_slot(time_slot_id)?;

        let blocked = self.state.calendar.blocked_dates.snapshot().await;
        let book = self.state.store.read().await;
        Ok(AvailabilityResolver::new(&self.state.calendar, &blocked, &book)
            .is_slot_available(date, time_slot_id, room_id, doctor_id))
    }

    pub async fn available_time_slots(
        &self,
        date: NaiveDate,
        room_id: &str,
        doctor_id: &str,
    ) -> Result<Vec<AvailableSlot>, AppointmentError> {
        self.ensure_room(room_id, Some(doctor_id))?;

        let blocked = self.state.calendar.blocked_dates.snapshot().await;
        let book = self.state.store.read().await;
        Ok(AvailabilityResolver::new(&self.state.calendar, &blocked, &book)
            .available_time_slots(date, room_id, doctor_id))
    }

    pub async fn validate_date(
        &self,
        date: NaiveDate,
        request: &ValidationRequest,
    ) -> Result<DateValidationResult, AppointmentError> {
        self.ensure_request(request)?;

        let blocked = self.state.calendar.blocked_dates.snapshot().await;
        let book = self.state.store.read().await;
        let resolver = AvailabilityResolver::new(&self.state.calendar, &blocked, &book);
        Ok(DateValidator::new(resolver).validate(date, request))
    }

    /// Runs against a detached snapshot so no lock is held during the scan.
    pub async fn find_available_date(
        &self,
        today: NaiveDate,
        request: &FollowUpRequest,
    ) -> Result<DateValidationResult, AppointmentError> {
        self.ensure_request(&request.request)?;

        let blocked = self.state.calendar.blocked_dates.snapshot().await;
        let book = self.state.store.snapshot().await;
        let validator = DateValidator::new(AvailabilityResolver::new(&self.state.calendar, &blocked, &book));

        let from = request.from_date.unwrap_or(today);
        NextSlotFinder::new(self.state.config.search_horizon_days).find(
            &validator,
            from,
            request.target_days,
            &request.request,
        )
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentView, AppointmentError> {
        let book = self.state.store.read().await;
        let appointment = book.get(id).ok_or(AppointmentError::NotFound(id))?;
        Ok(self.listing(&book).view(appointment))
    }

    pub async fn filter_appointments(
        &self,
        filters: &AppointmentFilters,
    ) -> Result<Vec<AppointmentView>, AppointmentError> {
        let query = AppointmentQuery {
            date_from: filters.date_from,
            date_to: filters.date_to,
            room_id: filters.room_id.clone(),
            doctor_id: filters.doctor_id.clone(),
            statuses: filters.statuses()?,
            search_text: filters.search_text.clone(),
        };

        if let (Some(from), Some(to)) = (query.date_from, query.date_to) {
            if from > to {
                return Err(AppointmentError::ValidationError("date_from must not be after date_to".to_string()));
            }
        }

        let book = self.state.store.read().await;
        let views = self.listing(&book).filter(&query);
        debug!("Appointment filter matched {} records", views.len());
        Ok(views)
    }

    pub async fn patient_appointments(&self, patient_id: &str) -> Result<Vec<AppointmentView>, AppointmentError> {
        self.state.patients.require(patient_id)?;

        let book = self.state.store.read().await;
        Ok(self.listing(&book).for_patient(patient_id))
    }

    pub async fn summary_for_date(&self, date: NaiveDate) -> DaySummary {
        summarize_day(&*self.state.store.read().await, date)
    }

    fn listing<'b>(&'b self, book: &'b AppointmentBook) -> AppointmentListing<'b> {
        AppointmentListing::new(book, &self.state.calendar.catalog, &self.state.patients)
    }
}
