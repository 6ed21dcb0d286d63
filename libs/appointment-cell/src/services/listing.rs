// libs/appointment-cell/src/services/listing.rs
use std::collections::BTreeMap;

use chrono::NaiveDate;

use calendar_cell::CalendarCatalog;
use patient_cell::PatientDirectory;

use crate::models::{Appointment, AppointmentStatus, AppointmentView, DaySummary};
use crate::services::book::AppointmentBook;

/// Parsed form of `AppointmentFilters`.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub room_id: Option<String>,
    pub doctor_id: Option<String>,
    pub statuses: Vec<AppointmentStatus>,
    pub search_text: Option<String>,
}

/// Read-side projections: resolved views, filters and daily summaries.
pub struct AppointmentListing<'a> {
    book: &'a AppointmentBook,
    catalog: &'a CalendarCatalog,
    patients: &'a PatientDirectory,
}

impl<'a> AppointmentListing<'a> {
    pub fn new(book: &'a AppointmentBook, catalog: &'a CalendarCatalog, patients: &'a PatientDirectory) -> Self {
        Self { book, catalog, patients }
    }

    pub fn view(&self, appointment: &Appointment) -> AppointmentView {
        AppointmentView {
            room: self.catalog.room(&appointment.room_id).cloned(),
            doctor: self.catalog.doctor(&appointment.doctor_id).cloned(),
            patient: self.patients.get(&appointment.patient_id).cloned(),
            time_slot: self.catalog.time_slot(&appointment.time_slot_id).cloned(),
            purpose: self.catalog.purpose(&appointment.purpose_id).cloned(),
            preparation_tags: appointment
                .preparations
                .iter()
                .filter_map(|id| self.catalog.preparation(id).cloned())
                .collect(),
            appointment: appointment.clone(),
        }
    }

    /// Matching appointments ordered by date, then slot start time.
    pub fn filter(&self, query: &AppointmentQuery) -> Vec<AppointmentView> {
        let text = query
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut views: Vec<AppointmentView> = self
            .book
            .iter()
            .filter(|a| query.date_from.map_or(true, |from| a.date >= from))
            .filter(|a| query.date_to.map_or(true, |to| a.date <= to))
            .filter(|a| query.room_id.as_ref().map_or(true, |room| &a.room_id == room))
            .filter(|a| query.doctor_id.as_ref().map_or(true, |doctor| &a.doctor_id == doctor))
            .filter(|a| query.statuses.is_empty() || query.statuses.contains(&a.status))
            .map(|a| self.view(a))
            .filter(|view| text.as_deref().map_or(true, |t| matches_text(view, t)))
            .collect();

        sort_views(&mut views);
        views
    }

    pub fn for_patient(&self, patient_id: &str) -> Vec<AppointmentView> {
        let mut views: Vec<AppointmentView> = self.book.for_patient(patient_id).map(|a| self.view(a)).collect();
        sort_views(&mut views);
        views
    }
}

fn matches_text(view: &AppointmentView, lowered: &str) -> bool {
    if view.appointment.appointment_number.to_lowercase().contains(lowered) {
        return true;
    }

    view.patient.as_ref().map_or(false, |patient| patient.matches(lowered))
}

fn sort_views(views: &mut [AppointmentView]) {
    views.sort_by(|a, b| {
        a.appointment
            .date
            .cmp(&b.appointment.date)
            .then_with(|| {
                let start = |v: &AppointmentView| v.time_slot.as_ref().map(|s| s.start_time);
                start(a).cmp(&start(b))
            })
            .then_with(|| a.appointment.appointment_number.cmp(&b.appointment.appointment_number))
    });
}

/// Counts for one day. Every status is reported, cancelled included.
pub fn summarize_day(book: &AppointmentBook, date: NaiveDate) -> DaySummary {
    let mut by_status: BTreeMap<String, usize> =
        AppointmentStatus::ALL.iter().map(|s| (s.to_string(), 0)).collect();
    let mut by_room = BTreeMap::new();
    let mut by_doctor = BTreeMap::new();
    let mut total = 0;

    for appointment in book.on_date(date) {
        total += 1;
        *by_status.entry(appointment.status.to_string()).or_insert(0) += 1;
        *by_room.entry(appointment.room_id.clone()).or_insert(0) += 1;
        *by_doctor.entry(appointment.doctor_id.clone()).or_insert(0) += 1;
    }

    DaySummary {
        date,
        total,
        by_status,
        by_room,
        by_doctor,
    }
}
