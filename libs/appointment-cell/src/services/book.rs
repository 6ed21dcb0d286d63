// libs/appointment-cell/src/services/book.rs
use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use shared_utils::dates::{compact_date, day_distance};

use crate::models::{Appointment, PatientProximity};

/// In-memory appointment records. Booked counts are always derived by
/// scanning non-cancelled records, never kept as counters.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
    index: HashMap<Uuid, usize>,
    sequences: HashMap<NaiveDate, u32>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.index.get(&id).map(|&position| &self.appointments[position])
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Option<&mut Appointment> {
        match self.index.get(&id) {
            Some(&position) => self.appointments.get_mut(position),
            None => None,
        }
    }

    /// All records in insertion order, cancelled ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    fn active(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(|a| a.holds_capacity())
    }

    pub(crate) fn insert(&mut self, appointment: Appointment) {
        self.index.insert(appointment.id, self.appointments.len());
        self.appointments.push(appointment);
    }

    /// `APT-YYYYMMDD-NNNN`, numbered per calendar day.
    pub(crate) fn next_appointment_number(&mut self, date: NaiveDate) -> String {
        let sequence = self.sequences.entry(date).or_insert(0);
        *sequence += 1;
        format!("APT-{}-{:04}", compact_date(date), sequence)
    }

    pub fn slot_booked_count(
        &self,
        date: NaiveDate,
        time_slot_id: &str,
        room_id: &str,
        doctor_id: Option<&str>,
        exclude: Option<Uuid>,
    ) -> u32 {
        self.active()
            .filter(|a| {
                a.date == date
                    && a.time_slot_id == time_slot_id
                    && a.room_id == room_id
                    && doctor_id.map_or(true, |d| a.doctor_id == d)
                    && Some(a.id) != exclude
            })
            .count() as u32
    }

    pub fn room_day_count(&self, date: NaiveDate, room_id: &str, exclude: Option<Uuid>) -> u32 {
        self.active()
            .filter(|a| a.date == date && a.room_id == room_id && Some(a.id) != exclude)
            .count() as u32
    }

    pub fn doctor_day_count(&self, date: NaiveDate, doctor_id: &str, exclude: Option<Uuid>) -> u32 {
        self.active()
            .filter(|a| a.date == date && a.doctor_id == doctor_id && Some(a.id) != exclude)
            .count() as u32
    }

    /// The patient's non-cancelled booking closest to `date`, earliest on ties.
    pub fn nearest_for_patient(&self, patient_id: &str, date: NaiveDate) -> Option<PatientProximity> {
        self.active()
            .filter(|a| a.patient_id == patient_id)
            .min_by_key(|a| (day_distance(a.date, date), a.date))
            .map(|a| PatientProximity {
                appointment_id: a.id,
                appointment_number: a.appointment_number.clone(),
                date: a.date,
                days_away: day_distance(a.date, date),
            })
    }

    pub fn for_patient<'a>(&'a self, patient_id: &'a str) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.appointments.iter().filter(move |a| a.patient_id == patient_id)
    }

    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(move |a| a.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn appointment(book: &mut AppointmentBook, d: u32, slot: &str, doctor: &str, patient: &str) -> Uuid {
        let number = book.next_appointment_number(day(d));
        let id = Uuid::new_v4();
        book.insert(Appointment {
            id,
            appointment_number: number,
            room_id: "room-1".to_string(),
            doctor_id: doctor.to_string(),
            patient_id: patient.to_string(),
            time_slot_id: slot.to_string(),
            purpose_id: "purpose-1".to_string(),
            date: day(d),
            status: AppointmentStatus::Scheduled,
            preparations: vec![],
            notes: None,
            contact_phone: None,
            created_at: Utc::now(),
            created_by: "test-user".to_string(),
            updated_at: None,
            updated_by: None,
            cancelled_at: None,
            cancelled_by: None,
            cancel_reason: None,
        });
        id
    }

    #[test]
    fn test_numbers_are_sequential_per_day() {
        let mut book = AppointmentBook::new();
        assert_eq!(book.next_appointment_number(day(10)), "APT-20250610-0001");
        assert_eq!(book.next_appointment_number(day(10)), "APT-20250610-0002");
        assert_eq!(book.next_appointment_number(day(11)), "APT-20250611-0001");
    }

    #[test]
    fn test_counts_exclude_cancelled() {
        let mut book = AppointmentBook::new();
        let first = appointment(&mut book, 10, "slot-8-0", "doc-1", "patient-1");
        appointment(&mut book, 10, "slot-8-0", "doc-2", "patient-2");

        assert_eq!(book.slot_booked_count(day(10), "slot-8-0", "room-1", None, None), 2);
        assert_eq!(book.slot_booked_count(day(10), "slot-8-0", "room-1", Some("doc-1"), None), 1);
        assert_eq!(book.slot_booked_count(day(10), "slot-8-0", "room-1", None, Some(first)), 1);

        book.get_mut(first).unwrap().status = AppointmentStatus::Cancelled;
        assert_eq!(book.room_day_count(day(10), "room-1", None), 1);
        assert_eq!(book.doctor_day_count(day(10), "doc-1", None), 0);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_nearest_patient_appointment() {
        let mut book = AppointmentBook::new();
        appointment(&mut book, 3, "slot-8-0", "doc-1", "patient-1");
        appointment(&mut book, 12, "slot-8-0", "doc-1", "patient-1");
        appointment(&mut book, 11, "slot-8-0", "doc-1", "patient-2");

        let nearest = book.nearest_for_patient("patient-1", day(10)).unwrap();
        assert_eq!(nearest.date, day(12));
        assert_eq!(nearest.days_away, 2);
        assert!(book.nearest_for_patient("patient-9", day(10)).is_none());
    }
}
