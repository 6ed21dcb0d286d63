// libs/calendar-cell/src/services/catalog.rs
use std::collections::HashMap;
use tracing::debug;

use crate::models::{
    AppointmentPurpose, CalendarError, Doctor, ExaminationRoom, PreparationTag, TimeSlot,
};

/// Static calendar reference data: rooms, doctors, time slots, purposes and
/// preparation tags. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct CalendarCatalog {
    rooms: Vec<ExaminationRoom>,
    doctors: Vec<Doctor>,
    time_slots: Vec<TimeSlot>,
    purposes: Vec<AppointmentPurpose>,
    preparations: Vec<PreparationTag>,
    slot_index: HashMap<String, usize>,
}

impl CalendarCatalog {
    pub fn new(
        rooms: Vec<ExaminationRoom>,
        doctors: Vec<Doctor>,
        time_slots: Vec<TimeSlot>,
        purposes: Vec<AppointmentPurpose>,
        preparations: Vec<PreparationTag>,
    ) -> Result<Self, CalendarError> {
        let mut slot_index = HashMap::with_capacity(time_slots.len());
        for (position, slot) in time_slots.iter().enumerate() {
            if slot.start_time >= slot.end_time {
                return Err(CalendarError::ReferenceData(format!(
                    "time slot {} ends before it starts",
                    slot.id
                )));
            }
            if slot_index.insert(slot.id.clone(), position).is_some() {
                return Err(CalendarError::ReferenceData(format!(
                    "duplicate time slot id {}",
                    slot.id
                )));
            }
        }

        for doctor in &doctors {
            if let Some(unknown) = doctor.room_ids.iter().find(|id| !rooms.iter().any(|r| &r.id == *id)) {
                return Err(CalendarError::ReferenceData(format!(
                    "doctor {} references unknown room {}",
                    doctor.id, unknown
                )));
            }
        }

        debug!(
            "Calendar catalog built: {} rooms, {} doctors, {} time slots",
            rooms.len(),
            doctors.len(),
            time_slots.len()
        );

        Ok(Self {
            rooms,
            doctors,
            time_slots,
            purposes,
            preparations,
            slot_index,
        })
    }

    /// Active rooms only.
    pub fn rooms(&self) -> Vec<&ExaminationRoom> {
        self.rooms.iter().filter(|r| r.is_active).collect()
    }

    /// Active doctors only.
    pub fn doctors(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| d.is_active).collect()
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn purposes(&self) -> &[AppointmentPurpose] {
        &self.purposes
    }

    pub fn preparations(&self) -> &[PreparationTag] {
        &self.preparations
    }

    pub fn room(&self, id: &str) -> Option<&ExaminationRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn time_slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slot_index.get(id).map(|&position| &self.time_slots[position])
    }

    pub fn purpose(&self, id: &str) -> Option<&AppointmentPurpose> {
        self.purposes.iter().find(|p| p.id == id)
    }

    pub fn preparation(&self, id: &str) -> Option<&PreparationTag> {
        self.preparations.iter().find(|p| p.id == id)
    }

    /// Active doctors that may be booked into the room.
    pub fn doctors_by_room(&self, room_id: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.is_active && d.can_work_in(room_id))
            .collect()
    }

    pub fn require_room(&self, id: &str) -> Result<&ExaminationRoom, CalendarError> {
        self.room(id)
            .filter(|r| r.is_active)
            .ok_or_else(|| CalendarError::RoomNotFound(id.to_string()))
    }

    pub fn require_doctor(&self, id: &str) -> Result<&Doctor, CalendarError> {
        self.doctor(id)
            .filter(|d| d.is_active)
            .ok_or_else(|| CalendarError::DoctorNotFound(id.to_string()))
    }

    pub fn require_time_slot(&self, id: &str) -> Result<&TimeSlot, CalendarError> {
        self.time_slot(id)
            .ok_or_else(|| CalendarError::TimeSlotNotFound(id.to_string()))
    }

    /// A booking's (room, doctor) pair must satisfy doctor ∈ room's assignable doctors.
    pub fn ensure_assignable(&self, room_id: &str, doctor_id: &str) -> Result<(), CalendarError> {
        self.require_room(room_id)?;
        let doctor = self.require_doctor(doctor_id)?;

        if !doctor.can_work_in(room_id) {
            return Err(CalendarError::DoctorNotAssignable {
                room_id: room_id.to_string(),
                doctor_id: doctor_id.to_string(),
            });
        }

        Ok(())
    }
}
