// libs/appointment-cell/src/services/availability.rs
use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use calendar_cell::{BlockedDateSet, CalendarCatalog, CalendarState, CapacityInfo, CapacityPolicy};

use crate::models::{AppointmentError, AvailableSlot, BookingKey, SlotAvailability};
use crate::services::book::AppointmentBook;

/// Read-only capacity view over one appointment book and one blocked-date
/// snapshot. Never mutates; safe to call repeatedly.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityResolver<'a> {
    catalog: &'a CalendarCatalog,
    capacity: &'a CapacityPolicy,
    blocked: &'a BlockedDateSet,
    book: &'a AppointmentBook,
}

impl<'a> AvailabilityResolver<'a> {
    pub fn new(calendar: &'a CalendarState, blocked: &'a BlockedDateSet, book: &'a AppointmentBook) -> Self {
        Self {
            catalog: &calendar.catalog,
            capacity: &calendar.capacity,
            blocked,
            book,
        }
    }

    pub fn blocked(&self) -> &'a BlockedDateSet {
        self.blocked
    }

    pub fn book(&self) -> &'a AppointmentBook {
        self.book
    }

    /// Per-slot availability for every slot the room offers on the date.
    pub fn resolve(&self, date: NaiveDate, room_id: &str, doctor_id: Option<&str>) -> Vec<SlotAvailability> {
        let blocked = self.blocked.blocking(date, room_id, doctor_id);

        let slots: Vec<SlotAvailability> = self
            .capacity
            .applicable_slots(date, room_id, doctor_id, self.catalog.time_slots())
            .into_iter()
            .map(|slot| {
                let total_capacity = self
                    .capacity
                    .slot_capacity(date, room_id, doctor_id, &slot.id)
                    .unwrap_or(0);
                let booked_count = self.book.slot_booked_count(date, &slot.id, room_id, doctor_id, None);

                SlotAvailability {
                    time_slot_id: slot.id.clone(),
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    date,
                    room_id: room_id.to_string(),
                    doctor_id: doctor_id.map(str::to_string),
                    total_capacity,
                    booked_count,
                    available_count: total_capacity.saturating_sub(booked_count),
                    is_blocked: blocked.is_some(),
                    blocked_reason: blocked.map(|bd| bd.reason.clone()),
                    can_force_book: blocked.map(|bd| bd.can_force_book),
                }
            })
            .collect();

        debug!(
            "Resolved {} slots for room {} on {} ({} open)",
            slots.len(),
            room_id,
            date,
            slots.iter().filter(|s| s.is_available()).count()
        );

        slots
    }

    /// A slot the room does not offer on that date is never available.
    pub fn is_slot_available(
        &self,
        date: NaiveDate,
        time_slot_id: &str,
        room_id: &str,
        doctor_id: Option<&str>,
    ) -> bool {
        self.resolve(date, room_id, doctor_id)
            .iter()
            .find(|s| s.time_slot_id == time_slot_id)
            .map_or(false, SlotAvailability::is_available)
    }

    /// Booking-form projection for one doctor in one room. A slot is open
    /// only when both the doctor's share and the room as a whole have room.
    pub fn available_time_slots(&self, date: NaiveDate, room_id: &str, doctor_id: &str) -> Vec<AvailableSlot> {
        let room_wide = self.resolve(date, room_id, None);
        let room_open = |slot_id: &str| {
            room_wide
                .iter()
                .find(|s| s.time_slot_id == slot_id)
                .map_or(true, |s| s.available_count > 0)
        };

        self.resolve(date, room_id, Some(doctor_id))
            .into_iter()
            .map(|slot| AvailableSlot {
                is_available: slot.is_available() && room_open(&slot.time_slot_id),
                time_slot_id: slot.time_slot_id,
                start_time: slot.start_time,
                end_time: slot.end_time,
            })
            .collect()
    }

    pub fn room_day_capacity(&self, date: NaiveDate, room_id: &str) -> CapacityInfo {
        self.room_day_capacity_excluding(date, room_id, None)
    }

    pub fn doctor_day_capacity(&self, date: NaiveDate, doctor_id: &str) -> CapacityInfo {
        self.doctor_day_capacity_excluding(date, doctor_id, None)
    }

    fn room_day_capacity_excluding(&self, date: NaiveDate, room_id: &str, exclude: Option<Uuid>) -> CapacityInfo {
        CapacityInfo::new(
            self.book.room_day_count(date, room_id, exclude),
            self.capacity.room_daily_limit(date, room_id),
        )
    }

    fn doctor_day_capacity_excluding(&self, date: NaiveDate, doctor_id: &str, exclude: Option<Uuid>) -> CapacityInfo {
        CapacityInfo::new(
            self.book.doctor_day_count(date, doctor_id, exclude),
            self.capacity.doctor_daily_limit(date, doctor_id),
        )
    }

    /// Write-path capacity check for one booking. `exclude` leaves the
    /// appointment being moved out of every count.
    pub fn ensure_capacity(&self, key: &BookingKey, exclude: Option<Uuid>) -> Result<(), AppointmentError> {
        let BookingKey { date, time_slot_id, room_id, doctor_id } = key;

        for scope in [None, Some(doctor_id.as_str())] {
            let capacity = self
                .capacity
                .slot_capacity(*date, room_id, scope, time_slot_id)
                .ok_or_else(|| {
                    AppointmentError::ValidationError(format!(
                        "time slot {} is not offered in room {} on {}",
                        time_slot_id, room_id, date
                    ))
                })?;

            let booked = self.book.slot_booked_count(*date, time_slot_id, room_id, scope, exclude);
            if booked >= capacity {
                return Err(AppointmentError::CapacityExhausted(match scope {
                    None => format!("time slot {} in room {} is full on {}", time_slot_id, room_id, date),
                    Some(doctor) => format!("time slot {} is full for doctor {} on {}", time_slot_id, doctor, date),
                }));
            }
        }

        if self.room_day_capacity_excluding(*date, room_id, exclude).is_exhausted() {
            return Err(AppointmentError::CapacityExhausted("room capacity exhausted".to_string()));
        }

        if self.doctor_day_capacity_excluding(*date, doctor_id, exclude).is_exhausted() {
            return Err(AppointmentError::CapacityExhausted("doctor capacity exhausted".to_string()));
        }

        Ok(())
    }
}
