// libs/calendar-cell/src/services/capacity.rs
use chrono::NaiveDate;

use shared_config::AppConfig;

use crate::models::{SlotConfiguration, TimeSlot};

/// Fallback limits used when no slot configuration speaks for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityDefaults {
    pub max_per_slot: u32,
    pub doctor_max_per_day: u32,
    pub room_max_per_day: u32,
}

impl Default for CapacityDefaults {
    fn default() -> Self {
        Self {
            max_per_slot: 3,
            doctor_max_per_day: 50,
            room_max_per_day: 300,
        }
    }
}

impl From<&AppConfig> for CapacityDefaults {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_per_slot: config.default_max_per_slot,
            doctor_max_per_day: config.doctor_max_per_day,
            room_max_per_day: config.room_max_per_day,
        }
    }
}

/// Per-room / per-doctor capacity rules.
#[derive(Debug, Clone, Default)]
pub struct CapacityPolicy {
    defaults: CapacityDefaults,
    configurations: Vec<SlotConfiguration>,
}

impl CapacityPolicy {
    pub fn new(defaults: CapacityDefaults, configurations: Vec<SlotConfiguration>) -> Self {
        Self { defaults, configurations }
    }

    /// Active configurations only.
    pub fn configurations(&self) -> Vec<&SlotConfiguration> {
        self.configurations.iter().filter(|c| c.is_active).collect()
    }

    /// Configurations in force for the room on the date. Doctor-scoped entries
    /// are only considered when that doctor is requested.
    fn effective_for<'a>(
        &'a self,
        date: NaiveDate,
        room_id: &'a str,
        doctor_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a SlotConfiguration> + 'a {
        self.configurations.iter().filter(move |c| {
            c.room_id == room_id
                && c.is_effective_on(date)
                && match c.doctor_id.as_deref() {
                    None => true,
                    Some(d) => doctor_id == Some(d),
                }
        })
    }

    /// Slots bookable in the room on the date, in catalog order. A room with
    /// no configuration in force accepts every catalog slot.
    pub fn applicable_slots<'s>(
        &self,
        date: NaiveDate,
        room_id: &str,
        doctor_id: Option<&str>,
        catalog_slots: &'s [TimeSlot],
    ) -> Vec<&'s TimeSlot> {
        let configs: Vec<_> = self.effective_for(date, room_id, doctor_id).collect();
        if configs.is_empty() {
            return catalog_slots.iter().collect();
        }

        catalog_slots
            .iter()
            .filter(|slot| configs.iter().any(|c| c.covers_slot(&slot.id)))
            .collect()
    }

    /// Per-slot capacity; `None` when the slot is not offered in that room.
    pub fn slot_capacity(
        &self,
        date: NaiveDate,
        room_id: &str,
        doctor_id: Option<&str>,
        time_slot_id: &str,
    ) -> Option<u32> {
        let configs: Vec<_> = self.effective_for(date, room_id, doctor_id).collect();
        if configs.is_empty() {
            return Some(self.defaults.max_per_slot);
        }

        let covering = || configs.iter().filter(|c| c.covers_slot(time_slot_id));

        covering()
            .find(|c| c.doctor_id.is_some())
            .or_else(|| covering().next())
            .map(|c| c.max_appointments_per_slot)
    }

    pub fn room_daily_limit(&self, date: NaiveDate, room_id: &str) -> u32 {
        self.effective_for(date, room_id, None)
            .find_map(|c| c.max_appointments_per_day)
            .unwrap_or(self.defaults.room_max_per_day)
    }

    pub fn doctor_daily_limit(&self, date: NaiveDate, doctor_id: &str) -> u32 {
        self.configurations
            .iter()
            .filter(|c| c.doctor_id.as_deref() == Some(doctor_id) && c.is_effective_on(date))
            .find_map(|c| c.max_appointments_per_day)
            .unwrap_or(self.defaults.doctor_max_per_day)
    }
}
