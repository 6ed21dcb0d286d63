// libs/calendar-cell/src/state.rs
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use shared_config::AppConfig;

use crate::models::{CalendarError, ReferenceData};
use crate::seed::demo_reference_data;
use crate::services::{BlockedDateRegistry, CalendarCatalog, CapacityDefaults, CapacityPolicy};

/// Calendar reference data shared by the HTTP layer and the scheduling core.
#[derive(Debug, Clone)]
pub struct CalendarState {
    pub catalog: Arc<CalendarCatalog>,
    pub capacity: Arc<CapacityPolicy>,
    pub blocked_dates: Arc<BlockedDateRegistry>,
}

impl CalendarState {
    pub fn from_reference_data(data: ReferenceData, config: &AppConfig) -> Result<Self, CalendarError> {
        let catalog = CalendarCatalog::new(
            data.rooms,
            data.doctors,
            data.time_slots,
            data.purposes,
            data.preparations,
        )?;

        for configuration in &data.slot_configurations {
            if catalog.room(&configuration.room_id).is_none() {
                return Err(CalendarError::ReferenceData(format!(
                    "slot configuration {} references unknown room {}",
                    configuration.id, configuration.room_id
                )));
            }
            if let Some(slot_id) = configuration
                .time_slot_ids
                .iter()
                .find(|id| catalog.time_slot(id).is_none())
            {
                return Err(CalendarError::ReferenceData(format!(
                    "slot configuration {} references unknown time slot {}",
                    configuration.id, slot_id
                )));
            }
        }

        let capacity = CapacityPolicy::new(CapacityDefaults::from(config), data.slot_configurations);

        Ok(Self {
            catalog: Arc::new(catalog),
            capacity: Arc::new(capacity),
            blocked_dates: Arc::new(BlockedDateRegistry::new(data.blocked_dates)),
        })
    }

    /// Reads `CALENDAR_DATA_PATH` when configured, otherwise serves the demo catalog.
    pub fn load(config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let data = match config.calendar_data_path.as_deref() {
            Some(path) => read_reference_data(Path::new(path))?,
            None => {
                info!("Using built-in demo calendar catalog");
                demo_reference_data(today)
            }
        };

        Ok(Self::from_reference_data(data, config)?)
    }
}

pub fn read_reference_data(path: &Path) -> Result<ReferenceData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading calendar data from {}", path.display()))?;
    let data: ReferenceData = serde_json::from_str(&raw)
        .with_context(|| format!("parsing calendar data in {}", path.display()))?;

    info!(
        "Loaded calendar data from {}: {} rooms, {} doctors, {} slots, {} blocked dates",
        path.display(),
        data.rooms.len(),
        data.doctors.len(),
        data.time_slots.len(),
        data.blocked_dates.len()
    );

    Ok(data)
}
