// libs/appointment-cell/src/state.rs
use std::sync::Arc;

use calendar_cell::CalendarState;
use patient_cell::PatientDirectory;
use shared_config::AppConfig;

use crate::services::store::AppointmentStore;

/// Everything the appointment routes need, cheap to clone per request.
#[derive(Debug, Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub calendar: CalendarState,
    pub patients: Arc<PatientDirectory>,
    pub store: Arc<AppointmentStore>,
}

impl SchedulingState {
    pub fn new(config: Arc<AppConfig>, calendar: CalendarState, patients: Arc<PatientDirectory>) -> Self {
        let store = AppointmentStore::new(calendar.clone(), patients.clone(), config.default_operator.clone());

        Self {
            config,
            calendar,
            patients,
            store: Arc::new(store),
        }
    }
}
