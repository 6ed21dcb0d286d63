// libs/appointment-cell/src/services/finder.rs
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use shared_utils::dates::{add_days, days_between};

use crate::models::{AppointmentError, DateValidationResult, ValidationRequest};
use crate::services::validation::DateValidator;

pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 14;

/// Forward scan for the first bookable follow-up date.
#[derive(Debug, Clone, Copy)]
pub struct NextSlotFinder {
    horizon_days: u32,
}

impl Default for NextSlotFinder {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_HORIZON_DAYS)
    }
}

impl NextSlotFinder {
    pub fn new(horizon_days: u32) -> Self {
        Self { horizon_days }
    }

    /// Scans offsets `0..=horizon` from `today + target_days`. The accepted
    /// result carries how many days were skipped and why.
    #[instrument(skip(self, validator, request), fields(room_id = %request.room_id, doctor_id = %request.doctor_id))]
    pub fn find(
        &self,
        validator: &DateValidator<'_>,
        today: NaiveDate,
        target_days: u32,
        request: &ValidationRequest,
    ) -> Result<DateValidationResult, AppointmentError> {
        // The whole window must be representable, not just the target.
        let target_date = add_days(today, i64::from(target_days))
            .filter(|target| add_days(*target, i64::from(self.horizon_days)).is_some())
            .ok_or_else(|| {
                AppointmentError::ValidationError(format!(
                    "target_days {} from {} is outside the calendar range",
                    target_days, today
                ))
            })?;
        debug!("Searching from {} for {} days", target_date, self.horizon_days);

        for (offset, candidate) in (0..=self.horizon_days).zip(target_date.iter_days()) {
            let mut result = validator.validate(candidate, request);

            if !result.is_valid {
                continue;
            }

            result.skipped_days = offset;
            result.skipped_reasons = days_between(target_date, candidate)
                .flat_map(|day| validator.day_off_reasons(day, request))
                .collect();

            info!("Follow-up date found: {} ({} days skipped)", candidate, offset);
            return Ok(result);
        }

        warn!("No bookable date within {} days of {}", self.horizon_days, target_date);
        Err(AppointmentError::SearchExhausted {
            target_date,
            horizon_days: self.horizon_days,
        })
    }
}
