// libs/appointment-cell/src/services/validation.rs
use chrono::NaiveDate;
use tracing::debug;

use shared_utils::dates::is_weekend;

use crate::models::{DateValidationChecks, DateValidationResult, ValidationRequest};
use crate::services::availability::AvailabilityResolver;

/// Folds every calendar and capacity rule for one candidate date into a
/// single verdict. All checks run; nothing short-circuits.
#[derive(Debug, Clone, Copy)]
pub struct DateValidator<'a> {
    resolver: AvailabilityResolver<'a>,
}

impl<'a> DateValidator<'a> {
    pub fn new(resolver: AvailabilityResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn checks(&self, date: NaiveDate, request: &ValidationRequest) -> DateValidationChecks {
        let blocked = self.resolver.blocked();
        let holiday = blocked.holiday_on(date, Some(request.room_id.as_str()), Some(request.doctor_id.as_str()));
        let leave = blocked.doctor_leave_on(date, &request.doctor_id);

        DateValidationChecks {
            is_weekend: is_weekend(date),
            is_holiday: holiday.is_some(),
            holiday_name: holiday.map(|bd| bd.reason.clone()),
            is_doctor_leave: leave.is_some(),
            leave_reason: leave.map(|bd| bd.reason.clone()),
            room_capacity: self.resolver.room_day_capacity(date, &request.room_id),
            doctor_capacity: self.resolver.doctor_day_capacity(date, &request.doctor_id),
            patient_existing_appointment: request
                .patient_id
                .as_deref()
                .and_then(|patient_id| self.resolver.book().nearest_for_patient(patient_id, date)),
        }
    }

    pub fn validate(&self, date: NaiveDate, request: &ValidationRequest) -> DateValidationResult {
        let checks = self.checks(date, request);
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if checks.is_weekend {
            warnings.push("weekend".to_string());
        }
        if let Some(name) = &checks.holiday_name {
            warnings.push(format!("holiday: {}", name));
        }
        if let Some(reason) = &checks.leave_reason {
            warnings.push(format!("doctor on leave: {}", reason));
        }
        if checks.room_capacity.is_exhausted() {
            errors.push("room capacity exhausted".to_string());
        }
        if checks.doctor_capacity.is_exhausted() {
            errors.push("doctor capacity exhausted".to_string());
        }
        // Informational only, never blocks.
        if let Some(existing) = &checks.patient_existing_appointment {
            warnings.push(format!(
                "patient has an appointment on {} ({} days away)",
                existing.date, existing.days_away
            ));
        }

        let is_valid = checks.has_capacity() && (request.include_holidays || !checks.is_day_off());

        debug!(
            "Validated {} for room {} / doctor {}: valid={} warnings={} errors={}",
            date,
            request.room_id,
            request.doctor_id,
            is_valid,
            warnings.len(),
            errors.len()
        );

        DateValidationResult {
            is_valid,
            date,
            skipped_days: 0,
            skipped_reasons: Vec::new(),
            checks,
            warnings,
            errors,
        }
    }

    /// Why a day would be passed over by a follow-up search, if it is a day
    /// off. Capacity-only skips are not narrated.
    pub fn day_off_reasons(&self, date: NaiveDate, request: &ValidationRequest) -> Vec<String> {
        if is_weekend(date) {
            return vec![format!("{}: weekend", date)];
        }

        let blocked = self.resolver.blocked();
        let mut reasons = Vec::new();
        if let Some(holiday) = blocked.holiday_on(date, Some(request.room_id.as_str()), Some(request.doctor_id.as_str())) {
            reasons.push(format!("{}: {}", date, holiday.reason));
        }
        if let Some(leave) = blocked.doctor_leave_on(date, &request.doctor_id) {
            reasons.push(format!("{}: {}", date, leave.reason));
        }
        reasons
    }
}
