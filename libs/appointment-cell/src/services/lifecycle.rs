// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Outpatient visit state machine:
/// scheduled -> confirmed -> checked-in -> in-progress -> completed,
/// with cancelled / no-show reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        let forward = match current_status {
            AppointmentStatus::Scheduled => AppointmentStatus::Confirmed,
            AppointmentStatus::Confirmed => AppointmentStatus::CheckedIn,
            AppointmentStatus::CheckedIn => AppointmentStatus::InProgress,
            AppointmentStatus::InProgress => AppointmentStatus::Completed,
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => return vec![],
        };

        vec![forward, AppointmentStatus::Cancelled, AppointmentStatus::NoShow]
    }

    /// Field edits are only accepted while the visit is still open.
    pub fn ensure_modifiable(&self, current_status: AppointmentStatus) -> Result<(), AppointmentError> {
        if current_status.is_terminal() {
            return Err(AppointmentError::NotModifiable(current_status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_forward_path_is_linear() {
        let lifecycle = AppointmentLifecycleService::new();
        let path = [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::CheckedIn,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
        ];

        for pair in path.windows(2) {
            assert!(lifecycle.validate_status_transition(pair[0], pair[1]).is_ok());
        }

        assert_matches!(
            lifecycle.validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::CheckedIn),
            Err(AppointmentError::InvalidStatusTransition { .. })
        );
    }

    #[test]
    fn test_cancel_and_no_show_from_any_open_state() {
        let lifecycle = AppointmentLifecycleService::new();
        for status in AppointmentStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(lifecycle.validate_status_transition(status, AppointmentStatus::Cancelled).is_ok());
            assert!(lifecycle.validate_status_transition(status, AppointmentStatus::NoShow).is_ok());
        }
    }

    #[test]
    fn test_terminal_states_are_closed() {
        let lifecycle = AppointmentLifecycleService::new();
        for from in AppointmentStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(lifecycle.get_valid_transitions(from).is_empty());
            for to in AppointmentStatus::ALL {
                assert_matches!(
                    lifecycle.validate_status_transition(from, to),
                    Err(AppointmentError::InvalidStatusTransition { .. })
                );
            }
        }
    }

    #[test]
    fn test_no_self_transitions() {
        let lifecycle = AppointmentLifecycleService::new();
        for status in AppointmentStatus::ALL {
            assert!(lifecycle.validate_status_transition(status, status).is_err());
        }
    }

    #[test]
    fn test_completed_cannot_return_to_confirmed() {
        let lifecycle = AppointmentLifecycleService::new();
        assert_matches!(
            lifecycle.validate_status_transition(AppointmentStatus::Completed, AppointmentStatus::Confirmed),
            Err(AppointmentError::InvalidStatusTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Confirmed
            })
        );
    }

    #[test]
    fn test_terminal_appointment_not_modifiable() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle.ensure_modifiable(AppointmentStatus::CheckedIn).is_ok());
        assert_matches!(
            lifecycle.ensure_modifiable(AppointmentStatus::NoShow),
            Err(AppointmentError::NotModifiable(AppointmentStatus::NoShow))
        );
    }
}
