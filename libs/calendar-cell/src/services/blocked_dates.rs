// libs/calendar-cell/src/services/blocked_dates.rs
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{BlockedDate, BlockedDateKind, CalendarError, NewBlockedDate};

/// Point-in-time view of the blocked-date registry. All queries are pure.
#[derive(Debug, Clone, Default)]
pub struct BlockedDateSet {
    entries: Vec<BlockedDate>,
}

impl BlockedDateSet {
    pub fn new(entries: Vec<BlockedDate>) -> Self {
        Self { entries }
    }

    /// Holiday covering the date. Global holidays always apply; scoped ones
    /// only when the scope matches the requested room/doctor.
    pub fn holiday_on(
        &self,
        date: NaiveDate,
        room_id: Option<&str>,
        doctor_id: Option<&str>,
    ) -> Option<&BlockedDate> {
        self.entries.iter().find(|bd| {
            bd.date == date
                && bd.kind == BlockedDateKind::Holiday
                && scope_matches(bd.room_id.as_deref(), room_id)
                && scope_matches(bd.doctor_id.as_deref(), doctor_id)
        })
    }

    pub fn doctor_leave_on(&self, date: NaiveDate, doctor_id: &str) -> Option<&BlockedDate> {
        self.entries.iter().find(|bd| {
            bd.date == date
                && bd.kind == BlockedDateKind::DoctorLeave
                && bd.doctor_id.as_deref() == Some(doctor_id)
        })
    }

    /// Entry blocking a room (and optionally one doctor) on a date. A
    /// doctor-scoped entry only blocks when that doctor is being asked about.
    /// Leave follows the doctor into every room.
    pub fn blocking(
        &self,
        date: NaiveDate,
        room_id: &str,
        doctor_id: Option<&str>,
    ) -> Option<&BlockedDate> {
        self.entries.iter().find(|bd| {
            bd.date == date
                && match bd.kind {
                    BlockedDateKind::DoctorLeave => {
                        doctor_id.is_some() && bd.doctor_id.as_deref() == doctor_id
                    }
                    BlockedDateKind::Holiday => {
                        scope_matches(bd.room_id.as_deref(), Some(room_id))
                            && scope_matches(bd.doctor_id.as_deref(), doctor_id)
                    }
                }
        })
    }

    /// Lenient lookup used by the calendar UI: an unspecified scope on either
    /// side matches.
    pub fn is_date_blocked(
        &self,
        date: NaiveDate,
        room_id: Option<&str>,
        doctor_id: Option<&str>,
    ) -> Option<&BlockedDate> {
        self.entries.iter().find(|bd| {
            bd.date == date
                && lenient_matches(bd.room_id.as_deref(), room_id)
                && lenient_matches(bd.doctor_id.as_deref(), doctor_id)
        })
    }
}

fn scope_matches(entry_scope: Option<&str>, requested: Option<&str>) -> bool {
    match entry_scope {
        None => true,
        Some(scope) => requested == Some(scope),
    }
}

fn lenient_matches(entry_scope: Option<&str>, requested: Option<&str>) -> bool {
    match (entry_scope, requested) {
        (Some(scope), Some(requested)) => scope == requested,
        _ => true,
    }
}

/// Holidays and doctor leave. Owned by the configuration collaborator; the
/// scheduling core only ever takes snapshots.
#[derive(Debug)]
pub struct BlockedDateRegistry {
    inner: RwLock<BlockedDateSet>,
}

impl BlockedDateRegistry {
    pub fn new(entries: Vec<BlockedDate>) -> Self {
        Self {
            inner: RwLock::new(BlockedDateSet::new(entries)),
        }
    }

    pub async fn snapshot(&self) -> BlockedDateSet {
        self.inner.read().await.clone()
    }

    /// All entries ordered by date.
    pub async fn list(&self) -> Vec<BlockedDate> {
        let mut entries = self.inner.read().await.entries.clone();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    pub async fn add(&self, request: NewBlockedDate) -> Result<BlockedDate, CalendarError> {
        if request.reason.trim().is_empty() {
            return Err(CalendarError::ValidationError("Blocked date reason is required".to_string()));
        }

        if request.kind == BlockedDateKind::DoctorLeave && request.doctor_id.is_none() {
            return Err(CalendarError::ValidationError(
                "Doctor leave must name the doctor".to_string(),
            ));
        }

        let blocked = BlockedDate {
            id: format!("blocked-{}", Uuid::new_v4()),
            date: request.date,
            kind: request.kind,
            room_id: request.room_id,
            doctor_id: request.doctor_id,
            reason: request.reason.trim().to_string(),
            can_force_book: request.can_force_book,
        };

        self.inner.write().await.entries.push(blocked.clone());
        info!("Blocked date {} added for {} ({:?})", blocked.id, blocked.date, blocked.kind);

        Ok(blocked)
    }

    pub async fn remove(&self, id: &str) -> Result<BlockedDate, CalendarError> {
        let mut guard = self.inner.write().await;
        let position = guard
            .entries
            .iter()
            .position(|bd| bd.id == id)
            .ok_or_else(|| {
                warn!("Attempted to remove unknown blocked date {}", id);
                CalendarError::BlockedDateNotFound(id.to_string())
            })?;

        let removed = guard.entries.remove(position);
        debug!("Blocked date {} removed", removed.id);
        Ok(removed)
    }

    pub async fn is_date_blocked(
        &self,
        date: NaiveDate,
        room_id: Option<&str>,
        doctor_id: Option<&str>,
    ) -> Option<BlockedDate> {
        self.inner
            .read()
            .await
            .is_date_blocked(date, room_id, doctor_id)
            .cloned()
    }
}
