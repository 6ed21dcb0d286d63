pub mod blocked_dates;
pub mod capacity;
pub mod catalog;

pub use blocked_dates::{BlockedDateRegistry, BlockedDateSet};
pub use capacity::{CapacityDefaults, CapacityPolicy};
pub use catalog::CalendarCatalog;
