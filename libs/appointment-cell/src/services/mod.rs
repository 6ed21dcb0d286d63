pub mod availability;
pub mod book;
pub mod finder;
pub mod lifecycle;
pub mod listing;
pub mod scheduling;
pub mod store;
pub mod validation;

pub use availability::AvailabilityResolver;
pub use book::AppointmentBook;
pub use finder::NextSlotFinder;
pub use lifecycle::AppointmentLifecycleService;
pub use listing::{AppointmentListing, AppointmentQuery};
pub use scheduling::SchedulingService;
pub use store::AppointmentStore;
pub use validation::DateValidator;
