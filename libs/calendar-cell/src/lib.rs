pub mod handlers;
pub mod models;
pub mod router;
pub mod seed;
pub mod services;
pub mod state;

pub use models::*;
pub use services::*;
pub use state::CalendarState;
pub use router::calendar_routes;
