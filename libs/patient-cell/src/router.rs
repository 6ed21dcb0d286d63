use std::sync::Arc;
use axum::{routing::get, Router};

use crate::handlers::*;
use crate::services::PatientDirectory;

pub fn create_patient_router(directory: Arc<PatientDirectory>) -> Router {
    Router::new()
        .route("/search", get(search_patients))
        .route("/{id}", get(get_patient))
        .with_state(directory)
}
