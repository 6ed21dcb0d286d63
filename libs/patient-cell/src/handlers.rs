use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{PatientError, PatientSearchQuery};
use crate::services::PatientDirectory;

impl From<PatientError> for AppError {
    fn from(error: PatientError) -> Self {
        match error {
            PatientError::NotFound(_) => AppError::NotFound(error.to_string()),
            PatientError::ValidationError(_) => AppError::ValidationError(error.to_string()),
            PatientError::ReferenceData(_) => AppError::Internal(error.to_string()),
        }
    }
}

pub async fn get_patient(
    State(directory): State<Arc<PatientDirectory>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.require(&patient_id)?;
    Ok(Json(json!(patient)))
}

pub async fn search_patients(
    State(directory): State<Arc<PatientDirectory>>,
    Query(query): Query<PatientSearchQuery>,
) -> Json<Value> {
    let patients = directory.search(&query.q, query.limit);

    Json(json!({
        "patients": patients,
        "total": patients.len()
    }))
}
