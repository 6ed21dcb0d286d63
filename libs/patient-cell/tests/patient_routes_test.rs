use std::io::Write;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use patient_cell::{create_patient_router, services::patient::demo_patients, PatientDirectory};
use shared_config::AppConfig;

fn directory() -> Arc<PatientDirectory> {
    Arc::new(PatientDirectory::new(demo_patients()).unwrap())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_search_endpoint() {
    let app = create_patient_router(directory());

    let response = app
        .oneshot(Request::builder().uri("/search?q=somchai").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["patients"][0]["hn"], "HN100000");
}

#[tokio::test]
async fn test_get_patient_not_found() {
    let app = create_patient_router(directory());

    let response = app
        .oneshot(Request::builder().uri("/patient-999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_load_from_configured_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let patients = &demo_patients()[..3];
    file.write_all(serde_json::to_string(patients).unwrap().as_bytes()).unwrap();

    let config = AppConfig {
        patient_data_path: Some(file.path().display().to_string()),
        ..AppConfig::default()
    };

    let directory = PatientDirectory::load(&config).unwrap();
    assert_eq!(directory.all().len(), 3);
}
