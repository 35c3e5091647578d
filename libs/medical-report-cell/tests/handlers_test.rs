use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use medical_report_cell::api::MedicalReportService;
use medical_report_cell::{medical_report_routes, ReportContent, ReportStatus};
use shared_backend::{BackendClient, ServiceError};
use shared_utils::test_utils::{JwtTestUtils, MockBackendResponses, TestConfig, TestUser};

fn app(config: &TestConfig) -> Router {
    medical_report_routes(config.to_arc())
}

fn request(verb: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(verb)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_report_is_not_an_error() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend(mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/medical-reports/appointment/appt-9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&mock_server)
        .await;

    let service = MedicalReportService::with_backend(BackendClient::new(&config.to_app_config()));
    let report = service.get_by_appointment_id("appt-9", "tok").await.unwrap();
    assert!(report.is_none());
}

#[tokio::test]
async fn test_doctor_saves_draft() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend(mock_server.uri());
    let doctor = TestUser::doctor("doctor@example.com");
    let token = JwtTestUtils::create_test_token(&doctor, &config.jwt_secret, Some(1));

    Mock::given(method("PUT"))
        .and(path("/api/medical-reports/appointment/appt-1/draft"))
        .and(body_partial_json(json!({ "treatmentPlan": "Rest" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::medical_report("appt-1", "DRAFT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app(&config)
        .oneshot(request("PUT", "/appt-1/draft", &token, Some(json!({ "treatmentPlan": "Rest" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["report"]["status"], "DRAFT");
}

#[tokio::test]
async fn test_completion_without_diagnosis_never_reaches_backend() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend(mock_server.uri());
    let doctor = TestUser::doctor("doctor@example.com");
    let token = JwtTestUtils::create_test_token(&doctor, &config.jwt_secret, Some(1));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = app(&config)
        .oneshot(request("POST", "/appt-1/complete", &token, Some(json!({ "notes": "n/a" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_report() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/api/medical-reports/appointment/appt-1/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": MockBackendResponses::medical_report("appt-1", "COMPLETED")
        })))
        .mount(&mock_server)
        .await;

    let service = MedicalReportService::with_backend(BackendClient::new(&config.to_app_config()));
    let content = ReportContent {
        diagnosis: Some("Seasonal allergies".to_string()),
        ..ReportContent::default()
    };
    let report = service.complete_report("appt-1", &content, "tok").await.unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.prescriptions, vec!["Cetirizine 10mg".to_string()]);
}

#[tokio::test]
async fn test_blank_diagnosis_is_rejected_by_the_service() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend(mock_server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = MedicalReportService::with_backend(BackendClient::new(&config.to_app_config()));
    let content = ReportContent {
        diagnosis: Some("   ".to_string()),
        treatment_plan: Some("Rest".to_string()),
        ..ReportContent::default()
    };
    let result = service.complete_report("appt-1", &content, "tok").await;
    assert_matches!(result, Err(ServiceError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_patient_cannot_write_reports() {
    let config = TestConfig::default();
    let patient = TestUser::patient("patient@example.com");
    let token = JwtTestUtils::create_test_token(&patient, &config.jwt_secret, Some(1));

    let response = app(&config)
        .oneshot(request("PUT", "/appt-1/draft", &token, Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
