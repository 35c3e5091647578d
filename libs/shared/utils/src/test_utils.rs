use std::path::PathBuf;
use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub backend_api_url: String,
    pub filter_store_dir: PathBuf,
    pub calendar_utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            backend_api_url: "http://localhost:8080".to_string(),
            filter_store_dir: std::env::temp_dir().join("clinic-calendar-tests"),
            calendar_utc_offset_minutes: 0,
        }
    }
}

impl TestConfig {
    pub fn with_backend(backend_api_url: impl Into<String>) -> Self {
        Self {
            backend_api_url: backend_api_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_api_url: self.backend_api_url.clone(),
            jwt_secret: self.jwt_secret.clone(),
            filter_store_dir: self.filter_store_dir.clone(),
            calendar_utc_offset_minutes: self.calendar_utc_offset_minutes,
            backend_timeout_secs: 5,
            server_port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "doctor")
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            name: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }
}

/// Canned clinic backend payloads, shaped like the upstream camelCase JSON.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn appointment(id: &str, start: &str, end: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "scheduledStart": start,
            "scheduledEnd": end,
            "status": status,
            "doctorName": "Dr. Ng",
            "doctorFullName": "Dr. Mei Ng",
            "patientName": "Sam",
            "patientFullName": "Sam Okafor",
            "reason": "Follow-up",
            "symptomsOns": null,
            "symptomsSever": null,
            "currentMedication": null,
            "notes": null
        })
    }

    pub fn user_info(user: &TestUser) -> serde_json::Value {
        json!({
            "id": user.id,
            "email": user.email,
            "role": user.role,
            "fullName": "Test User"
        })
    }

    pub fn medical_report(appointment_id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": "report-1",
            "appointmentId": appointment_id,
            "status": status,
            "diagnosis": "Seasonal allergies",
            "treatmentPlan": "Antihistamines",
            "prescriptions": ["Cetirizine 10mg"],
            "notes": null,
            "followUpDate": null
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "success": false,
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_backend("http://127.0.0.1:9999").to_app_config();

        assert_eq!(config.backend_api_url, "http://127.0.0.1:9999");
        assert!(config.is_configured());
    }

    #[test]
    fn test_user_creation() {
        let user = TestUser::doctor("doc@example.com");
        let user_model = user.to_user();
        assert_eq!(user_model.role.as_deref(), Some("doctor"));
        assert_eq!(user_model.id, user.id);
    }

    #[test]
    fn test_jwt_token_creation() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_test_token(&user, "test-secret", Some(1));
        assert_eq!(token.split('.').count(), 3);
    }
}
