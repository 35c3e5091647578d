// libs/calendar-cell/src/services/appointment.rs
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_backend::client::path_segment;
use shared_backend::{BackendClient, ServiceError};
use shared_config::AppConfig;

use crate::models::Appointment;

/// Decodes each record on its own; malformed ones are logged and skipped.
pub fn decode_appointments(records: Vec<Value>) -> Vec<Appointment> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Appointment>(record.clone()) {
            Ok(appointment) => Some(appointment),
            Err(e) => {
                let id = record.get("id").map(Value::to_string).unwrap_or_else(|| "<none>".to_string());
                warn!("Skipping unreadable appointment {}: {}", id, e);
                None
            }
        })
        .collect()
}

/// Read access to appointments held by the clinic backend.
pub struct AppointmentService {
    backend: BackendClient,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(BackendClient::new(config))
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn get_appointments_by_date_range(
        &self,
        start_iso: &str,
        end_iso: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, ServiceError> {
        debug!("Fetching appointments between {} and {}", start_iso, end_iso);

        let records: Vec<Value> = self
            .backend
            .get(
                "/api/appointments/date-range",
                auth_token,
                &[("startDate", start_iso), ("endDate", end_iso)],
            )
            .await?;

        let total = records.len();
        let appointments = decode_appointments(records);
        info!("Fetched {} appointments for range ({} unreadable)", appointments.len(), total - appointments.len());
        Ok(appointments)
    }

    pub async fn get_appointment_by_id(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Appointment, ServiceError> {
        debug!("Fetching appointment {}", appointment_id);

        let path = format!("/api/appointments/{}", path_segment(appointment_id));
        self.backend.get(&path, auth_token, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_records_do_not_hide_good_ones() {
        let records = vec![
            json!({ "id": "good", "scheduledStart": "2025-10-14T09:00:00Z", "scheduledEnd": "2025-10-14T09:30:00Z" }),
            json!({ "id": "no-end", "scheduledStart": "2025-10-14T10:00:00Z", "scheduledEnd": null }),
            json!({ "id": null, "scheduledStart": "2025-10-14T10:00:00Z", "scheduledEnd": "2025-10-14T10:30:00Z" }),
            json!({ "id": "garbled", "scheduledStart": "yesterday", "scheduledEnd": "2025-10-14T10:30:00Z" }),
        ];

        let appointments = decode_appointments(records);
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "good");
    }
}
