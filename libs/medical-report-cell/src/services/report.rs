use tracing::{debug, info};

use shared_backend::client::path_segment;
use shared_backend::{BackendClient, ServiceError};
use shared_config::AppConfig;

use crate::models::{MedicalReport, ReportContent};

pub struct MedicalReportService {
    backend: BackendClient,
}

fn report_path(appointment_id: &str) -> String {
    format!("/api/medical-reports/appointment/{}", path_segment(appointment_id))
}

impl MedicalReportService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(BackendClient::new(config))
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// `Ok(None)` when no report has been started for the appointment.
    pub async fn get_by_appointment_id(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Option<MedicalReport>, ServiceError> {
        debug!("Fetching medical report for appointment {}", appointment_id);

        match self.backend.get(&report_path(appointment_id), auth_token, &[]).await {
            Ok(report) => Ok(Some(report)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn save_draft(
        &self,
        appointment_id: &str,
        content: &ReportContent,
        auth_token: &str,
    ) -> Result<MedicalReport, ServiceError> {
        let path = format!("{}/draft", report_path(appointment_id));
        let report: MedicalReport = self.backend.put(&path, auth_token, content).await?;
        info!("Saved draft report {} for appointment {}", report.id, appointment_id);
        Ok(report)
    }

    pub async fn complete_report(
        &self,
        appointment_id: &str,
        content: &ReportContent,
        auth_token: &str,
    ) -> Result<MedicalReport, ServiceError> {
        content
            .validate_for_completion()
            .map_err(ServiceError::InvalidRequest)?;

        let path = format!("{}/complete", report_path(appointment_id));
        let report: MedicalReport = self.backend.post(&path, auth_token, Some(content)).await?;
        info!("Completed report {} for appointment {}", report.id, appointment_id);
        Ok(report)
    }
}
