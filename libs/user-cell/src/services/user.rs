use tracing::{debug, info};

use shared_backend::{BackendClient, ServiceError};
use shared_config::AppConfig;

use crate::models::{PatientPersonalInfo, PersonalInfo, ProfessionalInfo, WorkSchedule};

const PERSONAL_INFO_PATH: &str = "/api/users/personal-info";
const PATIENT_PERSONAL_INFO_PATH: &str = "/api/users/patient/personal-info";
const PROFESSIONAL_INFO_PATH: &str = "/api/users/doctor/professional-info";
const WORK_SCHEDULE_PATH: &str = "/api/users/doctor/work-schedule";

/// Profile reads and writes. Each operation maps to exactly one endpoint;
/// a failed update is reported, never retried under another verb or path.
pub struct UserService {
    backend: BackendClient,
}

impl UserService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(BackendClient::new(config))
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn get_personal_info(&self, auth_token: &str) -> Result<PersonalInfo, ServiceError> {
        debug!("Fetching personal info");
        self.backend.get(PERSONAL_INFO_PATH, auth_token, &[]).await
    }

    pub async fn update_personal_info(
        &self,
        info: &PersonalInfo,
        auth_token: &str,
    ) -> Result<PersonalInfo, ServiceError> {
        let updated = self.backend.put(PERSONAL_INFO_PATH, auth_token, info).await?;
        info!("Personal info updated");
        Ok(updated)
    }

    pub async fn get_patient_personal_info(&self, auth_token: &str) -> Result<PatientPersonalInfo, ServiceError> {
        debug!("Fetching patient personal info");
        self.backend.get(PATIENT_PERSONAL_INFO_PATH, auth_token, &[]).await
    }

    pub async fn update_patient_personal_info(
        &self,
        info: &PatientPersonalInfo,
        auth_token: &str,
    ) -> Result<PatientPersonalInfo, ServiceError> {
        let updated = self.backend.put(PATIENT_PERSONAL_INFO_PATH, auth_token, info).await?;
        info!("Patient personal info updated");
        Ok(updated)
    }

    pub async fn get_professional_info(&self, auth_token: &str) -> Result<ProfessionalInfo, ServiceError> {
        debug!("Fetching professional info");
        self.backend.get(PROFESSIONAL_INFO_PATH, auth_token, &[]).await
    }

    pub async fn update_professional_info(
        &self,
        info: &ProfessionalInfo,
        auth_token: &str,
    ) -> Result<ProfessionalInfo, ServiceError> {
        let updated = self.backend.put(PROFESSIONAL_INFO_PATH, auth_token, info).await?;
        info!("Professional info updated");
        Ok(updated)
    }

    pub async fn get_work_schedule(&self, auth_token: &str) -> Result<WorkSchedule, ServiceError> {
        debug!("Fetching work schedule");
        self.backend.get(WORK_SCHEDULE_PATH, auth_token, &[]).await
    }

    pub async fn update_work_schedule(
        &self,
        schedule: &WorkSchedule,
        auth_token: &str,
    ) -> Result<WorkSchedule, ServiceError> {
        schedule.validate().map_err(ServiceError::InvalidRequest)?;
        let updated = self.backend.put(WORK_SCHEDULE_PATH, auth_token, schedule).await?;
        info!("Work schedule updated ({} days)", schedule.days.len());
        Ok(updated)
    }
}
