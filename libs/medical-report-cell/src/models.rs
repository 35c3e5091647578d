use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    #[serde(alias = "draft")]
    Draft,
    #[serde(alias = "completed")]
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: String,
    pub appointment_id: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}

/// Editable report body sent for both drafts and completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}

impl ReportContent {
    /// A report can only be completed once it carries a diagnosis.
    pub fn validate_for_completion(&self) -> Result<(), String> {
        match self.diagnosis.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => Ok(()),
            _ => Err("A diagnosis is required to complete the report".to_string()),
        }
    }
}
