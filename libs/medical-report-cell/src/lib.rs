pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{MedicalReport, ReportContent, ReportStatus};
pub use router::medical_report_routes;

pub mod api {
    pub use crate::services::report::MedicalReportService;
}
