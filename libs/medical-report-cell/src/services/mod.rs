pub mod report;

pub use report::MedicalReportService;
