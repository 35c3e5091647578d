use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_models::auth::{User, UserRole};
use shared_models::error::AppError;
use shared_utils::extractor::{require_calendar_role, require_role};

use crate::models::ReportContent;
use crate::services::MedicalReportService;

#[axum::debug_handler]
pub async fn get_report(
    State(service): State<Arc<MedicalReportService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    require_calendar_role(&user)?;

    let report = service
        .get_by_appointment_id(&appointment_id, auth.token())
        .await?;

    Ok(Json(json!({
        "appointmentId": appointment_id,
        "exists": report.is_some(),
        "report": report
    })))
}

#[axum::debug_handler]
pub async fn save_draft(
    State(service): State<Arc<MedicalReportService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
    Json(content): Json<ReportContent>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, UserRole::Doctor)?;

    let report = service
        .save_draft(&appointment_id, &content, auth.token())
        .await?;

    Ok(Json(json!({
        "success": true,
        "report": report,
        "message": "Draft saved"
    })))
}

#[axum::debug_handler]
pub async fn complete_report(
    State(service): State<Arc<MedicalReportService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
    Json(content): Json<ReportContent>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, UserRole::Doctor)?;
    content
        .validate_for_completion()
        .map_err(AppError::ValidationError)?;

    let report = service
        .complete_report(&appointment_id, &content, auth.token())
        .await?;

    Ok(Json(json!({
        "success": true,
        "report": report,
        "message": "Report completed"
    })))
}
