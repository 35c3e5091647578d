use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};

use shared_models::auth::{User, UserRole};
use shared_models::error::AppError;
use shared_utils::extractor::{require_calendar_role, require_role};

use crate::models::{PatientPersonalInfo, PersonalInfo, ProfessionalInfo, WorkSchedule};
use crate::services::UserService;

#[axum::debug_handler]
pub async fn get_personal_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<PersonalInfo>, AppError> {
    require_calendar_role(&user)?;
    let info = service.get_personal_info(auth.token()).await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn update_personal_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<PersonalInfo>,
) -> Result<Json<PersonalInfo>, AppError> {
    require_calendar_role(&user)?;
    let info = service
        .update_personal_info(&request, auth.token())
        .await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn get_patient_personal_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<PatientPersonalInfo>, AppError> {
    require_role(&user, UserRole::Patient)?;
    let info = service
        .get_patient_personal_info(auth.token())
        .await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn update_patient_personal_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<PatientPersonalInfo>,
) -> Result<Json<PatientPersonalInfo>, AppError> {
    require_role(&user, UserRole::Patient)?;
    let info = service
        .update_patient_personal_info(&request, auth.token())
        .await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn get_professional_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<ProfessionalInfo>, AppError> {
    require_role(&user, UserRole::Doctor)?;
    let info = service.get_professional_info(auth.token()).await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn update_professional_info(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<ProfessionalInfo>,
) -> Result<Json<ProfessionalInfo>, AppError> {
    require_role(&user, UserRole::Doctor)?;
    let info = service
        .update_professional_info(&request, auth.token())
        .await?;
    Ok(Json(info))
}

#[axum::debug_handler]
pub async fn get_work_schedule(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<WorkSchedule>, AppError> {
    require_role(&user, UserRole::Doctor)?;
    let schedule = service.get_work_schedule(auth.token()).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn update_work_schedule(
    State(service): State<Arc<UserService>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<WorkSchedule>,
) -> Result<Json<WorkSchedule>, AppError> {
    require_role(&user, UserRole::Doctor)?;
    request.validate().map_err(AppError::ValidationError)?;

    let schedule = service
        .update_work_schedule(&request, auth.token())
        .await?;
    Ok(Json(schedule))
}
