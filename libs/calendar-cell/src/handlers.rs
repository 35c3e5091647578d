// libs/calendar-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::require_calendar_role;

use crate::models::{CalendarView, EventDetail, FilterKind, Filters, NavDirection, ViewMode};
use crate::services::state::{CalendarAction, CalendarState, Outcome};
use crate::services::{CalendarService, FilterStore};

/// Router state: the calendar service and the per-user filter store, both
/// built once per router.
#[derive(Clone)]
pub struct CalendarContext {
    pub calendar: Arc<CalendarService>,
    pub filters: Arc<dyn FilterStore>,
}

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Reference date; defaults to today in calendar local time.
    pub date: Option<NaiveDate>,
    pub view: Option<ViewMode>,
    /// Optional step applied to `date` before loading.
    pub nav: Option<NavDirection>,
}

// ==============================================================================
// CALENDAR HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_calendar(
    State(ctx): State<CalendarContext>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, AppError> {
    let role = require_calendar_role(&user)?;
    let service = &ctx.calendar;

    let today = service.today();
    let reference = query.date.unwrap_or(today);
    let view = query.view.unwrap_or_default();
    let filters = ctx.filters.load(&user.id).await;
    let mut state = CalendarState::new(reference, view, today, filters).ok_or_else(|| {
        AppError::BadRequest(format!("Date {} is outside the supported calendar range", reference))
    })?;
    if let Some(direction) = query.nav {
        if state.reduce(CalendarAction::Navigate(direction)) == Outcome::Discarded {
            return Err(AppError::BadRequest(format!(
                "Cannot move {:?} from {} in {:?} view",
                direction, reference, view
            )));
        }
    }

    debug!("Loading {:?} calendar at {} for user {}", state.view(), state.reference(), user.id);
    service.load(&mut state, auth.token()).await;

    Ok(Json(service.render(&state, role)))
}

#[axum::debug_handler]
pub async fn get_appointment_detail(
    State(ctx): State<CalendarContext>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
) -> Result<Json<EventDetail>, AppError> {
    let role = require_calendar_role(&user)?;

    let detail = ctx
        .calendar
        .event_detail(&appointment_id, role, auth.token())
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound("Appointment not found".to_string())
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(detail))
}

// ==============================================================================
// FILTER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_filters(
    State(ctx): State<CalendarContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Filters>, AppError> {
    require_calendar_role(&user)?;
    Ok(Json(ctx.filters.load(&user.id).await))
}

#[axum::debug_handler]
pub async fn update_filters(
    State(ctx): State<CalendarContext>,
    Extension(user): Extension<User>,
    Json(filters): Json<Filters>,
) -> Result<Json<Filters>, AppError> {
    require_calendar_role(&user)?;

    ctx.filters
        .save(&user.id, &filters)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(filters))
}

#[axum::debug_handler]
pub async fn toggle_filter(
    State(ctx): State<CalendarContext>,
    Extension(user): Extension<User>,
    Path(kind): Path<String>,
) -> Result<Json<Filters>, AppError> {
    require_calendar_role(&user)?;
    let kind: FilterKind = kind.parse().map_err(AppError::BadRequest)?;

    let filters = ctx
        .filters
        .update(&user.id, &|current| current.toggle(kind))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(filters))
}
