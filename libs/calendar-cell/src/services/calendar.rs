// libs/calendar-cell/src/services/calendar.rs
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use tracing::{info, warn};

use shared_backend::{BackendClient, ServiceError};
use shared_config::AppConfig;
use shared_models::auth::UserRole;

use crate::models::{CalendarView, EventDetail};
use crate::services::appointment::AppointmentService;
use crate::services::events::to_event;
use crate::services::state::{CalendarAction, CalendarState, Outcome};

/// Drives a `CalendarState` through one fetch and renders the result.
pub struct CalendarService {
    appointments: AppointmentService,
    offset: FixedOffset,
}

pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt).unwrap_or_else(|| {
        warn!("Calendar UTC offset of {} minutes is out of range, using UTC", minutes);
        Utc.fix()
    })
}

impl CalendarService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(
            BackendClient::new(config),
            offset_from_minutes(config.calendar_utc_offset_minutes),
        )
    }

    pub fn with_backend(backend: BackendClient, offset: FixedOffset) -> Self {
        Self {
            appointments: AppointmentService::with_backend(backend),
            offset,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    /// Fetches the state's current range. The response is applied only if no
    /// newer fetch was started on the same state in the meantime.
    pub async fn load(&self, state: &mut CalendarState, auth_token: &str) -> Outcome {
        let ticket = match state.reduce(CalendarAction::FetchStarted) {
            Outcome::FetchIssued(ticket) => ticket,
            other => return other,
        };

        let (start_iso, end_iso) = state.range().to_iso_pair(self.offset);
        let action = match self
            .appointments
            .get_appointments_by_date_range(&start_iso, &end_iso, auth_token)
            .await
        {
            Ok(appointments) => CalendarAction::FetchSucceeded { ticket, appointments },
            Err(error) => {
                warn!("Calendar fetch for {} .. {} failed: {}", start_iso, end_iso, error);
                CalendarAction::FetchFailed { ticket, error }
            }
        };

        state.reduce(action)
    }

    pub fn render(&self, state: &CalendarState, role: UserRole) -> CalendarView {
        let grid = state.grid(role, self.offset);
        let total_events = grid.event_count();

        info!(
            "Rendered {:?} view for {} with {} events",
            state.view(), state.reference(), total_events
        );

        CalendarView {
            date: state.reference(),
            view: state.view(),
            today: state.today,
            range: state.range().bounds(),
            filters: state.filters,
            total_events,
            grid,
            notice: state.notice.clone(),
        }
    }

    pub async fn event_detail(
        &self,
        appointment_id: &str,
        role: UserRole,
        auth_token: &str,
    ) -> Result<EventDetail, ServiceError> {
        let appointment = self
            .appointments
            .get_appointment_by_id(appointment_id, auth_token)
            .await?;
        let event = to_event(&appointment, role, self.offset).ok_or_else(|| {
            ServiceError::Decode(format!("appointment {} is outside the local date range", appointment.id))
        })?;
        Ok(EventDetail::from_event(&event, role))
    }
}
