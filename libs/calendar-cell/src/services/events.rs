// libs/calendar-cell/src/services/events.rs
use chrono::FixedOffset;
use tracing::warn;

use shared_models::auth::UserRole;

use crate::models::{Appointment, Event, EventDetail, Participant};
use crate::services::status::map_status;

const UNKNOWN_DOCTOR: &str = "Unknown doctor";
const UNKNOWN_PATIENT: &str = "Unknown patient";

pub fn detail_route(role: UserRole, appointment_id: &str) -> String {
    match role {
        UserRole::Doctor => format!("/calendar/appointment/{}", appointment_id),
        UserRole::Patient => format!("/patient-calendar/appointment/{}", appointment_id),
    }
}

/// Projects an appointment into calendar local time for the given viewer.
/// `None` when either end cannot be expressed in local time.
pub fn to_event(appointment: &Appointment, role: UserRole, offset: FixedOffset) -> Option<Event> {
    let start = appointment.scheduled_start.naive_utc().checked_add_offset(offset)?;
    let end = appointment.scheduled_end.naive_utc().checked_add_offset(offset)?;

    let doctor_name = appointment
        .doctor_display_name()
        .unwrap_or(UNKNOWN_DOCTOR)
        .to_string();
    let patient_name = appointment
        .patient_display_name()
        .unwrap_or(UNKNOWN_PATIENT)
        .to_string();

    // Each side sees the other participant as the event title.
    let title = match role {
        UserRole::Doctor => patient_name.clone(),
        UserRole::Patient => doctor_name.clone(),
    };

    Some(Event {
        id: appointment.id.clone(),
        title,
        status: map_status(appointment.status.as_deref()),
        start,
        end,
        time_label: format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        doctor_name,
        patient_name,
        clinical: appointment.clinical_fields(),
        detail_route: detail_route(role, &appointment.id),
    })
}

pub fn to_events(appointments: &[Appointment], role: UserRole, offset: FixedOffset) -> Vec<Event> {
    appointments
        .iter()
        .filter_map(|a| {
            let event = to_event(a, role, offset);
            if event.is_none() {
                warn!("Skipping appointment {} outside the local date range", a.id);
            }
            event
        })
        .collect()
}

impl EventDetail {
    pub fn from_event(event: &Event, role: UserRole) -> Self {
        let doctor = Participant {
            role: "Doctor".to_string(),
            name: event.doctor_name.clone(),
        };
        let patient = Participant {
            role: "Patient".to_string(),
            name: event.patient_name.clone(),
        };
        let participants = match role {
            UserRole::Doctor => vec![patient, doctor],
            UserRole::Patient => vec![doctor, patient],
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.start.date(),
            time_label: event.time_label.clone(),
            status: event.status,
            status_label: event.status.label().to_string(),
            participants,
            clinical: event.clinical.clone(),
            detail_route: event.detail_route.clone(),
        }
    }
}
