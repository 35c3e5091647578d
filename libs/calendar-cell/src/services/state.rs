// libs/calendar-cell/src/services/state.rs
use chrono::{FixedOffset, NaiveDate};
use tracing::{debug, warn};

use shared_backend::ServiceError;
use shared_models::auth::UserRole;

use crate::models::{
    Appointment, CalendarGrid, CalendarNotice, DialogState, Event, FilterKind, Filters,
    NavDirection, NoticeKind, ViewMode,
};
use crate::services::events::to_events;
use crate::services::filter::apply_filters;
use crate::services::range::DateRange;

/// Identifies one fetch. Only the most recently issued ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchPhase {
    Idle,
    Loading(FetchTicket),
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum CalendarAction {
    Navigate(NavDirection),
    SetView(ViewMode),
    ToggleFilter(FilterKind),
    ReplaceFilters(Filters),
    FetchStarted,
    FetchSucceeded {
        ticket: FetchTicket,
        appointments: Vec<Appointment>,
    },
    FetchFailed {
        ticket: FetchTicket,
        error: ServiceError,
    },
    OpenEvent(String),
    CloseDialog,
    DismissNotice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    FetchIssued(FetchTicket),
    /// The action no longer applies (stale response, unknown event).
    Discarded,
}

/// The whole calendar screen as one value; every change goes through `reduce`.
#[derive(Debug, Clone)]
pub struct CalendarState {
    reference: NaiveDate,
    view: ViewMode,
    range: DateRange,
    pub today: NaiveDate,
    pub filters: Filters,
    pub appointments: Vec<Appointment>,
    pub phase: FetchPhase,
    pub notice: Option<CalendarNotice>,
    pub dialog: DialogState,
    pub needs_fetch: bool,
    next_ticket: u64,
}

pub fn notice_for(error: &ServiceError) -> CalendarNotice {
    if error.is_network() {
        CalendarNotice {
            kind: NoticeKind::Network,
            message: "Unable to reach the clinic server. Check your connection and try again.".to_string(),
        }
    } else {
        CalendarNotice {
            kind: NoticeKind::Data,
            message: format!("Failed to load appointments: {}", error),
        }
    }
}

impl CalendarState {
    /// `None` when `reference` has no representable window for `view`.
    pub fn new(reference: NaiveDate, view: ViewMode, today: NaiveDate, filters: Filters) -> Option<Self> {
        Some(Self {
            reference,
            view,
            range: DateRange::for_view(reference, view)?,
            today,
            filters,
            appointments: Vec::new(),
            phase: FetchPhase::Idle,
            notice: None,
            dialog: DialogState::Closed,
            needs_fetch: true,
            next_ticket: 0,
        })
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    fn move_to(&mut self, reference: NaiveDate, view: ViewMode) -> Outcome {
        match DateRange::for_view(reference, view) {
            Some(range) => {
                self.reference = reference;
                self.view = view;
                self.range = range;
                self.invalidate();
                Outcome::Applied
            }
            None => {
                warn!("No {:?} window around {}, keeping {}", view, reference, self.reference);
                Outcome::Discarded
            }
        }
    }

    fn latest_ticket(&self) -> Option<FetchTicket> {
        self.next_ticket.checked_sub(1).map(FetchTicket)
    }

    fn invalidate(&mut self) {
        self.needs_fetch = true;
        self.dialog = DialogState::Closed;
    }

    pub fn reduce(&mut self, action: CalendarAction) -> Outcome {
        match action {
            CalendarAction::Navigate(direction) => {
                match self.view.step(self.reference, direction, self.today) {
                    Some(reference) => self.move_to(reference, self.view),
                    None => Outcome::Discarded,
                }
            }
            CalendarAction::SetView(view) => self.move_to(self.reference, view),
            CalendarAction::ToggleFilter(kind) => {
                self.filters = self.filters.toggle(kind);
                self.invalidate();
                Outcome::Applied
            }
            CalendarAction::ReplaceFilters(filters) => {
                self.filters = filters;
                self.invalidate();
                Outcome::Applied
            }
            CalendarAction::FetchStarted => {
                let ticket = FetchTicket(self.next_ticket);
                self.next_ticket += 1;
                self.phase = FetchPhase::Loading(ticket);
                self.needs_fetch = false;
                Outcome::FetchIssued(ticket)
            }
            CalendarAction::FetchSucceeded { ticket, appointments } => {
                if Some(ticket) != self.latest_ticket() {
                    debug!("Discarding stale calendar response {:?}", ticket);
                    return Outcome::Discarded;
                }
                let (valid, invalid): (Vec<_>, Vec<_>) =
                    appointments.into_iter().partition(Appointment::has_valid_window);
                for appointment in &invalid {
                    warn!("Dropping appointment {} with start not before end", appointment.id);
                }
                self.appointments = valid;
                self.phase = FetchPhase::Loaded;
                self.notice = None;
                Outcome::Applied
            }
            CalendarAction::FetchFailed { ticket, error } => {
                if Some(ticket) != self.latest_ticket() {
                    debug!("Discarding stale calendar failure {:?}", ticket);
                    return Outcome::Discarded;
                }
                // never show data from a previous range after a failure
                self.appointments.clear();
                self.phase = FetchPhase::Failed;
                self.notice = Some(notice_for(&error));
                self.dialog = DialogState::Closed;
                Outcome::Applied
            }
            CalendarAction::OpenEvent(event_id) => {
                let visible = apply_filters(self.appointments.clone(), &self.filters);
                if visible.iter().any(|a| a.id == event_id) {
                    self.dialog = DialogState::Open { event_id };
                    Outcome::Applied
                } else {
                    Outcome::Discarded
                }
            }
            CalendarAction::CloseDialog => {
                self.dialog = DialogState::Closed;
                Outcome::Applied
            }
            CalendarAction::DismissNotice => {
                self.notice = None;
                Outcome::Applied
            }
        }
    }

    /// Filtered events for the viewer, in calendar local time.
    pub fn visible_events(&self, role: UserRole, offset: FixedOffset) -> Vec<Event> {
        let visible = apply_filters(self.appointments.clone(), &self.filters);
        to_events(&visible, role, offset)
    }

    pub fn grid(&self, role: UserRole, offset: FixedOffset) -> CalendarGrid {
        CalendarGrid::build(&self.range, self.view, self.visible_events(role, offset), self.today)
    }
}
