// libs/calendar-cell/src/services/filter.rs
use crate::models::{Appointment, FilterKind, Filters};
use crate::services::status::map_status;

impl Filters {
    pub fn any_active(&self) -> bool {
        self.upcoming || self.pending || self.cancelled || self.completed
    }

    pub fn is_set(&self, kind: FilterKind) -> bool {
        match kind {
            FilterKind::Upcoming => self.upcoming,
            FilterKind::Pending => self.pending,
            FilterKind::Cancelled => self.cancelled,
            FilterKind::Completed => self.completed,
        }
    }

    fn flag_mut(&mut self, kind: FilterKind) -> &mut bool {
        match kind {
            FilterKind::Upcoming => &mut self.upcoming,
            FilterKind::Pending => &mut self.pending,
            FilterKind::Cancelled => &mut self.cancelled,
            FilterKind::Completed => &mut self.completed,
        }
    }

    /// Flips one flag. Clearing the last active flag resets to "show all".
    pub fn toggle(self, kind: FilterKind) -> Filters {
        let mut next = self;
        let flag = next.flag_mut(kind);
        *flag = !*flag;

        if !next.any_active() {
            return Filters::default();
        }
        next
    }

    pub fn admits(&self, appointment: &Appointment) -> bool {
        if !self.any_active() {
            return true;
        }
        self.is_set(map_status(appointment.status.as_deref()).filter_category())
    }
}

/// Keeps appointments whose status category is switched on; no active flag keeps everything.
pub fn apply_filters(appointments: Vec<Appointment>, filters: &Filters) -> Vec<Appointment> {
    if !filters.any_active() {
        return appointments;
    }
    appointments.into_iter().filter(|a| filters.admits(a)).collect()
}
