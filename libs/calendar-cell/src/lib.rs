pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Appointment, CalendarGrid, CalendarView, DayCell, Event, EventDetail, FilterKind, Filters,
    UiStatus, ViewMode,
};
pub use router::{calendar_routes, calendar_routes_with_store};

pub mod api {
    pub use crate::services::calendar::CalendarService;
    pub use crate::services::filter::apply_filters;
    pub use crate::services::range::DateRange;
    pub use crate::services::state::{CalendarAction, CalendarState};
    pub use crate::services::status::map_status;
    pub use crate::services::store::{FileFilterStore, FilterStore, MemoryFilterStore};
}
